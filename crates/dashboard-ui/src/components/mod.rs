pub mod header;
pub mod share_bar;
pub mod tab_bar;
