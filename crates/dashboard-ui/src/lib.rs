//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, the header and tab components, the raw and cleaned
//! table views, the five chart views and the application event loop built
//! on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
