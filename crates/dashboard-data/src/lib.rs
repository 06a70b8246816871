//! Data layer for the sales dashboard.
//!
//! Reads the uploaded spreadsheet, cleans it into [`SalesRecord`]s,
//! computes the five chart aggregations and runs the top-level pipeline
//! that the UI and the plain-text report consume.
//!
//! [`SalesRecord`]: dashboard_core::models::SalesRecord

pub mod aggregator;
pub mod analysis;
pub mod cleaning;
pub mod reader;
pub mod report;

pub use dashboard_core as core;
