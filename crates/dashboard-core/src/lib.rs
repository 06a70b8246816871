//! Shared domain types for the sales dashboard.
//!
//! Holds the sales record model and spreadsheet schema, the error type,
//! command-line settings and number formatting helpers used by the data and
//! UI crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
