//! Utility functions module
//!
//! Contains helper functions for latency formatting and layout unit
//! conversion.

pub mod units;

// Re-export commonly used functions
pub use units::{
    columns_to_units, format_latency, rows_to_units, units_to_columns, units_to_rows,
};
