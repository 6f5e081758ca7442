//! Units formatting and conversion utilities
//!
//! Human-readable latency strings and conversions between layout units
//! and terminal cells.

use std::time::Duration;

/// Layout units covered by one terminal column
pub const UNITS_PER_COLUMN: f64 = 16.0;
/// Layout units covered by one terminal row
pub const UNITS_PER_ROW: f64 = 32.0;

/// Format latency as whole milliseconds, truncating any fraction
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use tapreflex::util::units::format_latency;
///
/// assert_eq!(format_latency(Duration::from_millis(126)), "126 ms");
/// assert_eq!(format_latency(Duration::from_micros(99_900)), "99 ms");
/// ```
pub fn format_latency(duration: Duration) -> String {
    format!("{} ms", duration.as_millis())
}

/// Convert a cell count to layout units along the horizontal axis
pub fn columns_to_units(columns: u16) -> f64 {
    columns as f64 * UNITS_PER_COLUMN
}

/// Convert a cell count to layout units along the vertical axis
pub fn rows_to_units(rows: u16) -> f64 {
    rows as f64 * UNITS_PER_ROW
}

/// Convert horizontal layout units to whole columns, rounding down
pub fn units_to_columns(units: f64) -> u16 {
    to_cells(units / UNITS_PER_COLUMN)
}

/// Convert vertical layout units to whole rows, rounding down
pub fn units_to_rows(units: f64) -> u16 {
    to_cells(units / UNITS_PER_ROW)
}

fn to_cells(value: f64) -> u16 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(u16::MAX as f64) as u16
    } else {
        0
    }
}
