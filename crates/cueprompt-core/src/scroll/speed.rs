//! Speed slider mapping.
//!
//! The control value is an integer in [200, 100000] where smaller means
//! faster. A log-compressed curve maps it onto roughly 0.1..1000 px/s so
//! each slider step feels like an even speed change across the whole range.
//! UI affordances (the time-per-line readout) derive from the same formula,
//! so the curve must not be altered.

/// Values above this are clamped before the mapping so scrolling never
/// reaches a full stop.
const CONTROL_CEILING: f64 = 99_999.0;

const MIN_SPEED: f64 = 0.1;
const MAX_SPEED: f64 = 1000.0;

/// Map a raw control value to the actual scroll speed in pixels/sec.
///
/// Monotonically decreasing over [200, 99999].
pub fn actual_speed(control_value: u32) -> f64 {
    let v = f64::from(control_value).min(CONTROL_CEILING);
    let numerator = 100_000.0 - v + 1000.0;
    let log_value = (numerator / 1000.0).log10();
    MIN_SPEED + (MAX_SPEED - MIN_SPEED) * (log_value / 3.0)
}

/// Estimated seconds to scroll one text line at the given control value.
/// `line_height` is in the same pixel units as the speed mapping.
pub fn seconds_per_line(control_value: u32, line_height: f64) -> f64 {
    line_height / actual_speed(control_value)
}

/// Conventional line height for a font size (1.2x).
pub fn line_height_for_font(font_size: u32) -> f64 {
    f64::from(font_size) * 1.2
}
