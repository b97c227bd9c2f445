//! Display surface seam.
//!
//! The core never owns rendering state: a surface is a thin sink/source the
//! engine writes text and positions into and reads extents back from. Hosts
//! implement this for whatever actually draws (a window, a terminal pane).

/// One of the two mirrored prompter outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceId {
    Primary,
    Secondary,
}

/// Host-implemented display target, injected at construction.
pub trait DisplaySurface: Send {
    /// Replace the text shown on this surface.
    fn set_visible_text(&mut self, text: &str);

    /// Current scrollable range in logical pixels. May change whenever the
    /// visible text or the surface geometry changes.
    fn max_scroll_extent(&self) -> f64;

    /// Currently applied scroll position.
    fn scroll_position(&self) -> f64;

    /// Apply a scroll position without emitting a change notification.
    /// The surface clamps to its own range; callers pass unclamped values.
    fn set_scroll_position(&mut self, position: f64);
}
