//! Cross-surface scroll mirroring.
//!
//! Both surfaces integrate independently at the same speed; the coordinator
//! only corrects the drift that accumulates from separate floating-point
//! integration. Updates go through the surface's silent setter and are
//! skipped inside an epsilon band, so a mirrored update can never re-enter
//! the coordinator and oscillate.

use crate::surface::DisplaySurface;

/// Minimum position difference, in logical units, worth correcting.
pub const DEFAULT_SYNC_EPSILON: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct DisplaySyncCoordinator {
    epsilon: f64,
}

impl Default for DisplaySyncCoordinator {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_SYNC_EPSILON,
        }
    }
}

impl DisplaySyncCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Mirror `value` onto `target` if it is more than epsilon away from the
    /// target's current position. Returns whether an update was applied.
    pub fn mirror(&self, value: f64, target: &mut dyn DisplaySurface) -> bool {
        if (target.scroll_position() - value).abs() > self.epsilon {
            target.set_scroll_position(value);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSurface {
        position: f64,
        sets: usize,
    }

    impl CountingSurface {
        fn at(position: f64) -> Self {
            Self { position, sets: 0 }
        }
    }

    impl DisplaySurface for CountingSurface {
        fn set_visible_text(&mut self, _text: &str) {}

        fn max_scroll_extent(&self) -> f64 {
            10_000.0
        }

        fn scroll_position(&self) -> f64 {
            self.position
        }

        fn set_scroll_position(&mut self, position: f64) {
            self.position = position;
            self.sets += 1;
        }
    }

    #[test]
    fn test_applies_when_apart() {
        let sync = DisplaySyncCoordinator::new();
        let mut target = CountingSurface::at(0.0);
        assert!(sync.mirror(50.0, &mut target));
        assert_eq!(target.position, 50.0);
        assert_eq!(target.sets, 1);
    }

    #[test]
    fn test_suppressed_inside_epsilon() {
        let sync = DisplaySyncCoordinator::new();
        let mut target = CountingSurface::at(49.4);
        assert!(!sync.mirror(50.0, &mut target));
        assert_eq!(target.sets, 0);
    }

    #[test]
    fn test_one_external_change_propagates_at_most_once() {
        let sync = DisplaySyncCoordinator::new();
        let mut a = CountingSurface::at(50.0); // user scrolled A here
        let mut b = CountingSurface::at(0.0);

        // A's change mirrors onto B once
        assert!(sync.mirror(a.scroll_position(), &mut b));
        // The echo from B back onto A lands inside epsilon and dies
        assert!(!sync.mirror(b.scroll_position(), &mut a));
        assert_eq!(b.sets, 1);
        assert_eq!(a.sets, 0);
    }
}
