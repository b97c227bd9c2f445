//! Scroll position snapshots that survive content-length changes.
//!
//! The durable quantity is the offset as a percentage of the scrollable
//! range, keyed by paragraph index. In-place edits grow or shrink the
//! rendered text, so an absolute offset would land on unrelated content;
//! a percentage restored against the new extent stays put visually.

use std::collections::HashMap;

/// Saved scroll state for one paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    /// Offset relative to the scrollable range, in [0, 1]
    pub offset_percentage: f64,
    /// Absolute offset at save time; advisory only
    pub raw_offset: f64,
    pub was_running: bool,
}

/// Per-paragraph snapshot store.
#[derive(Debug, Default)]
pub struct ScrollPositionStore {
    slots: HashMap<usize, ScrollSnapshot>,
    current_index: usize,
}

impl ScrollPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track which paragraph subsequent saves and restores refer to.
    pub fn set_current_paragraph(&mut self, index: usize) {
        self.current_index = index;
    }

    pub fn current_paragraph(&self) -> usize {
        self.current_index
    }

    /// Record the current scroll state under the current paragraph.
    /// A zero extent is defined as percentage 0, never a division fault.
    pub fn save(&mut self, offset: f64, max_extent: f64, was_running: bool) -> ScrollSnapshot {
        let offset_percentage = if max_extent > 0.0 {
            offset / max_extent
        } else {
            0.0
        };
        let snapshot = ScrollSnapshot {
            offset_percentage,
            raw_offset: offset,
            was_running,
        };
        self.slots.insert(self.current_index, snapshot);
        snapshot
    }

    /// Offset to re-apply for the current paragraph against the current
    /// extent, or None when nothing should change.
    ///
    /// A deliberate paragraph switch never restores: the caller resets the
    /// engines to the top instead, so auto-advance always starts each
    /// paragraph from its beginning.
    pub fn restore(&self, current_max_extent: f64, is_paragraph_switch: bool) -> Option<f64> {
        if is_paragraph_switch {
            return None;
        }
        let snapshot = self.slots.get(&self.current_index)?;
        Some(snapshot.offset_percentage * current_max_extent)
    }

    pub fn snapshot(&self, index: usize) -> Option<ScrollSnapshot> {
        self.slots.get(&index).copied()
    }

    /// Wipe every snapshot and re-point at paragraph 0. Used when the whole
    /// document is replaced or cleared.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.current_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_restore_survives_extent_change() {
        let mut store = ScrollPositionStore::new();
        store.save(500.0, 1000.0, true);

        let restored = store.restore(2000.0, false).unwrap();
        assert!((restored - 1000.0).abs() < 5.0);
    }

    #[test]
    fn test_zero_extent_saves_percentage_zero() {
        let mut store = ScrollPositionStore::new();
        let snap = store.save(250.0, 0.0, false);
        assert_eq!(snap.offset_percentage, 0.0);
        assert_eq!(store.restore(1000.0, false), Some(0.0));
    }

    #[test]
    fn test_paragraph_switch_suppresses_restore() {
        let mut store = ScrollPositionStore::new();
        store.save(500.0, 1000.0, true);
        assert_eq!(store.restore(1000.0, true), None);
    }

    #[test]
    fn test_missing_snapshot_restores_nothing() {
        let mut store = ScrollPositionStore::new();
        store.set_current_paragraph(3);
        assert_eq!(store.restore(1000.0, false), None);
    }

    #[test]
    fn test_slots_keyed_by_paragraph() {
        let mut store = ScrollPositionStore::new();
        store.set_current_paragraph(0);
        store.save(100.0, 1000.0, true);
        store.set_current_paragraph(1);
        store.save(900.0, 1000.0, false);

        let a = store.snapshot(0).unwrap();
        let b = store.snapshot(1).unwrap();
        assert!((a.offset_percentage - 0.1).abs() < 1e-9);
        assert!(a.was_running);
        assert!((b.offset_percentage - 0.9).abs() < 1e-9);
        assert!(!b.was_running);

        // Saving again for the same paragraph reuses the slot
        store.set_current_paragraph(0);
        store.save(200.0, 1000.0, true);
        let a = store.snapshot(0).unwrap();
        assert!((a.offset_percentage - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_clear() {
        let mut store = ScrollPositionStore::new();
        store.set_current_paragraph(2);
        store.save(500.0, 1000.0, true);
        store.clear();
        assert_eq!(store.current_paragraph(), 0);
        assert_eq!(store.snapshot(2), None);
    }
}
