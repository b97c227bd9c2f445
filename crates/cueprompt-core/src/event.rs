//! Events the engine pushes to the host UI.

/// Emitted over an unbounded channel so the host can refresh whatever it
/// renders. Losing the receiver is never fatal to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PrompterEvent {
    /// The script was re-segmented (open, paste, edit, clear)
    ParagraphsUpdated { count: usize },
    /// The current paragraph changed through any path
    ParagraphChanged { index: usize },
    /// A scroll snapshot was written for the current paragraph
    ScrollSaved { offset_percentage: f64 },
    /// A snapshot was re-applied after an in-place edit
    ScrollRestored { offset: f64 },
    /// Auto-advance reached the last paragraph and stopped
    PlaybackFinished,
}
