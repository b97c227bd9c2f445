//! Script document: raw text, segmented paragraphs, and the cursor.

use std::collections::HashMap;

use crate::segment::{self, Segmented};

/// The segmented script plus the current paragraph cursor.
///
/// The paragraph list is never empty; an all-whitespace script yields one
/// empty paragraph. `current_index` is always a valid index into it.
#[derive(Debug, Clone)]
pub struct Document {
    raw_text: String,
    paragraphs: Vec<String>,
    durations: HashMap<usize, u32>,
    current_index: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            raw_text: String::new(),
            paragraphs: vec![String::new()],
            durations: HashMap::new(),
            current_index: 0,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole script and re-segment it.
    ///
    /// The cursor is kept where it was (clamped if the new script is
    /// shorter), so in-place edits do not lose the reading position.
    pub fn set_text(&mut self, text: &str) {
        self.raw_text = text.to_string();
        let Segmented {
            paragraphs,
            durations,
        } = segment::segment(&self.raw_text);
        self.paragraphs = paragraphs;
        self.durations = durations;
        if self.current_index >= self.paragraphs.len() {
            self.current_index = self.paragraphs.len() - 1;
        }
    }

    /// Reset to a single empty paragraph at index 0.
    pub fn clear(&mut self) {
        self.raw_text.clear();
        self.paragraphs = vec![String::new()];
        self.durations.clear();
        self.current_index = 0;
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_paragraph(&self) -> &str {
        &self.paragraphs[self.current_index]
    }

    pub fn total_paragraphs(&self) -> usize {
        self.paragraphs.len()
    }

    /// Inline duration override for a paragraph, in seconds.
    pub fn duration_override(&self, index: usize) -> Option<u32> {
        self.durations.get(&index).copied()
    }

    /// All duration overrides from the last segmentation.
    pub fn duration_overrides(&self) -> &HashMap<usize, u32> {
        &self.durations
    }

    /// Position through the script as a fraction in [0, 1].
    pub fn progress(&self) -> f64 {
        self.current_index as f64 / self.paragraphs.len() as f64
    }

    /// Move to the next paragraph; false (and no change) at the end.
    pub fn next(&mut self) -> bool {
        if self.current_index + 1 < self.paragraphs.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous paragraph; false (and no change) at the start.
    pub fn previous(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an arbitrary paragraph; false (and no change) out of range.
    pub fn set_index(&mut self, index: usize) -> bool {
        if index < self.paragraphs.len() {
            self.current_index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_has_one_paragraph() {
        let doc = Document::new();
        assert_eq!(doc.total_paragraphs(), 1);
        assert_eq!(doc.current_paragraph(), "");
        assert_eq!(doc.current_index(), 0);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut doc = Document::new();
        doc.set_text("a({0:1})b({0:2})c");
        assert_eq!(doc.total_paragraphs(), 3);

        assert!(!doc.previous());
        assert_eq!(doc.current_index(), 0);

        assert!(doc.next());
        assert!(doc.next());
        assert!(!doc.next());
        assert_eq!(doc.current_index(), 2);

        assert!(!doc.set_index(3));
        assert_eq!(doc.current_index(), 2);
        assert!(doc.set_index(0));
        assert_eq!(doc.current_index(), 0);
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut doc = Document::new();
        doc.set_text("a({0:1})b({0:2})c");
        doc.set_index(2);

        doc.set_text("only one paragraph now");
        assert_eq!(doc.total_paragraphs(), 1);
        assert_eq!(doc.current_index(), 0);
    }

    #[test]
    fn test_set_text_keeps_cursor_when_valid() {
        let mut doc = Document::new();
        doc.set_text("a({0:1})b({0:2})c");
        doc.set_index(1);

        doc.set_text("a({0:1})B edited({0:2})c");
        assert_eq!(doc.current_index(), 1);
        assert_eq!(doc.current_paragraph(), "B edited");
    }

    #[test]
    fn test_progress() {
        let mut doc = Document::new();
        doc.set_text("a({0:1})b({0:2})c({0:3})d");
        assert_eq!(doc.progress(), 0.0);
        doc.next();
        assert!((doc.progress() - 0.25).abs() < 1e-9);
        doc.set_index(3);
        assert!((doc.progress() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_clear() {
        let mut doc = Document::new();
        doc.set_text("a({0:5})b");
        doc.next();
        doc.clear();
        assert_eq!(doc.total_paragraphs(), 1);
        assert_eq!(doc.current_index(), 0);
        assert_eq!(doc.duration_override(1), None);
    }
}
