//! Paragraph segmentation with inline timing markers.
//!
//! Scripts are split on `({MM:SS})` markers. A marker both ends the current
//! paragraph and assigns a stay duration to the paragraph that *follows* it
//! (intentional: the marker is read as "from here on, spend MM:SS"). The
//! span before the first marker never carries an override.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\{(\d+):(\d+)\}\)").unwrap());

/// Result of segmenting a raw script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmented {
    /// Trimmed paragraphs, in document order; never empty
    pub paragraphs: Vec<String>,
    /// Stay duration in seconds, keyed by paragraph index
    pub durations: HashMap<usize, u32>,
}

/// Split `raw` into paragraphs and per-paragraph duration overrides.
///
/// Malformed marker bodies simply fail to match and stay in the text;
/// segmentation itself never fails. Whitespace-only spans between markers
/// are dropped. Text consisting only of markers yields one empty paragraph.
pub fn segment(raw: &str) -> Segmented {
    let mut durations = HashMap::new();

    let matches: Vec<_> = MARKER.captures_iter(raw).collect();
    if matches.is_empty() {
        return Segmented {
            paragraphs: vec![raw.trim().to_string()],
            durations,
        };
    }

    let mut paragraphs = Vec::new();

    let first = matches[0].get(0).unwrap();
    let head = raw[..first.start()].trim();
    if !head.is_empty() {
        paragraphs.push(head.to_string());
    }

    for (i, caps) in matches.iter().enumerate() {
        // Digit-only capture groups, parse cannot fail for any sane length
        let minutes: u32 = caps[1].parse().unwrap_or(0);
        let seconds: u32 = caps[2].parse().unwrap_or(0);
        let duration = minutes * 60 + seconds;

        let span_start = caps.get(0).unwrap().end();
        let span_end = match matches.get(i + 1) {
            Some(next) => next.get(0).unwrap().start(),
            None => raw.len(),
        };

        let body = raw[span_start..span_end].trim();
        if !body.is_empty() {
            durations.insert(paragraphs.len(), duration);
            paragraphs.push(body.to_string());
        }
    }

    if paragraphs.is_empty() {
        paragraphs.push(String::new());
    }

    Segmented {
        paragraphs,
        durations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers_single_paragraph() {
        let out = segment("  hello world\nsecond line  ");
        assert_eq!(out.paragraphs, vec!["hello world\nsecond line"]);
        assert!(out.durations.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let out = segment("   \n  ");
        assert_eq!(out.paragraphs, vec![""]);
        assert!(out.durations.is_empty());
    }

    #[test]
    fn test_markers_assign_to_following_paragraph() {
        let out = segment("Intro({00:05})Middle({00:10})End");
        assert_eq!(out.paragraphs, vec!["Intro", "Middle", "End"]);
        assert_eq!(out.durations.get(&0), None);
        assert_eq!(out.durations.get(&1), Some(&5));
        assert_eq!(out.durations.get(&2), Some(&10));
    }

    #[test]
    fn test_minutes_component() {
        let out = segment("a({2:30})b");
        assert_eq!(out.durations.get(&1), Some(&150));
    }

    #[test]
    fn test_leading_marker_no_head_paragraph() {
        let out = segment("({00:03})only");
        assert_eq!(out.paragraphs, vec!["only"]);
        assert_eq!(out.durations.get(&0), Some(&3));
    }

    #[test]
    fn test_whitespace_spans_dropped() {
        let out = segment("a({0:1})   ({0:2})b");
        assert_eq!(out.paragraphs, vec!["a", "b"]);
        // The dropped empty span also drops its duration
        assert_eq!(out.durations.get(&1), Some(&2));
        assert_eq!(out.durations.len(), 1);
    }

    #[test]
    fn test_only_markers_yields_empty_paragraph() {
        let out = segment("({0:1})({0:2})");
        assert_eq!(out.paragraphs, vec![""]);
        assert!(out.durations.is_empty());
    }

    #[test]
    fn test_malformed_marker_left_as_text() {
        let out = segment("before({ab:cd})after");
        assert_eq!(out.paragraphs, vec!["before({ab:cd})after"]);
        assert!(out.durations.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let text = "Intro({00:05})Middle({00:10})End";
        let a = segment(text);
        let b = segment(text);
        assert_eq!(a, b);
    }
}
