//! Text splitting for staggered reveals.
//!
//! A headline is cut into words or characters, each rendered in its own span
//! and delayed by `index * stagger` so the text appears piece by piece.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// How text is cut into animated segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// One segment for the whole text
    #[default]
    None,
    /// One segment per whitespace-separated word
    Words,
    /// One segment per grapheme cluster
    Chars,
}

/// One piece of split text.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Text of the segment
    pub text: String,
    /// Position among animated segments
    pub index: usize,
    /// Seconds to wait before this segment animates
    pub delay: f64,
    /// Whitespace segments are kept for layout but not animated
    pub is_space: bool,
}

/// Split `text` according to `mode`, assigning staggered delays.
///
/// Whitespace graphemes in [`SplitMode::Chars`] are emitted with `is_space`
/// set and share the delay of the preceding segment.
#[must_use]
pub fn split(text: &str, mode: SplitMode, stagger: f64) -> Vec<Segment> {
    let stagger = if stagger.is_finite() { stagger.max(0.0) } else { 0.0 };
    match mode {
        SplitMode::None => {
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Segment {
                    text: text.to_string(),
                    index: 0,
                    delay: 0.0,
                    is_space: false,
                }]
            }
        }
        SplitMode::Words => text
            .split_whitespace()
            .enumerate()
            .map(|(index, word)| Segment {
                text: word.to_string(),
                index,
                delay: index as f64 * stagger,
                is_space: false,
            })
            .collect(),
        SplitMode::Chars => {
            let mut out = Vec::new();
            let mut index = 0usize;
            for grapheme in text.graphemes(true) {
                let is_space = grapheme.chars().all(char::is_whitespace);
                let delay = if is_space {
                    index.saturating_sub(1) as f64 * stagger
                } else {
                    index as f64 * stagger
                };
                out.push(Segment {
                    text: grapheme.to_string(),
                    index: if is_space { index.saturating_sub(1) } else { index },
                    delay,
                    is_space,
                });
                if !is_space {
                    index += 1;
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_none() {
        let segs = split("like never", SplitMode::None, 0.1);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "like never");
        assert!(split("", SplitMode::None, 0.1).is_empty());
    }

    #[test]
    fn test_split_words_staggers() {
        let segs = split("  like   never before ", SplitMode::Words, 0.1);
        let words: Vec<_> = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(words, ["like", "never", "before"]);
        assert!((segs[2].delay - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_split_chars_keeps_spaces_unanimated() {
        let segs = split("a b", SplitMode::Chars, 0.05);
        assert_eq!(segs.len(), 3);
        assert!(segs[1].is_space);
        assert_eq!(segs.iter().filter(|s| !s.is_space).count(), 2);
        assert_eq!(segs[2].index, 1);
        assert!((segs[2].delay - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_split_chars_graphemes() {
        let segs = split("é🔷", SplitMode::Chars, 0.1);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].text, "🔷");
    }

    #[test]
    fn test_negative_stagger_clamped() {
        let segs = split("a b", SplitMode::Words, -1.0);
        assert!(segs.iter().all(|s| s.delay == 0.0));
    }
}
