//! Display width of graphemes and styled text.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::{extract_sequence, next_sequence_or_end};

/// Maps characters to the number of cells they occupy.
///
/// Implementations answer 0 for combining, zero-width and control characters, 2 for
/// wide/CJK characters and 1 otherwise.
pub trait WidthOracle: Send + Sync {
    fn char_width(&self, ch: char) -> usize;

    /// Width of one extended grapheme cluster, capped at two cells.
    fn grapheme_width(&self, grapheme: &str) -> usize {
        grapheme
            .chars()
            .map(|ch| self.char_width(ch))
            .sum::<usize>()
            .min(2)
    }
}

/// Default oracle backed by the Unicode East Asian Width tables and the emoji catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWidthOracle;

impl WidthOracle for UnicodeWidthOracle {
    fn char_width(&self, ch: char) -> usize {
        if ch.is_control() {
            return 0;
        }
        UnicodeWidthChar::width(ch).unwrap_or(0).min(2)
    }

    fn grapheme_width(&self, grapheme: &str) -> usize {
        if grapheme.is_empty() {
            return 0;
        }
        if emoji_get(grapheme).is_some() {
            return 2;
        }
        let mut chars = grapheme.chars();
        let Some(first) = chars.next() else {
            return 0;
        };
        let base = self.char_width(first);
        if base == 0 {
            return chars.map(|ch| self.char_width(ch)).max().unwrap_or(0);
        }
        base
    }
}

/// Visible width of `input` measured with `oracle`, skipping control sequences.
pub fn measure(oracle: &dyn WidthOracle, input: &str) -> usize {
    let mut width = 0;
    let mut idx = 0;
    while idx < input.len() {
        if let Some(code) = extract_sequence(input, idx) {
            idx += code.length;
            continue;
        }
        let end = next_sequence_or_end(input, idx);
        if end == idx {
            break;
        }
        width += input[idx..end]
            .graphemes(true)
            .map(|g| oracle.grapheme_width(g))
            .sum::<usize>();
        idx = end;
    }
    width
}

/// Visible width using the default Unicode oracle.
pub fn visible_width(input: &str) -> usize {
    measure(&UnicodeWidthOracle, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_zero_width() {
        assert_eq!(visible_width("hi\x1b[31m!!\x1b[0m"), 4);
        assert_eq!(visible_width("\x1b]8;;https://example.com\x07link\x1b]8;;\x07"), 4);
        assert_eq!(visible_width("\u{9b}1;1Hab"), 2);
    }

    #[test]
    fn wide_combining_and_emoji() {
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width("e\u{301}"), 1);
        assert_eq!(visible_width("😀"), 2);
        assert_eq!(visible_width("a\u{200b}b"), 2);
    }

    #[test]
    fn controls_are_stripped() {
        assert_eq!(visible_width("a\x01b\x7f"), 2);
    }

    struct Narrow;

    impl WidthOracle for Narrow {
        fn char_width(&self, ch: char) -> usize {
            usize::from(!ch.is_control())
        }
    }

    #[test]
    fn custom_oracle_drives_measurement() {
        assert_eq!(measure(&Narrow, "日本\x1b[1m語"), 3);
    }
}
