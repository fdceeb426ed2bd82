//! Width-bounded truncation.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{extract_sequence, next_sequence_or_end};
use super::layout::TextLayout;
use crate::core::sequence::RESET_STYLE;

pub const ELLIPSIS: &str = "...";

impl TextLayout {
    /// Cuts `text` to at most `max_width` cells, ending with [`ELLIPSIS`] when anything was
    /// removed.
    pub fn truncate(&self, text: &str, max_width: usize) -> String {
        self.truncate_with(text, max_width, ELLIPSIS, false)
    }

    /// Like [`TextLayout::truncate`], right-padding with spaces to exactly `max_width`.
    pub fn truncate_padded(&self, text: &str, max_width: usize) -> String {
        self.truncate_with(text, max_width, ELLIPSIS, true)
    }

    /// Truncation with a custom marker.
    ///
    /// Cut points fall on grapheme-cluster boundaries, so a double-width glyph is either
    /// kept whole or dropped. Sequences before the cut are kept; when any were kept a style
    /// reset precedes the marker so it renders unstyled.
    pub fn truncate_with(&self, text: &str, max_width: usize, ellipsis: &str, pad: bool) -> String {
        if max_width == 0 {
            return String::new();
        }

        let text_width = self.width(text);
        if text_width <= max_width {
            if pad {
                return format!("{text}{}", " ".repeat(max_width - text_width));
            }
            return text.to_string();
        }

        let ellipsis_width = self.width(ellipsis);
        if ellipsis_width >= max_width {
            return ellipsis.chars().take(max_width).collect();
        }
        let target_width = max_width - ellipsis_width;

        let mut truncated = String::new();
        let mut saw_sequence = false;
        let mut current_width = 0;
        let mut idx = 0;
        'scan: while idx < text.len() {
            if let Some(code) = extract_sequence(text, idx) {
                truncated.push_str(code.code);
                saw_sequence = true;
                idx += code.length;
                continue;
            }

            let text_end = next_sequence_or_end(text, idx);
            if text_end == idx {
                break;
            }
            for grapheme in text[idx..text_end].graphemes(true) {
                let width = self.grapheme_width(grapheme);
                if current_width + width > target_width {
                    break 'scan;
                }
                truncated.push_str(grapheme);
                current_width += width;
            }
            idx = text_end;
        }

        if saw_sequence {
            truncated.push_str(RESET_STYLE);
        }
        truncated.push_str(ellipsis);
        if pad {
            let width = current_width + ellipsis_width;
            truncated.push_str(&" ".repeat(max_width.saturating_sub(width)));
        }
        truncated
    }
}

#[cfg(test)]
mod tests {
    use crate::core::text::TextLayout;

    #[test]
    fn short_text_is_untouched() {
        let layout = TextLayout::default();
        assert_eq!(layout.truncate("hello", 5), "hello");
        assert_eq!(layout.truncate_padded("hi", 4), "hi  ");
    }

    #[test]
    fn long_text_gets_marker() {
        let layout = TextLayout::default();
        assert_eq!(layout.truncate("hello world", 8), "hello...");
    }

    #[test]
    fn wide_glyph_is_not_split() {
        let layout = TextLayout::default();
        let cut = layout.truncate("日本語です", 6);
        assert_eq!(cut, "日...");
        assert!(layout.width(&cut) <= 6);
        assert_eq!(layout.truncate_padded("日本語です", 6), "日... ");
    }

    #[test]
    fn sequences_survive_and_are_reset() {
        let layout = TextLayout::default();
        assert_eq!(
            layout.truncate("\x1b[31mhello world", 8),
            "\x1b[31mhello\x1b[0m..."
        );
    }

    #[test]
    fn tiny_budgets() {
        let layout = TextLayout::default();
        assert_eq!(layout.truncate("hello", 0), "");
        assert_eq!(layout.truncate("hello", 2), "..");
        assert_eq!(layout.truncate("hello", 3), "...");
    }
}
