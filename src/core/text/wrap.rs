//! Word wrapping with style carry-over.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{extract_sequence, next_sequence_or_end, strip_sequences, TextStyle};
use super::layout::TextLayout;

impl TextLayout {
    /// Wraps `text` into lines no wider than `width` cells.
    ///
    /// Lines break on spaces first; a word wider than `width` is split on grapheme
    /// boundaries. Explicit newlines always break. The active SGR style is re-emitted at the
    /// start of every continuation line and trailing whitespace is trimmed.
    pub fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        if text.is_empty() || width == 0 {
            return vec![String::new()];
        }

        let text = self.normalize(text);
        let mut result = Vec::new();
        let mut style = TextStyle::default();

        for input_line in text.split('\n') {
            let prefix = if result.is_empty() {
                String::new()
            } else {
                carry_over(&style, input_line)
            };
            let line = format!("{prefix}{input_line}");
            result.extend(self.wrap_single_line(&line, width));
            style.absorb(input_line);
        }

        if result.is_empty() {
            return vec![String::new()];
        }
        result
            .into_iter()
            .map(|line| line.trim_end_matches(' ').to_string())
            .collect()
    }

    fn wrap_single_line(&self, line: &str, width: usize) -> Vec<String> {
        if line.is_empty() {
            return vec![String::new()];
        }
        if self.width(line) <= width {
            return vec![line.to_string()];
        }

        let mut style = TextStyle::default();
        let mut wrapped = Vec::new();
        let mut current_line = String::new();
        let mut current_width = 0;

        for token in split_into_tokens(line) {
            let token_width = self.width(&token);
            let is_whitespace = token_width > 0 && self.is_blank(&token);

            if token_width > width && !is_whitespace {
                if current_width > 0 {
                    wrapped.push(close_line(&current_line, &style));
                    current_line.clear();
                    current_width = 0;
                }

                let mut broken = self.break_long_word(&token, width, &mut style);
                if let Some(last) = broken.pop() {
                    wrapped.extend(broken);
                    current_width = self.width(&last);
                    current_line = last;
                }
                continue;
            }

            if current_width + token_width > width && current_width > 0 {
                wrapped.push(close_line(&current_line, &style));
                current_width = 0;
                if is_whitespace {
                    style.absorb(&token);
                    current_line = style.active_codes();
                    continue;
                }
                current_line = carry_over(&style, &token);
                current_line.push_str(&token);
                current_width = token_width;
            } else {
                if current_width == 0
                    && !is_whitespace
                    && !current_line.is_empty()
                    && current_line == style.active_codes()
                {
                    current_line = carry_over(&style, &token);
                }
                current_line.push_str(&token);
                current_width += token_width;
            }

            style.absorb(&token);
        }

        if !current_line.is_empty() {
            wrapped.push(current_line);
        }
        wrapped
    }

    fn is_blank(&self, token: &str) -> bool {
        strip_sequences(token).chars().all(|ch| ch == ' ')
    }

    fn break_long_word(&self, word: &str, width: usize, style: &mut TextStyle) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current_line = carry_over(style, word);
        let mut current_width = 0;
        let mut idx = 0;

        while idx < word.len() {
            if let Some(code) = extract_sequence(word, idx) {
                current_line.push_str(code.code);
                style.process(code.code);
                idx += code.length;
                continue;
            }

            let text_end = next_sequence_or_end(word, idx);
            if text_end == idx {
                break;
            }
            for grapheme in word[idx..text_end].graphemes(true) {
                let grapheme_width = self.grapheme_width(grapheme);
                if current_width > 0 && current_width + grapheme_width > width {
                    let reset = style.line_end_reset();
                    current_line.push_str(&reset);
                    lines.push(current_line);
                    current_line = style.active_codes();
                    current_width = 0;
                }
                current_line.push_str(grapheme);
                current_width += grapheme_width;
            }
            idx = text_end;
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
        lines
    }
}

/// Codes that restore `style` at the start of a line, unless `text` already opens with them.
fn carry_over(style: &TextStyle, text: &str) -> String {
    let codes = style.active_codes();
    if !codes.is_empty() && text.starts_with(&codes) {
        return String::new();
    }
    codes
}

fn close_line(line: &str, style: &TextStyle) -> String {
    let mut closed = line.trim_end_matches(' ').to_string();
    closed.push_str(&style.line_end_reset());
    closed
}

/// Splits on space boundaries. Sequences attach to the token that follows them.
fn split_into_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut pending = String::new();
    let mut in_whitespace = false;
    let mut idx = 0;

    while idx < text.len() {
        if let Some(code) = extract_sequence(text, idx) {
            pending.push_str(code.code);
            idx += code.length;
            continue;
        }

        let Some(ch) = text[idx..].chars().next() else {
            break;
        };
        let is_space = ch == ' ';
        if is_space != in_whitespace && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push_str(&pending);
        pending.clear();

        in_whitespace = is_space;
        current.push(ch);
        idx += ch.len_utf8();
    }

    current.push_str(&pending);
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use crate::core::text::TextLayout;

    fn wrap(text: &str, width: usize) -> Vec<String> {
        TextLayout::default().wrap(text, width)
    }

    #[test]
    fn splits_on_spaces() {
        assert_eq!(wrap("word word", 4), vec!["word", "word"]);
        assert_eq!(wrap("Hello world!", 6), vec!["Hello", "world!"]);
    }

    #[test]
    fn hard_splits_long_words() {
        assert_eq!(wrap("abcdefgh ij", 5), vec!["abcde", "fgh", "ij"]);
    }

    #[test]
    fn wide_glyphs_never_split() {
        assert_eq!(wrap("日本語日本", 4), vec!["日本", "語日", "本"]);
        assert_eq!(wrap("a日本", 2), vec!["a", "日", "本"]);
    }

    #[test]
    fn newlines_and_tabs() {
        assert_eq!(wrap("a\r\nb\tc", 10), vec!["a", "b    c"]);
        assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn style_carries_across_lines() {
        let wrapped = wrap("\x1b[31mword word", 4);
        assert_eq!(wrapped, vec!["\x1b[31mword", "\x1b[31mword"]);
    }

    #[test]
    fn carried_style_is_not_repeated() {
        let wrapped = wrap("a\x1b[31mbc de", 2);
        assert_eq!(wrapped, vec!["a\x1b[31mb", "\x1b[31mc", "\x1b[31mde"]);
        assert_eq!(wrap(&wrapped.join(" "), 2), wrapped);
    }

    #[test]
    fn reset_inside_a_skipped_space_still_applies() {
        assert_eq!(wrap("\x1b[31mab\x1b[0m cd", 2), vec!["\x1b[31mab", "cd"]);
    }

    #[test]
    fn underline_closed_at_line_end() {
        let wrapped = wrap("\x1b[4mword word", 4);
        assert!(wrapped[0].ends_with("\x1b[24m"));
        assert!(!wrapped[1].ends_with("\x1b[24m"));
    }

    #[test]
    fn zero_width_yields_single_empty_line() {
        assert_eq!(wrap("anything", 0), vec![String::new()]);
    }
}
