//! The layout engine handle shared by every widget.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{extract_sequence, next_sequence_or_end};
use super::width::{measure, UnicodeWidthOracle, WidthOracle};

pub const DEFAULT_TAB_WIDTH: usize = 4;

static DEFAULT_LAYOUT: Lazy<TextLayout> = Lazy::new(TextLayout::default);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Middle,
    Right,
}

/// Width-aware text operations bound to one width oracle.
#[derive(Clone)]
pub struct TextLayout {
    oracle: Arc<dyn WidthOracle>,
    tab_width: usize,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            oracle: Arc::new(UnicodeWidthOracle),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl fmt::Debug for TextLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayout")
            .field("tab_width", &self.tab_width)
            .finish_non_exhaustive()
    }
}

impl TextLayout {
    pub fn with_oracle(oracle: Arc<dyn WidthOracle>) -> Self {
        Self {
            oracle,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn shared() -> &'static TextLayout {
        &DEFAULT_LAYOUT
    }

    pub fn oracle(&self) -> &dyn WidthOracle {
        self.oracle.as_ref()
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Visible width, with control sequences excluded.
    pub fn width(&self, text: &str) -> usize {
        measure(self.oracle.as_ref(), text)
    }

    pub fn grapheme_width(&self, grapheme: &str) -> usize {
        self.oracle.grapheme_width(grapheme)
    }

    /// Drops carriage returns and expands tabs to spaces.
    pub fn normalize(&self, text: &str) -> String {
        let tab = " ".repeat(self.tab_width);
        text.replace('\r', "").replace('\t', &tab)
    }

    /// Start column for `line` inside a `width`-cell slot that begins at `left_margin`.
    ///
    /// Sequences inside `line` are zero-width. Text wider than the slot starts at the margin.
    pub fn align(&self, line: &str, width: usize, mode: Alignment, left_margin: usize) -> usize {
        let text_width = self.width(line);
        let free = width.saturating_sub(text_width);
        match mode {
            Alignment::Left => left_margin,
            Alignment::Middle => left_margin + free / 2,
            Alignment::Right => left_margin + free,
        }
    }

    /// Cuts `line` to the columns `[start, start + length)`. Wide glyphs straddling either
    /// edge are dropped; sequences inside the range are kept.
    pub fn slice_columns(&self, line: &str, start: usize, length: usize) -> String {
        let end_col = start.saturating_add(length);
        let mut result = String::new();
        let mut pending = String::new();
        let mut column = 0;
        let mut idx = 0;

        while idx < line.len() && column < end_col {
            if let Some(code) = extract_sequence(line, idx) {
                if column >= start {
                    result.push_str(code.code);
                } else {
                    pending.push_str(code.code);
                }
                idx += code.length;
                continue;
            }

            let text_end = next_sequence_or_end(line, idx);
            if text_end == idx {
                break;
            }
            for grapheme in line[idx..text_end].graphemes(true) {
                let width = self.grapheme_width(grapheme);
                if column >= start && column + width <= end_col {
                    result.push_str(&pending);
                    pending.clear();
                    result.push_str(grapheme);
                }
                column += width;
                if column >= end_col {
                    break;
                }
            }
            idx = text_end;
        }
        result
    }
}

/// `cur/max` of `total` cells, rounded. Zero when `max` is zero.
pub fn percent_repeat(current: i64, max: i64, total: i64) -> i64 {
    percent_repeat_targeted(current, max, total)
}

/// `round(current * 100 / max * target / 100)`; zero when `max` is not positive.
pub fn percent_repeat_targeted(current: i64, max: i64, target: i64) -> i64 {
    if max <= 0 {
        return 0;
    }
    let percent = current as f64 * 100.0 / max as f64;
    (percent * target as f64 * 0.01).round() as i64
}
