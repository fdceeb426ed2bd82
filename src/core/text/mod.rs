//! Text helpers: sequence scanning, width measurement, wrapping, truncation and alignment.
//!
//! Everything is string in / string out. Widths always come from a [`WidthOracle`]; the free
//! functions below use the default Unicode oracle.

pub mod ansi;
pub mod layout;
pub mod truncate;
pub mod width;
pub mod wrap;

pub use layout::{percent_repeat, percent_repeat_targeted, Alignment, TextLayout};
pub use truncate::ELLIPSIS;
pub use width::{visible_width, UnicodeWidthOracle, WidthOracle};

pub fn wrap(text: &str, width: usize) -> Vec<String> {
    TextLayout::shared().wrap(text, width)
}

pub fn truncate(text: &str, max_width: usize) -> String {
    TextLayout::shared().truncate(text, max_width)
}

pub fn align(line: &str, width: usize, mode: Alignment, left_margin: usize) -> usize {
    TextLayout::shared().align(line, width, mode, left_margin)
}
