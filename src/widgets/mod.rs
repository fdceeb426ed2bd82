//! Positioned widgets built on the renderable contract.
//!
//! Every widget composes absolute cursor-position sequences, so its output can be
//! concatenated with any other widget's and painted in order.

use crate::core::coordinate::Coordinate;
use crate::core::sequence::cursor_position;

pub mod aligned_text;
pub mod border;
pub mod calendar;
pub mod canvas;
pub mod chart;
pub mod frame;
pub mod marquee;
pub mod progress;
pub mod selection;
pub mod settings;
pub mod slider;
pub mod spinner;
pub mod table;

pub use aligned_text::{AlignedText, Rainbow};
pub use border::Border;
pub use calendar::{Calendar, CalendarColors};
pub use canvas::{Canvas, Pixel};
pub use chart::{
    quantize, BarChart, BreakdownChart, ChartElement, LineChart, StickChart, WinLoss,
    WinsLosses,
};
pub use frame::{BoxFrame, FilledBox};
pub use marquee::Marquee;
pub use progress::{Progress, ProgressState, ProgressTone};
pub use selection::{Choice, Selection, SelectionColors};
pub use settings::{BorderPart, BorderSettings, FrameColors, TextSettings};
pub use slider::{Slider, TrackGlyphs};
pub use spinner::{Spinner, SpinnerStyle};
pub use table::{CellOptions, Table, TableColors};

/// Cursor-position sequence for a 1-based `(column, row)`.
///
/// Widget geometry is computed in signed arithmetic; values outside the wire range are
/// clamped rather than wrapped.
pub(crate) fn cursor_at(column: i64, row: i64) -> String {
    let clamp = |value: i64| (value - 1).clamp(0, i64::from(u16::MAX)) as u16;
    cursor_position(Coordinate::new(clamp(column), clamp(row)))
}

/// `count` copies of `glyph`; negative counts produce nothing.
pub(crate) fn span(glyph: char, count: i64) -> String {
    let count = usize::try_from(count).unwrap_or(0);
    std::iter::repeat(glyph).take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_is_one_based() {
        assert_eq!(cursor_at(1, 1), "\x1b[1;1H");
        assert_eq!(cursor_at(10, 3), "\x1b[3;10H");
        assert_eq!(cursor_at(-4, 0), "\x1b[1;1H");
    }

    #[test]
    fn span_ignores_negative_counts() {
        assert_eq!(span('─', 3), "───");
        assert_eq!(span('x', -2), "");
    }
}
