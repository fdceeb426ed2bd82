//! Charts over a list of named values.
//!
//! All charts share [`ChartElement`], the [`quantize`] scaling rule and the optional
//! showcase gutter: a legend column of `" ■ name  value"` entries capped at a quarter of the
//! chart width, followed by a `" ┃ "` separator. The gutter width is computed once per render
//! from every shown element so all rows line up.

use crate::core::color::Color;
use crate::core::renderable::RenderContext;
use crate::core::text::TextLayout;
use crate::widgets::span;

pub mod bar;
pub mod breakdown;
pub mod line;
pub mod stick;
pub mod wins_losses;

pub use bar::BarChart;
pub use breakdown::BreakdownChart;
pub use line::LineChart;
pub use stick::StickChart;
pub use wins_losses::{WinLoss, WinsLosses};

pub(crate) const MARKER: &str = " ■ ";
pub(crate) const SEPARATOR: &str = " ┃ ";
const SEPARATOR_WIDTH: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartElement {
    pub name: String,
    pub value: f64,
    pub color: Color,
    pub hidden: bool,
}

impl ChartElement {
    pub fn new(name: impl Into<String>, value: f64, color: Color) -> Self {
        Self {
            name: name.into(),
            value,
            color,
            hidden: false,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// `round(value * track / max)`, clamped to `[0, track]`. Zero when `max` is not positive.
pub fn quantize(value: f64, track: i64, max: f64) -> i64 {
    if max <= 0.0 || track <= 0 || !value.is_finite() {
        return 0;
    }
    let cells = (value * track as f64 / max).round();
    (cells as i64).clamp(0, track)
}

pub(crate) fn shown(elements: &[ChartElement]) -> Vec<&ChartElement> {
    elements.iter().filter(|element| !element.hidden).collect()
}

pub(crate) fn max_value(elements: &[&ChartElement]) -> f64 {
    elements
        .iter()
        .map(|element| element.value)
        .fold(0.0, f64::max)
}

/// Shortest decimal form: `5.0` prints as `5`.
pub(crate) fn format_value(value: f64) -> String {
    value.to_string()
}

pub(crate) fn legend_grey() -> Color {
    Color::rgb(128, 128, 128)
}

pub(crate) fn legend_silver() -> Color {
    Color::rgb(192, 192, 192)
}

/// One legend entry.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub marker: Color,
    pub name: String,
    pub value: String,
}

impl Label {
    pub(crate) fn of(element: &ChartElement) -> Self {
        Self {
            marker: element.color.clone(),
            name: element.name.clone(),
            value: format_value(element.value),
        }
    }

    fn natural_width(&self, layout: &TextLayout) -> i64 {
        (layout.width(MARKER) + layout.width(&self.name) + 2 + layout.width(&self.value)) as i64
    }

    /// The entry styled and padded or truncated to exactly `width` cells.
    pub(crate) fn render(&self, ctx: &RenderContext, width: i64) -> String {
        let value_width = ctx.layout.width(&self.value) as i64;
        let name_room = (width - ctx.layout.width(MARKER) as i64 - 2 - value_width).max(0);
        let name = ctx.layout.truncate(&self.name, name_room as usize);
        let used = ctx.layout.width(MARKER) as i64
            + ctx.layout.width(&name) as i64
            + 2
            + value_width;

        let mut out = ctx.fg(&self.marker);
        out.push_str(MARKER);
        out.push_str(&ctx.fg(&legend_grey()));
        out.push_str(&name);
        out.push_str("  ");
        out.push_str(&ctx.fg(&legend_silver()));
        out.push_str(&self.value);
        out.push_str(&span(' ', width - used));
        out
    }
}

/// The legend column plus its separator.
#[derive(Debug, Clone)]
pub(crate) struct Gutter {
    labels: Vec<Label>,
    label_width: i64,
    enabled: bool,
}

impl Gutter {
    pub(crate) fn new(layout: &TextLayout, labels: Vec<Label>, chart_width: u16, enabled: bool) -> Self {
        let cap = i64::from(chart_width) / 4;
        let natural = labels
            .iter()
            .map(|label| label.natural_width(layout))
            .max()
            .unwrap_or(0);
        Self {
            labels,
            label_width: if enabled { natural.min(cap) } else { 0 },
            enabled,
        }
    }

    /// Cells taken before the plot area starts.
    pub(crate) fn width(&self) -> i64 {
        self.label_width + SEPARATOR_WIDTH
    }

    /// Legend entry `row` (or blank padding) followed by the separator.
    pub(crate) fn row(&self, ctx: &RenderContext, row: usize) -> String {
        let mut out = String::new();
        if self.enabled {
            match self.labels.get(row) {
                Some(label) => out.push_str(&label.render(ctx, self.label_width)),
                None => out.push_str(&span(' ', self.label_width)),
            }
        }
        out.push_str(&ctx.fg(&legend_silver()));
        out.push_str(SEPARATOR);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;

    #[test]
    fn quantize_scales_and_guards_zero() {
        assert_eq!(quantize(5.0, 10, 10.0), 5);
        assert_eq!(quantize(10.0, 10, 10.0), 10);
        assert_eq!(quantize(1.0, 3, 2.0), 2);
        assert_eq!(quantize(3.0, 10, 0.0), 0);
        assert_eq!(quantize(-3.0, 10, 5.0), 0);
    }

    #[test]
    fn gutter_width_is_capped_at_a_quarter() {
        let layout = TextLayout::default();
        let labels = vec![Label::of(&ChartElement::new("Apples", 12.0, Color::indexed(1)))];
        // " ■ Apples  12" is 13 cells.
        assert_eq!(Gutter::new(&layout, labels.clone(), 80, true).width(), 16);
        assert_eq!(Gutter::new(&layout, labels.clone(), 40, true).width(), 13);
        assert_eq!(Gutter::new(&layout, labels, 40, false).width(), 3);
    }

    #[test]
    fn gutter_rows_truncate_names() {
        let ctx = RenderContext::new(Size::new(40, 10)).without_colors();
        let labels = vec![Label::of(&ChartElement::new("Apples", 12.0, Color::indexed(1)))];
        // A 44-wide chart caps the legend at 11 cells, leaving 4 for the name.
        let gutter = Gutter::new(&ctx.layout, labels, 44, true);
        assert_eq!(gutter.row(&ctx, 0), " ■ A...  12 ┃ ");
        assert_eq!(gutter.row(&ctx, 1), format!("{} ┃ ", " ".repeat(11)));
    }

    #[test]
    fn hidden_elements_are_not_shown() {
        let elements = vec![
            ChartElement::new("a", 3.0, Color::indexed(1)),
            ChartElement::new("b", 9.0, Color::indexed(2)).hidden(true),
        ];
        let shown = shown(&elements);
        assert_eq!(shown.len(), 1);
        assert_eq!(max_value(&shown), 3.0);
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(2.5), "2.5");
    }
}
