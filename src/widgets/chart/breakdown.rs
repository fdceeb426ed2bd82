use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::chart::{quantize, shown, ChartElement, Label, MARKER};
use crate::widgets::{cursor_at, span};

const LEGEND_GAP: i64 = 4;

/// One bar split proportionally between the shown elements, with an optional flowing legend
/// on the rows below it.
#[derive(Debug, Clone, Default)]
pub struct BreakdownChart {
    pub geometry: Option<Rect>,
    pub elements: Vec<ChartElement>,
    pub showcase: bool,
}

impl BreakdownChart {
    pub fn new(elements: Vec<ChartElement>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_showcase(mut self, showcase: bool) -> Self {
        self.showcase = showcase;
        self
    }

    /// Cells of the bar owned by each shown element. The segments never exceed `width`.
    pub fn segments(&self, width: u16) -> Vec<i64> {
        let elements = shown(&self.elements);
        let total: f64 = elements.iter().map(|element| element.value.max(0.0)).sum();
        let mut remaining = i64::from(width);
        elements
            .iter()
            .map(|element| {
                let cells = quantize(element.value, i64::from(width), total).min(remaining);
                remaining -= cells;
                cells
            })
            .collect()
    }
}

impl StaticWidget for BreakdownChart {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let elements = shown(&self.elements);
        if elements.is_empty() {
            return Err(RenderError::MissingData("breakdown chart has no shown elements"));
        }
        let area = self.geometry.unwrap_or(ctx.area);
        if area.height == 0 {
            return Ok(String::new());
        }
        let (left, top) = (i64::from(area.left), i64::from(area.top));
        let width = i64::from(area.width);

        let mut out = cursor_at(left + 1, top + 1);
        for (element, cells) in elements.iter().zip(self.segments(area.width)) {
            out.push_str(&ctx.bg(&element.color));
            out.push_str(&span(' ', cells));
        }
        out.push_str(&ctx.reset());

        if self.showcase {
            let entry_cap = width / 4;
            let mut row = 1;
            let mut used = 0;
            for element in &elements {
                let label = Label::of(element);
                let natural = (ctx.layout.width(MARKER)
                    + ctx.layout.width(&label.name)
                    + 2
                    + ctx.layout.width(&label.value)) as i64;
                let entry_width = natural.min(entry_cap.max(0));
                if used > 0 && used + entry_width > width {
                    row += 1;
                    used = 0;
                }
                if row >= i64::from(area.height) {
                    break;
                }
                out.push_str(&cursor_at(left + used + 1, top + row + 1));
                out.push_str(&label.render(ctx, entry_width));
                used += entry_width + LEGEND_GAP;
            }
            out.push_str(&ctx.reset());
        }
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        Some(self.geometry.unwrap_or(ctx.area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::core::coordinate::Size;
    use crate::render::Buffer;

    fn elements() -> Vec<ChartElement> {
        vec![
            ChartElement::new("rust", 3.0, Color::indexed(1)),
            ChartElement::new("go", 1.0, Color::indexed(2)),
            ChartElement::new("c", 4.0, Color::indexed(3)).hidden(true),
        ]
    }

    #[test]
    fn segments_split_the_width() {
        let chart = BreakdownChart::new(elements());
        assert_eq!(chart.segments(20), vec![15, 5]);
        assert_eq!(chart.segments(3), vec![2, 1]);
    }

    #[test]
    fn legend_flows_below_the_bar() {
        let chart = BreakdownChart::new(elements())
            .at(Rect::new(0, 0, 40, 3))
            .with_showcase(true);
        let ctx = RenderContext::new(Size::new(40, 3)).without_colors();
        let mut buffer = Buffer::new(Size::new(40, 3));
        buffer.paint(&chart.render(&ctx).unwrap(), &ctx.layout);
        assert!(buffer.row_text(1).starts_with(" ■ rust  3     ■ go  1"));
    }
}
