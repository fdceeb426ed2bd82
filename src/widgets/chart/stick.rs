use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::chart::{max_value, quantize, shown, ChartElement, Gutter, Label};
use crate::widgets::{cursor_at, span};

/// Vertical sticks, one per shown element, scaled to the chart height.
#[derive(Debug, Clone, Default)]
pub struct StickChart {
    pub geometry: Option<Rect>,
    pub elements: Vec<ChartElement>,
    pub showcase: bool,
    /// Grow sticks downward from the top row.
    pub upside_down: bool,
}

impl StickChart {
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

    pub fn upside_down(mut self, upside_down: bool) -> Self {
        self.upside_down = upside_down;
        self
    }
}

impl StaticWidget for StickChart {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let elements = shown(&self.elements);
        if elements.is_empty() {
            return Err(RenderError::MissingData("stick chart has no shown elements"));
        }
        let area = self.geometry.unwrap_or(ctx.area);
        let (left, top) = (i64::from(area.left), i64::from(area.top));
        let (width, height) = (i64::from(area.width), i64::from(area.height));

        let labels = elements.iter().map(|element| Label::of(element)).collect();
        let gutter = Gutter::new(&ctx.layout, labels, area.width, self.showcase);
        let plot_width = (width - gutter.width()).max(0);
        let stick_width = plot_width / elements.len() as i64 / 2 * 2;
        let max = max_value(&elements);
        let heights: Vec<i64> = elements
            .iter()
            .map(|element| quantize(element.value, height, max))
            .collect();

        let mut out = String::new();
        for row in 0..height {
            out.push_str(&cursor_at(left + 1, top + row + 1));
            out.push_str(&gutter.row(ctx, row as usize));
            let level = if self.upside_down {
                row
            } else {
                height - 1 - row
            };
            for (element, stick_height) in elements.iter().zip(&heights) {
                let fill = (level < *stick_height).then_some(&element.color);
                out.push_str(&ctx.bg_or_reset(fill));
                out.push_str(&span(' ', stick_width));
            }
            out.push_str(&ctx.reset());
        }
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        Some(self.geometry.unwrap_or(ctx.area))
    }
}
