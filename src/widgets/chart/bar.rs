use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::chart::{max_value, quantize, shown, ChartElement, Gutter, Label};
use crate::widgets::{cursor_at, span};

/// Horizontal bars, one row per shown element. Elements past the chart height are dropped.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    pub geometry: Option<Rect>,
    pub elements: Vec<ChartElement>,
    pub showcase: bool,
}

impl BarChart {
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
}

impl StaticWidget for BarChart {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let elements = shown(&self.elements);
        if elements.is_empty() {
            return Err(RenderError::MissingData("bar chart has no shown elements"));
        }
        let area = self.geometry.unwrap_or(ctx.area);
        let (left, top) = (i64::from(area.left), i64::from(area.top));

        let labels = elements.iter().map(|element| Label::of(element)).collect();
        let gutter = Gutter::new(&ctx.layout, labels, area.width, self.showcase);
        let track = (i64::from(area.width) - gutter.width()).max(0);
        let max = max_value(&elements);

        let mut out = String::new();
        for (row, element) in elements.iter().take(usize::from(area.height)).enumerate() {
            out.push_str(&cursor_at(left + 1, top + row as i64 + 1));
            out.push_str(&gutter.row(ctx, row));
            out.push_str(&ctx.bg(&element.color));
            out.push_str(&span(' ', quantize(element.value, track, max)));
            out.push_str(&ctx.reset());
        }
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        Some(self.geometry.unwrap_or(ctx.area))
    }
}
