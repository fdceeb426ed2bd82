use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::chart::{max_value, quantize, shown, ChartElement, Gutter, Label};
use crate::widgets::cursor_at;

/// Points joined by linear interpolation, one segment per shown element.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub geometry: Option<Rect>,
    pub elements: Vec<ChartElement>,
    pub showcase: bool,
    pub upside_down: bool,
    /// Draw a horizontal marker at the mean value.
    pub median: bool,
    pub median_color: Color,
}

impl Default for LineChart {
    fn default() -> Self {
        Self {
            geometry: None,
            elements: Vec::new(),
            showcase: false,
            upside_down: false,
            median: false,
            median_color: Color::rgb(255, 0, 255),
        }
    }
}

impl LineChart {
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

    pub fn with_median(mut self, median: bool) -> Self {
        self.median = median;
        self
    }

    /// Level (0 = baseline) of every plotted column, `segment` columns per element.
    pub fn levels(&self, height: u16, segment: i64) -> Vec<(usize, i64)> {
        let elements = shown(&self.elements);
        let track = i64::from(height) - 1;
        let max = max_value(&elements);
        let points: Vec<i64> = elements
            .iter()
            .map(|element| quantize(element.value, track, max))
            .collect();

        let mut levels = Vec::new();
        for (index, point) in points.iter().enumerate() {
            let next = points.get(index + 1).copied().unwrap_or(*point);
            for step in 0..segment {
                let slope = (next - point) as f64 * step as f64 / segment as f64;
                levels.push((index, (*point as f64 + slope).round() as i64));
            }
        }
        levels
    }

    fn row_of(&self, level: i64, height: i64) -> i64 {
        if self.upside_down {
            level
        } else {
            height - 1 - level
        }
    }
}

impl StaticWidget for LineChart {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let elements = shown(&self.elements);
        if elements.is_empty() {
            return Err(RenderError::MissingData("line chart has no shown elements"));
        }
        let area = self.geometry.unwrap_or(ctx.area);
        if area.height == 0 {
            return Ok(String::new());
        }
        let (left, top) = (i64::from(area.left), i64::from(area.top));
        let height = i64::from(area.height);

        let labels = elements.iter().map(|element| Label::of(element)).collect();
        let gutter = Gutter::new(&ctx.layout, labels, area.width, self.showcase);
        let plot_left = left + gutter.width();
        let segment = ((i64::from(area.width) - gutter.width()) / elements.len() as i64).max(0);

        let mut out = String::new();
        for row in 0..height {
            out.push_str(&cursor_at(left + 1, top + row + 1));
            out.push_str(&gutter.row(ctx, row as usize));
        }

        let levels = self.levels(area.height, segment);
        if self.median {
            let mean =
                elements.iter().map(|element| element.value).sum::<f64>() / elements.len() as f64;
            let level = quantize(mean, height - 1, max_value(&elements));
            let row = self.row_of(level, height);
            out.push_str(&ctx.bg(&self.median_color));
            for column in 0..levels.len() as i64 {
                out.push_str(&cursor_at(plot_left + column + 1, top + row + 1));
                out.push(' ');
            }
        }
        for (column, (index, level)) in levels.iter().enumerate() {
            let row = self.row_of(*level, height);
            out.push_str(&ctx.bg(&elements[*index].color));
            out.push_str(&cursor_at(plot_left + column as i64 + 1, top + row + 1));
            out.push(' ');
        }
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        Some(self.geometry.unwrap_or(ctx.area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> LineChart {
        LineChart::new(vec![
            ChartElement::new("a", 0.0, Color::indexed(1)),
            ChartElement::new("b", 4.0, Color::indexed(2)),
        ])
    }

    #[test]
    fn segments_interpolate_to_the_next_point() {
        let levels: Vec<i64> = chart().levels(5, 4).into_iter().map(|(_, level)| level).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn points_are_placed_from_the_baseline() {
        use crate::core::coordinate::Size;
        let ctx = RenderContext::new(Size::new(11, 5)).without_colors();
        let text = chart().at(Rect::new(0, 0, 11, 5)).render(&ctx).unwrap();
        // The first column sits on the bottom row, right after the separator.
        assert!(text.contains("\x1b[5;4H "));
        assert!(text.contains("\x1b[1;8H "));
    }

    #[test]
    fn upside_down_flips_rows() {
        let chart = chart().upside_down(true);
        assert_eq!(chart.row_of(0, 5), 0);
        assert_eq!(chart.row_of(4, 5), 4);
    }
}
