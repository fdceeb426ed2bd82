use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::chart::{format_value, quantize, Gutter, Label};
use crate::widgets::{cursor_at, span};

/// One competitor: wins grow up from the middle line, losses down.
#[derive(Debug, Clone, PartialEq)]
pub struct WinLoss {
    pub name: String,
    pub wins: f64,
    pub losses: f64,
}

impl WinLoss {
    pub fn new(name: impl Into<String>, wins: f64, losses: f64) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WinsLosses {
    pub geometry: Option<Rect>,
    pub entries: Vec<WinLoss>,
    pub showcase: bool,
    pub win_color: Color,
    pub loss_color: Color,
}

impl Default for WinsLosses {
    fn default() -> Self {
        Self {
            geometry: None,
            entries: Vec::new(),
            showcase: false,
            win_color: Color::rgb(0, 255, 0),
            loss_color: Color::rgb(255, 0, 0),
        }
    }
}

impl WinsLosses {
    pub fn new(entries: Vec<WinLoss>) -> Self {
        Self {
            entries,
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

    /// Win and loss stick lengths for a chart `height` rows tall.
    pub fn sticks(&self, height: u16) -> Vec<(i64, i64)> {
        let half = i64::from(height) / 2;
        let below = (i64::from(height) - half - 1).max(0);
        let max_wins = self.entries.iter().map(|entry| entry.wins).fold(0.0, f64::max);
        let max_losses = self
            .entries
            .iter()
            .map(|entry| entry.losses)
            .fold(0.0, f64::max);
        self.entries
            .iter()
            .map(|entry| {
                (
                    quantize(entry.wins, half, max_wins),
                    quantize(entry.losses, below, max_losses),
                )
            })
            .collect()
    }
}

impl StaticWidget for WinsLosses {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        if self.entries.is_empty() {
            return Err(RenderError::MissingData("wins-losses chart has no entries"));
        }
        let area = self.geometry.unwrap_or(ctx.area);
        let (left, top) = (i64::from(area.left), i64::from(area.top));
        let (width, height) = (i64::from(area.width), i64::from(area.height));
        let half = height / 2;

        let labels = self
            .entries
            .iter()
            .map(|entry| Label {
                marker: self.win_color.clone(),
                name: entry.name.clone(),
                value: format!("{}/{}", format_value(entry.wins), format_value(entry.losses)),
            })
            .collect();
        let gutter = Gutter::new(&ctx.layout, labels, area.width, self.showcase);
        let plot_left = left + gutter.width();
        let plot_width = (width - gutter.width()).max(0);
        let stick_width = plot_width / self.entries.len() as i64 / 2 * 2;

        let mut out = String::new();
        for row in 0..height {
            out.push_str(&cursor_at(left + 1, top + row + 1));
            out.push_str(&gutter.row(ctx, row as usize));
        }
        out.push_str(&cursor_at(plot_left + 1, top + half + 1));
        out.push_str(&span('━', plot_width));

        for (index, (wins, losses)) in self.sticks(area.height).into_iter().enumerate() {
            let column = plot_left + stick_width * index as i64 + 1;
            out.push_str(&ctx.bg(&self.win_color));
            for level in 0..wins {
                out.push_str(&cursor_at(column, top + half - level));
                out.push_str(&span(' ', stick_width));
            }
            out.push_str(&ctx.bg(&self.loss_color));
            for level in 0..losses {
                out.push_str(&cursor_at(column, top + half + level + 2));
                out.push_str(&span(' ', stick_width));
            }
            out.push_str(&ctx.bg_or_reset(None));
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
    use crate::core::coordinate::Size;
    use crate::render::Buffer;

    #[test]
    fn sticks_split_at_the_middle() {
        let chart = WinsLosses::new(vec![WinLoss::new("a", 4.0, 1.0), WinLoss::new("b", 2.0, 2.0)]);
        // Height 7: three rows above the middle line, three below.
        assert_eq!(chart.sticks(7), vec![(3, 2), (2, 3)]);
    }

    #[test]
    fn wins_go_up_and_losses_go_down() {
        let chart = WinsLosses::new(vec![WinLoss::new("a", 2.0, 2.0)]).at(Rect::new(0, 0, 7, 5));
        let ctx = RenderContext::new(Size::new(7, 5));
        let mut buffer = Buffer::new(Size::new(7, 5));
        buffer.paint(&chart.render(&ctx).unwrap(), &ctx.layout);

        let background = |y: u16| buffer.get(3, y).and_then(|cell| cell.style().background()).map(str::to_string);
        let win = Some("48;2;0;255;0".to_string());
        let loss = Some("48;2;255;0;0".to_string());
        assert_eq!(background(0), win);
        assert_eq!(background(1), win);
        assert_eq!(buffer.get(3, 2).map(|cell| cell.glyph().to_string()), Some("━".to_string()));
        assert_eq!(background(3), loss);
        assert_eq!(background(4), loss);
    }
}
