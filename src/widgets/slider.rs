//! Position indicator on a track.

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::core::text::percent_repeat_targeted;
use crate::error::RenderError;
use crate::widgets::{cursor_at, span};

/// Glyphs for the filled and empty parts of a track. Without colors the two halves would
/// look identical, so a shaded pair is used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackGlyphs {
    pub horizontal_active: char,
    pub horizontal_inactive: char,
    pub vertical_active: char,
    pub vertical_inactive: char,
    pub uncolored_active: char,
    pub uncolored_inactive: char,
}

impl Default for TrackGlyphs {
    fn default() -> Self {
        Self {
            horizontal_active: '━',
            horizontal_inactive: '━',
            vertical_active: '┃',
            vertical_inactive: '┃',
            uncolored_active: '█',
            uncolored_inactive: '▒',
        }
    }
}

impl TrackGlyphs {
    /// `(active, inactive)` for the orientation and color mode.
    pub fn pick(&self, vertical: bool, use_colors: bool) -> (char, char) {
        match (use_colors, vertical) {
            (false, _) => (self.uncolored_active, self.uncolored_inactive),
            (true, false) => (self.horizontal_active, self.horizontal_inactive),
            (true, true) => (self.vertical_active, self.vertical_inactive),
        }
    }
}

/// Draws runs of track glyphs along a row or down a column.
pub(crate) struct TrackPainter<'a> {
    ctx: &'a RenderContext,
    left: i64,
    top: i64,
    vertical: bool,
    offset: i64,
    out: String,
}

impl<'a> TrackPainter<'a> {
    pub(crate) fn new(ctx: &'a RenderContext, left: i64, top: i64, vertical: bool) -> Self {
        let mut out = String::new();
        if !vertical {
            out.push_str(&cursor_at(left + 1, top + 1));
        }
        Self {
            ctx,
            left,
            top,
            vertical,
            offset: 0,
            out,
        }
    }

    pub(crate) fn style(&mut self, style: &str) {
        self.out.push_str(style);
    }

    pub(crate) fn run(&mut self, color: &Color, glyph: char, count: i64) {
        self.out.push_str(&self.ctx.fg(color));
        if self.vertical {
            for _ in 0..count.max(0) {
                self.out
                    .push_str(&cursor_at(self.left + 1, self.top + self.offset + 1));
                self.out.push(glyph);
                self.offset += 1;
            }
        } else {
            self.out.push_str(&span(glyph, count));
            self.offset += count.max(0);
        }
    }

    pub(crate) fn finish(mut self) -> String {
        self.out.push_str(&self.ctx.reset());
        self.out
    }
}

#[derive(Debug, Clone)]
pub struct Slider {
    /// `left`, `top` and the track length (`width`, or `height` when vertical).
    pub geometry: Option<Rect>,
    pub position: i64,
    pub min: i64,
    pub max: i64,
    pub vertical: bool,
    pub foreground: Color,
    pub active_foreground: Color,
    pub background: Option<Color>,
    pub glyphs: TrackGlyphs,
}

impl Default for Slider {
    fn default() -> Self {
        Self {
            geometry: None,
            position: 0,
            min: 0,
            max: 100,
            vertical: false,
            foreground: Color::rgb(0, 95, 0),
            active_foreground: Color::rgb(0, 255, 0),
            background: None,
            glyphs: TrackGlyphs::default(),
        }
    }
}

impl Slider {
    pub fn new(position: i64, min: i64, max: i64) -> Self {
        Self {
            position,
            min,
            max,
            ..Self::default()
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn with_colors(mut self, foreground: Color, active_foreground: Color) -> Self {
        self.foreground = foreground;
        self.active_foreground = active_foreground;
        self
    }

    /// Cells before the thumb, thumb cells and cells after it, for a `length`-cell track.
    pub fn segments(&self, length: i64) -> (i64, i64, i64) {
        let one = percent_repeat_targeted(self.min.max(1), self.max, length).max(1);
        let mut times = percent_repeat_targeted(self.position - self.min, self.max, length - 1);
        if times + one >= length {
            times = length - one;
        }
        let times = times.max(0);
        let rest = (length - one - times).max(0);
        (times, one, rest)
    }

    fn geometry(&self, ctx: &RenderContext) -> Rect {
        self.geometry.unwrap_or(ctx.area)
    }
}

impl StaticWidget for Slider {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let area = self.geometry(ctx);
        let length = if self.vertical {
            area.height
        } else {
            area.width
        };
        if length == 0 {
            return Ok(String::new());
        }
        let (times, one, rest) = self.segments(i64::from(length));
        let (active, inactive) = self.glyphs.pick(self.vertical, ctx.use_colors);

        let mut painter = TrackPainter::new(
            ctx,
            i64::from(area.left),
            i64::from(area.top),
            self.vertical,
        );
        painter.style(&ctx.bg_or_default(self.background.as_ref()));
        painter.run(&self.foreground, inactive, times);
        painter.run(&self.active_foreground, active, one);
        painter.run(&self.foreground, inactive, rest);
        Ok(painter.finish())
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry(ctx);
        Some(if self.vertical {
            Rect::new(area.left, area.top, 1, area.height)
        } else {
            Rect::new(area.left, area.top, area.width, 1)
        })
    }
}
