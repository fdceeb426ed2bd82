//! Wrapped text aligned inside an area.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::cursor_at;
use crate::widgets::settings::TextSettings;

/// Which layer a rainbow sweep colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rainbow {
    Foreground,
    Background,
}

#[derive(Debug, Clone, Default)]
pub struct AlignedText {
    /// `left`, `top` and the wrap width. Lines past `height` are dropped; a zero height
    /// keeps every line.
    pub geometry: Option<Rect>,
    pub text: String,
    pub settings: TextSettings,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Only the first wrapped line, truncated to leave room for the ellipsis.
    pub one_line: bool,
    pub rainbow: Option<Rainbow>,
}

impl AlignedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_settings(mut self, settings: TextSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = Some(foreground);
        self.background = Some(background);
        self
    }

    pub fn one_line(mut self, one_line: bool) -> Self {
        self.one_line = one_line;
        self
    }

    pub fn with_rainbow(mut self, rainbow: Rainbow) -> Self {
        self.rainbow = Some(rainbow);
        self
    }

    /// Wrapped lines as they will be placed.
    pub fn lines(&self, ctx: &RenderContext) -> Vec<String> {
        let area = self.geometry.unwrap_or(ctx.area);
        let width = usize::from(area.width);
        let mut lines = ctx.layout.wrap(&self.text, width);
        if self.one_line {
            lines.truncate(1);
            if let Some(first) = lines.first_mut() {
                *first = ctx.layout.truncate(first, width.saturating_sub(4));
            }
        } else if area.height > 0 {
            lines.truncate(usize::from(area.height));
        }
        lines
    }

    /// Paints each grapheme with a hue proportional to its position in the line.
    fn sweep(&self, ctx: &RenderContext, line: &str, rainbow: Rainbow) -> String {
        let graphemes: Vec<&str> = line.graphemes(true).collect();
        let count = graphemes.len().max(1) as f64;
        let mut out = String::new();
        for (index, grapheme) in graphemes.iter().enumerate() {
            let hue = (360.0 * index as f64 / count).floor();
            if let Ok(color) = Color::hsl(hue, 100.0, 50.0) {
                match rainbow {
                    Rainbow::Foreground => {
                        out.push_str(&ctx.fg(&color));
                        out.push_str(&ctx.bg_or_default(self.background.as_ref()));
                    }
                    Rainbow::Background => {
                        out.push_str(&ctx.fg_or_default(self.foreground.as_ref()));
                        out.push_str(&ctx.bg(&color));
                    }
                }
            }
            out.push_str(grapheme);
        }
        out
    }
}

impl StaticWidget for AlignedText {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let area = self.geometry.unwrap_or(ctx.area);
        let width = usize::from(area.width);
        let mut out = ctx.fg_or_default(self.foreground.as_ref());
        out.push_str(&ctx.bg_or_default(self.background.as_ref()));
        for (row, line) in self.lines(ctx).iter().enumerate() {
            let column = ctx.layout.align(
                line,
                width,
                self.settings.alignment,
                usize::from(area.left),
            );
            out.push_str(&cursor_at(
                column as i64 + 1,
                i64::from(area.top) + row as i64 + 1,
            ));
            match self.rainbow {
                Some(rainbow) if ctx.use_colors => out.push_str(&self.sweep(ctx, line, rainbow)),
                _ => out.push_str(line),
            }
        }
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry.unwrap_or(ctx.area);
        let rows = self.lines(ctx).len().min(usize::from(u16::MAX)) as u16;
        Some(Rect::new(area.left, area.top, area.width, rows))
    }
}
