//! A framed, filled box with wrapped body text.

use crate::core::color::{Color, Rgb};
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::frame::{BoxFrame, FilledBox};
use crate::widgets::settings::{BorderSettings, FrameColors, TextSettings};
use crate::widgets::cursor_at;

/// Background box, frame and body text.
///
/// With `geometry` set, `(left, top)` is the outer top-left corner and `width` x `height` the
/// interior. Without it the border sizes itself to the body text and centers on the console.
#[derive(Debug, Clone)]
pub struct Border {
    pub geometry: Option<Rect>,
    pub title: String,
    pub text: String,
    pub settings: BorderSettings,
    pub text_settings: TextSettings,
    pub colors: FrameColors,
    pub drop_shadow: bool,
    pub shadow_color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            geometry: None,
            title: String::new(),
            text: String::new(),
            settings: BorderSettings::default(),
            text_settings: TextSettings::default(),
            colors: FrameColors::default(),
            drop_shadow: false,
            shadow_color: Color::from_rgb(Rgb::new(128, 128, 128)),
        }
    }
}

impl Border {
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

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_settings(mut self, settings: BorderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_text_settings(mut self, text_settings: TextSettings) -> Self {
        self.text_settings = text_settings;
        self
    }

    pub fn with_colors(mut self, colors: FrameColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_drop_shadow(mut self, drop_shadow: bool) -> Self {
        self.drop_shadow = drop_shadow;
        self
    }

    /// The geometry used for rendering: the explicit one, or one centered on the console.
    pub fn resolved_geometry(&self, ctx: &RenderContext) -> Rect {
        if let Some(geometry) = self.geometry {
            return geometry;
        }
        let normalized = ctx.layout.normalize(&self.text);
        let lines: Vec<&str> = normalized.split('\n').collect();
        let console_width = i64::from(ctx.console.width);
        let console_height = i64::from(ctx.console.height);

        let mut width = lines
            .iter()
            .map(|line| ctx.layout.width(line) as i64)
            .max()
            .unwrap_or(0);
        let mut height = lines.len() as i64;
        if width >= console_width {
            width = console_width - 4;
        }
        if height >= console_height {
            height = console_height - 4;
        }
        let width = width.max(0);
        let height = height.max(0);
        let left = (console_width / 2 - width / 2 - 1).max(0);
        let top = (console_height / 2 - height / 2 - 1).max(0);
        Rect::new(left as u16, top as u16, width as u16, height as u16)
    }
}

impl StaticWidget for Border {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let geometry = self.resolved_geometry(ctx);
        let (left, top) = (i64::from(geometry.left), i64::from(geometry.top));
        let height = i64::from(geometry.height);

        let filled = FilledBox {
            geometry: Some(Rect::new(
                geometry.left.saturating_add(1),
                geometry.top.saturating_add(1),
                geometry.width,
                geometry.height,
            )),
            color: self.colors.background.clone(),
        };
        let frame = BoxFrame {
            geometry: Some(geometry),
            title: self.title.clone(),
            settings: self.settings,
            text_settings: self.text_settings,
            colors: self.colors.clone(),
            drop_shadow: self.drop_shadow,
            shadow_color: self.shadow_color.clone(),
        };

        let mut out = filled.render(ctx)?;
        out.push_str(&frame.render(ctx)?);

        if !self.text.trim().is_empty() {
            out.push_str(&ctx.fg_or_default(self.colors.text.as_ref()));
            out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));
            let lines = ctx.layout.wrap(&self.text, usize::from(geometry.width));
            for (i, line) in lines.iter().enumerate() {
                let i = i as i64;
                if top + 1 + i > top + height {
                    break;
                }
                let left_pos = ctx.layout.align(
                    line,
                    usize::from(geometry.width),
                    self.text_settings.alignment,
                    left as usize,
                );
                // Body rows are placed at 0-based (left_pos + 1, top + 1 + i).
                out.push_str(&cursor_at(left_pos as i64 + 2, top + i + 2));
                out.push_str(line);
            }
            out.push_str(&ctx.reset());
        }
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let geometry = self.resolved_geometry(ctx);
        Some(Rect::new(
            geometry.left,
            geometry.top,
            geometry.width.saturating_add(2),
            geometry.height.saturating_add(2),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::core::text::Alignment;
    use crate::render::Buffer;
    use pretty_assertions::assert_eq;

    fn paint(border: &Border, width: u16, height: u16) -> Vec<String> {
        let ctx = RenderContext::new(Size::new(width, height)).without_colors();
        let mut buffer = Buffer::new(Size::new(width, height));
        buffer.paint(&border.render(&ctx).unwrap(), &ctx.layout);
        (0..height).map(|y| buffer.row_text(y)).collect()
    }

    #[test]
    fn wraps_body_inside_the_frame() {
        let border = Border::new("Hello world!").at(Rect::new(2, 1, 6, 2));
        assert_eq!(
            paint(&border, 12, 6),
            vec![
                "            ",
                "  ╭──────╮  ",
                "  │Hello │  ",
                "  │world!│  ",
                "  ╰──────╯  ",
                "            ",
            ]
        );
    }

    #[test]
    fn lines_past_the_interior_are_dropped() {
        let border = Border::new("one two three").at(Rect::new(0, 0, 5, 2));
        let rows = paint(&border, 7, 5);
        assert_eq!(rows[1], "│one  │");
        assert_eq!(rows[2], "│two  │");
        assert_eq!(rows[3], "╰─────╯");
    }

    #[test]
    fn right_aligned_body() {
        let border = Border::new("ab")
            .at(Rect::new(0, 0, 5, 1))
            .with_text_settings(TextSettings::aligned(Alignment::Right));
        assert_eq!(paint(&border, 7, 3)[1], "│   ab│");
    }

    #[test]
    fn centers_on_the_console_without_geometry() {
        let border = Border::new("abcd\nef");
        let ctx = RenderContext::new(Size::new(20, 10));
        assert_eq!(border.resolved_geometry(&ctx), Rect::new(7, 3, 4, 2));
        assert_eq!(border.bounds(&ctx), Some(Rect::new(7, 3, 6, 4)));
    }
}
