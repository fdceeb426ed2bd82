//! Filled background rectangles and box frames.

use crate::core::color::{Color, Rgb};
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::settings::{BorderPart, BorderSettings, FrameColors, TextSettings};
use crate::widgets::{cursor_at, span};

/// Solid rectangle of spaces, one cursor move per row.
///
/// `geometry` is the exact region painted.
#[derive(Debug, Clone, Default)]
pub struct FilledBox {
    pub geometry: Option<Rect>,
    pub color: Option<Color>,
}

impl FilledBox {
    pub fn new(geometry: Rect) -> Self {
        Self {
            geometry: Some(geometry),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl StaticWidget for FilledBox {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let area = self.geometry.unwrap_or(ctx.area);
        if area.is_empty() {
            return Ok(String::new());
        }
        let mut out = ctx.bg_or_default(self.color.as_ref());
        let blank = " ".repeat(usize::from(area.width));
        for y in 0..i64::from(area.height) {
            out.push_str(&cursor_at(i64::from(area.left) + 1, i64::from(area.top) + y + 1));
            out.push_str(&blank);
        }
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        Some(self.geometry.unwrap_or(ctx.area))
    }
}

/// Frame around an interior of `width` x `height` cells whose outer top-left corner sits at
/// `(left, top)`. The frame itself occupies `width + 2` x `height + 2` cells.
#[derive(Debug, Clone)]
pub struct BoxFrame {
    pub geometry: Option<Rect>,
    pub title: String,
    pub settings: BorderSettings,
    pub text_settings: TextSettings,
    pub colors: FrameColors,
    pub drop_shadow: bool,
    pub shadow_color: Color,
}

impl Default for BoxFrame {
    fn default() -> Self {
        Self {
            geometry: None,
            title: String::new(),
            settings: BorderSettings::default(),
            text_settings: TextSettings::default(),
            colors: FrameColors::default(),
            drop_shadow: false,
            shadow_color: Color::from_rgb(Rgb::new(128, 128, 128)),
        }
    }
}

impl BoxFrame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
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

    fn glyph_at(&self, out: &mut String, part: BorderPart, column: i64, row: i64, repeat: i64) {
        if let Some(glyph) = self.settings.glyph(part) {
            out.push_str(&cursor_at(column, row));
            out.push_str(&span(glyph, repeat));
        }
    }
}

impl StaticWidget for BoxFrame {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let area = self.geometry.unwrap_or(ctx.area);
        let (left, top) = (i64::from(area.left), i64::from(area.top));
        let (width, height) = (i64::from(area.width), i64::from(area.height));
        let mut out = String::new();

        out.push_str(&ctx.fg_or_default(self.colors.frame.as_ref()));
        out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));

        self.glyph_at(&mut out, BorderPart::UpperLeftCorner, left + 1, top + 1, 1);
        self.glyph_at(&mut out, BorderPart::UpperRightCorner, left + width + 2, top + 1, 1);
        self.glyph_at(&mut out, BorderPart::LowerLeftCorner, left + 1, top + height + 2, 1);
        self.glyph_at(
            &mut out,
            BorderPart::LowerRightCorner,
            left + width + 2,
            top + height + 2,
            1,
        );
        self.glyph_at(&mut out, BorderPart::UpperFrame, left + 2, top + 1, width);
        self.glyph_at(&mut out, BorderPart::LowerFrame, left + 2, top + height + 2, width);
        for i in 1..=height {
            self.glyph_at(&mut out, BorderPart::LeftFrame, left + 1, top + i + 1, 1);
            self.glyph_at(&mut out, BorderPart::RightFrame, left + width + 2, top + i + 1, 1);
        }

        if self.drop_shadow {
            let shadow = ctx.bg(&self.shadow_color);
            if self.settings.is_enabled(BorderPart::RightFrame) {
                for i in 1..=height + 1 {
                    out.push_str(&shadow);
                    out.push_str(&cursor_at(left + width + 3, top + i + 1));
                    out.push(' ');
                }
            }
            if self.settings.is_enabled(BorderPart::LowerFrame) {
                out.push_str(&shadow);
                out.push_str(&cursor_at(left + 2, top + height + 3));
                out.push_str(&span(' ', width + 2));
            }
        }

        out.push_str(&ctx.fg_or_default(self.colors.title.as_ref()));
        out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));
        let title_room = width - 8;
        if !self.title.is_empty() && title_room > 0 {
            let mut title = String::new();
            if let Some(glyph) = self.settings.glyph(BorderPart::RightHorizontalIntersection) {
                title.push(glyph);
                title.push(' ');
            }
            title.push_str(&ctx.layout.truncate(&self.title, title_room as usize));
            if let Some(glyph) = self.settings.glyph(BorderPart::LeftHorizontalIntersection) {
                title.push(' ');
                title.push(glyph);
            }
            let left_pos = ctx.layout.align(
                &title,
                title_room as usize,
                self.text_settings.title_alignment,
                (left + 2) as usize,
            );
            out.push_str(&cursor_at(left_pos as i64 + 1, top + 1));
            out.push_str(&title);
        }

        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry.unwrap_or(ctx.area);
        Some(Rect::new(
            area.left,
            area.top,
            area.width.saturating_add(2),
            area.height.saturating_add(2),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::render::Buffer;
    use pretty_assertions::assert_eq;

    fn paint(widget: &dyn StaticWidget, width: u16, height: u16) -> Vec<String> {
        let ctx = RenderContext::new(Size::new(width, height)).without_colors();
        let mut buffer = Buffer::new(Size::new(width, height));
        buffer.paint(&widget.render(&ctx).unwrap(), &ctx.layout);
        (0..height).map(|y| buffer.row_text(y)).collect()
    }

    #[test]
    fn frame_corners_and_edges() {
        let frame = BoxFrame::default().at(Rect::new(1, 0, 3, 2));
        assert_eq!(
            paint(&frame, 7, 5),
            vec![" ╭───╮ ", " │   │ ", " │   │ ", " ╰───╯ ", "       "]
        );
    }

    #[test]
    fn frame_emits_one_based_positions() {
        let frame = BoxFrame::default().at(Rect::new(2, 1, 6, 2));
        let ctx = RenderContext::new(Size::new(20, 10)).without_colors();
        let text = frame.render(&ctx).unwrap();
        assert!(text.starts_with("\x1b[2;3H╭"));
        assert!(text.contains("\x1b[2;10H╮"));
        assert!(text.contains("\x1b[5;3H╰"));
        assert!(text.contains("\x1b[5;10H╯"));
        assert!(text.contains("\x1b[2;4H──────"));
    }

    #[test]
    fn title_needs_room() {
        let narrow = BoxFrame::new("Title").at(Rect::new(0, 0, 8, 1));
        assert_eq!(paint(&narrow, 12, 3)[0], "╭────────╮  ");

        let wide = BoxFrame::new("Hi").at(Rect::new(0, 0, 14, 1));
        assert_eq!(paint(&wide, 16, 3)[0], "╭─┤ Hi ├───────╮");
    }

    #[test]
    fn long_title_is_truncated_to_the_room() {
        let frame = BoxFrame::new("A fairly long title here").at(Rect::new(0, 0, 20, 2));
        let top = &paint(&frame, 22, 4)[0];
        assert!(top.contains("┤ A fairly"), "{top}");
        assert!(top.contains("... ├"), "{top}");
        assert!(!top.contains("here"));
        assert!(top.starts_with("╭─┤") && top.ends_with("╮"));
    }

    #[test]
    fn centered_title() {
        let frame = BoxFrame::new("ab")
            .at(Rect::new(0, 0, 20, 1))
            .with_text_settings(TextSettings::aligned(crate::core::text::Alignment::Middle));
        // "┤ ab ├" is 6 wide in a 12-wide slot starting at column 2.
        assert_eq!(paint(&frame, 22, 3)[0], "╭────┤ ab ├──────────╮");
    }

    #[test]
    fn disabled_parts_are_skipped() {
        let frame = BoxFrame::default()
            .at(Rect::new(0, 0, 2, 1))
            .with_settings(BorderSettings::default().with_enabled(BorderPart::UpperFrame, false));
        assert_eq!(paint(&frame, 4, 3), vec!["╭  ╮", "│  │", "╰──╯"]);
    }

    #[test]
    fn drop_shadow_extends_right_and_down() {
        let frame = BoxFrame::default()
            .at(Rect::new(0, 0, 2, 1))
            .with_drop_shadow(true);
        let ctx = RenderContext::new(Size::new(6, 5));
        let text = frame.render(&ctx).unwrap();
        assert!(text.contains("\x1b[2;5H "));
        assert!(text.contains("\x1b[4;2H    "));
    }

    #[test]
    fn filled_box_paints_each_row() {
        let filled = FilledBox::new(Rect::new(1, 1, 2, 2)).with_color(Color::indexed(4));
        let ctx = RenderContext::new(Size::new(5, 4));
        let text = filled.render(&ctx).unwrap();
        assert_eq!(text, "\x1b[48;5;4m\x1b[2;2H  \x1b[3;2H  \x1b[0m");
    }
}
