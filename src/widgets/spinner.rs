//! Frame-sequence spinners.

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{CyclicWidget, RenderContext};
use crate::error::RenderError;
use crate::widgets::cursor_at;

/// Built-in frame sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinnerStyle {
    Dots,
    Dots2,
    Line,
    Pipe,
    SimpleDots,
    Star,
    Arc,
    Arrow,
    Toggle,
    BouncingBar,
    Clock,
    Moon,
}

impl SpinnerStyle {
    pub const ALL: [SpinnerStyle; 12] = [
        SpinnerStyle::Dots,
        SpinnerStyle::Dots2,
        SpinnerStyle::Line,
        SpinnerStyle::Pipe,
        SpinnerStyle::SimpleDots,
        SpinnerStyle::Star,
        SpinnerStyle::Arc,
        SpinnerStyle::Arrow,
        SpinnerStyle::Toggle,
        SpinnerStyle::BouncingBar,
        SpinnerStyle::Clock,
        SpinnerStyle::Moon,
    ];

    pub fn frames(self) -> Vec<String> {
        let literal = |frames: &[&str]| frames.iter().map(|frame| frame.to_string()).collect();
        match self {
            SpinnerStyle::Dots => literal(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            SpinnerStyle::Dots2 => literal(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
            SpinnerStyle::Line => literal(&["-", "/", "|", "\\"]),
            SpinnerStyle::Pipe => literal(&["┤", "┘", "┴", "└", "├", "┌", "┬", "┐"]),
            SpinnerStyle::SimpleDots => literal(&[".  ", ".. ", "...", "   "]),
            SpinnerStyle::Star => literal(&["✶", "✸", "✹", "✺", "✹", "✷"]),
            SpinnerStyle::Arc => literal(&["◜", "◠", "◝", "◞", "◡", "◟"]),
            SpinnerStyle::Arrow => literal(&["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"]),
            SpinnerStyle::Toggle => literal(&["⊶", "⊷"]),
            SpinnerStyle::BouncingBar => literal(&[
                "[    ]", "[=   ]", "[==  ]", "[=== ]", "[====]", "[ ===]", "[  ==]", "[   =]",
                "[    ]", "[   =]", "[  ==]", "[ ===]", "[====]", "[=== ]", "[==  ]", "[=   ]",
            ]),
            SpinnerStyle::Clock => emoji_frames(&[
                "clock12", "clock1", "clock2", "clock3", "clock4", "clock5", "clock6", "clock7",
                "clock8", "clock9", "clock10", "clock11",
            ]),
            SpinnerStyle::Moon => emoji_frames(&[
                "new_moon",
                "waxing_crescent_moon",
                "first_quarter_moon",
                "waxing_gibbous_moon",
                "full_moon",
                "waning_gibbous_moon",
                "last_quarter_moon",
                "waning_crescent_moon",
            ]),
        }
    }
}

/// Emoji frames looked up by shortcode. Unknown shortcodes are skipped.
fn emoji_frames(shortcodes: &[&str]) -> Vec<String> {
    shortcodes
        .iter()
        .filter_map(|code| emojis::get_by_shortcode(code))
        .map(|emoji| format!("{} ", emoji.as_str()))
        .collect()
}

/// Shows the current frame at its position and moves to the next one on every render.
#[derive(Debug, Clone)]
pub struct Spinner {
    pub geometry: Option<Rect>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    frames: Vec<String>,
    index: usize,
}

impl Spinner {
    pub fn new(style: SpinnerStyle) -> Self {
        Self::from_frames(style.frames())
    }

    /// An empty frame list renders nothing.
    pub fn from_frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            geometry: None,
            foreground: None,
            background: None,
            frames: frames.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    pub fn at(mut self, left: u16, top: u16) -> Self {
        self.geometry = Some(Rect::new(left, top, 0, 1));
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The frame the next render will show.
    pub fn peek(&self) -> &str {
        self.frames.get(self.index).map(String::as_str).unwrap_or("")
    }
}

impl CyclicWidget for Spinner {
    fn frame(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let mut out = ctx.fg_or_default(self.foreground.as_ref());
        out.push_str(&ctx.bg_or_default(self.background.as_ref()));
        if let Some(area) = self.geometry {
            out.push_str(&cursor_at(i64::from(area.left) + 1, i64::from(area.top) + 1));
        }
        out.push_str(self.peek());
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn advance(&mut self) {
        if !self.frames.is_empty() {
            self.index = (self.index + 1) % self.frames.len();
        }
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry?;
        let width = self
            .frames
            .iter()
            .map(|frame| ctx.layout.width(frame))
            .max()
            .unwrap_or(0);
        Some(Rect::new(area.left, area.top, width.min(usize::from(u16::MAX)) as u16, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::core::renderable::Renderable;

    #[test]
    fn every_style_has_frames() {
        for style in SpinnerStyle::ALL {
            assert!(!style.frames().is_empty(), "{style:?}");
        }
        assert_eq!(SpinnerStyle::Clock.frames().len(), 12);
        assert_eq!(SpinnerStyle::Moon.frames().len(), 8);
    }

    #[test]
    fn cycles_back_to_the_first_frame() {
        let ctx = RenderContext::new(Size::new(10, 2)).without_colors();
        let renderable = Renderable::new_cyclic(Spinner::new(SpinnerStyle::Line));
        let first: Vec<String> = (0..4).map(|_| renderable.render(&ctx)).collect();
        let second: Vec<String> = (0..4).map(|_| renderable.render(&ctx)).collect();
        assert_eq!(first, vec!["-", "/", "|", "\\"]);
        assert_eq!(first, second);
    }

    #[test]
    fn positioned_spinner_moves_the_cursor() {
        let ctx = RenderContext::new(Size::new(10, 2)).without_colors();
        let spinner = Spinner::from_frames(["a", "b"]).at(3, 1);
        assert_eq!(spinner.frame(&ctx).unwrap(), "\x1b[2;4Ha");
        assert_eq!(spinner.bounds(&ctx), Some(Rect::new(3, 1, 1, 1)));
    }

    #[test]
    fn empty_spinner_renders_nothing() {
        let mut spinner = Spinner::from_frames(Vec::<String>::new());
        spinner.advance();
        assert_eq!(spinner.peek(), "");
        assert_eq!(spinner.index(), 0);
    }
}
