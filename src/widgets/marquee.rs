//! Scrolling single-line text.

use std::cell::Cell;

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{CyclicWidget, RenderContext};
use crate::core::sequence::strip;
use crate::error::RenderError;
use crate::widgets::cursor_at;

pub const DEFAULT_DELAY: u32 = 30;

/// Shows a `width`-cell window over the text. Text wider than the window scrolls one column
/// per frame through the text and a window-wide gap, and waits `delay` frames whenever the
/// window returns to the start. A new marquee starts in that waiting state.
#[derive(Debug, Clone)]
pub struct Marquee {
    pub geometry: Option<Rect>,
    pub delay: u32,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    text: String,
    offset: usize,
    pausing: bool,
    waited: u32,
    /// Tape width and whether the text overflows, as seen by the last frame.
    measured: Cell<Option<(usize, bool)>>,
}

impl Marquee {
    pub fn new(text: &str) -> Self {
        Self {
            geometry: None,
            delay: DEFAULT_DELAY,
            foreground: None,
            background: None,
            text: Self::sanitize(text),
            offset: 0,
            pausing: true,
            waited: 0,
            measured: Cell::new(None),
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_delay(mut self, delay: u32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = Some(foreground);
        self.background = Some(background);
        self
    }

    /// Replaces the text and rewinds to the start.
    pub fn set_text(&mut self, text: &str) {
        self.text = Self::sanitize(text);
        self.offset = 0;
        self.pausing = true;
        self.waited = 0;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Column of the text shown at the window's left edge.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_pausing(&self) -> bool {
        self.pausing
    }

    fn sanitize(text: &str) -> String {
        strip(text).chars().filter(|c| !c.is_control()).collect()
    }

    fn window(&self, ctx: &RenderContext) -> usize {
        usize::from(self.geometry.unwrap_or(ctx.area).width)
    }

    /// The visible window, padded to exactly `width` cells.
    pub fn visible(&self, ctx: &RenderContext) -> String {
        let width = self.window(ctx);
        let text_width = ctx.layout.width(&self.text);
        if text_width <= width {
            return self.text.clone();
        }
        let gap = " ".repeat(width);
        let tape = format!("{}{gap}{}", self.text, self.text);
        let shown = ctx.layout.slice_columns(&tape, self.offset, width);
        let padding = width.saturating_sub(ctx.layout.width(&shown));
        format!("{shown}{}", " ".repeat(padding))
    }

    fn step(&mut self, tape_width: usize, scrolls: bool) {
        if !scrolls {
            return;
        }
        if self.pausing {
            self.waited += 1;
            if self.waited < self.delay {
                return;
            }
            self.waited = 0;
            self.pausing = false;
        }
        self.offset = (self.offset + 1) % tape_width.max(1);
        if self.offset == 0 {
            self.pausing = true;
        }
    }
}

impl CyclicWidget for Marquee {
    fn frame(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let area = self.geometry.unwrap_or(ctx.area);
        let text_width = ctx.layout.width(&self.text);
        let window = self.window(ctx);
        self.measured.set(Some((text_width + window, text_width > window)));

        let mut out = ctx.fg_or_default(self.foreground.as_ref());
        out.push_str(&ctx.bg_or_default(self.background.as_ref()));
        out.push_str(&cursor_at(i64::from(area.left) + 1, i64::from(area.top) + 1));
        out.push_str(&self.visible(ctx));
        out.push_str(&ctx.reset());
        Ok(out)
    }

    /// Steps against the window measured by the last frame. Never rendered means no step.
    fn advance(&mut self) {
        if let Some((tape_width, scrolls)) = self.measured.get() {
            self.step(tape_width, scrolls);
        }
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry.unwrap_or(ctx.area);
        Some(Rect::new(area.left, area.top, area.width, 1))
    }
}
