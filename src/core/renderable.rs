//! The renderable contract shared by widgets and the redraw engine.
//!
//! A widget is either *static* (its output is a pure function of its configuration and the
//! [`RenderContext`]) or *cyclic* (each render shows the current frame and then steps its
//! animation state). The engine only ever sees [`Renderable`], never a concrete widget, and
//! never owns a widget's lifetime: both variants are `Arc` handles the caller keeps too.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, RwLock};

use crate::config::EnvConfig;
use crate::core::color::{Color, ColorDepth};
use crate::core::coordinate::{Coordinate, Rect, Size};
use crate::core::sequence::{cursor_position, RESET_STYLE};
use crate::core::text::TextLayout;
use crate::error::RenderError;

/// Everything a widget may consult while rendering, passed explicitly instead of read from
/// global state.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Placement rectangle, or the whole console when the widget was added unpositioned.
    pub area: Rect,
    /// The full console extent, used for centering.
    pub console: Size,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub depth: ColorDepth,
    pub use_colors: bool,
    pub layout: TextLayout,
}

impl RenderContext {
    pub fn new(console: Size) -> Self {
        Self {
            area: Rect::from_size(console),
            console,
            foreground: None,
            background: None,
            depth: ColorDepth::TrueColor,
            use_colors: true,
            layout: TextLayout::default(),
        }
    }

    pub fn from_config(config: &EnvConfig, console: Size) -> Self {
        let depth = if config.palette256 {
            ColorDepth::Palette256
        } else {
            ColorDepth::TrueColor
        };
        Self {
            depth,
            use_colors: !config.no_color,
            layout: TextLayout::default().with_tab_width(config.tab_width),
            ..Self::new(console)
        }
    }

    pub fn with_colors(mut self, foreground: Option<Color>, background: Option<Color>) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_depth(mut self, depth: ColorDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// The same context narrowed to `area`.
    pub fn with_area(&self, area: Rect) -> Self {
        Self {
            area,
            ..self.clone()
        }
    }

    /// Foreground sequence for `color` at this context's depth, or `""` with colors off.
    pub fn fg(&self, color: &Color) -> String {
        if !self.use_colors {
            return String::new();
        }
        color.render_foreground_at(self.depth)
    }

    pub fn bg(&self, color: &Color) -> String {
        if !self.use_colors {
            return String::new();
        }
        color.render_background_at(self.depth)
    }

    /// `fg` for an optional widget color, falling back to the context default.
    pub fn fg_or_default(&self, color: Option<&Color>) -> String {
        color
            .or(self.foreground.as_ref())
            .map(|color| self.fg(color))
            .unwrap_or_default()
    }

    pub fn bg_or_default(&self, color: Option<&Color>) -> String {
        color
            .or(self.background.as_ref())
            .map(|color| self.bg(color))
            .unwrap_or_default()
    }

    /// `bg_or_default`, or the background reset when neither color is set.
    pub fn bg_or_reset(&self, color: Option<&Color>) -> String {
        if !self.use_colors {
            return String::new();
        }
        match color.or(self.background.as_ref()) {
            Some(color) => self.bg(color),
            None => Color::reset_background().to_string(),
        }
    }

    /// The style reset, followed by the context default colors.
    pub fn reset(&self) -> String {
        if !self.use_colors {
            return String::new();
        }
        let mut text = RESET_STYLE.to_string();
        text.push_str(&self.fg_or_default(None));
        text.push_str(&self.bg_or_default(None));
        text
    }

    /// Cursor move to the 0-based `(x, y)`.
    pub fn move_to(&self, x: u16, y: u16) -> String {
        cursor_position(Coordinate::new(x, y))
    }
}

/// A widget whose output depends only on its configuration and the context.
pub trait StaticWidget: Send + Sync {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError>;

    /// Screen region the widget covers, when known. Used for pointer hitboxes.
    fn bounds(&self, _ctx: &RenderContext) -> Option<Rect> {
        None
    }
}

/// A widget with animation state. Rendering shows [`CyclicWidget::frame`] and then calls
/// [`CyclicWidget::advance`].
pub trait CyclicWidget: Send {
    fn frame(&self, ctx: &RenderContext) -> Result<String, RenderError>;

    fn advance(&mut self);

    fn bounds(&self, _ctx: &RenderContext) -> Option<Rect> {
        None
    }
}

#[derive(Clone)]
pub enum Renderable {
    Static(Arc<RwLock<dyn StaticWidget>>),
    Cyclic(Arc<Mutex<dyn CyclicWidget>>),
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderable::Static(_) => f.write_str("Renderable::Static(..)"),
            Renderable::Cyclic(_) => f.write_str("Renderable::Cyclic(..)"),
        }
    }
}

impl Renderable {
    pub fn new_static<W: StaticWidget + 'static>(widget: W) -> Self {
        Self::Static(Arc::new(RwLock::new(widget)))
    }

    pub fn new_cyclic<W: CyclicWidget + 'static>(widget: W) -> Self {
        Self::Cyclic(Arc::new(Mutex::new(widget)))
    }

    /// Wraps a handle the caller keeps for later mutation.
    pub fn shared_static<W: StaticWidget + 'static>(widget: Arc<RwLock<W>>) -> Self {
        Self::Static(widget)
    }

    pub fn shared_cyclic<W: CyclicWidget + 'static>(widget: Arc<Mutex<W>>) -> Self {
        Self::Cyclic(widget)
    }

    pub fn is_cyclic(&self) -> bool {
        matches!(self, Renderable::Cyclic(_))
    }

    /// Renders one frame.
    ///
    /// Failures never propagate: a widget error, a poisoned lock or a panic is logged and
    /// the result is empty output.
    pub fn render(&self, ctx: &RenderContext) -> String {
        match self.try_render(ctx) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, widget = ?self, "widget render failed");
                String::new()
            }
        }
    }

    /// Like [`Renderable::render`] but reports the failure instead of logging it.
    pub fn try_render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match self {
            Renderable::Static(widget) => {
                let widget = widget.read().map_err(|_| RenderError::Poisoned)?;
                widget.render(ctx)
            }
            Renderable::Cyclic(widget) => {
                let mut widget = widget.lock().map_err(|_| RenderError::Poisoned)?;
                let frame = widget.frame(ctx)?;
                widget.advance();
                Ok(frame)
            }
        }));
        outcome.unwrap_or(Err(RenderError::Panicked))
    }

    pub fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        match self {
            Renderable::Static(widget) => widget.read().ok()?.bounds(ctx),
            Renderable::Cyclic(widget) => widget.lock().ok()?.bounds(ctx),
        }
    }
}

type TextSource = dyn Fn() -> String + Send + Sync;

/// Static renderable backed by a closure, evaluated on every render.
pub struct DynamicText {
    source: Box<TextSource>,
}

impl DynamicText {
    pub fn new<F>(source: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }
}

impl fmt::Debug for DynamicText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicText").finish_non_exhaustive()
    }
}

impl StaticWidget for DynamicText {
    fn render(&self, _ctx: &RenderContext) -> Result<String, RenderError> {
        Ok((self.source)())
    }
}
