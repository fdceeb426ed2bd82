//! Terminal widgets composed into buffered, diff-rendered screens.
//!
//! Invariant: single output gate. Only `core::output::OutputGate::flush(..)` writes to the
//! console.
//!
//! # Public API Overview
//! - Build control sequences with [`EscapeSequence`] and validate them against their grammar.
//! - Describe colors with [`Color`] in indexed, RGB, CMYK, HSL or named form.
//! - Lay out text with [`TextLayout`] (width, wrap, truncate, align).
//! - Draw widgets ([`Border`], [`Table`], [`Progress`], charts, ...) as [`Renderable`]s.
//! - Compose renderables into a [`Screen`] and let a [`ScreenEngine`] redraw it.

#![allow(
    clippy::derivable_impls,
    clippy::needless_range_loop,
    clippy::question_mark,
    clippy::too_many_arguments,
    clippy::type_complexity,
    clippy::unnecessary_map_or
)]

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod screen;
pub mod widgets;

/// Environment configuration and tracing setup.
pub use crate::config::EnvConfig;
pub use crate::logging::{init_tracing, LoggingGuard};

/// Typed errors.
pub use crate::error::{ColorError, RenderError, ScreenError, SequenceError};

/// Control sequence construction.
pub use crate::core::sequence::{EscapeSequence, SequenceKind, StringTerminator};

/// Color model.
pub use crate::core::color::{Color, ColorDepth, Rgb};

/// Cell geometry.
pub use crate::core::coordinate::{Coordinate, Padding, Rect, Size};

/// Text layout helpers.
pub use crate::core::text::{Alignment, TextLayout, WidthOracle};

/// Renderable contract.
pub use crate::core::renderable::{
    CyclicWidget, DynamicText, RenderContext, Renderable, StaticWidget,
};

/// Console seam and the single write gate.
pub use crate::core::console::{Console, VirtualConsole};
pub use crate::core::output::{ConsoleCmd, OutputGate};
#[cfg(unix)]
pub use crate::platform::ProcessConsole;

/// Cell buffers and diff rendering.
pub use crate::render::{Buffer, Cell, DiffRenderer};

/// Screens and the redraw engine.
pub use crate::screen::{
    Composition, EngineState, Hitbox, HitboxCallback, PartOutput, PointerButton, PointerEvent,
    PointerPress, Screen, ScreenEngine, ScreenPart,
};

/// Built-in widgets.
pub use crate::widgets::{
    AlignedText, BarChart, Border, BorderPart, BorderSettings, BoxFrame, BreakdownChart,
    Calendar, CalendarColors, Canvas, CellOptions, ChartElement, Choice, FilledBox, FrameColors,
    LineChart, Marquee, Pixel, Progress, ProgressState, ProgressTone, Rainbow, Selection,
    SelectionColors, Slider, Spinner, SpinnerStyle, StickChart, Table, TableColors,
    TextSettings, TrackGlyphs, WinLoss, WinsLosses,
};

/// Visible width helper that ignores control sequences.
pub use crate::core::text::visible_width;
