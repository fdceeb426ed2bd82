//! Error types shared across the crate.

use thiserror::Error;

use crate::core::sequence::{SequenceKind, StringTerminator};

/// Failure to build a control sequence.
///
/// A generated sequence that does not satisfy its own grammar means the caller handed in
/// parameters that escape the intended shape. These are programming errors and are never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("generated {kind:?} sequence {rendered:?} does not match its grammar")]
    GrammarMismatch { kind: SequenceKind, rendered: String },
    #[error("{kind:?} sequences cannot be terminated with {terminator:?}")]
    UnsupportedTerminator {
        kind: SequenceKind,
        terminator: StringTerminator,
    },
    #[error("{kind:?} sequence expects {expected} parameter(s), got {actual}")]
    ParameterCount {
        kind: SequenceKind,
        expected: usize,
        actual: usize,
    },
    #[error("{0:?} sequence is missing its terminator")]
    MissingTerminator(SequenceKind),
    #[error("invalid CSI final byte {0:?}")]
    InvalidFinalByte(char),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("empty color specifier")]
    Empty,
    #[error("unrecognized color specifier {0:?}")]
    Unrecognized(String),
    #[error("color component {component} out of range: {value}")]
    OutOfRange { component: &'static str, value: f64 },
    #[error("unknown color name {0:?}")]
    UnknownName(String),
}

/// Failure inside a widget's render step.
///
/// These never escape a frame: the renderable boundary logs them and substitutes empty
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("widget geometry {width}x{height} leaves no interior")]
    EmptyGeometry { width: u16, height: u16 },
    #[error("widget has no data to render: {0}")]
    MissingData(&'static str),
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
    #[error("widget lock poisoned")]
    Poisoned,
    #[error("widget panicked while rendering")]
    Panicked,
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("screen part {0:?} not found")]
    PartNotFound(String),
    #[error("failed to spawn redraw thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("console write failed: {0}")]
    Console(#[from] std::io::Error),
}
