//! Rendering pipeline: composed text is painted into a [`Buffer`] and diffed against the
//! previous one.

pub mod buffer;
pub mod diff;

pub use buffer::{Buffer, Cell};
pub use diff::DiffRenderer;
