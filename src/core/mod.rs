//! Core building blocks: sequences, colors, text layout, the renderable contract and the
//! console seam.

pub mod color;
pub mod console;
pub mod coordinate;
pub mod output;
pub mod renderable;
pub mod sequence;
pub mod text;
