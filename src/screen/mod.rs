//! Buffered screens and the engine that redraws them.

pub mod engine;
pub mod hitbox;
pub mod part;
#[allow(clippy::module_inception)]
pub mod screen;

pub use engine::{EngineState, ScreenEngine};
pub use hitbox::{Hitbox, HitboxCallback, PointerButton, PointerEvent, PointerPress};
pub use part::{PartOutput, ScreenPart};
pub use screen::{Composition, Screen};
