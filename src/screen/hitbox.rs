//! Pointer regions published by each composed frame.

use std::fmt;
use std::sync::Arc;

use crate::core::coordinate::{Coordinate, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    None,
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPress {
    Pressed,
    Released,
    Moved,
}

/// A pointer report in 0-based cell coordinates, produced by whatever reads console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub position: Coordinate,
    pub button: PointerButton,
    pub press: PointerPress,
}

impl PointerEvent {
    pub fn new(position: Coordinate, button: PointerButton, press: PointerPress) -> Self {
        Self {
            position,
            button,
            press,
        }
    }

    pub fn click(x: u16, y: u16) -> Self {
        Self::new(
            Coordinate::new(x, y),
            PointerButton::Left,
            PointerPress::Released,
        )
    }
}

pub type HitboxCallback = Arc<dyn Fn(&PointerEvent) -> Option<String> + Send + Sync>;

/// A rectangle that answers pointer events falling inside it.
///
/// The optional button and press filters narrow which events reach the callback; unset
/// filters accept everything.
#[derive(Clone)]
pub struct Hitbox {
    pub area: Rect,
    pub button: Option<PointerButton>,
    pub press: Option<PointerPress>,
    callback: HitboxCallback,
}

impl fmt::Debug for Hitbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hitbox")
            .field("area", &self.area)
            .field("button", &self.button)
            .field("press", &self.press)
            .finish_non_exhaustive()
    }
}

impl Hitbox {
    pub fn new(area: Rect, callback: HitboxCallback) -> Self {
        Self {
            area,
            button: None,
            press: None,
            callback,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_press(mut self, press: PointerPress) -> Self {
        self.press = Some(press);
        self
    }

    pub fn contains(&self, position: Coordinate) -> bool {
        self.area.contains(position)
    }

    /// Whether `event` lands inside the area and passes both filters.
    pub fn accepts(&self, event: &PointerEvent) -> bool {
        self.contains(event.position)
            && self.button.map_or(true, |button| button == event.button)
            && self.press.map_or(true, |press| press == event.press)
    }

    /// Runs the callback for an accepted event. Events outside the area or filtered out
    /// return `None` without calling it.
    pub fn process(&self, event: &PointerEvent) -> Option<String> {
        if !self.accepts(event) {
            return None;
        }
        (self.callback)(event)
    }
}

/// Topmost hitbox accepting `event`. Later entries were composed above earlier ones.
pub fn topmost<'a>(hitboxes: &'a [Hitbox], event: &PointerEvent) -> Option<&'a Hitbox> {
    hitboxes.iter().rev().find(|hitbox| hitbox.accepts(event))
}
