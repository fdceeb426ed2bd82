//! A named collection of screen parts.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::core::renderable::RenderContext;
use crate::error::ScreenError;
use crate::screen::hitbox::Hitbox;
use crate::screen::part::ScreenPart;

/// One composed frame.
#[derive(Debug, Default)]
pub struct Composition {
    pub text: String,
    /// Later entries sit above earlier ones.
    pub hitboxes: Vec<Hitbox>,
    /// A refresh was requested since the last composition; the frame must be redrawn whole.
    pub full_redraw: bool,
}

#[derive(Debug, Default)]
struct Parts {
    named: Vec<(String, ScreenPart)>,
    overlay: Option<ScreenPart>,
}

/// Shared between the caller and the redraw engine, so every method takes `&self`.
#[derive(Debug)]
pub struct Screen {
    parts: Mutex<Parts>,
    needs_refresh: AtomicBool,
    /// Milliseconds between cycles; zero defers to the engine's configured default.
    cycle_ms: AtomicU64,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            parts: Mutex::new(Parts::default()),
            needs_refresh: AtomicBool::new(true),
            cycle_ms: AtomicU64::new(0),
        }
    }
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    fn parts(&self) -> MutexGuard<'_, Parts> {
        self.parts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds `part` under `name` and returns the name actually used. A taken name gets
    /// `" [n]"` appended, `n` being the part count, until it is unique.
    pub fn add_part(&self, name: &str, part: ScreenPart) -> String {
        let mut parts = self.parts();
        let mut name = name.to_string();
        while parts.named.iter().any(|(existing, _)| *existing == name) {
            name = format!("{name} [{}]", parts.named.len());
            tracing::debug!(%name, "renamed screen part to avoid a conflict");
        }
        parts.named.push((name.clone(), part));
        name
    }

    pub fn remove_part(&self, name: &str) -> Result<ScreenPart, ScreenError> {
        let mut parts = self.parts();
        let index = parts
            .named
            .iter()
            .position(|(existing, _)| existing == name)
            .ok_or_else(|| ScreenError::PartNotFound(name.to_string()))?;
        Ok(parts.named.remove(index).1)
    }

    /// Replaces the part stored under `name`.
    pub fn edit_part(&self, name: &str, part: ScreenPart) -> Result<(), ScreenError> {
        self.with_part(name, |existing| *existing = part)
    }

    pub fn set_part_visible(&self, name: &str, visible: bool) -> Result<(), ScreenError> {
        self.with_part(name, |part| part.set_visible(visible))
    }

    pub fn set_part_order(&self, name: &str, order: i32) -> Result<(), ScreenError> {
        self.with_part(name, |part| part.set_order(order))
    }

    /// Runs `f` on the named part under the screen lock.
    pub fn with_part<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut ScreenPart) -> R,
    ) -> Result<R, ScreenError> {
        let mut parts = self.parts();
        parts
            .named
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, part)| f(part))
            .ok_or_else(|| ScreenError::PartNotFound(name.to_string()))
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts().named.iter().any(|(existing, _)| existing == name)
    }

    pub fn part_names(&self) -> Vec<String> {
        self.parts().named.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn clear_parts(&self) {
        self.parts().named.clear();
    }

    /// A part composed after every named part, regardless of order.
    pub fn set_overlay(&self, overlay: Option<ScreenPart>) {
        self.parts().overlay = overlay;
    }

    /// Makes the next composition redraw the whole console.
    pub fn request_refresh(&self) {
        self.needs_refresh.store(true, Ordering::SeqCst);
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh.load(Ordering::SeqCst)
    }

    pub fn cycle_frequency(&self) -> Option<Duration> {
        match self.cycle_ms.load(Ordering::SeqCst) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn set_cycle_frequency(&self, frequency: Duration) {
        let ms = u64::try_from(frequency.as_millis()).unwrap_or(u64::MAX);
        self.cycle_ms.store(ms, Ordering::SeqCst);
    }

    /// Composes every visible part, lowest order first. Parts sharing an order keep their
    /// insertion order.
    pub fn compose(&self, ctx: &RenderContext) -> Composition {
        let full_redraw = self.needs_refresh.swap(false, Ordering::SeqCst);
        let parts = self.parts();
        let mut sorted: Vec<&ScreenPart> = parts.named.iter().map(|(_, part)| part).collect();
        sorted.sort_by_key(|part| part.order());
        sorted.extend(parts.overlay.as_ref());

        let mut composition = Composition {
            full_redraw,
            ..Composition::default()
        };
        for part in sorted {
            let output = part.compose(ctx);
            composition.text.push_str(&output.text);
            composition.hitboxes.extend(output.hitboxes);
        }
        tracing::trace!(
            bytes = composition.text.len(),
            hitboxes = composition.hitboxes.len(),
            full_redraw,
            "composed screen"
        );
        composition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use pretty_assertions::assert_eq;

    fn text_part(text: &'static str) -> ScreenPart {
        let mut part = ScreenPart::new();
        part.add_static_text(text);
        part
    }

    fn ctx() -> RenderContext {
        RenderContext::new(Size::new(10, 5)).without_colors()
    }

    #[test]
    fn duplicate_names_are_suffixed() {
        let screen = Screen::new();
        assert_eq!(screen.add_part("main", text_part("a")), "main");
        assert_eq!(screen.add_part("main", text_part("b")), "main [1]");
        assert_eq!(screen.add_part("main", text_part("c")), "main [2]");
        assert_eq!(screen.part_names(), vec!["main", "main [1]", "main [2]"]);
    }

    #[test]
    fn order_then_insertion_decides_composition() {
        let screen = Screen::new();
        screen.add_part("top", text_part("T"));
        screen.add_part("first", text_part("1"));
        screen.add_part("second", text_part("2"));
        screen.set_part_order("top", 5).unwrap();
        screen.set_overlay(Some(text_part("O")));
        assert_eq!(screen.compose(&ctx()).text, "12TO");

        screen.set_part_visible("first", false).unwrap();
        assert_eq!(screen.compose(&ctx()).text, "2TO");
    }

    #[test]
    fn refresh_is_reported_once() {
        let screen = Screen::new();
        assert!(screen.compose(&ctx()).full_redraw, "a new screen starts dirty");
        assert!(!screen.compose(&ctx()).full_redraw);
        screen.request_refresh();
        assert!(screen.compose(&ctx()).full_redraw);
    }

    #[test]
    fn missing_parts_are_errors() {
        let screen = Screen::new();
        assert!(matches!(
            screen.remove_part("nope"),
            Err(ScreenError::PartNotFound(name)) if name == "nope"
        ));
        assert!(screen.set_part_visible("nope", true).is_err());
        screen.add_part("yes", text_part("y"));
        assert!(screen.remove_part("yes").is_ok());
        assert!(!screen.has_part("yes"));
    }

    #[test]
    fn cycle_frequency_round_trips() {
        let screen = Screen::new();
        assert_eq!(screen.cycle_frequency(), None);
        screen.set_cycle_frequency(Duration::from_millis(25));
        assert_eq!(screen.cycle_frequency(), Some(Duration::from_millis(25)));
    }
}
