//! Ordered groups of renderables that make up a screen.

use crate::core::coordinate::{Padding, Rect};
use crate::core::renderable::{DynamicText, RenderContext, Renderable};
use crate::screen::hitbox::{Hitbox, HitboxCallback};

#[derive(Debug, Clone)]
struct PartEntry {
    renderable: Renderable,
    area: Option<Rect>,
    hitbox: Option<HitboxSpec>,
}

#[derive(Clone)]
struct HitboxSpec {
    callback: HitboxCallback,
    padding: Padding,
}

impl std::fmt::Debug for HitboxSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitboxSpec")
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}

/// A bag of renderables composed in insertion order.
///
/// Parts with a lower `order` are composed first, so higher-order parts paint over them.
#[derive(Debug, Clone)]
pub struct ScreenPart {
    entries: Vec<PartEntry>,
    order: i32,
    visible: bool,
}

impl Default for ScreenPart {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            order: 0,
            visible: true,
        }
    }
}

/// What a part contributed to one frame.
#[derive(Debug, Default)]
pub struct PartOutput {
    pub text: String,
    pub hitboxes: Vec<Hitbox>,
}

impl ScreenPart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a renderable drawn against the whole console area.
    pub fn add_renderable(&mut self, renderable: Renderable) -> &mut Self {
        self.entries.push(PartEntry {
            renderable,
            area: None,
            hitbox: None,
        });
        self
    }

    /// Adds a renderable whose context area is `area`.
    pub fn add_positioned(&mut self, renderable: Renderable, area: Rect) -> &mut Self {
        self.entries.push(PartEntry {
            renderable,
            area: Some(area),
            hitbox: None,
        });
        self
    }

    /// Adds text produced fresh on every composition.
    pub fn add_text<F>(&mut self, source: F) -> &mut Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.add_renderable(Renderable::new_static(DynamicText::new(source)))
    }

    pub fn add_static_text(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        self.add_text(move || text.clone())
    }

    /// Attaches a pointer region to the most recently added renderable. The region is its
    /// bounds grown by `padding`; renderables without bounds fall back to their area.
    pub fn with_hitbox(&mut self, callback: HitboxCallback, padding: Padding) -> &mut Self {
        match self.entries.last_mut() {
            Some(entry) => entry.hitbox = Some(HitboxSpec { callback, padding }),
            None => tracing::debug!("hitbox attached to an empty screen part was ignored"),
        }
        self
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Renders every entry in order. Hidden parts contribute nothing.
    pub fn compose(&self, ctx: &RenderContext) -> PartOutput {
        let mut output = PartOutput::default();
        if !self.visible {
            return output;
        }
        for entry in &self.entries {
            let entry_ctx = match entry.area {
                Some(area) => ctx.with_area(area),
                None => ctx.clone(),
            };
            output.text.push_str(&entry.renderable.render(&entry_ctx));
            if let Some(spec) = &entry.hitbox {
                let bounds = entry
                    .renderable
                    .bounds(&entry_ctx)
                    .unwrap_or(entry_ctx.area);
                output
                    .hitboxes
                    .push(Hitbox::new(bounds.pad(spec.padding), spec.callback.clone()));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::screen::hitbox::PointerEvent;
    use crate::widgets::FilledBox;
    use std::sync::Arc;

    fn ctx() -> RenderContext {
        RenderContext::new(Size::new(20, 10)).without_colors()
    }

    #[test]
    fn composes_in_insertion_order() {
        let mut part = ScreenPart::new();
        part.add_static_text("a").add_text(|| "b".to_string());
        assert_eq!(part.compose(&ctx()).text, "ab");
        assert_eq!(part.len(), 2);
    }

    #[test]
    fn hidden_part_is_empty() {
        let mut part = ScreenPart::new();
        part.add_static_text("a");
        part.set_visible(false);
        let output = part.compose(&ctx());
        assert!(output.text.is_empty());
        assert!(output.hitboxes.is_empty());
    }

    #[test]
    fn hitbox_follows_bounds_plus_padding() {
        let mut part = ScreenPart::new();
        part.add_positioned(Renderable::new_static(FilledBox::default()), Rect::new(4, 2, 3, 2))
            .with_hitbox(Arc::new(|_| Some("box".to_string())), Padding::uniform(1));
        let output = part.compose(&ctx());
        assert_eq!(output.hitboxes.len(), 1);
        let hitbox = &output.hitboxes[0];
        assert_eq!(hitbox.area, Rect::new(3, 1, 5, 4));
        assert_eq!(hitbox.process(&PointerEvent::click(3, 1)), Some("box".to_string()));
    }

    #[test]
    fn text_entries_use_the_console_area_for_hitboxes() {
        let mut part = ScreenPart::new();
        part.add_static_text("x")
            .with_hitbox(Arc::new(|_| None), Padding::default());
        let output = part.compose(&ctx());
        assert_eq!(output.hitboxes[0].area, Rect::new(0, 0, 20, 10));
    }
}
