//! Progress bar with a percentage suffix and an indeterminate bouncing mode.

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{CyclicWidget, RenderContext};
use crate::error::RenderError;
use crate::widgets::slider::{Slider, TrackGlyphs, TrackPainter};

/// Last step of the indeterminate bounce; the thumb travels over `0..=INDETERMINATE_LAST`.
pub const INDETERMINATE_LAST: i64 = 49;
/// Cells reserved for the `" NNN%"` suffix, counted the way the track math expects.
const PERCENTAGE_WIDTH: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressState {
    #[default]
    Normal,
    /// The bar keeps showing its last frame and the indeterminate step does not move.
    Paused,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressTone {
    #[default]
    Normal,
    Warning,
    Failed,
}

impl ProgressTone {
    /// `(inactive, active)` track colors.
    pub fn colors(self) -> (Color, Color) {
        match self {
            ProgressTone::Normal => (Color::rgb(0, 95, 0), Color::rgb(0, 255, 0)),
            ProgressTone::Warning => (Color::rgb(95, 95, 0), Color::rgb(255, 255, 0)),
            ProgressTone::Failed => (Color::rgb(95, 0, 0), Color::rgb(255, 0, 0)),
        }
    }
}

/// Filled cells for `position` of `max` on a `track`-cell bar.
pub fn cells(position: i64, max: i64, track: i64) -> i64 {
    if max == 0 || track <= 0 {
        return 0;
    }
    let filled = (position as f64 * track as f64 / max as f64).round() as i64;
    filled.clamp(0, track)
}

/// Whole percent, truncated. Zero when `max` is zero.
pub fn percentage(position: i64, max: i64) -> i64 {
    if max == 0 {
        return 0;
    }
    (position as f64 * 100.0 / max as f64) as i64
}

#[derive(Debug, Clone)]
pub struct Progress {
    /// `left`, `top` and the bar length (`width`, or `height` when vertical).
    pub geometry: Option<Rect>,
    pub position: i64,
    pub max: i64,
    pub show_percentage: bool,
    pub vertical: bool,
    pub state: ProgressState,
    pub tone: ProgressTone,
    pub percentage_color: Color,
    pub background: Option<Color>,
    pub glyphs: TrackGlyphs,
    step: i64,
    backwards: bool,
    /// Paused while indeterminate: keep drawing the thumb.
    paused_thumb: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            geometry: None,
            position: 0,
            max: 100,
            show_percentage: true,
            vertical: false,
            state: ProgressState::Normal,
            tone: ProgressTone::Normal,
            percentage_color: Color::rgb(192, 192, 192),
            background: None,
            glyphs: TrackGlyphs::default(),
            step: 0,
            backwards: false,
            paused_thumb: false,
        }
    }
}

impl Progress {
    pub fn new(position: i64, max: i64) -> Self {
        Self {
            position,
            max,
            ..Self::default()
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn with_state(mut self, state: ProgressState) -> Self {
        self.set_state(state);
        self
    }

    pub fn with_tone(mut self, tone: ProgressTone) -> Self {
        self.tone = tone;
        self
    }

    pub fn set_position(&mut self, position: i64) {
        self.position = position;
    }

    pub fn set_state(&mut self, state: ProgressState) {
        self.paused_thumb = match state {
            ProgressState::Paused => self.shows_thumb(),
            _ => false,
        };
        self.state = state;
    }

    fn shows_thumb(&self) -> bool {
        self.state == ProgressState::Indeterminate || self.paused_thumb
    }

    pub fn set_tone(&mut self, tone: ProgressTone) {
        self.tone = tone;
    }

    /// Current indeterminate step, always within `0..=INDETERMINATE_LAST`.
    pub fn step(&self) -> i64 {
        self.step
    }

    fn geometry(&self, ctx: &RenderContext) -> Rect {
        self.geometry.unwrap_or(ctx.area)
    }

    fn indeterminate_frame(&self, ctx: &RenderContext, area: Rect) -> Result<String, RenderError> {
        use crate::core::renderable::StaticWidget;

        let (inactive, active) = self.tone.colors();
        let slider = Slider {
            geometry: Some(area),
            position: self.step,
            min: 0,
            max: INDETERMINATE_LAST + 1,
            vertical: self.vertical,
            foreground: inactive,
            active_foreground: active,
            background: self.background.clone(),
            glyphs: self.glyphs,
        };
        slider.render(ctx)
    }
}

impl CyclicWidget for Progress {
    fn frame(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let area = self.geometry(ctx);
        if self.shows_thumb() {
            return self.indeterminate_frame(ctx, area);
        }

        let (inactive_color, active_color) = self.tone.colors();
        let (active, inactive) = self.glyphs.pick(self.vertical, ctx.use_colors);
        let mut painter = TrackPainter::new(
            ctx,
            i64::from(area.left),
            i64::from(area.top),
            self.vertical,
        );
        painter.style(&ctx.bg_or_default(self.background.as_ref()));

        if self.vertical {
            let track = i64::from(area.height);
            let filled = cells(self.position, self.max, track);
            painter.run(&active_color, active, filled);
            painter.run(&inactive_color, inactive, track - filled);
            return Ok(painter.finish());
        }

        let width = i64::from(area.width);
        let track = if self.show_percentage {
            width - PERCENTAGE_WIDTH + 1
        } else {
            width
        };
        if track <= 0 {
            return Ok(String::new());
        }
        let filled = cells(self.position, self.max, track);
        painter.run(&active_color, active, filled);
        painter.run(&inactive_color, inactive, track - filled);
        if self.show_percentage {
            painter.style(&ctx.fg(&self.percentage_color));
            painter.style(&format!(" {:>3}%", percentage(self.position, self.max)));
        }
        Ok(painter.finish())
    }

    /// Moves the indeterminate thumb one step, bouncing at both ends.
    fn advance(&mut self) {
        if self.state != ProgressState::Indeterminate {
            return;
        }
        if self.backwards {
            self.step -= 1;
            if self.step <= 0 {
                self.step = 0;
                self.backwards = false;
            }
        } else {
            self.step += 1;
            if self.step >= INDETERMINATE_LAST {
                self.step = INDETERMINATE_LAST;
                self.backwards = true;
            }
        }
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry(ctx);
        Some(if self.vertical {
            Rect::new(area.left, area.top, 1, area.height)
        } else {
            Rect::new(area.left, area.top, area.width, 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;

    #[test]
    fn cell_boundaries() {
        assert_eq!(cells(0, 100, 20), 0);
        assert_eq!(cells(100, 100, 20), 20);
        assert_eq!(cells(50, 0, 20), 0);
        assert_eq!(cells(150, 100, 20), 20);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(7, 0), 0);
    }

    #[test]
    fn bar_with_percentage() {
        let progress = Progress::new(50, 100).at(Rect::new(0, 0, 15, 1));
        let ctx = RenderContext::new(Size::new(20, 2)).without_colors();
        // Track of 15 - 6 + 1 = 10 cells, then " NNN%".
        assert_eq!(
            progress.frame(&ctx).unwrap(),
            "\x1b[1;1H█████▒▒▒▒▒  50%"
        );
    }

    #[test]
    fn bar_without_percentage_fills_the_width() {
        let progress = Progress::new(3, 4).at(Rect::new(1, 1, 8, 1)).with_percentage(false);
        let ctx = RenderContext::new(Size::new(20, 5)).without_colors();
        assert_eq!(progress.frame(&ctx).unwrap(), "\x1b[2;2H██████▒▒");
    }

    #[test]
    fn indeterminate_bounces_within_range() {
        let mut progress = Progress::new(0, 100).with_state(ProgressState::Indeterminate);
        let mut seen = Vec::new();
        for _ in 0..120 {
            progress.advance();
            seen.push(progress.step());
        }
        assert!(seen.iter().all(|step| (0..=INDETERMINATE_LAST).contains(step)));
        assert_eq!(seen[48], 49);
        assert_eq!(seen[49], 48);
        assert_eq!(seen[96], 1);
        assert_eq!(seen[97], 0);
        assert_eq!(seen[98], 1);
    }

    #[test]
    fn paused_progress_does_not_step() {
        let mut progress = Progress::new(0, 100).with_state(ProgressState::Indeterminate);
        progress.advance();
        progress.set_state(ProgressState::Paused);
        progress.advance();
        progress.advance();
        assert_eq!(progress.step(), 1);

        let ctx = RenderContext::new(Size::new(60, 2)).without_colors();
        let paused = progress.at(Rect::new(0, 0, 50, 1)).frame(&ctx).unwrap();
        assert!(paused.contains('█'));
        assert!(!paused.contains('%'));
    }

    #[test]
    fn tone_changes_the_active_color() {
        let progress = Progress::new(10, 10)
            .at(Rect::new(0, 0, 4, 1))
            .with_percentage(false)
            .with_tone(ProgressTone::Failed);
        let ctx = RenderContext::new(Size::new(10, 2));
        let text = progress.frame(&ctx).unwrap();
        assert!(text.contains(&format!("{}━━━━", ctx.fg(&Color::rgb(255, 0, 0)))));
    }
}
