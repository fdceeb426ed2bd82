//! Paged list of choices with a highlighted entry.

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::slider::{Slider, TrackGlyphs};
use crate::widgets::{cursor_at, span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: String,
    pub title: Option<String>,
    pub disabled: bool,
}

impl Choice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            disabled: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Line colors. When every entry is unset the list is drawn without color sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionColors {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub selected_foreground: Option<Color>,
    pub selected_background: Option<Color>,
    pub disabled_foreground: Option<Color>,
    pub disabled_background: Option<Color>,
}

impl SelectionColors {
    fn any(&self) -> bool {
        [
            &self.foreground,
            &self.background,
            &self.selected_foreground,
            &self.selected_background,
            &self.disabled_foreground,
            &self.disabled_background,
        ]
        .iter()
        .any(|color| color.is_some())
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    /// `left`, `top`, line width and page height.
    pub geometry: Option<Rect>,
    pub choices: Vec<Choice>,
    pub colors: SelectionColors,
    /// Draw the selected line with its foreground and background exchanged.
    pub swap_selected_colors: bool,
    /// Shift the list one column right so the scroll slider sits inside the area.
    pub slider_inside: bool,
    selected: usize,
}

impl Selection {
    pub fn new(choices: Vec<Choice>) -> Self {
        let mut selection = Self {
            geometry: None,
            choices,
            colors: SelectionColors::default(),
            swap_selected_colors: true,
            slider_inside: false,
            selected: 0,
        };
        if selection.choices.first().is_some_and(|choice| choice.disabled) {
            selection.select_next();
        }
        selection
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_colors(mut self, colors: SelectionColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_choice(&self) -> Option<&Choice> {
        self.choices.get(self.selected)
    }

    /// Selects `index` when it names an enabled choice. Returns whether the selection moved.
    pub fn select(&mut self, index: usize) -> bool {
        match self.choices.get(index) {
            Some(choice) if !choice.disabled => {
                self.selected = index;
                true
            }
            _ => false,
        }
    }

    /// Moves to the next enabled choice, wrapping past the end.
    pub fn select_next(&mut self) {
        let count = self.choices.len();
        for step in 1..=count {
            if self.select((self.selected + step) % count) {
                return;
            }
        }
    }

    /// Moves to the previous enabled choice, wrapping past the start.
    pub fn select_previous(&mut self) {
        let count = self.choices.len();
        for step in 1..=count {
            if self.select((self.selected + count - step) % count) {
                return;
            }
        }
    }

    /// First choice shown on the page that holds the selection.
    pub fn page_start(&self, height: usize) -> usize {
        if height == 0 {
            return 0;
        }
        self.selected / height * height
    }

    /// Every choice laid out as `"> name) title"`, titles lined up in one column and the
    /// whole line cut four cells short of `width`.
    pub fn lines(&self, ctx: &RenderContext, width: usize) -> Vec<String> {
        let title_column = self
            .choices
            .iter()
            .map(|choice| ctx.layout.width(&choice.name) + 4)
            .max()
            .unwrap_or(0);
        self.choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                let marker = if index == self.selected {
                    '>'
                } else if choice.disabled {
                    'X'
                } else {
                    ' '
                };
                let head = format!("{marker} {}) ", choice.name);
                let title = choice.title.as_deref().unwrap_or("");
                let line = if title_column < width {
                    let gap = title_column.saturating_sub(ctx.layout.width(&head));
                    format!("{head}{}{title}", " ".repeat(gap))
                } else {
                    format!("{head}{title}")
                };
                ctx.layout.truncate(&line, width.saturating_sub(4))
            })
            .collect()
    }

    fn line_colors(&self, ctx: &RenderContext, index: usize) -> (Option<Color>, Option<Color>) {
        let colors = &self.colors;
        let or_fg = |color: &Option<Color>| color.clone().or_else(|| ctx.foreground.clone());
        let or_bg = |color: &Option<Color>| color.clone().or_else(|| ctx.background.clone());
        let disabled = self.choices.get(index).is_some_and(|choice| choice.disabled);
        if disabled {
            (
                or_fg(&colors.disabled_foreground),
                or_bg(&colors.disabled_background),
            )
        } else if index == self.selected && self.swap_selected_colors {
            (
                or_bg(&colors.selected_background),
                or_fg(&colors.selected_foreground),
            )
        } else if index == self.selected {
            (
                or_fg(&colors.selected_foreground),
                or_bg(&colors.selected_background),
            )
        } else {
            (or_fg(&colors.foreground), or_bg(&colors.background))
        }
    }

    fn scroll_slider(&self, ctx: &RenderContext, area: Rect, colored: bool) -> Result<String, RenderError> {
        let column = i64::from(area.left) + i64::from(area.width) + i64::from(self.slider_inside);
        let top = i64::from(area.top);
        let height = i64::from(area.height);

        let mut out = String::new();
        let foreground = self.colors.foreground.clone().or_else(|| ctx.foreground.clone());
        if colored {
            out.push_str(&ctx.fg_or_default(foreground.as_ref()));
            out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));
        }
        out.push_str(&cursor_at(column + 1, top + 1));
        out.push('▲');
        out.push_str(&cursor_at(column + 1, top + height));
        out.push('▼');

        let mut slider = Slider::new(self.selected as i64 + 1, 0, self.choices.len() as i64)
            .at(Rect::new(
                column.clamp(0, i64::from(u16::MAX)) as u16,
                area.top.saturating_add(1),
                1,
                area.height.saturating_sub(2),
            ))
            .vertical(true);
        slider.glyphs = TrackGlyphs {
            vertical_active: '│',
            vertical_inactive: '│',
            ..TrackGlyphs::default()
        };
        if let (true, Some(foreground)) = (colored, foreground) {
            slider.foreground = dimmed(&foreground);
            slider.active_foreground = foreground;
            slider.background = self.colors.background.clone();
        }
        out.push_str(&slider.render(ctx)?);
        Ok(out)
    }
}

fn dimmed(color: &Color) -> Color {
    let rgb = color.resolved();
    Color::rgb(rgb.r / 2, rgb.g / 2, rgb.b / 2)
}

impl StaticWidget for Selection {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        if self.choices.is_empty() {
            return Err(RenderError::MissingData("selection has no choices"));
        }
        let area = self.geometry.unwrap_or(ctx.area);
        let width = usize::from(area.width);
        let height = usize::from(area.height);
        let colored = ctx.use_colors && self.colors.any();
        let left = i64::from(area.left) + i64::from(self.slider_inside);

        let lines = self.lines(ctx, width);
        let start = self.page_start(height);
        let mut out = String::new();
        let mut wiped = false;
        for row in 0..height {
            let index = start + row;
            out.push_str(&cursor_at(left + 1, i64::from(area.top) + row as i64 + 1));
            match lines.get(index) {
                Some(line) => {
                    if colored {
                        let (foreground, background) = self.line_colors(ctx, index);
                        out.push_str(&ctx.fg_or_default(foreground.as_ref()));
                        out.push_str(&ctx.bg_or_reset(background.as_ref()));
                    }
                    out.push_str(line);
                    let padding = width.saturating_sub(ctx.layout.width(line));
                    out.push_str(&" ".repeat(padding));
                }
                None => {
                    if colored && !wiped {
                        wiped = true;
                        out.push_str(&ctx.reset());
                    }
                    out.push_str(&span(' ', width as i64));
                }
            }
        }

        if self.choices.len() > height && height >= 4 {
            out.push_str(&self.scroll_slider(ctx, area, colored)?);
        }
        if colored {
            out.push_str(&ctx.reset());
        }
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let area = self.geometry.unwrap_or(ctx.area);
        Some(Rect::new(
            area.left,
            area.top,
            area.width.saturating_add(1 + u16::from(self.slider_inside)),
            area.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::render::Buffer;
    use pretty_assertions::assert_eq;

    fn choices(count: usize) -> Vec<Choice> {
        (1..=count).map(|n| Choice::new(n.to_string())).collect()
    }

    fn screen(selection: &Selection, size: Size) -> Vec<String> {
        let ctx = RenderContext::new(size).without_colors();
        let mut buffer = Buffer::new(size);
        buffer.paint(&selection.render(&ctx).unwrap(), &ctx.layout);
        (0..size.height).map(|y| buffer.row_text(y)).collect()
    }

    #[test]
    fn markers_and_title_column() {
        let selection = Selection::new(vec![
            Choice::new("one").with_title("First"),
            Choice::new("two").with_title("Second").disabled(true),
            Choice::new("three").with_title("Third"),
        ])
        .at(Rect::new(0, 0, 20, 3));
        assert_eq!(
            screen(&selection, Size::new(20, 3)),
            vec![
                "> one)   First      ",
                "X two)   Second     ",
                "  three) Third      ",
            ]
        );
    }

    #[test]
    fn navigation_skips_disabled_and_wraps() {
        let mut selection = Selection::new(vec![
            Choice::new("a").disabled(true),
            Choice::new("b"),
            Choice::new("c").disabled(true),
            Choice::new("d"),
        ]);
        assert_eq!(selection.selected(), 1);
        selection.select_next();
        assert_eq!(selection.selected(), 3);
        selection.select_next();
        assert_eq!(selection.selected(), 1);
        selection.select_previous();
        assert_eq!(selection.selected(), 3);
        assert!(!selection.select(2));
        assert_eq!(selection.selected(), 3);
    }

    #[test]
    fn pages_follow_the_selection() {
        let mut selection = Selection::new(choices(5)).at(Rect::new(0, 0, 10, 3));
        for _ in 0..4 {
            selection.select_next();
        }
        assert_eq!(selection.page_start(3), 3);
        let rows = screen(&selection, Size::new(10, 3));
        assert_eq!(rows, vec!["  4)      ", "> 5)      ", "          "]);
    }

    #[test]
    fn long_lists_get_a_scroll_slider() {
        let selection = Selection::new(choices(8)).at(Rect::new(0, 0, 10, 4));
        let rows = screen(&selection, Size::new(11, 4));
        assert!(rows[0].ends_with('▲'));
        assert!(rows[3].ends_with('▼'));

        let short = Selection::new(choices(3)).at(Rect::new(0, 0, 10, 4));
        let rows = screen(&short, Size::new(11, 4));
        assert!(rows.iter().all(|row| !row.contains('▲')));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let ctx = RenderContext::new(Size::new(10, 2));
        assert!(Selection::new(Vec::new()).render(&ctx).is_err());
    }

    #[test]
    fn colored_lines_swap_the_selected_pair() {
        let colors = SelectionColors {
            foreground: Some(Color::rgb(200, 200, 200)),
            background: Some(Color::rgb(0, 0, 0)),
            ..SelectionColors::default()
        };
        let selection = Selection::new(choices(2))
            .at(Rect::new(0, 0, 10, 2))
            .with_colors(colors);
        let ctx = RenderContext::new(Size::new(10, 2));
        let text = selection.render(&ctx).unwrap();
        // No selected colors are set, so the swapped line only resets its background.
        assert!(text.starts_with("\x1b[1;1H\x1b[49m> 1)"));
        assert!(text.contains(&format!(
            "{}{}  2)",
            ctx.fg(&Color::rgb(200, 200, 200)),
            ctx.bg(&Color::rgb(0, 0, 0))
        )));
    }
}
