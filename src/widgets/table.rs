//! Grid of text cells inside a border, with an optional header row and title.

use std::collections::HashMap;

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::core::text::Alignment;
use crate::error::RenderError;
use crate::widgets::border::Border;
use crate::widgets::settings::{BorderPart, BorderSettings, FrameColors};
use crate::widgets::{cursor_at, span};

/// Per-cell override, keyed by `(row, column)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellOptions {
    pub row: usize,
    pub column: usize,
    /// Foreground and background for this cell.
    pub colors: Option<(Color, Color)>,
    pub alignment: Alignment,
}

impl CellOptions {
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.colors = Some((foreground, background));
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableColors {
    pub separator: Option<Color>,
    pub header: Option<Color>,
    pub value: Option<Color>,
    pub background: Option<Color>,
}

/// `geometry` follows the border convention: outer top-left corner plus interior size. A
/// title takes the first two rows of that height.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub geometry: Option<Rect>,
    pub rows: Vec<Vec<String>>,
    pub header: bool,
    pub title: String,
    pub settings: BorderSettings,
    pub colors: TableColors,
    cell_options: HashMap<(usize, usize), CellOptions>,
}

impl Table {
    pub fn new<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_settings(mut self, settings: BorderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_colors(mut self, colors: TableColors) -> Self {
        self.colors = colors;
        self
    }

    /// Adds or replaces the override for `options.row`, `options.column`.
    pub fn with_cell_options(mut self, options: CellOptions) -> Self {
        self.set_cell_options(options);
        self
    }

    pub fn set_cell_options(&mut self, options: CellOptions) {
        self.cell_options
            .insert((options.row, options.column), options);
    }

    pub fn cell_options(&self, row: usize, column: usize) -> Option<&CellOptions> {
        self.cell_options.get(&(row, column))
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Width of every column including its separator: `(W + 2) / C`.
    pub fn cell_width(interior_width: u16, columns: usize) -> i64 {
        if columns == 0 {
            return 0;
        }
        (i64::from(interior_width) + 2) / columns as i64
    }

    /// 0-based start of the text slot of `(row, column)`.
    pub fn cell_position(&self, geometry: Rect, row: usize, column: usize) -> (i64, i64) {
        let cell_width = Self::cell_width(geometry.width, self.column_count());
        let top = i64::from(geometry.top) + if self.title.is_empty() { 0 } else { 2 };
        let x = i64::from(geometry.left) + cell_width * column as i64 + 1;
        let mut y = top + row as i64 + 1;
        if self.header && row > 0 {
            y += 1;
        }
        (x, y)
    }
}

impl StaticWidget for Table {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let columns = self.column_count();
        if columns == 0 {
            return Err(RenderError::MissingData("table has no columns"));
        }
        let geometry = self.geometry.unwrap_or(ctx.area);
        let left = i64::from(geometry.left);
        let mut top = i64::from(geometry.top);
        let mut height = i64::from(geometry.height);
        let cell_width = Self::cell_width(geometry.width, columns);
        let inner_width = (cell_width * columns as i64 - 1).max(0);
        let mut out = String::new();

        if !self.title.is_empty() {
            height -= 2;
            let title_width = ctx.layout.width(&self.title) as i64;
            let title_left = left + i64::from(geometry.width) / 2 - title_width / 2;
            out.push_str(&ctx.fg_or_default(self.colors.header.as_ref()));
            out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));
            out.push_str(&cursor_at(title_left + 1, top + 1));
            out.push_str(&self.title);
            out.push_str(&ctx.reset());
            top += 2;
        }
        let height = height.max(0);

        let border = Border {
            geometry: Some(Rect::new(
                left as u16,
                top.clamp(0, i64::from(u16::MAX)) as u16,
                inner_width.min(i64::from(u16::MAX)) as u16,
                height.min(i64::from(u16::MAX)) as u16,
            )),
            settings: self.settings,
            colors: FrameColors {
                frame: self.colors.separator.clone(),
                background: self.colors.background.clone(),
                ..FrameColors::default()
            },
            ..Border::default()
        };
        out.push_str(&border.render(ctx)?);
        out.push_str(&ctx.fg_or_default(self.colors.separator.as_ref()));
        out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));

        if self.header {
            let begin = self.settings.raw_glyph(BorderPart::LeftHorizontalIntersection);
            let middle = self.settings.raw_glyph(BorderPart::HorizontalIntersection);
            let end = self.settings.raw_glyph(BorderPart::RightHorizontalIntersection);
            out.push_str(&cursor_at(left + 1, top + 3));
            out.push(begin);
            out.push_str(&span(middle, inner_width));
            out.push(end);
        }

        for column in 1..columns {
            let separator_x = left + cell_width * column as i64 + 1;
            for y in 0..height + 2 {
                let part = if y == 0 {
                    BorderPart::TopVerticalIntersection
                } else if y == height + 1 {
                    BorderPart::BottomVerticalIntersection
                } else if y == 2 && self.header {
                    BorderPart::WholeIntersection
                } else {
                    BorderPart::VerticalIntersection
                };
                if let Some(glyph) = self.settings.glyph(part) {
                    out.push_str(&cursor_at(separator_x, y + top + 1));
                    out.push(glyph);
                }
            }
        }

        let slot = (cell_width - 1).max(0);
        let text_room = (cell_width - 4).max(0) as usize;
        let blank = span(' ', slot);
        'rows: for (row, cells) in self.rows.iter().enumerate() {
            for column in 0..columns {
                let (x, y) = self.cell_position(geometry, row, column);
                if y > height + top {
                    break 'rows;
                }
                let text = cells.get(column).map(String::as_str).unwrap_or("");
                let text = ctx.layout.truncate(text, text_room);

                let mut foreground = if row == 0 && self.header {
                    self.colors.header.as_ref()
                } else {
                    self.colors.value.as_ref()
                };
                let mut background = self.colors.background.as_ref();
                let mut alignment = Alignment::Left;
                if let Some(options) = self.cell_options(row, column) {
                    if let Some((fg, bg)) = options.colors.as_ref() {
                        foreground = Some(fg);
                        background = Some(bg);
                    }
                    alignment = options.alignment;
                }
                let text_x = ctx.layout.align(&text, slot as usize, alignment, x as usize) as i64;

                out.push_str(&ctx.fg_or_default(foreground));
                out.push_str(&ctx.bg_or_default(background));
                out.push_str(&cursor_at(x + 1, y + 1));
                out.push_str(&blank);
                out.push_str(&cursor_at(text_x + 1, y + 1));
                out.push_str(&text);
            }
        }
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let geometry = self.geometry.unwrap_or(ctx.area);
        Some(Rect::new(
            geometry.left,
            geometry.top,
            geometry.width.saturating_add(2),
            geometry.height.saturating_add(2),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::render::Buffer;
    use pretty_assertions::assert_eq;

    fn paint(table: &Table, width: u16, height: u16) -> Vec<String> {
        let ctx = RenderContext::new(Size::new(width, height)).without_colors();
        let mut buffer = Buffer::new(Size::new(width, height));
        buffer.paint(&table.render(&ctx).unwrap(), &ctx.layout);
        (0..height).map(|y| buffer.row_text(y)).collect()
    }

    #[test]
    fn column_starts_follow_cell_width() {
        let table = Table::new([["a", "b", "c", "d"]]).at(Rect::new(4, 2, 76, 10));
        let geometry = table.geometry.unwrap();
        assert_eq!(Table::cell_width(76, 4), 19);
        for column in 0..4 {
            assert_eq!(
                table.cell_position(geometry, 0, column).0,
                4 + 19 * column as i64 + 1
            );
        }
    }

    #[test]
    fn header_rows_skip_the_separator() {
        let table = Table::new([["h"], ["a"], ["b"]])
            .with_header(true)
            .at(Rect::new(0, 0, 10, 5));
        let geometry = table.geometry.unwrap();
        assert_eq!(table.cell_position(geometry, 0, 0).1, 1);
        assert_eq!(table.cell_position(geometry, 1, 0).1, 3);
        assert_eq!(table.cell_position(geometry, 2, 0).1, 4);
    }

    #[test]
    fn draws_grid_with_header() {
        let table = Table::new([["Name", "Age"], ["Bob", "42"]])
            .with_header(true)
            .at(Rect::new(0, 0, 14, 3));
        assert_eq!(
            paint(&table, 17, 5),
            vec![
                "╭───────┬───────╮",
                "│Name   │Age    │",
                "├───────┼───────┤",
                "│Bob    │42     │",
                "╰───────┴───────╯",
            ]
        );
    }

    #[test]
    fn long_text_is_truncated_and_cells_align() {
        let table = Table::new([["abcdefghij", "x"]])
            .with_cell_options(CellOptions::new(0, 1).with_alignment(Alignment::Right))
            .at(Rect::new(0, 0, 14, 1));
        assert_eq!(paint(&table, 17, 3)[1], "│a...   │      x│");
    }

    #[test]
    fn title_sits_above_the_table() {
        // One column of (4 + 2) / 1 = 6 cells gives a 5-wide interior.
        let table = Table::new([["a"]]).with_title("T").at(Rect::new(0, 0, 4, 3));
        let rows = paint(&table, 7, 5);
        assert_eq!(rows[0], "  T    ");
        assert_eq!(rows[2], "╭─────╮");
        assert_eq!(rows[3], "│a    │");
    }

    #[test]
    fn empty_table_is_an_error() {
        let ctx = RenderContext::new(Size::new(10, 10));
        assert!(Table::default().render(&ctx).is_err());
    }
}
