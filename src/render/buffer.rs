//! Cell grid that composed screen text is painted into.
//!
//! Only the sequences the crate itself emits are interpreted: cursor position, SGR, CR and
//! LF. Everything else is treated as zero-width and dropped. Writes outside the grid are
//! clipped; the grid never scrolls.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::coordinate::{Coordinate, Size};
use crate::core::text::ansi::{extract_sequence, next_sequence_or_end, TextStyle};
use crate::core::text::TextLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    glyph: String,
    style: TextStyle,
    /// 1 or 2 for a glyph; 0 for the second half of a double-width glyph.
    width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(TextStyle::default())
    }
}

impl Cell {
    pub fn blank(style: TextStyle) -> Self {
        Self {
            glyph: " ".to_string(),
            style,
            width: 1,
        }
    }

    fn continuation(style: TextStyle) -> Self {
        Self {
            glyph: String::new(),
            style,
            width: 0,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Untouched space in the default style.
    pub fn is_pristine(&self) -> bool {
        self.width == 1 && self.glyph == " " && self.style.is_plain()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    size: Size,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(size: Size) -> Self {
        let count = usize::from(size.width) * usize::from(size.height);
        Self {
            size,
            cells: vec![Cell::default(); count],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.size.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.size.height {
            return &[];
        }
        let width = usize::from(self.size.width);
        let start = usize::from(y) * width;
        &self.cells[start..start + width]
    }

    /// Glyphs of row `y` without styling; continuation cells contribute nothing.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|cell| cell.glyph.as_str()).collect()
    }

    /// Paints `text` starting at the top-left corner in the default style.
    pub fn paint(&mut self, text: &str, layout: &TextLayout) {
        let mut cursor = Coordinate::default();
        let mut style = TextStyle::default();
        let mut idx = 0;

        while idx < text.len() {
            if let Some(code) = extract_sequence(text, idx) {
                if let Some(target) = parse_cursor_position(code.code) {
                    cursor = target;
                } else {
                    style.process(code.code);
                }
                idx += code.length;
                continue;
            }

            let text_end = next_sequence_or_end(text, idx);
            if text_end == idx {
                break;
            }
            for grapheme in text[idx..text_end].graphemes(true) {
                match grapheme {
                    "\r" => cursor.x = 0,
                    "\n" | "\r\n" => {
                        cursor.x = 0;
                        cursor.y = cursor.y.saturating_add(1);
                    }
                    _ if grapheme.chars().all(char::is_control) => {}
                    _ => {
                        let width = layout.grapheme_width(grapheme);
                        if width == 0 {
                            self.attach(cursor, grapheme);
                            continue;
                        }
                        let width = width.min(2) as u8;
                        self.put(cursor, grapheme, width, &style);
                        cursor.x = cursor.x.saturating_add(u16::from(width));
                    }
                }
            }
            idx = text_end;
        }
    }

    fn put(&mut self, at: Coordinate, grapheme: &str, width: u8, style: &TextStyle) {
        let last = u32::from(at.x) + u32::from(width) - 1;
        if last >= u32::from(self.size.width) || at.y >= self.size.height {
            return;
        }
        for dx in 0..u16::from(width) {
            self.break_wide_glyph(at.x + dx, at.y);
        }
        if let Some(idx) = self.index(at.x, at.y) {
            self.cells[idx] = Cell {
                glyph: grapheme.to_string(),
                style: style.clone(),
                width,
            };
        }
        if width == 2 {
            if let Some(idx) = self.index(at.x + 1, at.y) {
                self.cells[idx] = Cell::continuation(style.clone());
            }
        }
    }

    /// Blanks the other half of a wide glyph that covers `(x, y)`.
    fn break_wide_glyph(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let cell = &self.cells[idx];
        if cell.is_continuation() && x > 0 {
            let head = idx - 1;
            self.cells[head] = Cell::blank(self.cells[head].style.clone());
        } else if cell.width == 2 {
            if let Some(tail) = self.index(x + 1, y) {
                self.cells[tail] = Cell::blank(self.cells[tail].style.clone());
            }
        }
    }

    /// Appends a zero-width grapheme (combining mark) to the glyph left of the cursor.
    fn attach(&mut self, cursor: Coordinate, grapheme: &str) {
        if cursor.x == 0 {
            return;
        }
        let mut x = cursor.x - 1;
        if let Some(cell) = self.get(x, cursor.y) {
            if cell.is_continuation() && x > 0 {
                x -= 1;
            }
        }
        if let Some(idx) = self.index(x, cursor.y) {
            self.cells[idx].glyph.push_str(grapheme);
        }
    }
}

/// `ESC [ row ; col H` (either introducer) to a 0-based coordinate. Missing values mean 1.
fn parse_cursor_position(code: &str) -> Option<Coordinate> {
    let params = code
        .strip_prefix("\x1b[")
        .or_else(|| code.strip_prefix('\u{9b}'))?
        .strip_suffix('H')?;
    let mut parts = params.split(';');
    let row = parse_position(parts.next())?;
    let column = parse_position(parts.next())?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::new(column, row))
}

fn parse_position(part: Option<&str>) -> Option<u16> {
    match part {
        None | Some("") => Some(0),
        Some(value) => {
            let one_based: u32 = value.parse().ok()?;
            Some(one_based.saturating_sub(1).min(u32::from(u16::MAX)) as u16)
        }
    }
}
