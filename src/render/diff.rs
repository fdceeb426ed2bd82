//! Buffer diff renderer.
//!
//! Keeps the last buffer written to the console and emits only the cells that changed since.
//! A missing previous buffer, a size change or an explicit request forces a full redraw that
//! erases the display first.

use crate::core::coordinate::Coordinate;
use crate::core::output::ConsoleCmd;
use crate::core::sequence::{cursor_position, ERASE_DISPLAY, RESET_STYLE};
use crate::core::text::ansi::TextStyle;
use crate::render::buffer::{Buffer, Cell};

const SYNC_START: &str = "\x1b[?2026h";
const SYNC_END: &str = "\x1b[?2026l";

#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<Buffer>,
    force_full_redraw_next: bool,
}

/// Accumulates cell writes, skipping cursor moves and style changes that are already in
/// effect.
struct Emitter {
    out: String,
    cursor: Option<Coordinate>,
    style: Option<TextStyle>,
}

impl Emitter {
    fn new() -> Self {
        Self {
            out: String::new(),
            cursor: None,
            style: None,
        }
    }

    fn cell(&mut self, x: u16, y: u16, cell: &Cell) {
        let at = Coordinate::new(x, y);
        if self.cursor != Some(at) {
            self.out.push_str(&cursor_position(at));
        }
        if self.style.as_ref() != Some(cell.style()) {
            self.out.push_str(RESET_STYLE);
            self.out.push_str(&cell.style().active_codes());
            self.style = Some(cell.style().clone());
        }
        self.out.push_str(cell.glyph());
        self.cursor = Some(at.offset(u16::from(cell.width()), 0));
    }

    fn finish(mut self) -> String {
        if self.style.as_ref().is_some_and(|style| !style.is_plain()) {
            self.out.push_str(RESET_STYLE);
        }
        self.out
    }
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_full_redraw_next(&mut self) {
        self.force_full_redraw_next = true;
    }

    /// Forgets the last buffer, as if nothing had been written yet.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn previous(&self) -> Option<&Buffer> {
        self.previous.as_ref()
    }

    /// Commands that bring the console from the previous buffer to `buffer`. Empty when
    /// nothing changed.
    pub fn render(&mut self, buffer: Buffer) -> Vec<ConsoleCmd> {
        let force = std::mem::take(&mut self.force_full_redraw_next);
        let full = match self.previous.as_ref() {
            None => true,
            Some(previous) => force || previous.size() != buffer.size(),
        };

        let body = if full {
            tracing::trace!(size = ?buffer.size(), "full redraw");
            full_render(&buffer)
        } else {
            match self.previous.as_ref() {
                Some(previous) => changed_cells(previous, &buffer),
                None => full_render(&buffer),
            }
        };
        self.previous = Some(buffer);

        if body.is_empty() && !full {
            return Vec::new();
        }
        let mut frame = String::from(SYNC_START);
        if full {
            frame.push_str(ERASE_DISPLAY);
        }
        frame.push_str(&body);
        frame.push_str(SYNC_END);
        vec![ConsoleCmd::Bytes(frame)]
    }
}

/// Every cell that differs from a freshly erased display.
fn full_render(buffer: &Buffer) -> String {
    let size = buffer.size();
    let mut emitter = Emitter::new();
    for y in 0..size.height {
        for (x, cell) in buffer.row(y).iter().enumerate() {
            if cell.is_continuation() || cell.is_pristine() {
                continue;
            }
            emitter.cell(x as u16, y, cell);
        }
    }
    emitter.finish()
}

fn changed_cells(previous: &Buffer, current: &Buffer) -> String {
    let size = current.size();
    let mut emitter = Emitter::new();
    for y in 0..size.height {
        let before = previous.row(y);
        for (x, cell) in current.row(y).iter().enumerate() {
            if cell.is_continuation() || before.get(x) == Some(cell) {
                continue;
            }
            emitter.cell(x as u16, y, cell);
        }
    }
    emitter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;
    use crate::core::text::TextLayout;

    fn buffer(width: u16, height: u16, text: &str) -> Buffer {
        let mut buffer = Buffer::new(Size::new(width, height));
        buffer.paint(text, &TextLayout::default());
        buffer
    }

    fn cmds_to_bytes(cmds: Vec<ConsoleCmd>) -> String {
        cmds.into_iter()
            .map(|cmd| match cmd {
                ConsoleCmd::Bytes(data) => data,
                other => format!("{other:?}"),
            })
            .collect()
    }

    #[test]
    fn first_render_is_full() {
        let mut renderer = DiffRenderer::new();
        let output = cmds_to_bytes(renderer.render(buffer(5, 2, "ab")));
        assert!(output.starts_with(SYNC_START));
        assert!(output.contains(ERASE_DISPLAY));
        assert!(output.contains("\x1b[1;1H\x1b[0mab"));
        assert!(output.ends_with(SYNC_END));
    }

    #[test]
    fn identical_render_produces_no_output() {
        let mut renderer = DiffRenderer::new();
        renderer.render(buffer(5, 2, "line"));
        let output = renderer.render(buffer(5, 2, "line"));
        assert!(output.is_empty(), "expected no output, got: {output:?}");
    }

    #[test]
    fn only_changed_cells_are_emitted() {
        let mut renderer = DiffRenderer::new();
        renderer.render(buffer(6, 2, "one\ntwo"));
        let output = cmds_to_bytes(renderer.render(buffer(6, 2, "one\ntWO")));
        assert!(!output.contains(ERASE_DISPLAY));
        assert!(output.contains("\x1b[2;2H\x1b[0mWO"));
        assert!(!output.contains("one"));
    }

    #[test]
    fn invalidate_forces_a_full_redraw() {
        let mut renderer = DiffRenderer::new();
        renderer.render(buffer(5, 2, "line"));
        renderer.invalidate();
        assert!(renderer.previous().is_none());
        let output = cmds_to_bytes(renderer.render(buffer(5, 2, "line")));
        assert!(output.contains(ERASE_DISPLAY));
        assert!(output.contains("line"));
    }

    #[test]
    fn size_change_triggers_full_clear() {
        let mut renderer = DiffRenderer::new();
        renderer.render(buffer(5, 2, "line"));
        let output = cmds_to_bytes(renderer.render(buffer(6, 2, "line")));
        assert!(output.contains(ERASE_DISPLAY));
        assert!(output.contains("line"));
    }

    #[test]
    fn forced_full_redraw_emits_even_if_identical() {
        let mut renderer = DiffRenderer::new();
        renderer.render(buffer(5, 1, "same"));
        renderer.request_full_redraw_next();
        let output = cmds_to_bytes(renderer.render(buffer(5, 1, "same")));
        assert!(output.contains(ERASE_DISPLAY));
        assert!(renderer.render(buffer(5, 1, "same")).is_empty());
    }

    #[test]
    fn styled_cells_reset_at_the_end() {
        let mut renderer = DiffRenderer::new();
        let output = cmds_to_bytes(renderer.render(buffer(4, 1, "\x1b[31mab")));
        assert!(output.contains("\x1b[0m\x1b[31mab\x1b[0m"));
    }

    #[test]
    fn cleared_cells_are_blanked() {
        let mut renderer = DiffRenderer::new();
        renderer.render(buffer(4, 1, "abcd"));
        let output = cmds_to_bytes(renderer.render(buffer(4, 1, "ab")));
        assert!(output.contains("\x1b[1;3H\x1b[0m  "));
    }
}
