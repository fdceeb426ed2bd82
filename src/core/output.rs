//! Typed console output commands and a single output gate.
//!
//! Invariant: all console writes must flow through `OutputGate::flush(..)`.

use std::io;

use crate::core::console::Console;
use crate::core::sequence::{ERASE_DISPLAY, HIDE_CURSOR, RESET_STYLE, SHOW_CURSOR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCmd {
    /// Text with embedded control sequences.
    Bytes(String),
    BytesStatic(&'static str),

    HideCursor,
    ShowCursor,
    ResetStyle,
    EraseDisplay,
}

impl ConsoleCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }

    fn as_str(&self) -> &str {
        match self {
            ConsoleCmd::Bytes(data) => data,
            ConsoleCmd::BytesStatic(data) => data,
            ConsoleCmd::HideCursor => HIDE_CURSOR,
            ConsoleCmd::ShowCursor => SHOW_CURSOR,
            ConsoleCmd::ResetStyle => RESET_STYLE,
            ConsoleCmd::EraseDisplay => ERASE_DISPLAY,
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<ConsoleCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: ConsoleCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = ConsoleCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the console as one write, so a frame is never split.
    ///
    /// This is the single write gate: `Console::write(..)` must not be called from anywhere
    /// else. Commands are dropped even when the write fails.
    pub fn flush<C: Console + ?Sized>(&mut self, console: &mut C) -> io::Result<()> {
        if self.cmds.is_empty() {
            return Ok(());
        }
        let mut frame = String::new();
        for cmd in self.cmds.drain(..) {
            frame.push_str(cmd.as_str());
        }
        if frame.is_empty() {
            return Ok(());
        }
        console.write(&frame)
    }
}
