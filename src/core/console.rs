//! The console collaborator and an in-memory implementation.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use super::coordinate::Size;

/// Minimal console interface the redraw engine writes to.
pub trait Console: Send {
    /// Write output to the console. Callers go through `OutputGate`, never this directly.
    fn write(&mut self, data: &str) -> io::Result<()>;

    /// Console dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;

    fn size(&self) -> Size {
        Size::new(self.columns(), self.rows())
    }

    /// Reports (and clears) a pending resize notification.
    fn take_resize(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct VirtualState {
    columns: u16,
    rows: u16,
    transcript: String,
    writes: usize,
    resized: bool,
    failing: bool,
}

/// In-memory console. Clones share one transcript, so a test can keep a handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct VirtualConsole {
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualConsole {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            state: Arc::new(Mutex::new(VirtualState {
                columns,
                rows,
                ..VirtualState::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, VirtualState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far.
    pub fn transcript(&self) -> String {
        self.state().transcript.clone()
    }

    /// Returns the transcript and starts a new one.
    pub fn take_transcript(&self) -> String {
        std::mem::take(&mut self.state().transcript)
    }

    /// Number of successful `write` calls.
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Changes the dimensions and raises the resize notification.
    pub fn resize(&self, columns: u16, rows: u16) {
        let mut state = self.state();
        state.columns = columns;
        state.rows = rows;
        state.resized = true;
    }

    /// Makes subsequent writes fail with a broken-pipe error.
    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }
}

impl Console for VirtualConsole {
    fn write(&mut self, data: &str) -> io::Result<()> {
        let mut state = self.state();
        if state.failing {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "virtual console is failing",
            ));
        }
        state.transcript.push_str(data);
        state.writes += 1;
        Ok(())
    }

    fn columns(&self) -> u16 {
        self.state().columns
    }

    fn rows(&self) -> u16 {
        self.state().rows
    }

    fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.state().resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_transcript() {
        let console = VirtualConsole::new(80, 24);
        let mut writer = console.clone();
        writer.write("abc").unwrap();
        writer.write("def").unwrap();
        assert_eq!(console.transcript(), "abcdef");
        assert_eq!(console.write_count(), 2);
        assert_eq!(console.take_transcript(), "abcdef");
        assert_eq!(console.transcript(), "");
    }

    #[test]
    fn resize_is_reported_once() {
        let console = VirtualConsole::new(80, 24);
        let mut handle = console.clone();
        assert!(!handle.take_resize());
        console.resize(100, 30);
        assert_eq!(handle.size(), Size::new(100, 30));
        assert!(handle.take_resize());
        assert!(!handle.take_resize());
    }

    #[test]
    fn failing_writes_surface_errors() {
        let console = VirtualConsole::new(10, 10);
        let mut handle = console.clone();
        console.set_failing(true);
        assert_eq!(
            handle.write("x").unwrap_err().kind(),
            io::ErrorKind::BrokenPipe
        );
        assert_eq!(console.transcript(), "");
    }
}
