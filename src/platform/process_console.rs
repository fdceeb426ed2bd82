//! Console backed by the process's stdout.
//!
//! Size comes from `TIOCGWINSZ`; `SIGWINCH` delivery is turned into the resize notification
//! the redraw engine polls through [`Console::take_resize`].

use std::io::{self, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};

use libc::{self, c_int};
use signal_hook::iterator::{Handle, Signals};

use crate::core::console::Console;

const FALLBACK_COLUMNS: u16 = 80;
const FALLBACK_ROWS: u16 = 24;

/// Sends one frame and flushes it; an empty frame touches nothing.
fn write_frame(out: &mut impl Write, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    out.write_all(data.as_bytes())?;
    out.flush()
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

pub struct ProcessConsole {
    stdout: io::Stdout,
    stdout_fd: c_int,
    resized: Arc<AtomicBool>,
    resize_signal_handle: Option<Handle>,
    resize_thread: Option<JoinHandle<()>>,
}

impl ProcessConsole {
    /// Opens the console on stdout and starts listening for `SIGWINCH`.
    pub fn new() -> io::Result<Self> {
        let mut console = Self {
            stdout: io::stdout(),
            stdout_fd: libc::STDOUT_FILENO,
            resized: Arc::new(AtomicBool::new(false)),
            resize_signal_handle: None,
            resize_thread: None,
        };
        console.start_resize_thread()?;
        Ok(console)
    }

    fn start_resize_thread(&mut self) -> io::Result<()> {
        let mut signals = Signals::new([libc::SIGWINCH])?;
        let handle = signals.handle();
        let resized = Arc::clone(&self.resized);

        let thread = thread::Builder::new()
            .name("cellwright-resize".to_string())
            .spawn(move || {
                for _ in signals.forever() {
                    resized.store(true, Ordering::SeqCst);
                    tracing::debug!("console resized");
                }
            })?;

        self.resize_signal_handle = Some(handle);
        self.resize_thread = Some(thread);
        Ok(())
    }

    fn stop_resize_thread(&mut self) {
        if let Some(handle) = self.resize_signal_handle.take() {
            handle.close();
        }
        if let Some(thread) = self.resize_thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ProcessConsole {
    fn drop(&mut self) {
        self.stop_resize_thread();
    }
}

impl Console for ProcessConsole {
    fn write(&mut self, data: &str) -> io::Result<()> {
        write_frame(&mut self.stdout.lock(), data)
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(cols, _)| cols)
            .unwrap_or(FALLBACK_COLUMNS)
    }

    fn rows(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(_, rows)| rows)
            .unwrap_or(FALLBACK_ROWS)
    }

    fn take_resize(&mut self) -> bool {
        self.resized.swap(false, Ordering::SeqCst)
    }
}
