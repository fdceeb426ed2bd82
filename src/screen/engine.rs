//! The redraw loop.
//!
//! Invariant: only the pipeline writes to the console, and only through its `OutputGate`.
//! Both the loop thread and [`ScreenEngine::render_once`] take the pipeline lock, so frames
//! never interleave.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::EnvConfig;
use crate::core::console::Console;
use crate::core::output::{ConsoleCmd, OutputGate};
use crate::core::renderable::RenderContext;
use crate::error::ScreenError;
use crate::render::{Buffer, DiffRenderer};
use crate::screen::hitbox::{topmost, Hitbox, PointerEvent};
use crate::screen::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Running,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Lets `stop` and `request_render` cut a cycle's sleep short.
#[derive(Debug, Default)]
struct Wake {
    render_requested: Mutex<bool>,
    cvar: Condvar,
}

impl Wake {
    /// Sleeps up to `interval`. Returns `false` once `stop` is raised.
    fn wait(&self, interval: Duration, stop: &AtomicBool) -> bool {
        let requested = lock(&self.render_requested);
        let (mut requested, _) = self
            .cvar
            .wait_timeout_while(requested, interval, |requested| {
                !*requested && !stop.load(Ordering::SeqCst)
            })
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *requested = false;
        !stop.load(Ordering::SeqCst)
    }

    fn request_render(&self) {
        *lock(&self.render_requested) = true;
        self.cvar.notify_all();
    }

    /// Raises `stop` under the wake lock so a loop about to sleep cannot miss it.
    fn request_stop(&self, stop: &AtomicBool) {
        let _requested = lock(&self.render_requested);
        stop.store(true, Ordering::SeqCst);
        self.cvar.notify_all();
    }
}

/// Console plus the state that turns a composition into console writes.
struct Pipeline {
    console: Box<dyn Console>,
    gate: OutputGate,
    diff: DiffRenderer,
}

impl Pipeline {
    fn render(&mut self, screen: &Screen, config: &EnvConfig) -> Result<Vec<Hitbox>, ScreenError> {
        if self.console.take_resize() {
            tracing::debug!(size = ?self.console.size(), "console resized");
            self.diff.request_full_redraw_next();
        }
        let size = self.console.size();
        let ctx = RenderContext::from_config(config, size);
        let composition = screen.compose(&ctx);
        if composition.full_redraw {
            self.diff.request_full_redraw_next();
        }
        if self.diff.previous().is_none() {
            self.gate.push(ConsoleCmd::HideCursor);
        }

        let mut buffer = Buffer::new(size);
        buffer.paint(&composition.text, &ctx.layout);
        self.gate.extend(self.diff.render(buffer));
        if let Err(err) = self.gate.flush(self.console.as_mut()) {
            // The console never saw this frame; the next one starts from an erased display.
            self.diff.invalidate();
            return Err(err.into());
        }
        Ok(composition.hitboxes)
    }
}

struct Shared {
    config: EnvConfig,
    screens: Mutex<Vec<Arc<Screen>>>,
    pipeline: Mutex<Pipeline>,
    hitboxes: RwLock<Arc<[Hitbox]>>,
    wake: Wake,
}

impl Shared {
    fn current(&self) -> Option<Arc<Screen>> {
        lock(&self.screens).last().cloned()
    }

    /// Renders the current screen and publishes its hitboxes. `Ok(false)` when there is no
    /// current screen.
    fn render_current(&self) -> Result<bool, ScreenError> {
        let Some(screen) = self.current() else {
            return Ok(false);
        };
        let hitboxes = lock(&self.pipeline).render(&screen, &self.config)?;
        let snapshot: Arc<[Hitbox]> = hitboxes.into();
        *self
            .hitboxes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot;
        Ok(true)
    }

    fn interval(&self) -> Duration {
        self.current()
            .and_then(|screen| screen.cycle_frequency())
            .unwrap_or_else(|| self.config.cycle_frequency())
    }

    fn run(&self, stop: &AtomicBool) {
        tracing::debug!("redraw loop started");
        loop {
            if let Err(err) = self.render_current() {
                tracing::warn!(error = %err, "frame was not written");
            }
            if !self.wake.wait(self.interval(), stop) {
                break;
            }
        }
        tracing::debug!("redraw loop stopped");
    }
}

/// One spawned loop and the flag that ends it.
struct LoopThread {
    handle: JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

impl LoopThread {
    fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Owns the console and redraws the current screen on a background thread.
///
/// Screens form a stack: [`ScreenEngine::set_current`] pushes and the topmost one is drawn.
pub struct ScreenEngine {
    shared: Arc<Shared>,
    thread: Mutex<Option<LoopThread>>,
}

impl ScreenEngine {
    pub fn new<C: Console + 'static>(console: C, config: EnvConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                screens: Mutex::new(Vec::new()),
                pipeline: Mutex::new(Pipeline {
                    console: Box::new(console),
                    gate: OutputGate::new(),
                    diff: DiffRenderer::new(),
                }),
                hitboxes: RwLock::new(Arc::from(Vec::new())),
                wake: Wake::default(),
            }),
            thread: Mutex::new(None),
        }
    }

    pub fn set_current(&self, screen: Arc<Screen>) {
        screen.request_refresh();
        lock(&self.shared.screens).push(screen);
        self.shared.wake.request_render();
    }

    /// Removes `screen` from the stack. Unsetting a screen that was never set does nothing.
    pub fn unset_current(&self, screen: &Arc<Screen>) {
        let mut screens = lock(&self.shared.screens);
        if let Some(index) = screens.iter().rposition(|entry| Arc::ptr_eq(entry, screen)) {
            screens.remove(index);
            if let Some(next) = screens.last() {
                next.request_refresh();
            }
            drop(screens);
            self.shared.wake.request_render();
        }
    }

    pub fn current(&self) -> Option<Arc<Screen>> {
        self.shared.current()
    }

    /// Renders one frame on the calling thread. Returns whether a screen was drawn.
    pub fn render_once(&self) -> Result<bool, ScreenError> {
        self.shared.render_current()
    }

    /// Wakes the loop so the next frame is drawn without waiting out the interval.
    pub fn request_render(&self) {
        self.shared.wake.request_render();
    }

    /// Spawns the redraw loop. Starting a running engine does nothing.
    pub fn start(&self) -> Result<(), ScreenError> {
        let mut slot = lock(&self.thread);
        if slot.as_ref().is_some_and(LoopThread::is_running) {
            return Ok(());
        }
        if let Some(finished) = slot.take() {
            let _ = finished.handle.join();
        }

        let stop = Arc::new(AtomicBool::new(false));
        let shared = Arc::clone(&self.shared);
        let loop_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("cellwright-redraw".to_string())
            .spawn(move || shared.run(&loop_stop))
            .map_err(ScreenError::Spawn)?;
        *slot = Some(LoopThread { handle, stop });
        Ok(())
    }

    /// Stops the redraw loop. Stopping an idle engine does nothing.
    ///
    /// Safe to call from the loop thread itself (from a dynamic text closure, say): the loop
    /// then exits after the current frame instead of being joined.
    pub fn stop(&self) {
        let Some(run) = lock(&self.thread).take() else {
            return;
        };
        self.shared.wake.request_stop(&run.stop);
        if run.handle.thread().id() == thread::current().id() {
            return;
        }
        if run.handle.join().is_err() {
            tracing::warn!("redraw loop panicked");
        }
    }

    pub fn state(&self) -> EngineState {
        if lock(&self.thread).as_ref().is_some_and(LoopThread::is_running) {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    /// Hitboxes of the last written frame.
    pub fn hitboxes(&self) -> Arc<[Hitbox]> {
        self.shared
            .hitboxes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Sends `event` to the topmost hitbox containing it.
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> Option<String> {
        let hitboxes = self.hitboxes();
        topmost(&hitboxes, event).and_then(|hitbox| hitbox.process(event))
    }
}

impl Drop for ScreenEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
