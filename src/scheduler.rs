//! Background animation loop
//!
//! A dedicated thread repeatedly waits a short delay, ticks the physics over
//! a snapshot of the population, commits the result and asks the foreground
//! for a redraw. Two states, Paused (initial) and Running, switched by a
//! flag guarded by a mutex with a condvar as the wake signal. The flag is
//! only checked at the top of each iteration, so a tick that has started
//! always finishes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};

use crate::error::{Error, Result};
use crate::platform::ViewportProvider;
use crate::settings::Settings;
use crate::sim::population::lock_or_recover;
use crate::sim::{Population, tick};

/// Animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Paused,
    Running,
}

#[derive(Debug, Default)]
struct LoopFlags {
    running: bool,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct Shared {
    flags: Mutex<LoopFlags>,
    wake: Condvar,
    ticks: AtomicU64,
}

impl Shared {
    /// Block while paused. Returns `false` once shutdown was requested.
    fn wait_until_running(&self) -> bool {
        let mut flags = lock_or_recover(&self.flags);
        while !flags.running && !flags.shutdown {
            flags = self.wake.wait(flags).unwrap_or_else(|poisoned| {
                log::warn!("Animation loop wait interrupted, continuing");
                poisoned.into_inner()
            });
        }
        !flags.shutdown
    }
}

/// Everything one iteration of the loop needs
struct TickLoop {
    population: Arc<Population>,
    viewport: Arc<dyn ViewportProvider>,
    redraw: Sender<()>,
    delay: Duration,
}

impl TickLoop {
    fn step(&self) {
        let viewport = self.viewport.viewport();
        let mut bodies = self.population.snapshot();
        let stats = tick(&mut bodies, viewport, self.population.radius());
        self.population.commit(bodies);
        log::trace!("Tick: {stats:?}");
        self.request_redraw();
    }

    fn request_redraw(&self) {
        match self.redraw.try_send(()) {
            // A redraw is already pending; this one folds into it
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => log::trace!("Redraw receiver gone"),
        }
    }

    fn run(self, shared: Arc<Shared>) {
        log::debug!("Animation thread started");
        while shared.wait_until_running() {
            thread::sleep(self.delay);
            self.step();
            shared.ticks.fetch_add(1, Ordering::Relaxed);
        }
        log::debug!("Animation thread exiting");
    }
}

/// Handle to the animation thread. Dropping it stops and joins the thread.
#[derive(Debug)]
pub struct AnimationScheduler {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl AnimationScheduler {
    /// Spawn the animation thread in the Paused state.
    ///
    /// Each tick sends `()` on `redraw`; a bounded(1) channel coalesces
    /// requests the foreground has not consumed yet.
    pub fn spawn(
        settings: &Settings,
        population: Arc<Population>,
        viewport: Arc<dyn ViewportProvider>,
        redraw: Sender<()>,
    ) -> Result<Self> {
        let shared = Arc::new(Shared::default());
        let tick_loop = TickLoop {
            population,
            viewport,
            redraw,
            delay: settings.tick_delay(),
        };

        let handle = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("animation".into())
                .spawn(move || tick_loop.run(shared))
                .map_err(Error::Spawn)?
        };

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Paused → Running; no-op if already running
    pub fn start(&self) {
        let mut flags = lock_or_recover(&self.shared.flags);
        if !flags.running {
            flags.running = true;
            log::info!("Start or resume animation");
        }
        self.shared.wake.notify_all();
    }

    pub fn resume(&self) {
        self.start();
    }

    /// Running → Paused; no-op if already paused
    pub fn stop(&self) {
        let mut flags = lock_or_recover(&self.shared.flags);
        if flags.running {
            flags.running = false;
            log::info!("Suspend animation");
        }
    }

    pub fn pause(&self) {
        self.stop();
    }

    pub fn state(&self) -> SchedulerState {
        if lock_or_recover(&self.shared.flags).running {
            SchedulerState::Running
        } else {
            SchedulerState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Ticks completed since spawn
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Relaxed)
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        lock_or_recover(&self.shared.flags).shutdown = true;
        self.shared.wake.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Animation thread panicked");
            }
        }
    }
}
