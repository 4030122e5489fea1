//! Bouncing Balls headless runner
//!
//! Drives the simulation with a fixed viewport and a sink that only counts
//! and logs frames. A windowing host would replace `LogSink` with a surface.
//!
//! Usage: `bouncing-balls [SECONDS]` (default 3). Set
//! `BOUNCING_BALLS_SETTINGS` to a JSON file to override settings.

use std::time::{Duration, Instant};

use bouncing_balls::platform::{InputEvent, RenderSink};
use bouncing_balls::renderer::FrameBuffer;
use bouncing_balls::{Settings, Simulation};

const DEFAULT_RUN_SECS: u64 = 3;
const VIEWPORT: (u32, u32) = (400, 300);

#[derive(Default)]
struct LogSink {
    frames: u64,
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &FrameBuffer) {
        self.frames += 1;
        log::trace!(
            "Frame {} ({}x{}, {} bytes)",
            self.frames,
            frame.width(),
            frame.height(),
            frame.as_bytes().len()
        );
    }
}

fn run_secs() -> u64 {
    match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid duration {arg:?}");
            DEFAULT_RUN_SECS
        }),
        None => DEFAULT_RUN_SECS,
    }
}

fn run(settings: Settings, run_for: Duration) -> bouncing_balls::Result<()> {
    let mut sim = Simulation::new(settings)?;
    let mut sink = LogSink::default();

    sim.handle(InputEvent::LayoutReady {
        width: VIEWPORT.0,
        height: VIEWPORT.1,
    });
    sim.handle(InputEvent::StartRequested);

    let started = Instant::now();
    let mut added = false;
    while started.elapsed() < run_for {
        sim.wait_and_render(Duration::from_millis(100), &mut sink);

        // Exercise add/remove halfway through
        if !added && started.elapsed() >= run_for / 2 {
            sim.handle(InputEvent::AddBody);
            sim.handle(InputEvent::AddBody);
            sim.handle(InputEvent::RemoveBody);
            added = true;
        }
    }
    sim.handle(InputEvent::StopRequested);

    log::info!(
        "Ran {:.1}s: {} ticks, {} frames presented, {} skipped, {} bodies",
        started.elapsed().as_secs_f32(),
        sim.ticks(),
        sink.frames,
        sim.renderer().frames_skipped(),
        sim.population().len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Bouncing Balls (headless) starting...");

    let settings = Settings::load();
    if let Err(e) = run(settings, Duration::from_secs(run_secs())) {
        log::error!("{e}");
    }
}
