//! Simulation facade
//!
//! Owns the population, the animation thread and the renderer, and turns
//! host input events into calls on them. The host calls [`Simulation::pump`]
//! (or [`Simulation::wait_and_render`]) from its own thread to turn pending
//! redraw requests into presented frames.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::error::Result;
use crate::platform::{InputEvent, RenderSink, SharedViewport, ViewportProvider};
use crate::renderer::{RedrawOutcome, Renderer};
use crate::scheduler::{AnimationScheduler, SchedulerState};
use crate::settings::Settings;
use crate::sim::{Population, Viewport};

/// A running simulation: population, animation thread and renderer
pub struct Simulation {
    settings: Settings,
    population: Arc<Population>,
    viewport: Arc<SharedViewport>,
    scheduler: AnimationScheduler,
    renderer: Renderer,
    redraw_tx: Sender<()>,
    redraw_rx: Receiver<()>,
}

impl Simulation {
    /// Validate `settings` and spawn the (paused) animation thread
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let population = Arc::new(Population::from_settings(&settings));
        let viewport = Arc::new(SharedViewport::default());
        let (redraw_tx, redraw_rx) = crossbeam_channel::bounded(1);

        let scheduler = AnimationScheduler::spawn(
            &settings,
            Arc::clone(&population),
            Arc::clone(&viewport) as Arc<dyn ViewportProvider>,
            redraw_tx.clone(),
        )?;
        let renderer = Renderer::new(&settings);

        Ok(Self {
            settings,
            population,
            viewport,
            scheduler,
            renderer,
            redraw_tx,
            redraw_rx,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Route one host event
    pub fn handle(&self, event: InputEvent) {
        match event {
            InputEvent::AddBody => self.on_add_body(),
            InputEvent::RemoveBody => self.on_remove_body(),
            InputEvent::LayoutReady { width, height } => self.on_layout_ready(width, height),
            InputEvent::StartRequested => self.on_start_requested(),
            InputEvent::StopRequested => self.on_stop_requested(),
        }
    }

    pub fn on_add_body(&self) {
        log::debug!("Add a ball");
        self.population.add_random(self.viewport());
        self.request_redraw();
    }

    pub fn on_remove_body(&self) {
        if self.population.remove_random().is_some() {
            log::debug!("Remove a ball");
            self.request_redraw();
        }
    }

    /// Record the new size; the first non-empty layout seeds the population
    pub fn on_layout_ready(&self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        self.viewport.set(viewport);
        if self
            .population
            .seed_initial(self.settings.initial_bodies, viewport)
        {
            self.request_redraw();
        }

        if log::log_enabled!(log::Level::Debug) {
            for body in self.population.snapshot() {
                log::debug!("{body}");
            }
        }
    }

    pub fn on_start_requested(&self) {
        self.scheduler.start();
    }

    pub fn on_stop_requested(&self) {
        self.scheduler.stop();
    }

    fn request_redraw(&self) {
        match self.redraw_tx.try_send(()) {
            // A redraw is already pending; this one folds into it
            Ok(()) | Err(TrySendError::Full(())) => {}
            // We hold the receiver, so this only happens during teardown
            Err(TrySendError::Disconnected(())) => log::trace!("Redraw receiver gone"),
        }
    }

    /// Render if a redraw was requested. Returns `None` when nothing was pending.
    pub fn pump(&mut self, sink: &mut dyn RenderSink) -> Option<RedrawOutcome> {
        self.redraw_rx.try_recv().ok()?;
        Some(self.render(Instant::now(), sink))
    }

    /// Block up to `timeout` for a redraw request, then render it
    pub fn wait_and_render(
        &mut self,
        timeout: Duration,
        sink: &mut dyn RenderSink,
    ) -> Option<RedrawOutcome> {
        match self.redraw_rx.recv_timeout(timeout) {
            Ok(()) => Some(self.render(Instant::now(), sink)),
            // We hold a sender, so the channel never disconnects
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Compose and present the current population, subject to frame pacing
    pub fn render(&mut self, now: Instant, sink: &mut dyn RenderSink) -> RedrawOutcome {
        let bodies = self.population.snapshot();
        self.renderer.redraw(now, self.viewport(), &bodies, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;

    #[derive(Default)]
    struct CountingSink {
        presented: usize,
        last_size: Option<Viewport>,
    }

    impl RenderSink for CountingSink {
        fn present(&mut self, frame: &FrameBuffer) {
            self.presented += 1;
            self.last_size = Some(frame.viewport());
        }
    }

    fn simulation() -> Simulation {
        Simulation::new(Settings {
            seed: Some(7),
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_layout_seeds_once() {
        let sim = simulation();
        sim.handle(InputEvent::LayoutReady {
            width: 0,
            height: 0,
        });
        assert!(sim.population().is_empty());

        sim.handle(InputEvent::LayoutReady {
            width: 400,
            height: 300,
        });
        sim.handle(InputEvent::LayoutReady {
            width: 500,
            height: 350,
        });
        assert_eq!(sim.population().len(), 10);
        assert_eq!(sim.viewport(), Viewport::new(500, 350));
    }

    #[test]
    fn test_add_and_remove_events() {
        let sim = simulation();
        sim.handle(InputEvent::RemoveBody);
        assert!(sim.population().is_empty());

        sim.handle(InputEvent::LayoutReady {
            width: 400,
            height: 300,
        });
        sim.handle(InputEvent::AddBody);
        sim.handle(InputEvent::AddBody);
        assert_eq!(sim.population().len(), 12);
        sim.handle(InputEvent::RemoveBody);
        assert_eq!(sim.population().len(), 11);
    }

    #[test]
    fn test_start_stop_events() {
        let sim = simulation();
        assert_eq!(sim.state(), SchedulerState::Paused);
        sim.handle(InputEvent::StartRequested);
        assert_eq!(sim.state(), SchedulerState::Running);
        sim.handle(InputEvent::StopRequested);
        assert_eq!(sim.state(), SchedulerState::Paused);
    }

    #[test]
    fn test_seed_while_paused_requests_redraw() {
        let mut sim = simulation();
        let mut sink = CountingSink::default();
        assert_eq!(sim.pump(&mut sink), None);

        sim.handle(InputEvent::LayoutReady {
            width: 64,
            height: 48,
        });
        assert_eq!(sim.pump(&mut sink), Some(RedrawOutcome::Presented));
        assert_eq!(sink.presented, 1);
        assert_eq!(sink.last_size, Some(Viewport::new(64, 48)));
    }

    #[test]
    fn test_running_simulation_presents_frames() {
        let mut sim = simulation();
        let mut sink = CountingSink::default();
        sim.handle(InputEvent::LayoutReady {
            width: 200,
            height: 150,
        });
        sim.handle(InputEvent::StartRequested);

        let deadline = Instant::now() + Duration::from_secs(5);
        while sink.presented < 3 && Instant::now() < deadline {
            sim.wait_and_render(Duration::from_millis(100), &mut sink);
        }
        sim.handle(InputEvent::StopRequested);

        assert!(sink.presented >= 3);
        assert!(sim.ticks() > 0);
    }

    #[test]
    fn test_redraw_requests_coalesce() {
        let mut sim = simulation();
        let mut sink = CountingSink::default();
        sim.handle(InputEvent::AddBody);
        sim.handle(InputEvent::AddBody);
        sim.handle(InputEvent::RemoveBody);

        assert_eq!(sim.pump(&mut sink), Some(RedrawOutcome::Presented));
        assert_eq!(sim.pump(&mut sink), None);
        assert_eq!(sink.presented, 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let result = Simulation::new(Settings {
            body_radius: -1.0,
            ..Settings::default()
        });
        assert!(matches!(result, Err(crate::Error::Settings(_))));
    }
}
