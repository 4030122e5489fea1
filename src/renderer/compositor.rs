//! Frame composition with pacing
//!
//! Every presented frame is drawn completely off-screen first, then handed
//! to the sink in one call. Requests arriving faster than the frame interval
//! are dropped, not queued.

use std::time::{Duration, Instant};

use super::framebuffer::FrameBuffer;
use super::shapes::draw_body;
use crate::platform::RenderSink;
use crate::settings::Settings;
use crate::sim::{Body, Rgb, Viewport};

/// What happened to a redraw request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawOutcome {
    Presented,
    /// Arrived within the frame interval of the previous frame
    Skipped,
}

/// Paced off-screen compositor that presents whole frames to a sink
#[derive(Debug)]
pub struct Renderer {
    buffer: Option<FrameBuffer>,
    /// Viewport the current buffer was allocated for
    allocated_for: Option<Viewport>,
    /// Completion time of the last presented frame
    last_redraw: Option<Instant>,
    frame_interval: Duration,
    radius: f32,
    background: Rgb,
    outline: Rgb,
    frames_presented: u64,
    frames_skipped: u64,
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            buffer: None,
            allocated_for: None,
            last_redraw: None,
            frame_interval: settings.frame_interval(),
            radius: settings.body_radius,
            background: settings.background,
            outline: settings.outline,
            frames_presented: 0,
            frames_skipped: 0,
        }
    }

    /// Off-screen buffer from the last redraw, if any
    pub fn buffer(&self) -> Option<&FrameBuffer> {
        self.buffer.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// True if a redraw at `now` would be dropped by pacing
    pub fn is_throttled(&self, now: Instant) -> bool {
        self.last_redraw
            .is_some_and(|last| now.saturating_duration_since(last) < self.frame_interval)
    }

    /// Compose `bodies` into the off-screen buffer and present it.
    ///
    /// `now` is the request time on the caller's clock. Pacing is measured
    /// from when the previous frame finished presenting, so time spent
    /// drawing and inside the sink counts toward the interval.
    pub fn redraw(
        &mut self,
        now: Instant,
        viewport: Viewport,
        bodies: &[Body],
        sink: &mut dyn RenderSink,
    ) -> RedrawOutcome {
        if self.is_throttled(now) {
            self.frames_skipped += 1;
            return RedrawOutcome::Skipped;
        }

        let started = Instant::now();
        let (radius, background, outline) = (self.radius, self.background, self.outline);
        let buffer = self.buffer_for(viewport);
        buffer.fill(background);
        for body in bodies {
            draw_body(buffer, body, radius, outline);
        }
        sink.present(buffer);

        self.last_redraw = Some(now + started.elapsed());
        self.frames_presented += 1;
        RedrawOutcome::Presented
    }

    /// Buffer matching `viewport`, reallocated if missing or stale
    fn buffer_for(&mut self, viewport: Viewport) -> &mut FrameBuffer {
        if self.allocated_for != Some(viewport) {
            self.buffer = None;
            self.allocated_for = Some(viewport);
        }
        self.buffer.get_or_insert_with(|| {
            log::debug!(
                "Allocating {}x{} frame buffer",
                viewport.width,
                viewport.height
            );
            FrameBuffer::for_viewport(viewport)
        })
    }
}
