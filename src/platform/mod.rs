//! Platform abstraction layer
//!
//! The host (window toolkit, test harness, headless runner) talks to the
//! simulation through these pieces:
//! - `ViewportProvider`: current drawable size, readable from any thread
//! - `RenderSink`: receives fully composited frames
//! - `InputEvent`: add/remove/layout/start/stop requests

use std::sync::atomic::{AtomicU64, Ordering};

use crate::renderer::FrameBuffer;
use crate::sim::Viewport;

/// Source of the current viewport size
pub trait ViewportProvider: Send + Sync {
    fn viewport(&self) -> Viewport;
}

/// Destination for finished frames
pub trait RenderSink {
    /// Show a complete frame. Called once per presented redraw.
    fn present(&mut self, frame: &FrameBuffer);
}

/// Requests coming from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    AddBody,
    RemoveBody,
    /// The surface was laid out or resized
    LayoutReady { width: u32, height: u32 },
    StartRequested,
    StopRequested,
}

/// Viewport shared between the host and the animation thread.
///
/// Width and height are packed into one atomic so a reader never sees the
/// width of one resize paired with the height of another.
#[derive(Debug, Default)]
pub struct SharedViewport {
    packed: AtomicU64,
}

impl SharedViewport {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            packed: AtomicU64::new(pack(viewport)),
        }
    }

    pub fn set(&self, viewport: Viewport) {
        self.packed.store(pack(viewport), Ordering::Release);
    }
}

impl ViewportProvider for SharedViewport {
    fn viewport(&self) -> Viewport {
        unpack(self.packed.load(Ordering::Acquire))
    }
}

#[inline]
fn pack(v: Viewport) -> u64 {
    (u64::from(v.width) << 32) | u64::from(v.height)
}

#[inline]
fn unpack(bits: u64) -> Viewport {
    Viewport::new((bits >> 32) as u32, bits as u32)
}
