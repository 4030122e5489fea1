//! Bouncing Balls - a real-time 2D simulation core
//!
//! Core modules:
//! - `sim`: Bodies, physics tick, collisions and the population manager
//! - `renderer`: Off-screen frame buffer and disc rasterization
//! - `scheduler`: Background animation loop with pause/resume
//! - `platform`: Boundary traits for the host (viewport, render sink, input)
//! - `app`: Facade wiring everything together
//! - `settings`: JSON-loadable tunables

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use app::Simulation;
pub use error::{Error, Result};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Default disc radius in pixels, shared by every body
    pub const BODY_RADIUS: f32 = 10.0;
    /// Bodies spawned by the one-time seed
    pub const INITIAL_BODIES: usize = 10;

    /// Minimum time between two presented frames
    pub const FRAME_INTERVAL_MS: u64 = 60;
    /// Delay at the top of each animation loop iteration
    pub const TICK_DELAY_MS: u64 = 1;

    /// Inclusive range of the per-body speed multiplier
    pub const ACCEL_SCALE_MIN: u32 = 1;
    pub const ACCEL_SCALE_MAX: u32 = 2;
}
