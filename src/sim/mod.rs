//! Simulation module
//!
//! Physics lives here and has no rendering or threading dependencies:
//! - `state`: bodies, colors, viewport and collision proxies
//! - `collision`: wall clamping and the pairwise velocity swap
//! - `tick`: one simulation step over a snapshot
//! - `population`: the shared body collection and random spawning

pub mod collision;
pub mod population;
pub mod state;
pub mod tick;

pub use collision::{WallHits, bodies_touch, resolve_pair, resolve_walls};
pub use population::Population;
pub use state::{Body, BoundingBox, Rgb, Viewport};
pub use tick::{TickStats, integrate, tick};
