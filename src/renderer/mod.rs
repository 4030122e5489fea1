//! Software rendering module
//!
//! Bodies are rasterized into an off-screen RGBA buffer which is then handed
//! to the host's render sink as one finished frame.

pub mod compositor;
pub mod framebuffer;
pub mod shapes;

pub use compositor::{RedrawOutcome, Renderer};
pub use framebuffer::{FrameBuffer, Rgba};
