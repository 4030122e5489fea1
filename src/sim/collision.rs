//! Collision detection and response
//!
//! Two kinds of contact:
//! - Body vs viewport wall: clamp inside and reflect the offending axis
//! - Body vs body: swap velocity vectors (no mass, no restitution)

use glam::Vec2;

use super::state::{Body, Viewport};

/// Which walls a body touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Clamp one coordinate into `[radius, extent - radius]`.
///
/// Returns the clamped coordinate and whether the velocity on this axis
/// must be negated, split as (low side hit, high side hit). The upper bound
/// never drops below `radius`, so a viewport narrower than a disc pins the
/// body at `radius` instead of producing an inverted range.
fn clamp_axis(coord: f32, radius: f32, extent: f32) -> (f32, bool, bool) {
    let high = (extent - radius).max(radius);
    if coord < radius {
        (radius, true, false)
    } else if coord > high {
        (high, false, true)
    } else {
        (coord, false, false)
    }
}

/// Keep a body inside the viewport, reflecting velocity on each crossed axis.
///
/// Axes are handled independently; a corner hit flips both.
pub fn resolve_walls(body: &mut Body, radius: f32, viewport: Viewport) -> WallHits {
    let size = viewport.size();
    let (x, left, right) = clamp_axis(body.pos.x, radius, size.x);
    let (y, top, bottom) = clamp_axis(body.pos.y, radius, size.y);

    body.pos = Vec2::new(x, y);
    if left || right {
        body.vel.x = -body.vel.x;
    }
    if top || bottom {
        body.vel.y = -body.vel.y;
    }

    WallHits {
        left,
        right,
        top,
        bottom,
    }
}

/// True if the collision proxies of `a` and `b` overlap
#[inline]
pub fn bodies_touch(a: &Body, b: &Body, radius: f32) -> bool {
    a.bounding_box(radius).intersects(&b.bounding_box(radius))
}

/// Collision response: the two bodies exchange velocity vectors.
///
/// Applying it twice to the same pair is the identity.
#[inline]
pub fn resolve_pair(first: &mut Body, second: &mut Body) {
    std::mem::swap(&mut first.vel, &mut second.vel);
}
