//! Body state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const LIGHT_GRAY: Rgb = Rgb::new(192, 192, 192);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from the low 24 bits of `value` (0xRRGGBB)
    pub const fn from_u24(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }
}

/// Viewport dimensions in pixels. Zero is a valid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Axis-aligned box used as a cheap collision proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test; boxes that only touch along an edge do not intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A single ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    /// Direction per axis, ±1 at spawn
    pub vel: Vec2,
    /// Per-tick speed multiplier (≥ 1)
    pub accel_scale: u32,
    pub color: Rgb,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, accel_scale: u32, color: Rgb) -> Self {
        Self {
            id,
            pos,
            vel,
            accel_scale: accel_scale.max(1),
            color,
        }
    }

    /// Collision proxy: a square of side `radius` around the center.
    ///
    /// This is half the visual disc on each side, so discs visibly overlap
    /// a little before they collide.
    pub fn bounding_box(&self, radius: f32) -> BoundingBox {
        BoundingBox::centered(self.pos, radius)
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Body#{}[pos=({:.1}, {:.1}) vel=({}, {}) accel={} color=#{:02x}{:02x}{:02x}]",
            self.id,
            self.pos.x,
            self.pos.y,
            self.vel.x,
            self.vel.y,
            self.accel_scale,
            self.color.r,
            self.color.g,
            self.color.b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_is_half_radius_each_side() {
        let body = Body::new(1, Vec2::new(50.0, 40.0), Vec2::ONE, 1, Rgb::BLACK);
        let bbox = body.bounding_box(10.0);
        assert_eq!(bbox.min, Vec2::new(45.0, 35.0));
        assert_eq!(bbox.max, Vec2::new(55.0, 45.0));
    }

    #[test]
    fn test_bounding_box_tracks_position() {
        let mut body = Body::new(1, Vec2::new(50.0, 40.0), Vec2::ONE, 1, Rgb::BLACK);
        body.pos = Vec2::new(10.0, 10.0);
        assert_eq!(body.bounding_box(10.0).min, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = BoundingBox::centered(Vec2::new(0.0, 0.0), 10.0);
        let touching = BoundingBox::centered(Vec2::new(10.0, 0.0), 10.0);
        let overlapping = BoundingBox::centered(Vec2::new(9.5, 3.0), 10.0);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_rgb_from_u24() {
        assert_eq!(Rgb::from_u24(0x12_34_56), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(Rgb::from_u24(0xFF_12_34_56), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_accel_scale_floor() {
        let body = Body::new(1, Vec2::ZERO, Vec2::ONE, 0, Rgb::BLACK);
        assert_eq!(body.accel_scale, 1);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0, 300).is_empty());
        assert!(Viewport::new(400, 0).is_empty());
        assert!(!Viewport::new(400, 300).is_empty());
    }
}
