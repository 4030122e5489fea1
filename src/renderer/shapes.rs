//! Rasterization of 2D primitives into a frame buffer

use glam::Vec2;

use super::framebuffer::{FrameBuffer, Rgba};
use crate::sim::{Body, Rgb};

/// Outline thickness in pixels
const OUTLINE_WIDTH: f32 = 1.0;

/// Pixel range covering `[center - radius, center + radius]` on one axis
fn span(center: f32, radius: f32) -> std::ops::RangeInclusive<i64> {
    let lo = (center - radius).floor() as i64;
    let hi = (center + radius).ceil() as i64;
    lo..=hi
}

/// Visit every pixel whose center lies within `radius` of `center`.
///
/// The callback receives pixel coordinates and the squared distance from
/// the pixel center.
fn for_each_in_disc(center: Vec2, radius: f32, mut f: impl FnMut(i64, i64, f32)) {
    if !center.is_finite() || radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    for y in span(center.y, radius) {
        for x in span(center.x, radius) {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            let d2 = d.length_squared();
            if d2 <= r2 {
                f(x, y, d2);
            }
        }
    }
}

/// Filled disc
pub fn fill_disc(fb: &mut FrameBuffer, center: Vec2, radius: f32, color: Rgb) {
    let color = Rgba::from(color);
    for_each_in_disc(center, radius, |x, y, _| fb.set_pixel(x, y, color));
}

/// 1px ring along the disc edge
pub fn stroke_circle(fb: &mut FrameBuffer, center: Vec2, radius: f32, color: Rgb) {
    let color = Rgba::from(color);
    let inner = (radius - OUTLINE_WIDTH).max(0.0);
    let inner2 = inner * inner;
    for_each_in_disc(center, radius, |x, y, d2| {
        if d2 > inner2 {
            fb.set_pixel(x, y, color);
        }
    });
}

/// A body: disc in its own color, then the outline on top
pub fn draw_body(fb: &mut FrameBuffer, body: &Body, radius: f32, outline: Rgb) {
    fill_disc(fb, body.pos, radius, body.color);
    stroke_circle(fb, body.pos, radius, outline);
}
