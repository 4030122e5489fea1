//! Simulation tick
//!
//! Advances every body by one step. Runs on a snapshot of the population,
//! never on the shared collection itself.

use super::collision::{bodies_touch, resolve_pair, resolve_walls};
use super::state::{Body, Viewport};

/// Summary of one tick, mostly for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub wall_hits: usize,
    pub pair_swaps: usize,
}

/// Move a body by its scaled direction
#[inline]
pub fn integrate(body: &mut Body) {
    body.pos += body.vel * body.accel_scale as f32;
}

/// Advance `bodies` by one tick inside `viewport`.
///
/// Bodies are processed in order. Each one is moved, kept inside the walls,
/// then tested against every other body (moved or not yet moved this tick).
/// A pair that still overlaps when its second member is visited swaps back,
/// so the response is applied per encounter rather than per unordered pair.
pub fn tick(bodies: &mut [Body], viewport: Viewport, radius: f32) -> TickStats {
    let mut stats = TickStats::default();

    for i in 0..bodies.len() {
        integrate(&mut bodies[i]);
        if resolve_walls(&mut bodies[i], radius, viewport).any() {
            stats.wall_hits += 1;
        }

        for j in 0..bodies.len() {
            if i == j || !bodies_touch(&bodies[i], &bodies[j], radius) {
                continue;
            }
            let (first, second) = pair_mut(bodies, i, j);
            resolve_pair(first, second);
            stats.pair_swaps += 1;
        }
    }

    stats
}

/// Mutable references to two distinct elements
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rgb;
    use glam::Vec2;
    use proptest::prelude::*;

    const RADIUS: f32 = 10.0;

    fn body(id: u32, x: f32, y: f32, vx: f32, vy: f32, accel: u32) -> Body {
        Body::new(id, Vec2::new(x, y), Vec2::new(vx, vy), accel, Rgb::BLACK)
    }

    #[test]
    fn test_integrate_scales_direction() {
        let mut b = body(1, 100.0, 100.0, -1.0, 1.0, 2);
        integrate(&mut b);
        assert_eq!(b.pos, Vec2::new(98.0, 102.0));
    }

    #[test]
    fn test_left_wall_scenario() {
        let mut bodies = [body(1, 5.0, 150.0, -1.0, 0.0, 1)];
        let stats = tick(&mut bodies, Viewport::new(400, 300), RADIUS);
        assert_eq!(bodies[0].pos, Vec2::new(10.0, 150.0));
        assert_eq!(bodies[0].vel, Vec2::new(1.0, 0.0));
        assert_eq!(stats.wall_hits, 1);
    }

    #[test]
    fn test_reflection_happens_once_per_crossing() {
        let mut bodies = [body(1, 12.0, 150.0, -1.0, 1.0, 1)];
        let viewport = Viewport::new(400, 300);
        let mut flips = 0;
        let mut last_vx = bodies[0].vel.x;
        for _ in 0..10 {
            tick(&mut bodies, viewport, RADIUS);
            if bodies[0].vel.x != last_vx {
                flips += 1;
                last_vx = bodies[0].vel.x;
            }
            assert_eq!(bodies[0].vel.y, 1.0);
        }
        assert_eq!(flips, 1);
        assert_eq!(bodies[0].vel.x, 1.0);
    }

    #[test]
    fn test_zero_viewport_does_not_panic() {
        let mut bodies = [body(1, 50.0, 50.0, 1.0, 1.0, 2)];
        for _ in 0..5 {
            tick(&mut bodies, Viewport::new(0, 0), RADIUS);
            assert!(bodies[0].pos.is_finite());
        }
        assert_eq!(bodies[0].pos, Vec2::splat(RADIUS));
    }

    #[test]
    fn test_overlapping_pair_is_swapped_back_within_tick() {
        // Both members see the overlap, so the two swaps cancel out
        let mut bodies = [
            body(1, 100.0, 100.0, 1.0, 0.0, 1),
            body(2, 105.0, 100.0, 0.0, 1.0, 1),
        ];
        let stats = tick(&mut bodies, Viewport::new(400, 300), RADIUS);
        assert_eq!(stats.pair_swaps, 2);
        assert_eq!(bodies[0].vel, Vec2::new(1.0, 0.0));
        assert_eq!(bodies[1].vel, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_pair_separated_by_second_move_keeps_swap() {
        // First body's move creates the overlap; the second body's move breaks it
        let mut bodies = [
            body(1, 100.0, 100.0, 1.0, 0.0, 1),
            body(2, 110.0, 100.0, 1.0, 1.0, 2),
        ];
        let stats = tick(&mut bodies, Viewport::new(400, 300), RADIUS);
        assert_eq!(stats.pair_swaps, 1);
        assert_eq!(bodies[0].pos, Vec2::new(101.0, 100.0));
        assert_eq!(bodies[0].vel, Vec2::new(1.0, 1.0));
        assert_eq!(bodies[1].pos, Vec2::new(112.0, 100.0));
        assert_eq!(bodies[1].vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_empty_slice() {
        let mut bodies: [Body; 0] = [];
        assert_eq!(
            tick(&mut bodies, Viewport::new(400, 300), RADIUS),
            TickStats::default()
        );
    }

    fn arb_body(id: u32) -> impl Strategy<Value = Body> {
        (
            -50.0f32..450.0,
            -50.0f32..350.0,
            prop::bool::ANY,
            prop::bool::ANY,
            1u32..=2,
        )
            .prop_map(move |(x, y, left, up, accel)| {
                let vx = if left { -1.0 } else { 1.0 };
                let vy = if up { -1.0 } else { 1.0 };
                body(id, x, y, vx, vy, accel)
            })
    }

    proptest! {
        #[test]
        fn prop_bodies_stay_inside_walls(
            a in arb_body(1),
            b in arb_body(2),
            c in arb_body(3),
            width in 20u32..800,
            height in 20u32..600,
            ticks in 1usize..20,
        ) {
            let mut bodies = [a, b, c];
            let viewport = Viewport::new(width, height);
            for _ in 0..ticks {
                tick(&mut bodies, viewport, RADIUS);
                for body in &bodies {
                    prop_assert!(body.pos.x >= RADIUS && body.pos.x <= width as f32 - RADIUS);
                    prop_assert!(body.pos.y >= RADIUS && body.pos.y <= height as f32 - RADIUS);
                }
            }
        }

        #[test]
        fn prop_double_swap_is_identity(a in arb_body(1), b in arb_body(2)) {
            let (mut x, mut y) = (a, b);
            resolve_pair(&mut x, &mut y);
            resolve_pair(&mut x, &mut y);
            prop_assert_eq!(x.vel, a.vel);
            prop_assert_eq!(y.vel, b.vel);
        }
    }
}
