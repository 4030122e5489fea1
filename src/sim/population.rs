//! Population manager
//!
//! Owns the body collection. Structural changes (add, remove, commit) happen
//! under one lock; the animation loop works on snapshots and merges results
//! back by body id, so concurrent add/remove never sees a torn collection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Body, Rgb, Viewport};
use crate::consts::{ACCEL_SCALE_MAX, ACCEL_SCALE_MIN};
use crate::settings::Settings;

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        log::warn!("Recovering from poisoned lock");
        poisoned.into_inner()
    })
}

/// The shared, mutable set of bodies
#[derive(Debug)]
pub struct Population {
    bodies: Mutex<Vec<Body>>,
    rng: Mutex<Pcg32>,
    next_id: AtomicU32,
    seeded: AtomicBool,
    radius: f32,
}

impl Population {
    /// Create an empty population. `seed` makes spawning reproducible.
    pub fn new(radius: f32, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            bodies: Mutex::new(Vec::new()),
            rng: Mutex::new(Pcg32::seed_from_u64(seed)),
            next_id: AtomicU32::new(1),
            seeded: AtomicBool::new(false),
            radius,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.body_radius, settings.seed)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.bodies).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_or_recover(&self.bodies).is_empty()
    }

    /// Whether the one-time seed has run
    pub fn is_seeded(&self) -> bool {
        self.seeded.load(Ordering::Acquire)
    }

    /// Spawn the initial batch on the first non-empty viewport.
    ///
    /// Returns `true` only for the call that actually seeded; later calls
    /// and calls with an empty viewport do nothing.
    pub fn seed_initial(&self, count: usize, viewport: Viewport) -> bool {
        if viewport.is_empty() {
            return false;
        }
        if self
            .seeded
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let batch: Vec<Body> = (0..count).map(|_| self.spawn(viewport)).collect();
        lock_or_recover(&self.bodies).extend(batch);
        log::info!(
            "Seeded {count} bodies in {}x{} viewport",
            viewport.width,
            viewport.height
        );
        true
    }

    /// Append one randomly placed body and return a copy of it
    pub fn add_random(&self, viewport: Viewport) -> Body {
        let body = self.spawn(viewport);
        lock_or_recover(&self.bodies).push(body);
        log::debug!("Added {body}");
        body
    }

    /// Remove one uniformly chosen body; `None` if the population is empty
    pub fn remove_random(&self) -> Option<Body> {
        let mut bodies = lock_or_recover(&self.bodies);
        if bodies.is_empty() {
            return None;
        }
        let index = lock_or_recover(&self.rng).random_range(0..bodies.len());
        let removed = bodies.swap_remove(index);
        log::debug!("Removed {removed}");
        Some(removed)
    }

    /// Consistent copy of the current collection
    pub fn snapshot(&self) -> Vec<Body> {
        lock_or_recover(&self.bodies).clone()
    }

    /// Write ticked bodies back into the live collection.
    ///
    /// Only bodies still present are updated. Bodies removed since the
    /// snapshot stay removed; bodies added since keep their spawn state.
    /// Returns how many bodies were updated.
    pub fn commit(&self, updated: Vec<Body>) -> usize {
        let updated: HashMap<u32, Body> = updated.into_iter().map(|b| (b.id, b)).collect();
        let mut bodies = lock_or_recover(&self.bodies);
        let mut merged = 0;
        for body in bodies.iter_mut() {
            if let Some(next) = updated.get(&body.id) {
                *body = *next;
                merged += 1;
            }
        }
        merged
    }

    fn next_entity_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Build a body with random placement, direction, speed and color
    fn spawn(&self, viewport: Viewport) -> Body {
        let id = self.next_entity_id();
        let size = viewport.size();
        let mut rng = lock_or_recover(&self.rng);

        let pos = Vec2::new(
            random_coordinate(&mut *rng, self.radius, size.x),
            random_coordinate(&mut *rng, self.radius, size.y),
        );
        let vel = Vec2::new(random_direction(&mut *rng), random_direction(&mut *rng));
        let accel_scale = rng.random_range(ACCEL_SCALE_MIN..=ACCEL_SCALE_MAX);
        let color = Rgb::from_u24(rng.random::<u32>());

        Body::new(id, pos, vel, accel_scale, color)
    }
}

/// Uniform coordinate in `[2r, extent - 2r)`, or the midpoint if that range is empty
fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, radius: f32, extent: f32) -> f32 {
    let low = 2.0 * radius;
    let high = extent - 2.0 * radius;
    if high > low {
        rng.random_range(low..high)
    } else {
        extent / 2.0
    }
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { -1.0 } else { 1.0 }
}
