//! Particle overlay reference
//!
//! Particles only read the fluid: each update point-samples the velocity
//! field at every particle, moves it, wraps it at the edges and respawns it
//! once it outlives its max age. Rendering stays with the host.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::spatial::Field;

/// Read-only point query into a velocity field.
pub trait VelocitySampler {
    /// Velocity at a normalized position (origin bottom-left), in field units.
    fn sample_velocity(&self, uv: Vec2) -> Vec2;

    /// Conversion from field velocity units to normalized units.
    fn texel_size(&self) -> Vec2;
}

impl VelocitySampler for Field {
    #[inline]
    fn sample_velocity(&self, uv: Vec2) -> Vec2 {
        self.sample(uv).truncate().truncate()
    }

    #[inline]
    fn texel_size(&self) -> Vec2 {
        Field::texel_size(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub age: f32,
    pub max_age: f32,
}

pub struct ParticleOverlay {
    particles: Vec<Particle>,
    min_age: f32,
    max_age: f32,
    rng: SmallRng,
}

impl ParticleOverlay {
    /// Spawn `count` particles at random positions with lifetimes drawn from
    /// `[min_age, max_age)` seconds. A `max_age` at or below `min_age` gives
    /// every particle exactly `min_age`.
    pub fn new(count: usize, min_age: f32, max_age: f32, seed: u64) -> Self {
        let mut overlay = Self {
            particles: Vec::with_capacity(count),
            min_age,
            max_age: max_age.max(min_age),
            rng: SmallRng::seed_from_u64(seed),
        };
        for _ in 0..count {
            let p = overlay.spawn();
            overlay.particles.push(p);
        }
        overlay
    }

    fn spawn(&mut self) -> Particle {
        let max_age = if self.max_age > self.min_age {
            self.rng.random_range(self.min_age..self.max_age)
        } else {
            self.min_age
        };
        Particle {
            position: Vec2::new(self.rng.random::<f32>(), self.rng.random::<f32>()),
            velocity: Vec2::ZERO,
            age: 0.0,
            max_age,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle by `dt` seconds through `sampler`.
    pub fn update<S: VelocitySampler + ?Sized>(&mut self, sampler: &S, dt: f32) {
        let scale = sampler.texel_size();
        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.velocity = sampler.sample_velocity(p.position);
            p.position += p.velocity * scale * dt;
            p.position.x = p.position.x.rem_euclid(1.0);
            p.position.y = p.position.y.rem_euclid(1.0);
            p.age += dt;
            if p.age > p.max_age {
                self.particles[i] = self.spawn();
            }
        }
    }

    /// Positions flattened as `[x0, y0, x1, y1, ...]` with a top-left origin,
    /// the layout a 2D canvas overlay draws from.
    pub fn positions_top_left(&self) -> Vec<f32> {
        self.particles
            .iter()
            .flat_map(|p| [p.position.x, 1.0 - p.position.y])
            .collect()
    }
}
