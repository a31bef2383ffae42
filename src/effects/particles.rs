//! Effects domain: short-lived particle bursts.
//!
//! A burst samples each particle's direction from an arc (0° points up,
//! angles grow clockwise, screen space) and its speed and lifetime from
//! ranges. Particles then drift under their own gravity and fade out.

use bevy::prelude::*;
use rand::Rng;

/// Live particles beyond this are not spawned.
pub const MAX_PARTICLES: usize = 256;
pub const PARTICLE_Z: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BurstSpec {
    pub count: u32,
    /// Degrees, `(min, max)`
    pub arc: (f32, f32),
    /// px/s, `(min, max)`
    pub speed: (f32, f32),
    /// Seconds, `(min, max)`
    pub ttl: (f32, f32),
    /// Half-extent of the square the particles start in
    pub spread: f32,
    pub size: f32,
    pub color: Color,
    /// Screen-space px/s², positive pulls down
    pub gravity: f32,
}

impl BurstSpec {
    /// Puffs kicked sideways from the feet on landing.
    pub fn landing_dust() -> Self {
        Self {
            count: 8,
            arc: (-80.0, 80.0),
            speed: (40.0, 110.0),
            ttl: (0.25, 0.45),
            spread: 10.0,
            size: 4.0,
            color: Color::srgba(0.86, 0.78, 0.62, 0.9),
            gravity: 200.0,
        }
    }

    /// Ring under the feet when the air jump fires.
    pub fn double_jump_puff() -> Self {
        Self {
            count: 10,
            arc: (100.0, 260.0),
            speed: (60.0, 120.0),
            ttl: (0.2, 0.35),
            spread: 6.0,
            size: 3.0,
            color: Color::srgba(1.0, 1.0, 1.0, 0.85),
            gravity: 0.0,
        }
    }

    pub fn hit_sparks() -> Self {
        Self {
            count: 12,
            arc: (-60.0, 60.0),
            speed: (120.0, 260.0),
            ttl: (0.3, 0.5),
            spread: 8.0,
            size: 3.0,
            color: Color::srgb(1.0, 0.85, 0.3),
            gravity: 600.0,
        }
    }

    pub fn collect_sparkle() -> Self {
        Self {
            count: 16,
            arc: (0.0, 360.0),
            speed: (50.0, 160.0),
            ttl: (0.4, 0.8),
            spread: 4.0,
            size: 3.0,
            color: Color::srgb(0.55, 0.95, 1.0),
            gravity: -40.0,
        }
    }
}

/// Initial state of one particle of a burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    pub position: Vec2,
    pub velocity: Vec2,
    pub ttl: f32,
}

/// `min` when the range is empty, otherwise uniform in `[min, max)`.
pub fn sample_range(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    if max - min < f32::EPSILON {
        return min;
    }
    rng.random_range(min..max)
}

/// Unit direction for `degrees`, 0° up and clockwise, screen space.
pub fn arc_direction(degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(theta.sin(), -theta.cos())
}

pub fn emit_burst(spec: &BurstSpec, origin: Vec2, rng: &mut impl Rng) -> Vec<ParticleSeed> {
    (0..spec.count)
        .map(|_| {
            let jitter = Vec2::new(
                sample_range(rng, (-spec.spread, spec.spread)),
                sample_range(rng, (-spec.spread, spec.spread)),
            );
            let speed = sample_range(rng, spec.speed);
            ParticleSeed {
                position: origin + jitter,
                velocity: arc_direction(sample_range(rng, spec.arc)) * speed,
                ttl: sample_range(rng, spec.ttl),
            }
        })
        .collect()
}

#[derive(Component, Debug, Clone)]
pub struct Particle {
    /// Screen-space position
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity: f32,
    pub ttl: f32,
    pub age: f32,
}

impl Particle {
    pub fn new(seed: ParticleSeed, gravity: f32) -> Self {
        Self {
            position: seed.position,
            velocity: seed.velocity,
            gravity,
            ttl: seed.ttl,
            age: 0.0,
        }
    }

    /// Integrate one step. Returns false once the particle has expired.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.velocity.y += self.gravity * dt;
        self.position += self.velocity * dt;
        self.age < self.ttl
    }

    /// Linear fade over the lifetime.
    pub fn alpha(&self) -> f32 {
        if self.ttl <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.ttl).clamp(0.0, 1.0)
    }
}

/// Particle counters for the debug readout.
#[derive(Resource, Debug, Default)]
pub struct ParticleStats {
    pub live: usize,
    pub spawned: u64,
    pub dropped: u64,
}
