//! Core domain: per-session counters shared by the HUD and diagnostics.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Largest step the loop will ever advance, one 60 Hz frame.
pub const MAX_FRAME_SECS: f32 = 1.0 / 60.0;

#[derive(Resource, Debug, Default)]
pub struct SessionStats {
    pub frame_count: u64,
    /// Exponentially smoothed frames per second.
    pub fps: f32,
    /// Seconds of unpaused play.
    pub game_time: f32,
}

impl SessionStats {
    /// Record one rendered frame of `real_dt` seconds.
    pub fn record_frame(&mut self, real_dt: f32, running: bool) {
        self.frame_count += 1;
        if real_dt > 0.0 {
            let instant = 1.0 / real_dt;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps + (instant - self.fps) * 0.1
            };
        }
        if running {
            self.game_time += real_dt.min(MAX_FRAME_SECS);
        }
    }
}

/// Random source for cosmetic effects (shake jitter, particles).
#[derive(Resource, Debug)]
pub struct EffectsRng(pub ChaCha8Rng);

impl EffectsRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for EffectsRng {
    fn default() -> Self {
        Self::seeded(rand::random::<u64>())
    }
}
