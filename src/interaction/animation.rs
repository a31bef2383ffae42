//! Interaction domain: animation jobs advanced once per tick.

use bevy::prelude::*;

pub const BOUNCE_PHASE_SECS: f32 = 0.1;
pub const BOUNCE_PEAK_SCALE: f32 = 1.1;

/// Two-phase yoyo scale played when a box is hit: 1 -> 1.1 -> 1.
#[derive(Component, Debug, Clone, Default)]
pub struct BoxBounce {
    pub elapsed: f32,
}

impl BoxBounce {
    pub fn duration() -> f32 {
        BOUNCE_PHASE_SECS * 2.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= Self::duration()
    }

    /// Scale as a pure function of elapsed time.
    pub fn scale(&self) -> f32 {
        let rise = BOUNCE_PEAK_SCALE - 1.0;
        if self.elapsed <= 0.0 || self.is_finished() {
            1.0
        } else if self.elapsed < BOUNCE_PHASE_SECS {
            1.0 + rise * (self.elapsed / BOUNCE_PHASE_SECS)
        } else {
            BOUNCE_PEAK_SCALE - rise * ((self.elapsed - BOUNCE_PHASE_SECS) / BOUNCE_PHASE_SECS)
        }
    }
}

/// Marker for the drawn child of a mystery box.
#[derive(Component, Debug)]
pub struct BoxVisual;

/// Marker for the glyph drawn on a mystery box.
#[derive(Component, Debug)]
pub struct BoxGlyph;
