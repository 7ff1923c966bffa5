//! Scramble text effect
//!
//! A label whose display text is replaced by random letters that lock into
//! the real characters one position at a time, left to right.
//!
//! - [`ScrambleSession`] is the pure tick-by-tick state machine.
//! - [`ScrambleText`] owns the target text, the observable display text and
//!   the single timer task that drives a session.

mod alphabet;
mod scramble;
mod session;

#[cfg(test)]
pub use alphabet::is_scramble_glyph;
pub use scramble::{ScrambleOptions, ScrambleText};
pub use session::{ScrambleSession, Tick};

use std::time::Duration;

/// Ticks a position stays randomized before it locks to its true character
pub const TICKS_PER_CHAR: usize = 2;

/// Time between two ticks of a session
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Slowest accepted tick interval, in milliseconds
pub const MAX_TICK_INTERVAL_MS: u64 = 10_000;

/// Most ticks a position may stay randomized
pub const MAX_TICKS_PER_CHAR: usize = 100;

/// Timing shared by every label in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTiming {
    pub tick_interval: Duration,
    pub ticks_per_char: usize,
}

impl Default for EffectTiming {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            ticks_per_char: TICKS_PER_CHAR,
        }
    }
}

impl EffectTiming {
    /// Build timing from raw config values, clamped to `1..=MAX`
    pub fn new(tick_interval_ms: u64, ticks_per_char: usize) -> Self {
        Self {
            tick_interval: Duration::from_millis(tick_interval_ms.clamp(1, MAX_TICK_INTERVAL_MS)),
            ticks_per_char: ticks_per_char.clamp(1, MAX_TICKS_PER_CHAR),
        }
    }

    /// Wall time a full session over `text` takes
    pub fn session_duration(&self, text: &str) -> Duration {
        let ticks = text.chars().count().saturating_mul(self.ticks_per_char);
        self.tick_interval
            .saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
    }
}
