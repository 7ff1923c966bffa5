//! Scramble timing configuration

use crate::effect::{
    EffectTiming, MAX_TICKS_PER_CHAR, MAX_TICK_INTERVAL_MS, TICKS_PER_CHAR, TICK_INTERVAL,
};
use serde::Deserialize;

/// Timing for every scramble label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectConfig {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Ticks each position stays randomized
    pub ticks_per_char: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL.as_millis() as u64,
            ticks_per_char: TICKS_PER_CHAR,
        }
    }
}

/// Effect settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileEffect {
    pub tick_interval_ms: Option<u64>,
    pub ticks_per_char: Option<usize>,
}

impl EffectConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileEffect>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            tick_interval_ms: file.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
            ticks_per_char: file.ticks_per_char.unwrap_or(defaults.ticks_per_char),
        }
    }

    /// Keep both values within what the timer accepts (zero becomes 1)
    pub fn clamped(self) -> Self {
        Self {
            tick_interval_ms: self.tick_interval_ms.clamp(1, MAX_TICK_INTERVAL_MS),
            ticks_per_char: self.ticks_per_char.clamp(1, MAX_TICKS_PER_CHAR),
        }
    }

    pub fn timing(&self) -> EffectTiming {
        EffectTiming::new(self.tick_interval_ms, self.ticks_per_char)
    }
}
