//! Tick-by-tick scramble state machine
//!
//! The session knows nothing about timers: whoever owns it calls
//! [`ScrambleSession::advance`] once per tick and publishes the frame.

use super::alphabet::random_glyph;
use rand::Rng;

/// One published tick of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Position after this tick (1 for the first tick)
    pub position: usize,
    /// Display text for this tick
    pub frame: String,
    /// True on the tick that resolves the last position
    pub is_final: bool,
}

/// Progress of one scramble over a fixed target string
#[derive(Debug, Clone)]
pub struct ScrambleSession {
    target: Vec<char>,
    position: usize,
    ticks_per_char: usize,
}

impl ScrambleSession {
    pub fn new(target: &str, ticks_per_char: usize) -> Self {
        Self {
            target: target.chars().collect(),
            position: 0,
            ticks_per_char: ticks_per_char.max(1),
        }
    }

    /// Ticks needed to resolve every position
    pub fn total_ticks(&self) -> usize {
        self.target.len().saturating_mul(self.ticks_per_char)
    }

    /// True once no further tick is due (immediately for an empty target)
    pub fn is_complete(&self) -> bool {
        self.position >= self.total_ticks()
    }

    /// Whether index `i` shows its true character at the current position
    ///
    /// Spaces never scramble. Otherwise `i` is locked once
    /// `position / ticks_per_char > i`, compared without truncation.
    pub fn is_locked(&self, i: usize) -> bool {
        self.target.get(i) == Some(&' ') || self.position > i.saturating_mul(self.ticks_per_char)
    }

    /// Advance one tick and render its frame, or `None` if already complete
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Tick> {
        if self.is_complete() {
            return None;
        }
        self.position += 1;

        let frame = (0..self.target.len())
            .map(|i| {
                if self.is_locked(i) {
                    self.target[i]
                } else {
                    random_glyph(rng)
                }
            })
            .collect();

        Some(Tick {
            position: self.position,
            frame,
            is_final: self.is_complete(),
        })
    }
}
