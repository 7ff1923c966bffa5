// Slide entrance choreography
//
// When a slide becomes active its elements fade in on a fixed timeline.
// Project slides:
//
//   0.0s ├── image wipe ───────────────┤ 1.2s
//   0.3s    ├── title ──────────┤ 1.1s
//   0.5s       ├── description ──────┤ 1.3s
//   0.6s         ├ tag 0 ┤  (+0.1s per further tag)
//   0.8s             ├ button ┤ 1.2s
//
// The intro slide:
//
//   0.0s ├── intro title (rises) ───┤ 1.0s
//   0.2s     ├── intro text ─────┤ 1.0s
//   0.4s         ├── scroll indicator (slides in) ─┤ 1.2s
//
// Leaving the slide resets the timeline, so coming back plays it again.

use std::time::{Duration, Instant};

/// An animated element of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    IntroTitle,
    IntroText,
    /// Scroll hint under the intro copy
    Indicator,
    Image,
    Title,
    Description,
    /// Service tag by index (staggered)
    Tag(usize),
    Button,
}

/// Easing curve of one cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ease {
    /// Decelerate into place
    Out,
    /// Accelerate then decelerate
    InOut,
}

impl Ease {
    fn apply(self, t: f32) -> f32 {
        match self {
            Ease::Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Seconds between consecutive tags
const TAG_STAGGER: f32 = 0.1;

/// (offset, duration, easing) of an element, in seconds
fn cue(element: Element) -> (f32, f32, Ease) {
    match element {
        Element::IntroTitle => (0.0, 1.0, Ease::Out),
        Element::IntroText => (0.2, 0.8, Ease::Out),
        Element::Indicator => (0.4, 0.8, Ease::Out),
        Element::Image => (0.0, 1.2, Ease::InOut),
        Element::Title => (0.3, 0.8, Ease::Out),
        Element::Description => (0.5, 0.8, Ease::Out),
        Element::Tag(i) => (0.6 + TAG_STAGGER * i as f32, 0.4, Ease::Out),
        Element::Button => (0.8, 0.4, Ease::Out),
    }
}

/// Eased progress in `[0, 1]` of `element`, `elapsed` after the slide started
pub fn progress_at(element: Element, elapsed: Duration) -> f32 {
    let (offset, duration, ease) = cue(element);
    let t = ((elapsed.as_secs_f32() - offset) / duration).clamp(0.0, 1.0);
    ease.apply(t)
}

/// Timeline state of one slide
#[derive(Debug, Clone, Default)]
pub struct Entrance {
    started: Option<Instant>,
}

impl Entrance {
    /// Start (or restart) the timeline
    pub fn play(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Rewind to the hidden state
    pub fn reverse(&mut self) {
        self.started = None;
    }

    pub fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    /// Progress of `element` at `now`; 0 when the timeline is rewound
    pub fn progress(&self, element: Element, now: Instant) -> f32 {
        match self.started {
            Some(started) => progress_at(element, now.saturating_duration_since(started)),
            None => 0.0,
        }
    }
}

/// Rows (or columns) still to travel at `progress`, out of `distance`
pub fn travel(progress: f32, distance: u16) -> u16 {
    ((1.0 - progress.clamp(0.0, 1.0)) * distance as f32).round() as u16
}

/// Period of one up-and-back bounce of the scroll indicator
const BOUNCE_PERIOD: Duration = Duration::from_millis(3000);

/// Row offset (0 or 1) of the bouncing scroll indicator
///
/// A 1.5s move down followed by a 1.5s move back, rounded to whole rows.
pub fn bounce_offset(elapsed: Duration) -> u16 {
    let phase = (elapsed.as_millis() % BOUNCE_PERIOD.as_millis()) as f32
        / BOUNCE_PERIOD.as_millis() as f32;
    let wave = if phase < 0.5 { phase * 2.0 } else { (1.0 - phase) * 2.0 };
    if wave >= 0.5 {
        1
    } else {
        0
    }
}
