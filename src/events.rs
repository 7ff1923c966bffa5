// Events that flow from scramble labels to the TUI and the `play` command
//
// Every ScrambleText that was handed a sender reports its session lifecycle
// here. Using an enum allows pattern matching and keeps the communication
// between the timer tasks and their consumers type-safe.

use serde::{Deserialize, Serialize};

/// What caused a scramble session to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The label was mounted with `trigger_on_mount` set
    Mount,
    /// The external trigger flag went from false to true
    External,
    /// The pointer entered the label's area
    PointerEnter,
    /// `start()` was called directly (replay key, `play` command)
    Manual,
}

/// Why a scramble session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Every position was resolved
    Completed,
    /// `stop()` was called directly
    Stopped,
    /// The pointer left the label's area
    PointerLeave,
    /// A new session replaced this one
    Superseded,
    /// A new target string was supplied
    TextChanged,
    /// The label was torn down
    Unmounted,
}

impl FinishReason {
    /// Whether the session ended before resolving every position
    pub fn is_interruption(&self) -> bool {
        !matches!(self, FinishReason::Completed)
    }
}

/// Lifecycle event of a single scramble session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // {"type": "frame", ...}
pub enum ScrambleEvent {
    /// A session began ticking
    Started {
        label: String,
        session: u64,
        trigger: Trigger,
    },

    /// A tick published a new display frame
    Frame {
        label: String,
        session: u64,
        position: usize,
        text: String,
    },

    /// A session released its timer and restored the target text
    Finished {
        label: String,
        session: u64,
        ticks: usize,
        reason: FinishReason,
    },
}

impl ScrambleEvent {
    /// Session number this event belongs to
    pub fn session(&self) -> u64 {
        match self {
            ScrambleEvent::Started { session, .. }
            | ScrambleEvent::Frame { session, .. }
            | ScrambleEvent::Finished { session, .. } => *session,
        }
    }

    /// Name of the label that emitted this event
    pub fn label(&self) -> &str {
        match self {
            ScrambleEvent::Started { label, .. }
            | ScrambleEvent::Frame { label, .. }
            | ScrambleEvent::Finished { label, .. } => label,
        }
    }
}

/// Running totals shown in the status bar
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub sessions_started: u64,
    pub sessions_completed: u64,
    pub sessions_interrupted: u64,
    pub frames_rendered: u64,
    pub by_trigger: TriggerCounts,
}

/// Session starts broken down by trigger
#[derive(Debug, Clone, Default)]
pub struct TriggerCounts {
    pub mount: u64,
    pub external: u64,
    pub pointer: u64,
    pub manual: u64,
}

impl Stats {
    /// Fold one event into the totals
    pub fn record(&mut self, event: &ScrambleEvent) {
        match event {
            ScrambleEvent::Started { trigger, .. } => {
                self.sessions_started += 1;
                match trigger {
                    Trigger::Mount => self.by_trigger.mount += 1,
                    Trigger::External => self.by_trigger.external += 1,
                    Trigger::PointerEnter => self.by_trigger.pointer += 1,
                    Trigger::Manual => self.by_trigger.manual += 1,
                }
            }
            ScrambleEvent::Frame { .. } => self.frames_rendered += 1,
            ScrambleEvent::Finished { reason, .. } => {
                if reason.is_interruption() {
                    self.sessions_interrupted += 1;
                } else {
                    self.sessions_completed += 1;
                }
            }
        }
    }

    /// Sessions currently ticking (started but not yet finished)
    pub fn in_flight(&self) -> u64 {
        self.sessions_started
            .saturating_sub(self.sessions_completed + self.sessions_interrupted)
    }

    /// Percentage of finished sessions that ran to completion
    pub fn completion_rate(&self) -> f64 {
        let finished = self.sessions_completed + self.sessions_interrupted;
        if finished == 0 {
            return 100.0;
        }
        (self.sessions_completed as f64 / finished as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(trigger: Trigger) -> ScrambleEvent {
        ScrambleEvent::Started {
            label: "nav".to_string(),
            session: 1,
            trigger,
        }
    }

    fn finished(reason: FinishReason) -> ScrambleEvent {
        ScrambleEvent::Finished {
            label: "nav".to_string(),
            session: 1,
            ticks: 4,
            reason,
        }
    }

    #[test]
    fn stats_split_completed_and_interrupted() {
        let mut stats = Stats::default();
        stats.record(&started(Trigger::PointerEnter));
        stats.record(&started(Trigger::Mount));
        stats.record(&finished(FinishReason::Completed));
        stats.record(&finished(FinishReason::PointerLeave));

        assert_eq!(stats.sessions_started, 2);
        assert_eq!(stats.sessions_completed, 1);
        assert_eq!(stats.sessions_interrupted, 1);
        assert_eq!(stats.by_trigger.pointer, 1);
        assert_eq!(stats.by_trigger.mount, 1);
        assert_eq!(stats.in_flight(), 0);
        assert!((stats.completion_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn completion_rate_defaults_to_full_when_idle() {
        assert!((Stats::default().completion_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(ScrambleEvent::Frame {
            label: "title".to_string(),
            session: 3,
            position: 2,
            text: "HeXyz".to_string(),
        })
        .unwrap();

        assert_eq!(json["type"], "frame");
        assert_eq!(json["session"], 3);
        assert_eq!(json["text"], "HeXyz");

        let json = serde_json::to_value(finished(FinishReason::PointerLeave)).unwrap();
        assert_eq!(json["reason"], "pointer_leave");
    }
}
