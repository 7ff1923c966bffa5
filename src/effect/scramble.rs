//! A text label that scrambles and resolves on demand
//!
//! `ScrambleText` owns exactly one timer handle. Every way a session can end
//! (completion, `stop()`, pointer leave, a new target, unmount, drop) goes
//! through the same path that aborts the task and restores the target text.
//!
//! Frames are published under the instance's session lock and only by the
//! session that currently holds it. Once `start()` or `stop()` returns, a
//! cancelled task can no longer write to the display, even if it is still
//! mid-tick on another worker thread.

use super::session::{ScrambleSession, Tick};
use super::{EffectTiming, MAX_TICK_INTERVAL_MS};
use crate::events::{FinishReason, ScrambleEvent, Trigger};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Recognized options of a scramble label
#[derive(Debug, Clone, Default)]
pub struct ScrambleOptions {
    /// Start a session as soon as the label is mounted
    pub trigger_on_mount: bool,
    /// Initial value of the external trigger flag
    pub external_trigger: bool,
    /// Ignore pointer enter/leave
    pub disable_hover_trigger: bool,
    /// Fixed RNG seed (each session derives its own stream from it)
    pub seed: Option<u64>,
}

#[derive(Debug)]
struct ActiveSession {
    id: u64,
    ticks: usize,
}

#[derive(Debug, Default)]
struct SessionState {
    active: Option<ActiveSession>,
    last_session: u64,
}

/// State shared between a label and its timer task
struct Shared {
    label: String,
    display: watch::Sender<String>,
    running: watch::Sender<bool>,
    state: Mutex<SessionState>,
    events: Option<mpsc::Sender<ScrambleEvent>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forward an event without ever blocking a tick
    fn emit(&self, event: ScrambleEvent) {
        if let Some(sender) = &self.events {
            if sender.try_send(event).is_err() {
                tracing::trace!(label = %self.label, "scramble event dropped");
            }
        }
    }

    /// Open a new session, superseding any active one
    fn begin(&self, trigger: Trigger) -> u64 {
        let mut state = self.lock();
        if let Some(previous) = state.active.take() {
            self.emit(ScrambleEvent::Finished {
                label: self.label.clone(),
                session: previous.id,
                ticks: previous.ticks,
                reason: FinishReason::Superseded,
            });
        }

        state.last_session += 1;
        let id = state.last_session;
        state.active = Some(ActiveSession { id, ticks: 0 });
        self.running.send_replace(true);

        tracing::debug!(label = %self.label, session = id, ?trigger, "scramble started");
        self.emit(ScrambleEvent::Started {
            label: self.label.clone(),
            session: id,
            trigger,
        });
        id
    }

    /// Publish a tick's frame; false if `session` is no longer active
    fn publish(&self, session: u64, tick: &Tick) -> bool {
        let mut state = self.lock();
        match state.active.as_mut() {
            Some(active) if active.id == session => active.ticks = tick.position,
            _ => return false,
        }

        tracing::trace!(label = %self.label, session, position = tick.position, "scramble tick");
        self.display.send_replace(tick.frame.clone());
        self.emit(ScrambleEvent::Frame {
            label: self.label.clone(),
            session,
            position: tick.position,
            text: tick.frame.clone(),
        });
        true
    }

    /// End the active session and restore `target`
    ///
    /// With `only = Some(id)` nothing happens unless `id` is the active
    /// session. With `None` the display is restored even when idle.
    fn finish(&self, target: &str, only: Option<u64>, reason: FinishReason) {
        let mut state = self.lock();
        if let Some(id) = only {
            if state.active.as_ref().map(|active| active.id) != Some(id) {
                return;
            }
        }
        let ended = state.active.take();

        self.display.send_if_modified(|text| {
            if text == target {
                return false;
            }
            target.clone_into(text);
            true
        });

        if let Some(ended) = ended {
            self.running.send_replace(false);
            tracing::debug!(
                label = %self.label,
                session = ended.id,
                ticks = ended.ticks,
                ?reason,
                "scramble finished"
            );
            self.emit(ScrambleEvent::Finished {
                label: self.label.clone(),
                session: ended.id,
                ticks: ended.ticks,
                reason,
            });
        }
    }
}

/// A label whose text scrambles and resolves back to its target
///
/// Timer tasks are spawned on the ambient tokio runtime. Without one,
/// sessions resolve immediately instead of animating.
pub struct ScrambleText {
    target: String,
    options: ScrambleOptions,
    timing: EffectTiming,
    shared: Arc<Shared>,
    timer: Option<JoinHandle<()>>,
    external: bool,
    hovered: bool,
    mounted: bool,
}

impl ScrambleText {
    /// Create a label that reports nothing
    pub fn new(
        label: impl Into<String>,
        text: impl Into<String>,
        options: ScrambleOptions,
        timing: EffectTiming,
    ) -> Self {
        Self::build(label.into(), text.into(), options, timing, None)
    }

    /// Create a label that reports its lifecycle to `sender`
    pub fn with_sender(
        label: impl Into<String>,
        text: impl Into<String>,
        options: ScrambleOptions,
        timing: EffectTiming,
        sender: mpsc::Sender<ScrambleEvent>,
    ) -> Self {
        Self::build(label.into(), text.into(), options, timing, Some(sender))
    }

    fn build(
        label: String,
        target: String,
        options: ScrambleOptions,
        timing: EffectTiming,
        events: Option<mpsc::Sender<ScrambleEvent>>,
    ) -> Self {
        let (display, _) = watch::channel(target.clone());
        let (running, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                label,
                display,
                running,
                state: Mutex::new(SessionState::default()),
                events,
            }),
            target,
            options,
            timing,
            timer: None,
            external: false,
            hovered: false,
            mounted: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.shared.label
    }

    /// The text the effect always resolves to
    pub fn text(&self) -> &str {
        &self.target
    }

    /// The current frame
    pub fn display(&self) -> String {
        self.shared.display.borrow().clone()
    }

    /// Observe display changes
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.display.subscribe()
    }

    /// Whether a session is ticking
    pub fn is_running(&self) -> bool {
        self.shared.lock().active.is_some()
    }

    /// Observe sessions starting and ending
    ///
    /// Unlike lifecycle events this never drops a transition, so waiting for
    /// `false` is a reliable way to learn that a session is over.
    pub fn subscribe_running(&self) -> watch::Receiver<bool> {
        self.shared.running.subscribe()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn hover_enabled(&self) -> bool {
        !self.options.disable_hover_trigger
    }

    /// Begin a new session, cancelling any session in flight
    pub fn start(&mut self) {
        self.start_with(Trigger::Manual);
    }

    /// Cancel the active session (if any) and show the target text
    pub fn stop(&mut self) {
        self.halt(FinishReason::Stopped);
    }

    /// Lifecycle hook: the label became visible
    pub fn mount(&mut self) {
        self.mounted = true;
        self.external = self.options.external_trigger;
        if self.options.trigger_on_mount {
            self.start_with(Trigger::Mount);
        } else if self.external {
            self.start_with(Trigger::External);
        }
    }

    /// Lifecycle hook: the label is going away
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.hovered = false;
        self.halt(FinishReason::Unmounted);
    }

    /// Update the external trigger; a false to true transition starts a session
    pub fn set_external_trigger(&mut self, value: bool) {
        let rising = value && !self.external;
        self.external = value;
        if rising {
            self.start_with(Trigger::External);
        }
    }

    pub fn pointer_enter(&mut self) {
        if self.options.disable_hover_trigger || self.hovered {
            return;
        }
        self.hovered = true;
        self.start_with(Trigger::PointerEnter);
    }

    pub fn pointer_leave(&mut self) {
        if self.options.disable_hover_trigger {
            return;
        }
        self.hovered = false;
        self.halt(FinishReason::PointerLeave);
    }

    /// Replace the target text, ending any session in flight
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.target {
            return;
        }
        self.release_timer();
        self.target = text;
        self.shared
            .finish(&self.target, None, FinishReason::TextChanged);
    }

    fn start_with(&mut self, trigger: Trigger) {
        self.release_timer();
        let id = self.shared.begin(trigger);

        let session = ScrambleSession::new(&self.target, self.timing.ticks_per_char);
        if session.is_complete() {
            self.shared
                .finish(&self.target, Some(id), FinishReason::Completed);
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(label = %self.shared.label, "no tokio runtime, resolving scramble immediately");
            self.shared
                .finish(&self.target, Some(id), FinishReason::Completed);
            return;
        };

        let rng = self.session_rng(id);
        self.timer = Some(runtime.spawn(run_session(
            Arc::clone(&self.shared),
            self.target.clone(),
            session,
            id,
            rng,
            self.timing.tick_interval,
        )));
    }

    fn halt(&mut self, reason: FinishReason) {
        self.release_timer();
        self.shared.finish(&self.target, None, reason);
    }

    fn release_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn session_rng(&self, session: u64) -> SmallRng {
        match self.options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(session)),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Drop for ScrambleText {
    fn drop(&mut self) {
        self.release_timer();
        self.shared
            .finish(&self.target, None, FinishReason::Unmounted);
    }
}

/// Ends its session when the timer task exits, whether it ran to the last
/// tick, lost the session, was aborted or panicked
struct SessionGuard {
    shared: Arc<Shared>,
    target: String,
    id: u64,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::warn!(label = %self.shared.label, session = self.id, "scramble timer panicked");
        }
        // No-op unless this session is still the active one
        self.shared
            .finish(&self.target, Some(self.id), FinishReason::Completed);
    }
}

/// Timer task: one tick per `period`, first tick one period after start
async fn run_session(
    shared: Arc<Shared>,
    target: String,
    mut session: ScrambleSession,
    id: u64,
    mut rng: SmallRng,
    period: Duration,
) {
    let guard = SessionGuard { shared, target, id };

    let period = period.clamp(
        Duration::from_millis(1),
        Duration::from_millis(MAX_TICK_INTERVAL_MS),
    );
    let first = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut ticker = interval_at(first, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(tick) = session.advance(&mut rng) else {
            break;
        };
        if !guard.shared.publish(id, &tick) || tick.is_final {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::is_scramble_glyph;

    fn seeded() -> ScrambleOptions {
        ScrambleOptions {
            seed: Some(11),
            ..Default::default()
        }
    }

    fn label_with_events(
        text: &str,
        options: ScrambleOptions,
    ) -> (ScrambleText, mpsc::Receiver<ScrambleEvent>) {
        let (tx, rx) = mpsc::channel(256);
        let label = ScrambleText::with_sender("test", text, options, EffectTiming::default(), tx);
        (label, rx)
    }

    async fn until_finished(rx: &mut mpsc::Receiver<ScrambleEvent>) -> Vec<ScrambleEvent> {
        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = matches!(event, ScrambleEvent::Finished { .. });
            seen.push(event);
            if done {
                break;
            }
        }
        seen
    }

    fn drain(rx: &mut mpsc::Receiver<ScrambleEvent>) -> Vec<ScrambleEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn frames(events: &[ScrambleEvent]) -> Vec<(usize, String)> {
        events
            .iter()
            .filter_map(|e| match e {
                ScrambleEvent::Frame { position, text, .. } => Some((*position, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn hello_resolves_after_ten_ticks() {
        let (mut label, mut rx) = label_with_events("HELLO", seeded());
        label.start();
        assert!(label.is_running());

        let events = until_finished(&mut rx).await;
        let frames = frames(&events);

        assert_eq!(frames.len(), 10);
        let tick4: Vec<char> = frames[3].1.chars().collect();
        assert_eq!(&tick4[..2], &['H', 'E']);
        assert!(tick4[2..].iter().all(|c| is_scramble_glyph(*c)));
        assert_eq!(frames[9].1, "HELLO");
        assert!(matches!(
            events.last(),
            Some(ScrambleEvent::Finished {
                ticks: 10,
                reason: FinishReason::Completed,
                ..
            })
        ));

        assert_eq!(label.display(), "HELLO");
        assert!(!label.is_running());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn ticks_are_spaced_by_the_interval() {
        let (mut label, _rx) = label_with_events("HELLO", seeded());
        let started = Instant::now();
        label.start();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(label.display(), "HELLO", "no tick before the first interval");

        tokio::time::sleep(Duration::from_millis(195)).await; // t = 225ms, 4 ticks
        let shown: Vec<char> = label.display().chars().collect();
        assert_eq!(&shown[..2], &['H', 'E']);
        assert!(shown[2..].iter().all(|c| is_scramble_glyph(*c)));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(label.display(), "HELLO");
        assert!(!label.is_running());
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn empty_text_completes_without_ticks() {
        let (mut label, mut rx) = label_with_events("", seeded());
        label.start();

        assert!(!label.is_running());
        assert_eq!(label.display(), "");
        let events = drain(&mut rx);
        assert!(frames(&events).is_empty());
        assert!(matches!(
            events.as_slice(),
            [
                ScrambleEvent::Started { .. },
                ScrambleEvent::Finished {
                    ticks: 0,
                    reason: FinishReason::Completed,
                    ..
                }
            ]
        ));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn space_survives_every_frame() {
        let (mut label, mut rx) = label_with_events("A B", seeded());
        label.start();

        for (_, text) in frames(&until_finished(&mut rx).await) {
            assert_eq!(text.chars().nth(1), Some(' '));
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn stop_is_idempotent() {
        let (mut label, mut rx) = label_with_events("HELLO", seeded());
        label.start();
        tokio::time::sleep(Duration::from_millis(120)).await;

        label.stop();
        let after_first = (label.display(), label.is_running());
        label.stop();

        assert_eq!((label.display(), label.is_running()), after_first);
        assert_eq!(after_first, ("HELLO".to_string(), false));

        let finished = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, ScrambleEvent::Finished { .. }))
            .count();
        assert_eq!(finished, 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn stop_without_session_is_a_noop() {
        let (mut label, mut rx) = label_with_events("HELLO", seeded());
        label.stop();
        label.stop();
        assert_eq!(label.display(), "HELLO");
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn pointer_leave_halts_immediately() {
        let (mut label, mut rx) = label_with_events("PORTFOLIO", seeded());
        label.pointer_enter();
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(label.is_running());

        label.pointer_leave();
        assert_eq!(label.display(), "PORTFOLIO");
        assert!(!label.is_running());

        let before = drain(&mut rx);
        assert!(matches!(
            before.last(),
            Some(ScrambleEvent::Finished {
                reason: FinishReason::PointerLeave,
                ..
            })
        ));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(drain(&mut rx).is_empty(), "no ticks after pointer leave");
        assert_eq!(label.display(), "PORTFOLIO");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn hover_disabled_ignores_pointer() {
        let options = ScrambleOptions {
            disable_hover_trigger: true,
            ..seeded()
        };
        let (mut label, mut rx) = label_with_events("HELLO", options);
        label.pointer_enter();
        assert!(!label.is_running());

        label.start();
        tokio::time::sleep(Duration::from_millis(120)).await;
        label.pointer_leave();
        assert!(label.is_running(), "leave must not stop a non-hover label");

        let events = until_finished(&mut rx).await;
        assert!(matches!(
            events.last(),
            Some(ScrambleEvent::Finished {
                reason: FinishReason::Completed,
                ..
            })
        ));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn retrigger_cancels_previous_session() {
        let options = ScrambleOptions {
            trigger_on_mount: true,
            ..seeded()
        };
        let (mut label, mut rx) = label_with_events("RETRIGGER", options);
        label.mount();
        tokio::time::sleep(Duration::from_millis(170)).await;
        label.pointer_enter();
        let events = until_finished(&mut rx).await;

        // The first Finished is the superseded mount session
        assert!(matches!(
            events.last(),
            Some(ScrambleEvent::Finished {
                session: 1,
                reason: FinishReason::Superseded,
                ticks: 3,
                ..
            })
        ));

        let rest = until_finished(&mut rx).await;
        assert!(matches!(
            rest.first(),
            Some(ScrambleEvent::Started {
                session: 2,
                trigger: Trigger::PointerEnter,
                ..
            })
        ));
        assert!(rest.iter().all(|e| e.session() == 2));
        assert_eq!(frames(&rest).len(), 18);
        assert_eq!(label.display(), "RETRIGGER");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn external_trigger_is_edge_triggered() {
        let (mut label, mut rx) = label_with_events("EDGE", seeded());
        label.set_external_trigger(true);
        label.set_external_trigger(true);
        until_finished(&mut rx).await;

        label.set_external_trigger(true);
        assert!(!label.is_running(), "holding the flag high does not restart");

        label.set_external_trigger(false);
        label.set_external_trigger(true);
        assert!(label.is_running());

        let starts = until_finished(&mut rx)
            .await
            .into_iter()
            .filter(|e| matches!(e, ScrambleEvent::Started { trigger: Trigger::External, .. }))
            .count();
        assert_eq!(starts, 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn mount_respects_options() {
        let (mut quiet, _) = label_with_events("QUIET", seeded());
        quiet.mount();
        assert!(!quiet.is_running());

        let options = ScrambleOptions {
            external_trigger: true,
            ..seeded()
        };
        let (mut eager, mut rx) = label_with_events("EAGER", options);
        eager.mount();
        assert!(eager.is_running());
        assert!(matches!(
            drain(&mut rx).first(),
            Some(ScrambleEvent::Started {
                trigger: Trigger::External,
                ..
            })
        ));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn mount_with_both_triggers_records_the_flag() {
        let options = ScrambleOptions {
            trigger_on_mount: true,
            external_trigger: true,
            ..seeded()
        };
        let (mut label, mut rx) = label_with_events("BOTH", options);
        label.mount();
        until_finished(&mut rx).await;

        // The host reporting the flag it was built with is not a rising edge
        label.set_external_trigger(true);
        assert!(!label.is_running());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn running_watch_sees_every_end() {
        let (mut label, _rx) = label_with_events("WATCHED", seeded());
        let mut running = label.subscribe_running();
        assert!(!*running.borrow());

        label.start();
        assert!(*running.borrow_and_update());
        running.wait_for(|r| !*r).await.unwrap();
        assert_eq!(label.display(), "WATCHED");

        label.start();
        label.stop();
        assert!(!*running.borrow());

        label.set_text("");
        label.start();
        assert!(!*running.borrow(), "empty text ends in the same call");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn oversized_interval_still_finishes() {
        let timing = EffectTiming {
            tick_interval: Duration::MAX,
            ticks_per_char: 2,
        };
        let (tx, mut rx) = mpsc::channel(64);
        let mut label = ScrambleText::with_sender("slow", "HI", seeded(), timing, tx);
        label.start();

        let events = until_finished(&mut rx).await;
        assert_eq!(frames(&events).len(), 4);
        assert!(matches!(
            events.last(),
            Some(ScrambleEvent::Finished {
                reason: FinishReason::Completed,
                ..
            })
        ));
        assert!(!label.is_running());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn new_text_ends_session_and_shows_it() {
        let (mut label, mut rx) = label_with_events("BEFORE", seeded());
        label.start();
        tokio::time::sleep(Duration::from_millis(120)).await;

        label.set_text("AFTER");
        assert_eq!(label.text(), "AFTER");
        assert_eq!(label.display(), "AFTER");
        assert!(!label.is_running());

        let events = drain(&mut rx);
        assert!(matches!(
            events.last(),
            Some(ScrambleEvent::Finished {
                reason: FinishReason::TextChanged,
                ..
            })
        ));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(label.display(), "AFTER");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn unmount_and_drop_release_the_timer() {
        let (mut label, mut rx) = label_with_events("TEARDOWN", seeded());
        label.start();
        tokio::time::sleep(Duration::from_millis(120)).await;
        label.unmount();
        assert!(!label.is_running());

        label.start();
        let display = label.subscribe();
        tokio::time::sleep(Duration::from_millis(120)).await;
        drop(label);

        assert_eq!(*display.borrow(), "TEARDOWN");
        let reasons: Vec<FinishReason> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                ScrambleEvent::Finished { reason, .. } => Some(reason),
                _ => None,
            })
            .collect();
        assert_eq!(reasons, vec![FinishReason::Unmounted, FinishReason::Unmounted]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn subscribers_see_each_frame() {
        let (mut label, _rx) = label_with_events("WATCH", seeded());
        let mut display = label.subscribe();
        label.start();

        let mut observed = 0;
        while display.changed().await.is_ok() {
            observed += 1;
            if !label.is_running() && *display.borrow_and_update() == "WATCH" {
                break;
            }
        }
        assert!(observed >= 10);
    }

    #[test]
    fn without_runtime_start_resolves_immediately() {
        let mut label = ScrambleText::new("bare", "HELLO", seeded(), EffectTiming::default());
        label.start();
        assert!(!label.is_running());
        assert_eq!(label.display(), "HELLO");
    }
}
