// TUI application state
//
// Owns every scramble label on screen, the slide deck and the pointer state.
// The event loop in tui/mod.rs translates terminal input into calls on App;
// rendering only reads from it.

use super::components::scramble_label::{Labels, ScrambleLabel};
use super::components::Toast;
use super::entrance::Entrance;
use super::hover::{HitAreas, HoverChange, HoverTracker, LabelId};
use super::theme::Theme;
use crate::config::{Config, Project, ShowcaseConfig};
use crate::effect::{EffectTiming, ScrambleOptions, ScrambleText};
use crate::events::{ScrambleEvent, Stats};
use crate::logging::LogBuffer;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Minimum time between two wheel-driven slide changes
///
/// One wheel notch arrives as a burst of scroll events on most terminals.
const WHEEL_DEBOUNCE: Duration = Duration::from_millis(150);

/// Navigation labels in the title bar
pub const NAV_ITEMS: [&str; 3] = ["Projects", "Blog", "Contact"];

/// What a slide shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Intro,
    /// Index into `App::projects`
    Project(usize),
}

/// One snap position of the horizontal deck
#[derive(Debug)]
pub struct Slide {
    pub kind: SlideKind,
    /// Heading, driven by the slide's external trigger
    pub title: LabelId,
    /// "Visit Website" hover label (project slides only)
    pub button: Option<LabelId>,
    pub entrance: Entrance,
}

/// Main application state for the TUI
pub struct App {
    pub theme: Theme,
    pub showcase: ShowcaseConfig,
    pub projects: Vec<Project>,

    pub labels: Labels,
    pub brand: LabelId,
    pub nav: Vec<LabelId>,
    pub slides: Vec<Slide>,
    /// Index of the slide in view
    pub active: usize,

    pub hover: HoverTracker,
    /// Label areas recorded by the last draw
    pub hit_areas: HitAreas,

    /// Totals folded from label lifecycle events
    pub stats: Stats,
    pub toast: Option<Toast>,
    pub show_logs: bool,
    pub log_buffer: LogBuffer,
    pub should_quit: bool,
    pub start_time: Instant,
    last_wheel: Option<Instant>,
}

impl App {
    /// Build the label registry and slide deck; nothing runs until [`App::mount`]
    pub fn new(config: &Config, log_buffer: LogBuffer, events: mpsc::Sender<ScrambleEvent>) -> Self {
        let timing = config.effect.timing();
        let mut labels = Labels::default();

        let brand = push_label(
            &mut labels,
            ScrambleText::with_sender(
                "brand",
                "SCRAMBLER",
                ScrambleOptions {
                    trigger_on_mount: true,
                    disable_hover_trigger: true,
                    ..Default::default()
                },
                timing,
                events.clone(),
            ),
            None,
        );

        let nav = NAV_ITEMS
            .iter()
            .map(|item| {
                push_label(
                    &mut labels,
                    ScrambleText::with_sender(
                        format!("nav:{}", item.to_lowercase()),
                        *item,
                        ScrambleOptions::default(),
                        timing,
                        events.clone(),
                    ),
                    Some("↗"),
                )
            })
            .collect();

        let mut slides = Vec::with_capacity(config.projects.len() + 1);
        let intro_title = push_label(
            &mut labels,
            title_text("intro", &config.showcase.intro_title, true, timing, &events),
            None,
        );
        slides.push(Slide {
            kind: SlideKind::Intro,
            title: intro_title,
            button: None,
            entrance: Entrance::default(),
        });

        for (i, project) in config.projects.iter().enumerate() {
            let title = push_label(
                &mut labels,
                title_text(&format!("project:{}", i), &project.name, false, timing, &events),
                None,
            );
            let button = push_label(
                &mut labels,
                ScrambleText::with_sender(
                    format!("visit:{}", i),
                    "Visit Website",
                    ScrambleOptions::default(),
                    timing,
                    events.clone(),
                ),
                Some("→"),
            );
            slides.push(Slide {
                kind: SlideKind::Project(i),
                title,
                button: Some(button),
                entrance: Entrance::default(),
            });
        }

        Self {
            theme: Theme::from_name(config.theme),
            showcase: config.showcase.clone(),
            projects: config.projects.clone(),
            labels,
            brand,
            nav,
            slides,
            active: 0,
            hover: HoverTracker::default(),
            hit_areas: HitAreas::new(),
            stats: Stats::default(),
            toast: None,
            show_logs: false,
            log_buffer,
            should_quit: false,
            start_time: Instant::now(),
            last_wheel: None,
        }
    }

    /// Mount every label and play the first slide's entrance
    ///
    /// Labels that are already mounted are left alone, so a second call does
    /// not restart their mount sessions.
    pub fn mount(&mut self, now: Instant) {
        for label in self.labels.iter_mut() {
            if !label.text.is_mounted() {
                label.text.mount();
            }
        }
        if let Some(first) = self.slides.first_mut() {
            first.entrance.play(now);
        }
        tracing::info!(
            slides = self.slides.len(),
            labels = self.labels.len(),
            "showcase mounted"
        );
    }

    /// Tear down every label (cancels all timers)
    pub fn unmount_all(&mut self) {
        self.hover.clear();
        for label in self.labels.iter_mut() {
            label.text.unmount();
        }
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.slides.get(self.active)
    }

    pub fn project(&self, slide: &Slide) -> Option<&Project> {
        match slide.kind {
            SlideKind::Intro => None,
            SlideKind::Project(i) => self.projects.get(i),
        }
    }

    /// Snap to slide `index`
    ///
    /// The outgoing slide's title loses its external trigger and its entrance
    /// rewinds; the incoming one gains the trigger (a rising edge, so its
    /// title scrambles) and plays its entrance from the start.
    pub fn activate(&mut self, index: usize, now: Instant) {
        if index >= self.slides.len() || index == self.active {
            return;
        }

        // Content moves under the pointer, so whatever it hovered is gone
        if let Some(change) = self.hover.clear() {
            self.apply_hover(change);
        }

        let previous = self.active;
        self.set_title_trigger(previous, false);
        self.slides[previous].entrance.reverse();

        self.active = index;
        self.set_title_trigger(index, true);
        self.slides[index].entrance.play(now);

        tracing::debug!(from = previous, to = index, "slide activated");
    }

    pub fn next_slide(&mut self, now: Instant) {
        self.activate(self.active + 1, now);
    }

    pub fn prev_slide(&mut self, now: Instant) {
        if let Some(index) = self.active.checked_sub(1) {
            self.activate(index, now);
        }
    }

    /// Wheel scrolling: one slide per notch
    pub fn wheel(&mut self, forward: bool, now: Instant) {
        if let Some(last) = self.last_wheel {
            if now.saturating_duration_since(last) < WHEEL_DEBOUNCE {
                return;
            }
        }
        self.last_wheel = Some(now);
        if forward {
            self.next_slide(now);
        } else {
            self.prev_slide(now);
        }
    }

    /// Scramble the active slide's title again
    pub fn replay(&mut self) {
        let Some(title) = self.active_slide().map(|s| s.title) else {
            return;
        };
        if let Some(label) = self.labels.get_mut(title) {
            label.text.start();
        }
    }

    /// Take the label areas of a finished draw
    ///
    /// A hovered label that was not drawn this time (its slide went away, the
    /// terminal shrank) gets its pointer leave now rather than on the next
    /// mouse move.
    pub fn set_hit_areas(&mut self, hits: HitAreas) {
        self.hit_areas = hits;
        let gone = self
            .hover
            .current()
            .is_some_and(|id| !self.hit_areas.contains(id));
        if gone {
            if let Some(change) = self.hover.clear() {
                self.apply_hover(change);
            }
        }
    }

    /// Pointer moved to `(column, row)`
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let hit = self.hit_areas.hit_test(column, row);
        for change in self.hover.update(hit) {
            self.apply_hover(change);
        }
    }

    /// Left click: a "Visit Website" button opens its project's link
    pub fn click(&mut self, column: u16, row: u16) {
        let hit = self.hit_areas.hit_test(column, row);
        let on_button = self
            .active_slide()
            .and_then(|s| s.button)
            .is_some_and(|button| Some(button) == hit);
        if on_button {
            self.open_website();
        }
    }

    /// Show the active project's website in a toast
    pub fn open_website(&mut self) {
        let message = match self.active_slide().and_then(|s| self.project(s)) {
            Some(Project {
                website: Some(url), ..
            }) => format!("↗ {}", url),
            Some(project) => format!("{} has no website", project.name),
            None => return,
        };
        self.show_toast(message);
    }

    pub fn record_event(&mut self, event: &ScrambleEvent) {
        tracing::trace!(label = event.label(), session = event.session(), "label event");
        self.stats.record(event);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;
        if hours > 0 {
            format!("{}h {:02}m {:02}s", hours, minutes, seconds)
        } else {
            format!("{}m {:02}s", minutes, seconds)
        }
    }

    fn set_title_trigger(&mut self, slide: usize, value: bool) {
        let Some(title) = self.slides.get(slide).map(|s| s.title) else {
            return;
        };
        if let Some(label) = self.labels.get_mut(title) {
            label.text.set_external_trigger(value);
        }
    }

    fn apply_hover(&mut self, change: HoverChange) {
        match change {
            HoverChange::Leave(id) => {
                if let Some(label) = self.labels.get_mut(id) {
                    label.text.pointer_leave();
                }
            }
            HoverChange::Enter(id) => {
                if let Some(label) = self.labels.get_mut(id) {
                    label.text.pointer_enter();
                }
            }
        }
    }
}

/// A slide heading: no hover, scrambles whenever its slide becomes active
fn title_text(
    label: &str,
    text: &str,
    active: bool,
    timing: EffectTiming,
    events: &mpsc::Sender<ScrambleEvent>,
) -> ScrambleText {
    ScrambleText::with_sender(
        label,
        text,
        ScrambleOptions {
            external_trigger: active,
            disable_hover_trigger: true,
            ..Default::default()
        },
        timing,
        events.clone(),
    )
}

fn push_label(labels: &mut Labels, text: ScrambleText, trailing: Option<&'static str>) -> LabelId {
    let mut label = ScrambleLabel::new(labels.next_id(), text);
    if let Some(trailing) = trailing {
        label = label.with_trailing(trailing);
    }
    labels.push(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{FinishReason, Trigger};
    use ratatui::layout::Rect;

    fn app() -> (App, mpsc::Receiver<ScrambleEvent>) {
        let (tx, rx) = mpsc::channel(1024);
        let app = App::new(&Config::default(), LogBuffer::new(), tx);
        (app, rx)
    }

    fn running(app: &App, id: LabelId) -> bool {
        app.labels.get(id).is_some_and(|l| l.text.is_running())
    }

    fn drain(rx: &mut mpsc::Receiver<ScrambleEvent>) -> Vec<ScrambleEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn deck_has_intro_plus_one_slide_per_project() {
        let (app, _rx) = app();
        assert_eq!(app.slides.len(), Config::default().projects.len() + 1);
        assert_eq!(app.slides[0].kind, SlideKind::Intro);
        assert!(app.slides[0].button.is_none());
        assert!(app.slides[1..].iter().all(|s| s.button.is_some()));
        assert_eq!(app.nav.len(), NAV_ITEMS.len());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn mount_starts_brand_and_intro_title() {
        let (mut app, mut rx) = app();
        app.mount(Instant::now());

        assert!(running(&app, app.brand));
        assert!(running(&app, app.slides[0].title));
        assert!(!running(&app, app.slides[1].title));
        assert!(app.slides[0].entrance.is_playing());

        let triggers: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                ScrambleEvent::Started { label, trigger, .. } => Some((label, trigger)),
                _ => None,
            })
            .collect();
        assert!(triggers.contains(&("brand".to_string(), Trigger::Mount)));
        assert!(triggers.contains(&("intro".to_string(), Trigger::External)));
        assert_eq!(triggers.len(), 2);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn activating_a_slide_moves_the_trigger() {
        let (mut app, mut rx) = app();
        let now = Instant::now();
        app.mount(now);
        tokio::time::sleep(Duration::from_secs(5)).await;
        drain(&mut rx);

        app.next_slide(now);
        assert_eq!(app.active, 1);
        assert!(running(&app, app.slides[1].title));
        assert!(!app.slides[0].entrance.is_playing());
        assert!(app.slides[1].entrance.is_playing());

        let started: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, ScrambleEvent::Started { .. }))
            .collect();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].label(), "project:0");

        // Going back is a fresh rising edge for the intro title
        app.prev_slide(now);
        assert_eq!(app.active, 0);
        assert!(running(&app, app.slides[0].title));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn navigation_clamps_at_both_ends() {
        let (mut app, _rx) = app();
        let now = Instant::now();
        app.mount(now);

        app.prev_slide(now);
        assert_eq!(app.active, 0);

        for _ in 0..app.slides.len() + 2 {
            app.next_slide(now);
        }
        assert_eq!(app.active, app.slides.len() - 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn wheel_bursts_move_one_slide() {
        let (mut app, _rx) = app();
        let now = Instant::now();
        app.mount(now);

        app.wheel(true, now);
        app.wheel(true, now + Duration::from_millis(20));
        app.wheel(true, now + Duration::from_millis(40));
        assert_eq!(app.active, 1);

        app.wheel(true, now + Duration::from_millis(400));
        assert_eq!(app.active, 2);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn hover_enters_and_leaves_nav_labels() {
        let (mut app, mut rx) = app();
        app.mount(Instant::now());
        tokio::time::sleep(Duration::from_secs(5)).await;
        drain(&mut rx);

        let blog = app.nav[1];
        app.hit_areas.register(blog, Rect::new(10, 1, 7, 1));

        app.pointer_moved(12, 1);
        assert!(running(&app, blog));
        assert!(app.labels.get(blog).is_some_and(|l| l.text.is_hovered()));

        app.pointer_moved(40, 1);
        assert!(!running(&app, blog));
        assert_eq!(app.labels.get(blog).map(|l| l.text.display()), Some("Blog".to_string()));

        let reasons: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                ScrambleEvent::Finished { reason, .. } => Some(reason),
                _ => None,
            })
            .collect();
        assert_eq!(reasons, vec![FinishReason::PointerLeave]);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn hovered_label_missing_from_next_draw_is_left() {
        let (mut app, mut rx) = app();
        app.mount(Instant::now());
        tokio::time::sleep(Duration::from_secs(5)).await;
        drain(&mut rx);

        let contact = app.nav[2];
        let mut hits = HitAreas::new();
        hits.register(contact, Rect::new(20, 1, 10, 1));
        app.set_hit_areas(hits.clone());
        app.pointer_moved(22, 1);
        assert!(running(&app, contact));

        // Still drawn: hover survives the redraw
        app.set_hit_areas(hits);
        assert!(app.labels.get(contact).is_some_and(|l| l.text.is_hovered()));

        app.set_hit_areas(HitAreas::new());
        assert!(!running(&app, contact));
        assert!(!app.labels.get(contact).is_some_and(|l| l.text.is_hovered()));
        assert_eq!(app.hover.current(), None);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn mounting_twice_does_not_restart_labels() {
        let (mut app, mut rx) = app();
        let now = Instant::now();
        app.mount(now);
        drain(&mut rx);

        app.mount(now);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn website_toast_for_project_slides_only() {
        let (mut app, _rx) = app();
        let now = Instant::now();
        app.mount(now);

        app.open_website();
        assert!(app.toast.is_none(), "intro slide has no website");

        app.next_slide(now);
        app.open_website();
        let message = app.toast.as_ref().map(|t| t.message.clone()).unwrap_or_default();
        match &app.projects[0].website {
            Some(url) => assert!(message.contains(url.as_str())),
            None => assert!(message.contains("no website")),
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn unmount_all_cancels_every_session() {
        let (mut app, _rx) = app();
        app.mount(Instant::now());
        assert!(app.labels.running() > 0);

        app.unmount_all();
        assert_eq!(app.labels.running(), 0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn events_fold_into_stats() {
        let (mut app, mut rx) = app();
        app.mount(Instant::now());
        tokio::time::sleep(Duration::from_secs(5)).await;

        for event in drain(&mut rx) {
            app.record_event(&event);
        }
        assert_eq!(app.stats.sessions_started, 2);
        assert_eq!(app.stats.sessions_completed, 2);
        assert_eq!(app.stats.in_flight(), 0);
        assert!(app.stats.frames_rendered > 0);
    }
}
