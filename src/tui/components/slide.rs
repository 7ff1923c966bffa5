// Slide component
//
// Renders one snap position of the deck: the intro copy or a project with
// its image reveal, copy, service tags and "Visit Website" button. Every
// element reads its visibility from the slide's entrance timeline.

use crate::config::Project;
use crate::tui::app::{App, Slide, SlideKind};
use crate::tui::entrance::{bounce_offset, travel, Element};
use crate::tui::hover::HitAreas;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Hint on every project slide but the last
const NEXT_HINT: &str = "Scroll for next project";

/// Rows reserved for the bouncing scroll indicator
const INDICATOR_ROWS: u16 = 2;

/// Rows the intro title rises while it fades in
const INTRO_RISE: u16 = 1;

/// Columns the scroll indicator slides in from the left
const INDICATOR_SLIDE: u16 = 4;

pub fn render(f: &mut Frame, area: Rect, app: &App, slide: &Slide, now: Instant, hits: &mut HitAreas) {
    let bp = Breakpoint::from_width(area.width);
    let pad = bp.slide_padding();
    let area = Rect {
        x: area.x.saturating_add(pad),
        width: area.width.saturating_sub(pad * 2),
        ..area
    };
    let [body, indicator] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(INDICATOR_ROWS)]).areas(area);

    match slide.kind {
        SlideKind::Intro => render_intro(f, body, app, slide, now, hits),
        SlideKind::Project(i) => {
            if let Some(project) = app.projects.get(i) {
                render_project(f, body, bp, app, project, slide, now, hits);
            }
        }
    }

    // Only the intro choreographs its indicator; project slides show it settled
    let indicator_progress = match slide.kind {
        SlideKind::Intro => slide.entrance.progress(Element::Indicator, now),
        SlideKind::Project(_) => 1.0,
    };
    render_indicator(f, indicator, app, indicator_progress, now);
}

fn render_intro(
    f: &mut Frame,
    area: Rect,
    app: &App,
    slide: &Slide,
    now: Instant,
    hits: &mut HitAreas,
) {
    let theme = &app.theme;
    let [_, title, rise, text, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(INTRO_RISE),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let title_progress = slide.entrance.progress(Element::IntroTitle, now);
    if title_progress > 0.0 {
        if let Some(label) = app.labels.get(slide.title) {
            let style = Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD);
            let row = Rect {
                y: title.y + travel(title_progress, rise.height),
                ..title
            };
            label.render(
                f,
                centered(row, label.width()),
                theme.entering(style, title_progress),
                hits,
            );
        }
    }

    let text_progress = slide.entrance.progress(Element::IntroText, now);
    if text_progress > 0.0 {
        f.render_widget(
            Paragraph::new(app.showcase.intro_text.as_str())
                .style(theme.entering(Style::default().fg(theme.muted), text_progress))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            text,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn render_project(
    f: &mut Frame,
    area: Rect,
    bp: Breakpoint,
    app: &App,
    project: &Project,
    slide: &Slide,
    now: Instant,
    hits: &mut HitAreas,
) {
    let [image, _, content] = if bp.stacks_slides() {
        Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area)
    } else {
        Layout::horizontal([
            Constraint::Percentage(50),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .areas(area)
    };

    render_image(f, image, app, project, slide.entrance.progress(Element::Image, now));
    render_copy(f, content, app, project, slide, now, hits);
}

/// Left-to-right wipe that widens with `progress`
fn render_image(f: &mut Frame, area: Rect, app: &App, project: &Project, progress: f32) {
    if progress <= 0.0 {
        return;
    }
    let theme = &app.theme;
    let frame = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.entering(Style::default().fg(theme.border), progress));
    let inner = frame.inner(area);
    f.render_widget(frame, area);

    let revealed = Rect {
        width: (inner.width as f32 * progress).round() as u16,
        ..inner
    };
    f.render_widget(
        Block::default().style(Style::default().bg(theme.image_fill)),
        revealed,
    );

    if progress >= 1.0 && inner.height > 0 {
        let caption = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        f.render_widget(
            Paragraph::new(project.client.as_str())
                .style(Style::default().fg(theme.muted).bg(theme.image_fill))
                .alignment(Alignment::Center),
            caption,
        );
    }
}

fn render_copy(
    f: &mut Frame,
    area: Rect,
    app: &App,
    project: &Project,
    slide: &Slide,
    now: Instant,
    hits: &mut HitAreas,
) {
    let theme = &app.theme;
    let [client, title, _, description, tags, _, button] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let progress = |element| slide.entrance.progress(element, now);

    let title_progress = progress(Element::Title);
    if title_progress > 0.0 {
        f.render_widget(
            Paragraph::new(project.client.as_str())
                .style(theme.entering(Style::default().fg(theme.muted), title_progress)),
            client,
        );
        if let Some(label) = app.labels.get(slide.title) {
            let style = Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD);
            label.render(f, title, theme.entering(style, title_progress), hits);
        }
    }

    let description_progress = progress(Element::Description);
    if description_progress > 0.0 {
        f.render_widget(
            Paragraph::new(project.description.as_str())
                .style(theme.entering(Style::default().fg(theme.foreground), description_progress))
                .wrap(Wrap { trim: true }),
            description,
        );
    }

    let chips: Vec<Span> = project
        .services
        .iter()
        .enumerate()
        .filter_map(|(i, service)| {
            let p = progress(Element::Tag(i));
            (p > 0.0).then(|| {
                let style = theme.entering(Style::default().fg(theme.muted), p);
                [
                    Span::styled(format!("[{}]", service), style),
                    Span::raw(" "),
                ]
            })
        })
        .flatten()
        .collect();
    f.render_widget(Paragraph::new(Line::from(chips)), tags);

    let button_progress = progress(Element::Button);
    if button_progress > 0.0 {
        if let Some(label) = slide.button.and_then(|id| app.labels.get(id)) {
            let mut style = Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::UNDERLINED);
            if label.text.is_hovered() {
                style = style.fg(theme.highlight).add_modifier(Modifier::BOLD);
            }
            label.render(f, button, theme.entering(style, button_progress), hits);
        }
    }
}

/// Hint under the active slide
pub fn indicator_hint(app: &App) -> &str {
    match app.active_slide().map(|s| s.kind) {
        Some(SlideKind::Intro) | None => app.showcase.scroll_hint.as_str(),
        Some(SlideKind::Project(_)) if app.active + 1 >= app.slides.len() => {
            app.showcase.outro_hint.as_str()
        }
        Some(SlideKind::Project(_)) => NEXT_HINT,
    }
}

fn render_indicator(f: &mut Frame, area: Rect, app: &App, progress: f32, now: Instant) {
    if area.height == 0 || progress <= 0.0 {
        return;
    }
    let offset = bounce_offset(now.saturating_duration_since(app.start_time)).min(area.height - 1);
    let shift = travel(progress, INDICATOR_SLIDE).min(area.x);
    let row = Rect {
        x: area.x - shift,
        y: area.y + offset,
        height: 1,
        ..area
    };
    f.render_widget(
        Paragraph::new(format!("{}  ↓", indicator_hint(app)))
            .style(app.theme.entering(Style::default().fg(app.theme.muted), progress))
            .alignment(Alignment::Center),
        row,
    );
}

/// A `width`-wide strip horizontally centered in `area`
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
