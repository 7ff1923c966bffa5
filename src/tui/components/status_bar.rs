// Status bar component
//
// Renders statistics at the bottom: uptime, slide position, scramble sessions.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Format a number compactly with K/M suffixes
fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        n.to_string()
    }
}

/// The status line for `app` at `width` columns
pub fn status_text(app: &App, width: u16) -> String {
    let stats = &app.stats;
    let slide = format!("{}/{}", app.active + 1, app.slides.len());

    if !Breakpoint::from_width(width).at_least(Breakpoint::Wide) {
        format!(
            " {} │ {} │ ▶ {} │ ✓ {:.0}% │ {}f │ L logs  q quit",
            app.uptime(),
            slide,
            app.labels.running(),
            stats.completion_rate(),
            format_compact_number(stats.frames_rendered),
        )
    } else {
        let triggers = &stats.by_trigger;
        format!(
            " {} │ slide {} │ ▶ {} running │ {} sessions (mount {} · trigger {} · hover {} · manual {}) │ ✓ {:.1}% │ {} frames │ ←→ slides  r replay  ⏎ visit  L logs  q quit",
            app.uptime(),
            slide,
            app.labels.running(),
            stats.sessions_started,
            triggers.mount,
            triggers.external,
            triggers.pointer,
            triggers.manual,
            stats.completion_rate(),
            format_compact_number(stats.frames_rendered),
        )
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(status_text(app, area.width))
        .style(Style::default().fg(app.theme.muted))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(app.theme.border)),
        );

    f.render_widget(status, area);
}
