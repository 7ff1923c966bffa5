// UI rendering
//
// One draw pass: shell components around the active slide, then overlays.
// Label areas are collected into a fresh HitAreas and handed back to the app
// so the next mouse event is hit-tested against what is actually on screen.

use super::app::App;
use super::components::{logs_panel, slide, status_bar, title_bar};
use super::hover::HitAreas;
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};
use std::time::Instant;

/// Height of the logs panel when shown
const LOGS_HEIGHT: u16 = 8;

pub fn draw(f: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let area = f.area();
    let mut hits = HitAreas::new();

    let background = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(background, area);

    let logs_height = if app.show_logs { LOGS_HEIGHT } else { 0 };
    let [title, body, logs, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(logs_height),
        Constraint::Length(2),
    ])
    .areas(area);

    title_bar::render(f, title, app, &mut hits);
    if let Some(active) = app.active_slide() {
        slide::render(f, body, app, active, now, &mut hits);
    }
    if app.show_logs {
        let entries = app.log_buffer.tail(logs.height as usize);
        logs_panel::render(f, logs, &entries, &app.theme);
    }
    status_bar::render(f, status, app);

    if let Some(toast) = &app.toast {
        toast.render(f, area, &app.theme);
    }

    app.set_hit_areas(hits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    #[test]
    fn draw_records_nav_hit_areas() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = App::new(&Config::default(), LogBuffer::new(), tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        for id in &app.nav {
            assert!(app.hit_areas.contains(*id));
        }
        assert!(!app.hit_areas.contains(app.brand), "brand ignores hover");
    }

    #[test]
    fn logs_panel_only_when_toggled() {
        let (tx, _rx) = mpsc::channel(16);
        let buffer = LogBuffer::new();
        let mut app = App::new(&Config::default(), buffer, tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        let has_logs = |terminal: &Terminal<TestBackend>| {
            let buffer = terminal.backend().buffer();
            (0..buffer.area.height).any(|y| {
                let row: String = (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect();
                row.contains(" Logs (")
            })
        };

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(!has_logs(&terminal));

        app.toggle_logs();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(has_logs(&terminal));
    }
}
