// Title bar component
//
// Brand label on the left, a dot per slide in the middle and the navigation
// labels (hover to scramble) on the right.

use super::scramble_label::ScrambleLabel;
use crate::tui::app::App;
use crate::tui::hover::HitAreas;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Columns between two navigation labels
const NAV_GAP: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, app: &App, hits: &mut HitAreas) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let row = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        height: inner.height.min(1),
        ..inner
    };

    let dots: Vec<Span> = (0..app.slides.len())
        .map(|i| {
            if i == app.active {
                Span::styled("● ", Style::default().fg(theme.highlight))
            } else {
                Span::styled("○ ", Style::default().fg(theme.muted))
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        row,
    );

    // Labels draw after the centered dots so they win any overlap
    if let Some(brand) = app.labels.get(app.brand) {
        let style = Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD);
        brand.render(f, row, style, hits);
    }

    let nav: Vec<&ScrambleLabel> = app.nav.iter().filter_map(|id| app.labels.get(*id)).collect();
    let mut x = row.right();
    for label in nav.iter().rev() {
        let width = label.width();
        let Some(start) = x.checked_sub(width) else {
            break;
        };
        if start < row.x {
            break;
        }
        let style = if label.text.is_hovered() {
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        label.render(f, Rect { x: start, width, ..row }, style, hits);
        x = start.saturating_sub(NAV_GAP);
    }
}
