//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a fixed duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// A toast notification that auto-dismisses
pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    /// Area of the toast inside `area`: bottom-right, 2 cells from the edges
    fn placement(&self, area: Rect) -> Rect {
        // 2 columns of padding and a border on each side
        let width = (self.message.width() as u16)
            .saturating_add(4)
            .min(area.width.saturating_sub(4));
        let height = 3;
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        Rect::new(x, y, width, height).intersection(area)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let toast_area = self.placement(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        // Clear first so the toast sits on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
