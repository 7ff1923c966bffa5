//! Logs panel component
//!
//! Shows the most recent entries of the in-memory log buffer, color-coded by
//! level. Toggled with `L`; always follows the newest entry.

use crate::logging::LogEntry;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// One log line: time, level, message
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Render the tail of `entries` that fits in `area`
pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
    let rows = area.height.saturating_sub(2) as usize;
    let skip = entries.len().saturating_sub(rows);

    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|entry| ListItem::new(format_log_entry(entry)).style(theme.log_level(entry.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Logs ({}) ", entries.len())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use chrono::{TimeZone, Utc};

    #[test]
    fn entry_format_is_time_level_message() {
        let entry = LogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 13, 4, 5).unwrap(),
            level: LogLevel::Warn,
            target: "scrambler::tui".to_string(),
            message: "no website".to_string(),
        };
        assert_eq!(format_log_entry(&entry), "13:04:05 WARN  no website");
    }
}
