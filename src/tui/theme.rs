// Theme system for the TUI
//
// Two palettes: near-black on off-white and the reverse. Every component
// reads colors from here instead of hard-coding them.

use crate::config::ThemeName;
use crate::logging::LogLevel;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    /// Secondary copy (client names, hints, tags)
    pub muted: Color,
    /// Hovered labels, active slide dot, toast border
    pub highlight: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Image reveal placeholder
    pub image_fill: Color,

    // Log level colors
    pub error: Color,
    pub warn: Color,
    pub info: Color,
    pub debug: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            background: Color::Rgb(0x12, 0x12, 0x12),
            foreground: Color::Rgb(0xF5, 0xF5, 0xF5),
            muted: Color::Rgb(0x9A, 0x9A, 0x9A),
            highlight: Color::Rgb(0xFF, 0xFF, 0xFF),
            border: Color::Rgb(0x4A, 0x4A, 0x4A),
            border_type: BorderType::Rounded,
            image_fill: Color::Rgb(0x2A, 0x2A, 0x2A),
            error: Color::Rgb(0xF2, 0x6D, 0x6D),
            warn: Color::Rgb(0xE8, 0xC1, 0x5A),
            info: Color::Rgb(0x7F, 0xC8, 0xA9),
            debug: Color::Rgb(0x8A, 0x9B, 0xD6),
        }
    }

    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            background: Color::Rgb(0xF5, 0xF5, 0xF5),
            foreground: Color::Rgb(0x12, 0x12, 0x12),
            muted: Color::Rgb(0x60, 0x60, 0x60),
            highlight: Color::Rgb(0x00, 0x00, 0x00),
            border: Color::Rgb(0xC4, 0xC4, 0xC4),
            border_type: BorderType::Rounded,
            image_fill: Color::Rgb(0xDD, 0xDD, 0xDD),
            error: Color::Rgb(0xB3, 0x26, 0x1E),
            warn: Color::Rgb(0x9A, 0x6A, 0x00),
            info: Color::Rgb(0x1F, 0x7A, 0x4D),
            debug: Color::Rgb(0x3A, 0x4F, 0x9C),
        }
    }

    /// Style for an element partway through its entrance
    ///
    /// Hidden elements are not rendered at all; this only dims the ones
    /// still fading in.
    pub fn entering(&self, base: Style, progress: f32) -> Style {
        if progress < 1.0 {
            base.add_modifier(Modifier::DIM)
        } else {
            base
        }
    }

    pub fn log_level(&self, level: LogLevel) -> Style {
        let fg = match level {
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warn,
            LogLevel::Info => self.info,
            LogLevel::Debug | LogLevel::Trace => self.debug,
        };
        Style::default().fg(fg)
    }
}
