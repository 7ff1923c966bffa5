//! Configuration for the scrambler showcase
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/scrambler/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod effect;
mod observability;
mod serialization;
mod showcase;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use effect::{EffectConfig, FileEffect};
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use showcase::{FileShowcase, Project, ShowcaseConfig};

use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Theme selection
// ─────────────────────────────────────────────────────────────────────────────

/// Which of the two bundled palettes to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    /// Parse theme name from config, falling back to dark
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Color palette for the TUI
    pub theme: ThemeName,

    /// Scramble timing shared by every label
    pub effect: EffectConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Intro slide copy and scroll hints
    pub showcase: ShowcaseConfig,

    /// Project slides, in display order
    pub projects: Vec<Project>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            effect: EffectConfig::default(),
            logging: LoggingConfig::default(),
            showcase: ShowcaseConfig::default(),
            projects: showcase::sample_projects(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (every key optional)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,

    /// Optional [effect] section
    pub effect: Option<FileEffect>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [showcase] section
    pub showcase: Option<FileShowcase>,

    /// Optional [[projects]] array; absent means the bundled samples
    pub projects: Option<Vec<Project>>,
}

impl FileConfig {
    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/scrambler/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("scrambler").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but does not parse is fatal: the user gets
    /// a clear error instead of silently running on defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match FileConfig::parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - [[projects]] entries missing `name`");
                    eprintln!("    - Numbers written as strings in [effect]\n");
                    eprintln!("  To reset, run `scrambler config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env("SCRAMBLER_THEME")
            .or(file.theme)
            .map(|s| ThemeName::from_str(&s))
            .unwrap_or_default();

        // Effect timing: per-key env override on top of the [effect] section
        let mut effect = EffectConfig::from_file(file.effect);
        if let Some(ms) = env("SCRAMBLER_TICK_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            effect.tick_interval_ms = ms;
        }
        if let Some(ticks) = env("SCRAMBLER_TICKS_PER_CHAR").and_then(|v| v.parse().ok()) {
            effect.ticks_per_char = ticks;
        }
        let effect = effect.clamped();

        let logging = LoggingConfig::from_file(file.logging);
        let showcase = ShowcaseConfig::from_file(file.showcase);
        let projects = file.projects.unwrap_or_else(showcase::sample_projects);

        Self {
            theme,
            effect,
            logging,
            showcase,
            projects,
        }
    }
}
