//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, Project};
use serde::Serialize;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[derive(Serialize)]
struct ProjectsDoc<'a> {
    projects: &'a [Project],
}

impl Config {
    /// Top-level `projects = []` for an empty deck
    ///
    /// It must precede the first table header, and a file without any
    /// projects key would fall back to the bundled samples.
    fn empty_projects_key(&self) -> &'static str {
        if self.projects.is_empty() {
            "\n# No project slides (delete this line for the bundled samples)\nprojects = []\n"
        } else {
            ""
        }
    }

    /// Serialize the [[projects]] array of tables
    pub(super) fn projects_to_toml(&self) -> String {
        if self.projects.is_empty() {
            return r#"
# [[projects]]
# name = "Project Name"
# client = "Client"
# description = "One or two sentences."
# services = ["Design", "Development"]
# website = "https://example.com"
"#
            .to_string();
        }

        match toml::to_string(&ProjectsDoc {
            projects: &self.projects,
        }) {
            Ok(body) => format!("\n{}", body),
            Err(e) => {
                tracing::warn!("Could not serialize projects: {}", e);
                String::new()
            }
        }
    }

    /// Render the whole config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# scrambler configuration
#
# Precedence: environment variables > this file > built-in defaults

# Color palette: "dark" or "light" (env: SCRAMBLER_THEME)
theme = {theme}
{empty_projects}
# ─────────────────────────────────────────────────────────────────────────────
# Scramble effect timing
# ─────────────────────────────────────────────────────────────────────────────
[effect]
# Milliseconds between ticks (env: SCRAMBLER_TICK_INTERVAL_MS)
tick_interval_ms = {tick_interval_ms}
# Ticks each character stays scrambled before locking (env: SCRAMBLER_TICKS_PER_CHAR)
ticks_per_char = {ticks_per_char}

# ─────────────────────────────────────────────────────────────────────────────
# Logging (RUST_LOG overrides level)
# ─────────────────────────────────────────────────────────────────────────────
[logging]
level = {level}
file_enabled = {file_enabled}
file_dir = {file_dir}
# "hourly", "daily" or "never"
file_rotation = {file_rotation}
file_prefix = {file_prefix}

# ─────────────────────────────────────────────────────────────────────────────
# Showcase copy
# ─────────────────────────────────────────────────────────────────────────────
[showcase]
intro_title = {intro_title}
intro_text = {intro_text}
scroll_hint = {scroll_hint}
outro_hint = {outro_hint}

# ─────────────────────────────────────────────────────────────────────────────
# Project slides (in display order)
# ─────────────────────────────────────────────────────────────────────────────
{projects}"#,
            theme = quoted(self.theme.as_str()),
            empty_projects = self.empty_projects_key(),
            tick_interval_ms = self.effect.tick_interval_ms,
            ticks_per_char = self.effect.ticks_per_char,
            level = quoted(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = quoted(&self.logging.file_dir.display().to_string()),
            file_rotation = quoted(self.logging.file_rotation.as_str()),
            file_prefix = quoted(&self.logging.file_prefix),
            intro_title = quoted(&self.showcase.intro_title),
            intro_text = quoted(&self.showcase.intro_text),
            scroll_hint = quoted(&self.showcase.scroll_hint),
            outro_hint = quoted(&self.showcase.outro_hint),
            projects = self.projects_to_toml(),
        )
    }
}
