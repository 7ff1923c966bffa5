//! Showcase content: intro slide copy and the project list

use serde::{Deserialize, Serialize};

/// Copy shown around the project slides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    pub intro_title: String,
    pub intro_text: String,
    /// Hint on the intro slide
    pub scroll_hint: String,
    /// Hint on the last project slide
    pub outro_hint: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            intro_title: "Projects".to_string(),
            intro_text: "Explore our portfolio of innovative digital solutions and creative endeavors."
                .to_string(),
            scroll_hint: "Scroll to explore".to_string(),
            outro_hint: "Scroll to blog".to_string(),
        }
    }
}

/// Showcase settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileShowcase {
    pub intro_title: Option<String>,
    pub intro_text: Option<String>,
    pub scroll_hint: Option<String>,
    pub outro_hint: Option<String>,
}

impl ShowcaseConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileShowcase>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            intro_title: file.intro_title.unwrap_or(defaults.intro_title),
            intro_text: file.intro_text.unwrap_or(defaults.intro_text),
            scroll_hint: file.scroll_hint.unwrap_or(defaults.scroll_hint),
            outro_hint: file.outro_hint.unwrap_or(defaults.outro_hint),
        }
    }
}

/// One `[[projects]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Projects shown when the config file lists none
pub(crate) fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            name: "Tidewater Atlas".to_string(),
            client: "Harbor & Co.".to_string(),
            description: "An interactive map of coastal restoration sites with live sensor data."
                .to_string(),
            services: vec![
                "Web Design".to_string(),
                "Data Visualization".to_string(),
                "Development".to_string(),
            ],
            website: Some("https://example.com/tidewater".to_string()),
        },
        Project {
            name: "Northbound Coffee".to_string(),
            client: "Northbound Roasters".to_string(),
            description: "Brand refresh and subscription storefront for a specialty roaster."
                .to_string(),
            services: vec!["Branding".to_string(), "E-commerce".to_string()],
            website: Some("https://example.com/northbound".to_string()),
        },
        Project {
            name: "Pulse Studio".to_string(),
            client: "Pulse Fitness".to_string(),
            description: "Class booking platform with scroll-driven storytelling for each program."
                .to_string(),
            services: vec![
                "UX Research".to_string(),
                "Motion Design".to_string(),
                "Development".to_string(),
            ],
            website: None,
        },
    ]
}
