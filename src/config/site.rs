//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    /// Articles directory, relative to `source_dir`
    pub articles_dir: String,
    /// Catalogue file, relative to `source_dir`
    pub data_file: String,
    /// Static assets copied verbatim, relative to `source_dir`
    pub static_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Contact form
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            articles_dir: "articles".to_string(),
            data_file: "_data/portfolio.yml".to_string(),
            static_dir: "static".to_string(),

            highlight: HighlightConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a syntect default theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Contact form relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Relay endpoint receiving the JSON payload; empty disables the form
    pub endpoint: String,
    pub subject: String,
    pub heading: String,
    pub subtext: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            subject: crate::contact::DEFAULT_SUBJECT.to_string(),
            heading: "Thoughts?".to_string(),
            subtext: "Drop me a note. I read every one.".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn is_enabled(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.source_dir, "source");
        assert_eq!(config.articles_dir, "articles");
        assert!(!config.contact.is_enabled());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Swayam Gupta
url: https://swayam.example
contact:
  endpoint: https://formsubmit.co/ajax/me@example.com
highlight:
  line_number: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Swayam Gupta");
        assert_eq!(config.root, "/");
        assert!(config.contact.is_enabled());
        assert_eq!(config.contact.heading, "Thoughts?");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }
}
