//! folio: a static generator for personal portfolio and article sites
//!
//! Articles are Markdown files with a small `key: value` header; projects,
//! portfolio pieces and interests come from one YAML catalogue. The
//! generator renders them with embedded Tera templates into a fixed set of
//! routes.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod routes;
pub mod server;
pub mod site;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use site::Site;

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Directory holding the article sources
    pub fn articles_dir(&self) -> PathBuf {
        self.source_dir.join(&self.config.articles_dir)
    }

    /// Path of the portfolio catalogue
    pub fn data_file(&self) -> PathBuf {
        self.source_dir.join(&self.config.data_file)
    }

    /// Directory of static assets copied as-is
    pub fn static_dir(&self) -> PathBuf {
        self.source_dir.join(&self.config.static_dir)
    }

    /// Load the site content
    pub fn load_site(&self) -> Result<Site> {
        Site::load(self)
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new article
    pub fn new_article(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_article(self, title, slug)
    }
}
