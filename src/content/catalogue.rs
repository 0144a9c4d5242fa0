//! Static portfolio data (_data/portfolio.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::helpers::is_url_safe;

/// Owner of the site, shown in the brand link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub name: String,
    pub role: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            role: "Engineer".to_string(),
        }
    }
}

/// Landing hero on the home page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub label: String,
    pub headline: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactLink {
    pub label: String,
    pub value: String,
    pub href: String,
}

/// A project, portfolio piece or interest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionItem {
    /// Unique within the parent section only
    pub slug: String,
    pub title: String,
    pub meta: String,
    pub summary: String,
    /// Paragraphs of the detail page
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub intro: String,
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn find_item(&self, slug: &str) -> Option<&SectionItem> {
        self.items.iter().find(|item| item.slug == slug)
    }
}

/// Everything on the site that is not an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalogue {
    pub site: SiteMeta,
    pub hero: Hero,
    pub sections: Vec<Section>,
    pub contact: Vec<ContactLink>,
}

impl Catalogue {
    /// Load the catalogue from a YAML file; a missing file gives the default
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No catalogue at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut catalogue: Catalogue = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse catalogue {:?}", path))?;
        catalogue.retain_routable();
        Ok(catalogue)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Look up an item by slug within one section
    pub fn find_item(&self, section_id: &str, slug: &str) -> Option<&SectionItem> {
        self.section(section_id)?.find_item(slug)
    }

    /// Drop sections and items that cannot have a page of their own.
    ///
    /// Ids and slugs become path segments, so they must be URL-safe; within
    /// the catalogue the first section with an id, and the first item with
    /// a slug in its section, wins.
    pub fn retain_routable(&mut self) {
        let mut ids = HashSet::new();
        self.sections.retain(|section| {
            if !is_url_safe(&section.id) {
                tracing::warn!("Skipping section with unusable id {:?}", section.id);
                return false;
            }
            if !ids.insert(section.id.clone()) {
                tracing::warn!("Skipping duplicate section id {:?}", section.id);
                return false;
            }
            true
        });

        for section in &mut self.sections {
            let mut slugs = HashSet::new();
            let section_id = section.id.as_str();
            section.items.retain(|item| {
                if !is_url_safe(&item.slug) {
                    tracing::warn!(
                        "Skipping item with unusable slug {:?} in section {:?}",
                        item.slug,
                        section_id
                    );
                    return false;
                }
                if !slugs.insert(item.slug.clone()) {
                    tracing::warn!(
                        "Skipping duplicate slug {:?} in section {:?}",
                        item.slug,
                        section_id
                    );
                    return false;
                }
                true
            });
        }
    }
}
