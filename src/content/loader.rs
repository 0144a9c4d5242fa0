//! Content loader - loads articles from the source directory

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Article, FrontMatter};
use crate::Folio;

/// File names that document the articles directory rather than being articles
const RESERVED_SOURCES: &[&str] = &["README.md"];

/// Raw text of one article file
#[derive(Debug, Clone)]
pub struct ArticleSource {
    /// Source name, usually the path relative to the source directory
    pub id: String,
    pub raw: String,
}

impl ArticleSource {
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw: raw.into(),
        }
    }

    fn is_reserved(&self) -> bool {
        let name = self.id.rsplit(['/', '\\']).next().unwrap_or(&self.id);
        RESERVED_SOURCES
            .iter()
            .any(|reserved| name.eq_ignore_ascii_case(reserved))
    }
}

/// Parse, filter and order a set of article sources.
///
/// Drafts and reserved files are dropped, the rest is ordered newest first.
/// The sort is stable, so equal timestamps keep encounter order. A slug that
/// is already taken by an earlier (newer) article drops the later one.
pub fn load_all<I>(sources: I) -> Vec<Article>
where
    I: IntoIterator<Item = ArticleSource>,
{
    let mut articles: Vec<Article> = sources
        .into_iter()
        .filter_map(|source| {
            if source.is_reserved() {
                tracing::debug!("Skipping reserved file {}", source.id);
                return None;
            }

            let (fm, body) = FrontMatter::parse(&source.raw);
            if fm.flag("draft") == Some(true) {
                tracing::debug!("Skipping draft {}", source.id);
                return None;
            }

            Some(Article::normalize(&source.id, &fm, body))
        })
        .collect();

    // Sort by date descending (newest first)
    articles.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp()));

    let mut seen = HashSet::new();
    articles.retain(|article| {
        let fresh = seen.insert(article.slug().to_string());
        if !fresh {
            tracing::warn!(
                "Duplicate slug {:?}, dropping older article {:?}",
                article.slug(),
                article.title()
            );
        }
        fresh
    });

    articles
}

/// The published articles, loaded once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct Library {
    articles: Vec<Article>,
}

impl Library {
    /// Build the library from raw sources
    pub fn load<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = ArticleSource>,
    {
        Self {
            articles: load_all(sources),
        }
    }

    /// Articles, newest first
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Look up an article by its exact slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug() == slug)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Read every article source from the articles directory
    pub fn read_sources(&self) -> Vec<ArticleSource> {
        let articles_dir = self.folio.articles_dir();
        if !articles_dir.exists() {
            tracing::debug!("No articles directory at {:?}", articles_dir);
            return Vec::new();
        }

        let mut sources = Vec::new();

        for entry in WalkDir::new(&articles_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(raw) => {
                    let id = path
                        .strip_prefix(&self.folio.source_dir)
                        .unwrap_or(path)
                        .to_string_lossy()
                        .to_string();
                    sources.push(ArticleSource::new(id, raw));
                }
                Err(e) => {
                    tracing::warn!("Failed to read article {:?}: {}", path, e);
                }
            }
        }

        sources
    }

    /// Load all published articles
    pub fn load_library(&self) -> Library {
        let library = Library::load(self.read_sources());
        tracing::debug!("Loaded {} articles", library.len());
        library
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}
