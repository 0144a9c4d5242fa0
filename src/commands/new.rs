//! Create a new article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Create a new article source and return its path.
///
/// The file name is the slug, derived from the title unless given.
pub fn create_article(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}, pass --slug", title);
    }

    let target_dir = folio.articles_dir();
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        r#"---
title: {}
date: {}
readTime:
summary:
tags:
---
"#,
        title,
        now.format("%b %d, %Y")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_create_article() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let path = create_article(&folio, "Latency Budgeting for Voice", None).unwrap();
        assert_eq!(
            path,
            folio.articles_dir().join("latency-budgeting-for-voice.md")
        );

        let site = Site::load(&folio).unwrap();
        let article = site.find_article("latency-budgeting-for-voice").unwrap();
        assert_eq!(article.title(), "Latency Budgeting for Voice");
        assert!(article.sort_timestamp() > 0);
    }

    #[test]
    fn test_create_article_with_slug() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let path = create_article(&folio, "Anything", Some("custom-id")).unwrap();
        assert!(path.ends_with("custom-id.md"));
        assert!(create_article(&folio, "Again", Some("custom-id")).is_err());
    }

    #[test]
    fn test_create_article_needs_a_slug() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(create_article(&folio, "!!!", None).is_err());
    }
}
