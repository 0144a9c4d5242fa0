//! Article model

use serde::Serialize;
use std::path::Path;

use super::frontmatter::{parse_timestamp, FrontMatter};
use crate::helpers::is_url_safe;

/// Slug used when neither the metadata nor the file name yields one
const FALLBACK_SLUG: &str = "article";

/// A published article, normalized from its source file.
///
/// Every text field defaults to an empty string; `slug` and `title` fall
/// back to the slug derived from the source name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    slug: String,
    title: String,
    /// Free-form display date
    date: String,
    read_time: String,
    summary: String,
    subtitle: String,
    cover_image: String,
    hero_label: String,
    author_name: String,
    author_meta: String,
    /// Comma-separated tag list
    tags: String,
    /// Off-site location; such articles are not rendered in place
    external_url: String,
    /// Markdown source
    body: String,
    /// Milliseconds since the epoch, 0 when `date` is unparseable
    sort_timestamp: i64,
}

impl Article {
    /// Build an article from parsed front-matter and the remaining body
    pub fn normalize(source_id: &str, fm: &FrontMatter, body: &str) -> Self {
        let slug = fm
            .text("slug")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug_from_source(source_id));
        let slug = ensure_url_safe(source_id, slug);

        let field = |key: &str| fm.text(key).unwrap_or_default();
        let subtitle = field("subtitle");
        let date = field("date");

        Self {
            title: fm.text("title").unwrap_or_else(|| slug.clone()),
            sort_timestamp: parse_timestamp(&date),
            date,
            read_time: field("readTime"),
            summary: fm.text("summary").unwrap_or_else(|| subtitle.clone()),
            subtitle,
            cover_image: field("coverImage"),
            hero_label: field("heroLabel"),
            author_name: field("authorName"),
            author_meta: field("authorMeta"),
            tags: field("tags"),
            external_url: field("externalUrl"),
            body: body.trim().to_string(),
            slug,
        }
    }

    /// Parse a raw source and normalize it in one step
    pub fn from_source(source_id: &str, raw: &str) -> Self {
        let (fm, body) = FrontMatter::parse(raw);
        Self::normalize(source_id, &fm, body)
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn read_time(&self) -> &str {
        &self.read_time
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn cover_image(&self) -> &str {
        &self.cover_image
    }

    pub fn hero_label(&self) -> &str {
        &self.hero_label
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_meta(&self) -> &str {
        &self.author_meta
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn external_url(&self) -> &str {
        &self.external_url
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn sort_timestamp(&self) -> i64 {
        self.sort_timestamp
    }

    /// Tags split on commas, trimmed, empties dropped
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    /// Whether this article points to off-site content
    pub fn is_external(&self) -> bool {
        !self.external_url.is_empty()
    }

    /// Letter shown in the author avatar
    pub fn author_initial(&self) -> char {
        self.author_name.chars().next().unwrap_or('A')
    }

    /// The summary is only shown separately when it adds something
    pub fn shows_summary(&self) -> bool {
        !self.summary.is_empty() && self.summary != self.subtitle
    }
}

/// Derive a slug from the last path segment of a source name, minus its extension
pub fn slug_from_source(source_id: &str) -> String {
    let name = source_id.rsplit(['/', '\\']).next().unwrap_or(source_id);
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string()
}

fn ensure_url_safe(source_id: &str, slug: String) -> String {
    if is_url_safe(&slug) {
        return slug;
    }

    let safe = [slug::slugify(&slug), slug::slugify(slug_from_source(source_id))]
        .into_iter()
        .find(|candidate| is_url_safe(candidate))
        .unwrap_or_else(|| FALLBACK_SLUG.to_string());
    tracing::warn!(
        "Slug {:?} of {} is not URL-safe, using {:?}",
        slug,
        source_id,
        safe
    );
    safe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_slug_overrides_filename() {
        let article = Article::from_source(
            "articles/some-file.md",
            "---\nslug: \"custom-id\"\n---\nBody",
        );
        assert_eq!(article.slug(), "custom-id");
    }

    #[test]
    fn test_slug_from_filename() {
        let article = Article::from_source("articles/latency-budget.md", "Body only");
        assert_eq!(article.slug(), "latency-budget");
        assert_eq!(article.title(), "latency-budget");
        assert_eq!(article.body(), "Body only");
    }

    #[test]
    fn test_slug_from_source() {
        assert_eq!(slug_from_source("a/b/c.md"), "c");
        assert_eq!(slug_from_source("plain"), "plain");
        assert_eq!(slug_from_source("notes.draft.md"), "notes.draft");
        assert_eq!(slug_from_source("dir\\win.MD"), "win");
    }

    #[test]
    fn test_empty_slug_uses_filename() {
        let article = Article::from_source("fallback.md", "---\nslug:\n---\n");
        assert_eq!(article.slug(), "fallback");
    }

    #[test]
    fn test_unsafe_slug_is_slugified() {
        let article = Article::from_source("x.md", "---\nslug: Hello World!\n---\n");
        assert_eq!(article.slug(), "hello-world");
    }

    #[test]
    fn test_slug_that_slugifies_to_nothing() {
        let article = Article::from_source("listed.md", "---\nslug: \"!!!\"\n---\n");
        assert_eq!(article.slug(), "listed");

        let article = Article::from_source("???.md", "Body");
        assert_eq!(article.slug(), FALLBACK_SLUG);
    }

    #[test]
    fn test_page_file_slug_is_rewritten() {
        let article = Article::from_source("x.md", "---\nslug: index.html\n---\n");
        assert_eq!(article.slug(), "index-html");

        let article = Article::from_source("notes.html.md", "Body");
        assert_eq!(article.slug(), "notes-html");
    }

    #[test]
    fn test_defaults() {
        let article = Article::from_source("empty.md", "");
        assert_eq!(article.slug(), "empty");
        assert_eq!(article.title(), "empty");
        assert_eq!(article.date(), "");
        assert_eq!(article.read_time(), "");
        assert_eq!(article.summary(), "");
        assert_eq!(article.subtitle(), "");
        assert_eq!(article.cover_image(), "");
        assert_eq!(article.hero_label(), "");
        assert_eq!(article.author_name(), "");
        assert_eq!(article.author_meta(), "");
        assert_eq!(article.tags(), "");
        assert_eq!(article.external_url(), "");
        assert_eq!(article.body(), "");
        assert_eq!(article.sort_timestamp(), 0);
        assert!(!article.is_external());
    }

    #[test]
    fn test_summary_falls_back_to_subtitle() {
        let article = Article::from_source("a.md", "---\nsubtitle: Sub\n---\n");
        assert_eq!(article.summary(), "Sub");
        assert!(!article.shows_summary());

        let article = Article::from_source("a.md", "---\nsubtitle: Sub\nsummary: Sum\n---\n");
        assert_eq!(article.summary(), "Sum");
        assert!(article.shows_summary());
    }

    #[test]
    fn test_full_record() {
        let raw = r#"---
title: Latency Budgeting for Voice AI Interfaces
date: Feb 02, 2026
readTime: 6 min read
heroLabel: Field notes
authorName: Swayam
authorMeta: AI Engineer
coverImage: /images/voice.png
tags: voice, latency, ,asr
unknownKey: ignored
---

Perceived intelligence drops fast.
"#;
        let article = Article::from_source("latency-budgeting.md", raw);
        assert_eq!(article.title(), "Latency Budgeting for Voice AI Interfaces");
        assert_eq!(article.date(), "Feb 02, 2026");
        assert_eq!(article.read_time(), "6 min read");
        assert_eq!(article.hero_label(), "Field notes");
        assert_eq!(article.cover_image(), "/images/voice.png");
        assert_eq!(article.tag_list(), vec!["voice", "latency", "asr"]);
        assert_eq!(article.author_initial(), 'S');
        assert_eq!(article.body(), "Perceived intelligence drops fast.");
        assert!(article.sort_timestamp() > 0);
    }

    #[test]
    fn test_quoted_value_kept_verbatim() {
        let article = Article::from_source("q.md", "---\ntitle: 'quoted text'\n---\n");
        assert_eq!(article.title(), "quoted text");
    }

    #[test]
    fn test_unparseable_date_sorts_oldest() {
        let article = Article::from_source("d.md", "---\ndate: \n---\n");
        assert_eq!(article.sort_timestamp(), 0);
        let article = Article::from_source("d.md", "---\ndate: soon\n---\n");
        assert_eq!(article.date(), "soon");
        assert_eq!(article.sort_timestamp(), 0);
    }

    #[test]
    fn test_external_article() {
        let article =
            Article::from_source("e.md", "---\nexternalUrl: https://example.com/post\n---\n");
        assert!(article.is_external());
        assert_eq!(article.author_initial(), 'A');
    }

    #[test]
    fn test_serializes_camel_case() {
        let article = Article::from_source("s.md", "---\nreadTime: 3 min\n---\n");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["readTime"], "3 min");
        assert_eq!(json["sortTimestamp"], 0);
        assert_eq!(json["slug"], "s");
    }
}
