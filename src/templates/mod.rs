//! Built-in folio templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescape is off: every view model
//! below carries text already escaped with [`escape_html`], and rendered
//! Markdown is inserted as-is.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::content::{Article, ContactLink, Hero, Section, SectionItem, SiteMeta};
use crate::helpers::{escape_html, url_for};
use crate::routes::Route;

/// Stylesheet bundled with the templates
pub const FOLIO_CSS: &str = include_str!("assets/folio.css");

/// Client script bundled with the templates
pub const FOLIO_JS: &str = include_str!("assets/folio.js");

/// Template renderer with the embedded folio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all folio templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped when the view models are built
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("macros.html", include_str!("folio/macros.html")),
            ("home.html", include_str!("folio/home.html")),
            ("articles.html", include_str!("folio/articles.html")),
            ("article.html", include_str!("folio/article.html")),
            ("entry.html", include_str!("folio/entry.html")),
            ("not_found.html", include_str!("folio/not_found.html")),
            ("redirect.html", include_str!("folio/redirect.html")),
            (
                "partials/contact_form.html",
                include_str!("folio/partials/contact_form.html"),
            ),
        ])?;

        tera.register_filter("pad_index", pad_index_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: two-digit list position, `1` -> `01`
fn pad_index_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let n = tera::try_get_value!("pad_index", "value", u64, value);
    Ok(tera::Value::String(format!("{:02}", n)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub language: String,
}

impl ConfigData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: escape_html(&config.title),
            description: escape_html(&config.description),
            language: escape_html(&config.language),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    /// `NAME / ROLE`
    pub brand: String,
}

impl SiteData {
    pub fn new(meta: &SiteMeta) -> Self {
        Self {
            brand: escape_html(&format!(
                "{} / {}",
                meta.name.to_uppercase(),
                meta.role.to_uppercase()
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavData {
    pub home: String,
    pub articles: String,
}

impl NavData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            home: url_for(config, &Route::Home.path()),
            articles: url_for(config, &Route::Articles.path()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetsData {
    pub css: String,
    pub js: String,
}

impl AssetsData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            css: url_for(config, "/folio.css"),
            js: url_for(config, "/folio.js"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroData {
    pub label: String,
    pub headline: String,
    pub description: String,
}

impl From<&Hero> for HeroData {
    fn from(hero: &Hero) -> Self {
        Self {
            label: escape_html(&hero.label.to_uppercase()),
            headline: escape_html(&hero.headline),
            description: escape_html(&hero.description),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub id: String,
    pub heading: String,
    pub intro: String,
    pub items: Vec<ItemData>,
}

impl SectionData {
    pub fn new(config: &SiteConfig, section: &Section) -> Self {
        Self {
            id: escape_html(&section.id),
            heading: escape_html(&section.title.to_uppercase()),
            intro: escape_html(&section.intro),
            items: section
                .items
                .iter()
                .map(|item| ItemData::new(config, &section.id, item))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemData {
    pub slug: String,
    pub title: String,
    pub meta: String,
    pub summary: String,
    pub href: String,
    pub content: Vec<String>,
}

impl ItemData {
    pub fn new(config: &SiteConfig, section_id: &str, item: &SectionItem) -> Self {
        let route = Route::Entry {
            section: section_id.to_string(),
            slug: item.slug.clone(),
        };
        Self {
            slug: escape_html(&item.slug),
            title: escape_html(&item.title),
            meta: escape_html(&item.meta),
            summary: escape_html(&item.summary),
            href: url_for(config, &route.path()),
            content: item.content.iter().map(|p| escape_html(p)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub read_time: String,
    pub summary: String,
    pub subtitle: String,
    pub cover_image: String,
    pub hero_label: String,
    pub author_name: String,
    pub author_meta: String,
    pub author_initial: String,
    pub has_author: bool,
    pub show_summary: bool,
    pub tags: Vec<String>,
    /// Off-site link or the article page
    pub href: String,
    pub external: bool,
}

impl ArticleData {
    pub fn new(config: &SiteConfig, article: &Article) -> Self {
        let href = if article.is_external() {
            article.external_url().to_string()
        } else {
            url_for(config, &Route::Article(article.slug().to_string()).path())
        };

        Self {
            slug: escape_html(article.slug()),
            title: escape_html(article.title()),
            date: escape_html(article.date()),
            read_time: escape_html(article.read_time()),
            summary: escape_html(article.summary()),
            subtitle: escape_html(article.subtitle()),
            cover_image: escape_html(article.cover_image()),
            hero_label: escape_html(&article.hero_label().to_uppercase()),
            author_name: escape_html(article.author_name()),
            author_meta: escape_html(article.author_meta()),
            author_initial: escape_html(&article.author_initial().to_uppercase().to_string()),
            has_author: !article.author_name().is_empty() || !article.author_meta().is_empty(),
            show_summary: article.shows_summary(),
            tags: article.tag_list().iter().map(|t| escape_html(t)).collect(),
            href: escape_html(&href),
            external: article.is_external(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactLinkData {
    pub label: String,
    pub value: String,
    pub href: String,
}

impl From<&ContactLink> for ContactLinkData {
    fn from(link: &ContactLink) -> Self {
        Self {
            label: escape_html(&link.label.to_uppercase()),
            value: escape_html(&link.value),
            href: escape_html(&link.href),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactFormData {
    pub endpoint: String,
    pub subject: String,
    pub heading: String,
    pub subtext: String,
}

impl From<&ContactForm> for ContactFormData {
    fn from(form: &ContactForm) -> Self {
        Self {
            endpoint: escape_html(&form.endpoint),
            subject: escape_html(&form.subject),
            heading: escape_html(&form.heading),
            subtext: escape_html(&form.subtext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArticleSource;

    fn base_context(config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("config", &ConfigData::new(config));
        context.insert("site", &SiteData::new(&SiteMeta::default()));
        context.insert("nav", &NavData::new(config));
        context.insert("assets", &AssetsData::new(config));
        context
    }

    #[test]
    fn test_pad_index() {
        let value = pad_index_filter(&tera::Value::from(3), &HashMap::new()).unwrap();
        assert_eq!(value, tera::Value::String("03".to_string()));
        let value = pad_index_filter(&tera::Value::from(12), &HashMap::new()).unwrap();
        assert_eq!(value, tera::Value::String("12".to_string()));
    }

    #[test]
    fn test_article_data_links() {
        let config = SiteConfig::default();
        let local = Article::from_source("local.md", "---\ntitle: A <b>bold</b> claim\n---\n");
        let data = ArticleData::new(&config, &local);
        assert_eq!(data.href, "/articles/local");
        assert_eq!(data.title, "A &lt;b&gt;bold&lt;/b&gt; claim");
        assert!(!data.external);
        assert!(!data.has_author);

        let remote = Article::from_source(
            "remote.md",
            "---\nexternalUrl: https://medium.example/p?a=1&b=2\n---\n",
        );
        let data = ArticleData::new(&config, &remote);
        assert_eq!(data.href, "https://medium.example/p?a=1&amp;b=2");
        assert!(data.external);
    }

    #[test]
    fn test_render_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let section = Section {
            id: "projects".to_string(),
            title: "Projects".to_string(),
            items: vec![SectionItem {
                slug: "engine".to_string(),
                title: "Retrieval Engine".to_string(),
                ..SectionItem::default()
            }],
            ..Section::default()
        };
        let article = Article::from_source("evals.md", "---\ntitle: Designing Evals\n---\n");

        let mut context = base_context(&config);
        context.insert("hero", &HeroData::from(&Hero::default()));
        context.insert("sections", &vec![SectionData::new(&config, &section)]);
        context.insert("articles", &vec![ArticleData::new(&config, &article)]);
        context.insert("contact_links", &Vec::<ContactLinkData>::new());

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains("YOUR NAME / ENGINEER"));
        assert!(html.contains(r#"<p class="mono project-index">01</p>"#));
        assert!(html.contains(r#"href="/entry/projects/engine""#));
        assert!(html.contains(r#"href="/articles/evals""#));
        assert!(html.contains("Designing Evals"));
    }

    #[test]
    fn test_render_empty_listing() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context(&SiteConfig::default());
        context.insert("articles", &Vec::<ArticleData>::new());
        let html = renderer.render("articles.html", &context).unwrap();
        assert!(html.contains("NOTHING PUBLISHED YET"));
    }

    #[test]
    fn test_render_article_with_form() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig {
            contact: crate::config::ContactConfig {
                endpoint: "https://relay.example/me".to_string(),
                ..Default::default()
            },
            ..SiteConfig::default()
        };
        let article = crate::content::load_all(vec![ArticleSource::new(
            "budget.md",
            "---\ntitle: Latency Budgets\nsubtitle: Sub\nauthorName: swayam\ntags: voice, asr\n---\nBody",
        )])
        .remove(0);

        let mut context = base_context(&config);
        context.insert("article", &ArticleData::new(&config, &article));
        context.insert("body_html", "<p>Body</p>");
        let form = ContactForm::for_article(&config.contact, article.title());
        context.insert("contact_form", &form.as_ref().map(ContactFormData::from));

        let html = renderer.render("article.html", &context).unwrap();
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains(r#"data-subject="Re: Latency Budgets""#));
        assert!(html.contains(r#"<div class="article-author-avatar">S</div>"#));
        assert!(html.contains(r#"<span class="mono article-tag">asr</span>"#));
        assert!(!html.contains("detail-summary"));
    }

    #[test]
    fn test_article_without_form() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let article = Article::from_source("a.md", "Body");
        let mut context = base_context(&config);
        context.insert("article", &ArticleData::new(&config, &article));
        context.insert("body_html", "");
        context.insert("contact_form", &None::<ContactFormData>);
        let html = renderer.render("article.html", &context).unwrap();
        assert!(!html.contains("<form"));
    }
}
