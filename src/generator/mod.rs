//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::contact::ContactForm;
use crate::content::{Article, MarkdownRenderer};
use crate::helpers::{escape_html, full_url_for};
use crate::routes::Route;
use crate::templates::{
    ArticleData, AssetsData, ConfigData, ContactFormData, ContactLinkData, HeroData, ItemData,
    NavData, SectionData, SiteData, TemplateRenderer, FOLIO_CSS, FOLIO_JS,
};
use crate::{Folio, Site};

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let highlight = &folio.config.highlight;
        let markdown = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);

        Ok(Self {
            folio: folio.clone(),
            renderer,
            markdown,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, site: &Site) -> Result<()> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)?;

        self.write_assets()?;
        self.copy_static_assets()?;

        let routes = site.routes();
        for route in &routes {
            let html = self.render_route(site, route)?;
            self.write_page(&route.output_path(), &html)?;
            tracing::debug!("Generated {}", route);
        }

        // Static hosts look for the not-found page at the root
        let not_found = self.render_route(site, &Route::NotFound)?;
        self.write_page(Path::new("404.html"), &not_found)?;

        tracing::info!(
            "Generated {} pages ({} articles)",
            routes.len(),
            site.library().len()
        );
        Ok(())
    }

    /// Render the page written for one route
    pub fn render_route(&self, site: &Site, route: &Route) -> Result<String> {
        let mut context = self.create_base_context(site);
        let canonical = full_url_for(&self.folio.config, &route.path());
        context.insert("canonical", &escape_html(&canonical));

        match route {
            Route::Home => {
                let catalogue = site.catalogue();
                let sections: Vec<SectionData> = catalogue
                    .sections
                    .iter()
                    .map(|s| SectionData::new(&self.folio.config, s))
                    .collect();
                let contact_links: Vec<ContactLinkData> =
                    catalogue.contact.iter().map(ContactLinkData::from).collect();

                context.insert("hero", &HeroData::from(&catalogue.hero));
                context.insert("sections", &sections);
                context.insert("articles", &self.article_rows(site));
                context.insert("contact_links", &contact_links);
                self.renderer.render("home.html", &context)
            }
            Route::Articles => {
                context.insert("articles", &self.article_rows(site));
                self.renderer.render("articles.html", &context)
            }
            Route::Article(slug) => {
                let article = site
                    .find_article(slug)
                    .with_context(|| format!("No article with slug {:?}", slug))?;
                if article.is_external() {
                    return self.render_redirect(article.title(), article.external_url());
                }
                self.render_article(context, article)
            }
            Route::Entry { section, slug } => {
                let entry = site
                    .find_entry(section, slug)
                    .with_context(|| format!("No entry {:?} in section {:?}", slug, section))?;
                let section = site
                    .catalogue()
                    .section(section)
                    .with_context(|| format!("No section {:?}", section))?;

                context.insert("section", &SectionData::new(&self.folio.config, section));
                context.insert("entry", &ItemData::new(&self.folio.config, &section.id, entry));
                self.renderer.render("entry.html", &context)
            }
            Route::NotFound => self.renderer.render("not_found.html", &context),
        }
    }

    fn render_article(&self, mut context: Context, article: &Article) -> Result<String> {
        let body_html = self
            .markdown
            .render(article.body())
            .with_context(|| format!("Failed to render article {:?}", article.slug()))?;
        let contact_form = ContactForm::for_article(&self.folio.config.contact, article.title());

        context.insert("article", &ArticleData::new(&self.folio.config, article));
        context.insert("body_html", &body_html);
        context.insert(
            "contact_form",
            &contact_form.as_ref().map(ContactFormData::from),
        );
        self.renderer.render("article.html", &context)
    }

    /// Stub page sending visitors to off-site content
    fn render_redirect(&self, title: &str, target: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("config", &ConfigData::new(&self.folio.config));
        context.insert("title", &escape_html(title));
        context.insert("target", &escape_html(target));
        self.renderer.render("redirect.html", &context)
    }

    /// Create base context shared by all layout pages
    fn create_base_context(&self, site: &Site) -> Context {
        let config = &self.folio.config;
        let mut context = Context::new();
        context.insert("config", &ConfigData::new(config));
        context.insert("site", &SiteData::new(&site.catalogue().site));
        context.insert("nav", &NavData::new(config));
        context.insert("assets", &AssetsData::new(config));
        context
    }

    fn article_rows(&self, site: &Site) -> Vec<ArticleData> {
        site.library()
            .articles()
            .iter()
            .map(|a| ArticleData::new(&self.folio.config, a))
            .collect()
    }

    /// Write a page relative to the public directory
    fn write_page(&self, relative: &Path, html: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(())
    }

    /// Write the stylesheet and script bundled with the templates
    fn write_assets(&self) -> Result<()> {
        self.write_page(Path::new("folio.css"), FOLIO_CSS)?;
        self.write_page(Path::new("folio.js"), FOLIO_JS)?;
        Ok(())
    }

    /// Copy static assets (images, etc.) verbatim
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = self.folio.static_dir();
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(&static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}
