//! Loaded site content and route resolution

use anyhow::Result;

use crate::content::{Article, Catalogue, ContentLoader, Library, SectionItem};
use crate::routes::{Resolution, Route, NOT_FOUND_PATH};
use crate::Folio;

/// Everything a build renders: articles plus the static catalogue.
///
/// Built once per generation and never modified; a reload builds a new one.
#[derive(Debug, Clone, Default)]
pub struct Site {
    library: Library,
    catalogue: Catalogue,
}

impl Site {
    pub fn new(library: Library, catalogue: Catalogue) -> Self {
        Self { library, catalogue }
    }

    /// Load articles and the catalogue from the source directory
    pub fn load(folio: &Folio) -> Result<Self> {
        let library = ContentLoader::new(folio).load_library();
        let catalogue = Catalogue::load(folio.data_file())?;
        Ok(Self::new(library, catalogue))
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn find_article(&self, slug: &str) -> Option<&Article> {
        self.library.find_by_slug(slug)
    }

    pub fn find_entry(&self, section_id: &str, slug: &str) -> Option<&SectionItem> {
        self.catalogue.find_item(section_id, slug)
    }

    /// Resolve a request path to a page or a redirect.
    ///
    /// Unknown paths and lookup misses go to the not-found page; external
    /// articles redirect off-site.
    pub fn resolve(&self, path: &str) -> Resolution {
        let not_found = || Resolution::Redirect(NOT_FOUND_PATH.to_string());

        let Some(route) = Route::parse(path) else {
            return not_found();
        };

        match &route {
            Route::Article(slug) => match self.find_article(slug) {
                Some(article) if article.is_external() => {
                    Resolution::Redirect(article.external_url().to_string())
                }
                Some(_) => Resolution::Page(route),
                None => not_found(),
            },
            Route::Entry { section, slug } => match self.find_entry(section, slug) {
                Some(_) => Resolution::Page(route),
                None => not_found(),
            },
            _ => Resolution::Page(route),
        }
    }

    /// Every route the site serves, in generation order
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = vec![Route::Home, Route::Articles];

        routes.extend(
            self.library
                .articles()
                .iter()
                .map(|a| Route::Article(a.slug().to_string())),
        );

        for section in &self.catalogue.sections {
            for item in &section.items {
                routes.push(Route::Entry {
                    section: section.id.clone(),
                    slug: item.slug.clone(),
                });
            }
        }

        routes.push(Route::NotFound);
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ArticleSource, Section};

    fn test_site() -> Site {
        let library = Library::load(vec![
            ArticleSource::new("evals.md", "---\ndate: 2026-01-14\n---\nBody"),
            ArticleSource::new(
                "elsewhere.md",
                "---\nexternalUrl: https://medium.example/post\n---\n",
            ),
        ]);
        let catalogue = Catalogue {
            sections: vec![Section {
                id: "projects".to_string(),
                items: vec![SectionItem {
                    slug: "copilot".to_string(),
                    ..SectionItem::default()
                }],
                ..Section::default()
            }],
            ..Catalogue::default()
        };
        Site::new(library, catalogue)
    }

    #[test]
    fn test_resolve_known_pages() {
        let site = test_site();
        assert_eq!(site.resolve("/"), Resolution::Page(Route::Home));
        assert_eq!(site.resolve("/articles"), Resolution::Page(Route::Articles));
        assert_eq!(
            site.resolve("/articles/evals"),
            Resolution::Page(Route::Article("evals".to_string()))
        );
        assert_eq!(
            site.resolve("/entry/projects/copilot"),
            Resolution::Page(Route::Entry {
                section: "projects".to_string(),
                slug: "copilot".to_string(),
            })
        );
        assert_eq!(site.resolve("/404"), Resolution::Page(Route::NotFound));
    }

    #[test]
    fn test_misses_redirect_to_not_found() {
        let site = test_site();
        let not_found = Resolution::Redirect("/404".to_string());
        assert_eq!(site.resolve("/nowhere"), not_found);
        assert_eq!(site.resolve("/articles/nonexistent"), not_found);
        assert_eq!(site.resolve("/entry/projects/missing"), not_found);
        assert_eq!(site.resolve("/entry/interests/copilot"), not_found);
    }

    #[test]
    fn test_external_article_redirects() {
        let site = test_site();
        assert_eq!(
            site.resolve("/articles/elsewhere"),
            Resolution::Redirect("https://medium.example/post".to_string())
        );
    }

    #[test]
    fn test_routes() {
        let site = test_site();
        let paths: Vec<String> = site.routes().iter().map(Route::path).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/articles",
                "/articles/evals",
                "/articles/elsewhere",
                "/entry/projects/copilot",
                "/404",
            ]
        );
    }
}
