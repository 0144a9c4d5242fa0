//! List site content

use anyhow::Result;

use crate::{Folio, Site};

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let site = Site::load(folio)?;
    for line in describe(&site, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

fn describe(site: &Site, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "article" | "articles" => {
            let articles = site.library().articles();
            lines.push(format!("Articles ({}):", articles.len()));
            for article in articles {
                let date = if article.date().is_empty() {
                    "(undated)"
                } else {
                    article.date()
                };
                let mut line = format!("  {} - {} [{}]", date, article.title(), article.slug());
                if article.is_external() {
                    line.push_str(&format!(" -> {}", article.external_url()));
                }
                lines.push(line);
            }
        }
        "section" | "sections" => {
            let sections = &site.catalogue().sections;
            lines.push(format!("Sections ({}):", sections.len()));
            for section in sections {
                lines.push(format!("  {} ({} items)", section.id, section.items.len()));
                for item in &section.items {
                    lines.push(format!("    {} [{}]", item.title, item.slug));
                }
            }
        }
        "route" | "routes" => {
            let routes = site.routes();
            lines.push(format!("Routes ({}):", routes.len()));
            lines.extend(routes.iter().map(|route| format!("  {}", route)));
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: articles, sections, routes",
                content_type
            );
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ArticleSource, Catalogue, Library};

    fn site() -> Site {
        let library = Library::load(vec![
            ArticleSource::new("a.md", "---\ntitle: First\ndate: 2026-01-01\n---\n"),
            ArticleSource::new("b.md", "---\nexternalUrl: https://x.example\n---\n"),
        ]);
        Site::new(library, Catalogue::default())
    }

    #[test]
    fn test_list_articles() {
        let lines = describe(&site(), "articles").unwrap();
        assert_eq!(lines[0], "Articles (2):");
        assert_eq!(lines[1], "  2026-01-01 - First [a]");
        assert_eq!(lines[2], "  (undated) - b [b] -> https://x.example");
    }

    #[test]
    fn test_list_routes() {
        let lines = describe(&site(), "routes").unwrap();
        assert_eq!(
            lines,
            vec![
                "Routes (5):",
                "  /",
                "  /articles",
                "  /articles/a",
                "  /articles/b",
                "  /404",
            ]
        );
    }

    #[test]
    fn test_unknown_type() {
        assert!(describe(&site(), "tags").is_err());
    }
}
