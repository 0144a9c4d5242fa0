//! Routing surface: URL paths to pages

use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::PathBuf;

use crate::helpers::encode_path;

/// Path of the not-found page
pub const NOT_FOUND_PATH: &str = "/404";

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Articles,
    Article(String),
    Entry { section: String, slug: String },
    NotFound,
}

/// Outcome of resolving a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Route),
    Redirect(String),
}

impl Route {
    /// Match a URL path against the routing table.
    ///
    /// Trailing slashes and a trailing `index.html` are ignored. Returns
    /// `None` for paths outside the table.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        if segments.last().map(String::as_str) == Some("index.html") {
            segments.pop();
        }

        match segments.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Some(Route::Home),
            ["articles"] => Some(Route::Articles),
            ["articles", slug] => Some(Route::Article(slug.to_string())),
            ["entry", section, slug] => Some(Route::Entry {
                section: section.to_string(),
                slug: slug.to_string(),
            }),
            ["404"] => Some(Route::NotFound),
            _ => None,
        }
    }

    /// Canonical URL path, without the site root
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Articles => "/articles".to_string(),
            Route::Article(slug) => format!("/articles/{}", encode_path(slug)),
            Route::Entry { section, slug } => {
                format!("/entry/{}/{}", encode_path(section), encode_path(slug))
            }
            Route::NotFound => NOT_FOUND_PATH.to_string(),
        }
    }

    /// File written for this route, relative to the public directory
    pub fn output_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        match self {
            Route::Home => {}
            Route::Articles => path.push("articles"),
            Route::Article(slug) => {
                path.push("articles");
                path.push(slug);
            }
            Route::Entry { section, slug } => {
                path.push("entry");
                path.push(section);
                path.push(slug);
            }
            Route::NotFound => path.push("404"),
        }
        path.join("index.html")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/index.html"), Some(Route::Home));
        assert_eq!(Route::parse("/articles"), Some(Route::Articles));
        assert_eq!(Route::parse("/articles/"), Some(Route::Articles));
        assert_eq!(
            Route::parse("/articles/designing-agent-evals/"),
            Some(Route::Article("designing-agent-evals".to_string()))
        );
        assert_eq!(
            Route::parse("/entry/projects/adaptive-retrieval-engine/index.html"),
            Some(Route::Entry {
                section: "projects".to_string(),
                slug: "adaptive-retrieval-engine".to_string(),
            })
        );
        assert_eq!(Route::parse("/404"), Some(Route::NotFound));
        assert_eq!(Route::parse("/articles?x=1"), Some(Route::Articles));
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::parse("/about"), None);
        assert_eq!(Route::parse("/articles/a/b"), None);
        assert_eq!(Route::parse("/entry/projects"), None);
        assert_eq!(
            Route::parse("/articles/myindex.html"),
            Some(Route::Article("myindex.html".to_string()))
        );
    }

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            Route::Home,
            Route::Articles,
            Route::Article("a b".to_string()),
            Route::Entry {
                section: "interests".to_string(),
                slug: "voice".to_string(),
            },
            Route::NotFound,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()));
        }
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(Route::Home.output_path(), PathBuf::from("index.html"));
        assert_eq!(
            Route::Article("x".to_string()).output_path(),
            PathBuf::from("articles/x/index.html")
        );
        assert_eq!(
            Route::NotFound.output_path(),
            PathBuf::from("404/index.html")
        );
    }
}
