//! URL helper functions

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::config::SiteConfig;

/// Characters left alone in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

lazy_static! {
    static ref URL_SAFE_SEGMENT: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap();
}

/// Whether a slug or section id can be used as one path segment.
///
/// A trailing `.html` is refused: such a segment would be read back as a
/// page file rather than a directory.
pub fn is_url_safe(segment: &str) -> bool {
    URL_SAFE_SEGMENT.is_match(segment) && !segment.to_ascii_lowercase().ends_with(".html")
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/articles") // -> "/blog/articles"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/articles") // -> "https://example.com/blog/articles"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Whether a link leaves the site
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("mailto:")
}

/// Encode a single URL path segment
pub fn encode_path(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/folio.css"), "/blog/folio.css");
        assert_eq!(url_for(&config, "articles"), "/blog/articles");
        assert_eq!(url_for(&config, "/"), "/blog/");
        assert_eq!(
            url_for(&config, "https://other.example/post"),
            "https://other.example/post"
        );
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/articles"),
            "https://example.com/blog/articles"
        );
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("designing-agent-evals"), "designing-agent-evals");
        assert_eq!(encode_path("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_path("v1.2_x~"), "v1.2_x~");
    }

    #[test]
    fn test_is_url_safe() {
        assert!(is_url_safe("designing-agent-evals"));
        assert!(is_url_safe("v1.2_x"));
        assert!(!is_url_safe(""));
        assert!(!is_url_safe("../../../x"));
        assert!(!is_url_safe("a/b"));
        assert!(!is_url_safe(".hidden"));
        assert!(!is_url_safe("index.html"));
        assert!(!is_url_safe("page.HTML"));
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("mailto:me@example.com"));
        assert!(is_external("https://github.com/me"));
        assert!(!is_external("/articles"));
    }
}
