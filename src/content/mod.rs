//! Content module - handles articles, the portfolio catalogue, and Markdown

mod article;
pub mod catalogue;
mod frontmatter;
pub mod loader;
mod markdown;

pub use article::{slug_from_source, Article};
pub use catalogue::{Catalogue, ContactLink, Hero, Section, SectionItem, SiteMeta};
pub use frontmatter::{parse_timestamp, FrontMatter, Scalar};
pub use loader::{load_all, ArticleSource, ContentLoader, Library};
pub use markdown::MarkdownRenderer;
