//! Initialize a new folio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::{Folio, CONFIG_FILE};

const CONFIG: &str = r#"# Site
title: Portfolio
description: ''
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
articles_dir: articles
data_file: _data/portfolio.yml
static_dir: static

# Writing
highlight:
  theme: base16-ocean.dark
  line_number: false

# Contact form; an empty endpoint hides the form
contact:
  endpoint: ''
  subject: New message from portfolio
  heading: Thoughts?
  subtext: Drop me a note. I read every one.
"#;

const CATALOGUE: &str = r#"site:
  name: Your Name
  role: Engineer

hero:
  label: Portfolio
  headline: Building things worth writing about.
  description: A few sentences on what you do and what you care about.

sections:
  - id: projects
    title: Projects
    intro: Production systems with measurable impact.
    items:
      - slug: first-project
        title: First Project
        meta: Rust / Systems
        summary: One line on what it does.
        content:
          - What the problem was.
          - What you built and what changed.
  - id: portfolio
    title: Portfolio
    intro: Selected collaborations and shipping records.
    items: []
  - id: interests
    title: Interests
    intro: What you explore outside immediate deliverables.
    items: []

contact:
  - label: Email
    value: you@example.com
    href: mailto:you@example.com
"#;

const README: &str = r#"# Articles

Every `.md` file in this directory except this one is an article. Start each
file with a header block:

    ---
    title: My Article
    date: 2026-01-14
    readTime: 5 min read
    summary: One line shown in listings.
    tags: rust, notes
    ---

Set `draft: true` to keep an article out of the site, `slug:` to choose its
URL, and `externalUrl:` to link to an article published elsewhere.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?} exists", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("source/articles"))?;
    fs::create_dir_all(target_dir.join("source/_data"))?;
    fs::create_dir_all(target_dir.join("source/static"))?;

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("source/_data/portfolio.yml"), CATALOGUE)?;
    fs::write(target_dir.join("source/articles/README.md"), README)?;

    // Create a sample article
    let today = chrono::Local::now();
    let sample_article = format!(
        r#"---
title: Hello World
date: {}
readTime: 1 min read
summary: The first article on this site.
tags: meta
---

Welcome! This is your first article. Edit it in `source/articles/hello-world.md`.

## Quick Start

```bash
$ folio new "My New Article"
$ folio server
$ folio generate
```
"#,
        today.format("%b %d, %Y")
    );

    fs::write(target_dir.join("source/articles/hello-world.md"), sample_article)?;

    Ok(())
}

/// Run the init command with an existing folio instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffold_loads() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let site = Site::load(&folio).unwrap();
        assert_eq!(site.library().len(), 1);
        assert_eq!(site.library().articles()[0].slug(), "hello-world");
        assert!(site.library().articles()[0].sort_timestamp() > 0);
        assert_eq!(site.catalogue().sections.len(), 3);
        assert!(site.find_entry("projects", "first-project").is_some());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
