//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary content directories with a
//! catalog and markdown posts.

#![allow(dead_code)]

use anyhow::Result;
use foliomark::{Blog, Config, DEFAULT_THEME};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Post used across tests, modelled on a real article.
pub const OPTIMIZING_API: &str = "\
# Optimizing APIs

Jump to [caching](#caching-config) or read the [docs](https://developer.mozilla.org).

## Using `Promise.all`

```js
const [user, posts] = await Promise.all([
  fetchUser(id),
  fetchPosts(id),
]);
```

## Caching Config

- Cache static responses
- Revalidate on change

```
no language here
```
";

/// Creates catalog entry pointing at `/blogs/<slug>.md`.
pub fn blog(slug: &str, title: &str) -> Blog {
    Blog {
        slug: slug.to_string(),
        title: title.to_string(),
        excerpt: format!("Excerpt of {}", title),
        content: format!("/blogs/{}.md", slug),
        date: "Nov 3, 2025".to_string(),
    }
}

/// Creates temporary content directory.
///
/// Writes `blogs.json` listing every post and one markdown file per
/// `(blog, Some(markdown))` pair. A `None` body leaves the document
/// missing.
///
/// # Errors
///
/// Returns error if directory creation or any write fails
pub fn create_content(posts: &[(Blog, Option<&str>)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::create_dir_all(root.join("blogs"))?;

    let catalog: Vec<&Blog> = posts.iter().map(|(blog, _)| blog).collect();
    fs::write(root.join("blogs.json"), serde_json::to_string_pretty(&catalog)?)?;

    for (blog, body) in posts {
        if let Some(markdown) = body {
            fs::write(root.join(blog.content.trim_start_matches('/')), markdown)?;
        }
    }

    Ok(dir)
}

/// Build configuration reading from `content` and writing to `output`.
pub fn config(content: &Path, output: &Path) -> Config {
    Config {
        content: content.to_path_buf(),
        output: output.to_path_buf(),
        name: Some("Folio".to_string()),
        theme: DEFAULT_THEME.to_string(),
        no_open: true,
        command: None,
    }
}
