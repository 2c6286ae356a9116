//! Blog metadata catalog.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

/// File name of the catalog inside the content root.
pub const CATALOG_FILE: &str = "blogs.json";

/// Metadata of one blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// URL segment under `/blog/`.
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Retrieval path of the markdown document, relative to the content root.
    pub content: String,
    /// Display date, shown as written.
    pub date: String,
}

/// Ordered list of posts, newest first as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    posts: Vec<Blog>,
}

impl Catalog {
    /// Creates catalog from posts in display order.
    ///
    /// # Errors
    ///
    /// Returns error if a slug is empty, not a single path segment, or
    /// used by more than one post.
    pub fn new(posts: Vec<Blog>) -> Result<Self> {
        let mut seen = HashSet::new();
        for post in &posts {
            if !is_single_segment(&post.slug) {
                bail!("Invalid blog slug: {:?}", post.slug);
            }
            if !seen.insert(post.slug.as_str()) {
                bail!("Duplicate blog slug: {}", post.slug);
            }
        }

        Ok(Self { posts })
    }

    /// Loads catalog from a JSON array of posts.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or
    /// fails slug validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let posts: Vec<Blog> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        log::debug!("Loaded {} posts from {}", posts.len(), path.display());
        Self::new(posts)
    }

    pub fn posts(&self) -> &[Blog] {
        &self.posts
    }

    /// Finds the post with this slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Blog> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// First `limit` posts, or every post when `limit` is `None` or zero.
    pub fn latest(&self, limit: Option<usize>) -> &[Blog] {
        match limit {
            Some(n) if n > 0 => &self.posts[..n.min(self.posts.len())],
            _ => &self.posts,
        }
    }
}

/// Whether `slug` names exactly one ordinary directory under `blog/`.
fn is_single_segment(slug: &str) -> bool {
    if slug.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if *part == *slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn blog(slug: &str) -> Blog {
        Blog {
            slug: slug.to_string(),
            title: format!("Title {}", slug),
            excerpt: "Excerpt".to_string(),
            content: format!("/blogs/{}.md", slug),
            date: "Nov 3, 2025".to_string(),
        }
    }

    #[test]
    fn test_load_json_catalog() {
        // Arrange
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"slug":"optimizing-api","title":"Optimizing APIs","excerpt":"Faster services.","content":"/blogs/optimizing-api.md","date":"Nov 3, 2025"}}]"#
        )
        .unwrap();

        // Act
        let catalog = Catalog::load(file.path()).unwrap();

        // Assert
        assert_eq!(catalog.posts().len(), 1);
        let post = catalog.by_slug("optimizing-api").unwrap();
        assert_eq!(post.content, "/blogs/optimizing-api.md");
        assert_eq!(post.date, "Nov 3, 2025");
    }

    #[test]
    fn test_load_invalid_json() {
        // Arrange
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        // Act
        let result = Catalog::load(file.path());

        // Assert
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Failed to parse catalog"), "{}", err);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load("/nonexistent/blogs.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_by_slug_unknown() {
        let catalog = Catalog::new(vec![blog("a")]).unwrap();
        assert!(catalog.by_slug("b").is_none());
    }

    #[test]
    fn test_latest_limits() {
        // Arrange
        let catalog = Catalog::new(vec![blog("a"), blog("b"), blog("c")]).unwrap();

        // Act & Assert
        assert_eq!(catalog.latest(Some(2)).len(), 2);
        assert_eq!(catalog.latest(Some(2))[0].slug, "a");
        assert_eq!(catalog.latest(Some(10)).len(), 3);
        assert_eq!(catalog.latest(None).len(), 3);
        assert_eq!(catalog.latest(Some(0)).len(), 3);
    }

    #[test]
    fn test_rejects_bad_slugs() {
        assert!(Catalog::new(vec![blog("a"), blog("a")]).is_err());
        assert!(Catalog::new(vec![blog("")]).is_err());
        assert!(Catalog::new(vec![blog("a/b")]).is_err());
        assert!(Catalog::new(vec![blog("..")]).is_err());
        assert!(Catalog::new(vec![blog(".")]).is_err());
        assert!(Catalog::new(vec![blog("a\\b")]).is_err());
        assert!(Catalog::new(vec![blog("optimizing-api")]).is_ok());
    }
}
