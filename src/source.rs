//! Document retrieval from the content directory.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directory holding `blogs.json` and the markdown documents it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a retrieval path such as `/blogs/post.md` under the root.
    ///
    /// # Errors
    ///
    /// Returns error if the path is empty or would leave the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        let mut depth = 0usize;

        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir if depth > 0 => {
                    resolved.pop();
                    depth -= 1;
                }
                _ => bail!("Document path escapes content root: {}", path),
            }
        }

        if depth == 0 {
            bail!("Empty document path: {:?}", path);
        }

        Ok(resolved)
    }

    /// Reads a markdown document as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns error if the path is rejected, the file cannot be read, or it
    /// is not valid UTF-8.
    pub fn fetch(&self, path: &str) -> Result<String> {
        let file = self.resolve(path)?;
        let bytes =
            fs::read(&file).with_context(|| format!("Failed to read document: {}", path))?;

        String::from_utf8(bytes).with_context(|| format!("Document contains invalid UTF8: {}", path))
    }
}
