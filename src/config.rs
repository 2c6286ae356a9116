//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::CATALOG_FILE;
use crate::highlight::DEFAULT_THEME;

/// Command line configuration for Foliomark.
#[derive(Debug, Clone, Parser)]
#[command(name = "foliomark", version, about, long_about = None)]
pub struct Config {
    /// Content directory holding blogs.json and markdown posts
    #[arg(short, long, global = true, default_value = "content")]
    pub content: PathBuf,

    /// Output directory
    #[arg(short, long, global = true, default_value = "dist")]
    pub output: PathBuf,

    /// Site name
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Syntax highlighting theme (base16-ocean.dark, InspiredGitHub, etc.)
    #[arg(long, global = true, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Do not open the generated site in a browser
    #[arg(long, global = true)]
    pub no_open: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do; defaults to [`Command::Build`].
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Export the blog as a static site
    Build,

    /// Print the HTML a markdown file renders to
    Render {
        /// Markdown file
        file: PathBuf,
    },

    /// Copy a rendered code block to the system clipboard
    Copy {
        /// Markdown file
        file: PathBuf,

        /// Code block index, counting from 0
        #[arg(short, long, default_value_t = 0)]
        block: usize,
    },

    /// Check in-page links and heading ids of a markdown file
    Check {
        /// Markdown file
        file: PathBuf,

        /// Site origin used to tell internal links from external ones
        #[arg(long, default_value = "http://localhost")]
        origin: String,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Command to run, `build` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Build)
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the content directory or its catalog is missing for
    /// a build, or the input file is missing for other commands.
    pub fn validate(&self) -> Result<()> {
        match self.command() {
            Command::Build => {
                if !self.content.is_dir() {
                    bail!(
                        "Content directory does not exist: {}",
                        self.content.display()
                    );
                }
                if !self.catalog_path().is_file() {
                    bail!("Catalog not found: {}", self.catalog_path().display());
                }
            }
            Command::Render { file } | Command::Copy { file, .. } | Command::Check { file, .. } => {
                if !file.is_file() {
                    bail!("Markdown file does not exist: {}", file.display());
                }
            }
        }

        Ok(())
    }

    /// Path of `blogs.json` inside the content directory.
    pub fn catalog_path(&self) -> PathBuf {
        self.content.join(CATALOG_FILE)
    }

    /// Returns site name from configuration or content directory.
    ///
    /// # Errors
    ///
    /// Returns error if content path has no name component or contains invalid UTF8.
    pub fn site_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }

        let path = self
            .content
            .canonicalize()
            .unwrap_or_else(|_| self.content.clone());

        path.file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Cannot extract site name from path: {}", path.display()))
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(content: PathBuf) -> Config {
        Config {
            content,
            output: PathBuf::from("dist"),
            name: None,
            theme: DEFAULT_THEME.to_string(),
            no_open: true,
            command: None,
        }
    }

    #[test]
    fn test_parse_defaults() {
        // Act
        let config = Config::try_parse_from(["foliomark"]).unwrap();

        // Assert
        assert_eq!(config.content, PathBuf::from("content"));
        assert_eq!(config.output, PathBuf::from("dist"));
        assert_eq!(config.theme, "base16-ocean.dark");
        assert!(!config.no_open);
        assert_eq!(config.command(), Command::Build);
    }

    #[test]
    fn test_parse_copy_with_global_options() {
        // Act
        let config =
            Config::try_parse_from(["foliomark", "copy", "post.md", "--block", "2", "--no-open"])
                .unwrap();

        // Assert
        assert!(config.no_open);
        assert_eq!(
            config.command(),
            Command::Copy {
                file: PathBuf::from("post.md"),
                block: 2
            }
        );
    }

    #[test]
    fn test_parse_check_origin() {
        // Act
        let config = Config::try_parse_from([
            "foliomark",
            "check",
            "post.md",
            "--origin",
            "https://folio.dev",
        ])
        .unwrap();

        // Assert
        assert_eq!(
            config.command(),
            Command::Check {
                file: PathBuf::from("post.md"),
                origin: "https://folio.dev".to_string()
            }
        );
    }

    #[test]
    fn test_site_name_explicit() {
        // Arrange
        let mut config = config(PathBuf::from("."));
        config.name = Some("Folio".to_string());

        // Act
        let result = config.site_name();

        // Assert
        assert_eq!(result.unwrap(), "Folio");
    }

    #[test]
    fn test_site_name_from_directory() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("my-blog");
        fs::create_dir(&content).unwrap();

        // Act
        let name = config(content).site_name().unwrap();

        // Assert
        assert_eq!(name, "my-blog");
    }

    #[test]
    fn test_validate_build_requires_catalog() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let config = config(dir.path().to_path_buf());

        // Act
        let err = config.validate().unwrap_err();

        // Assert
        assert!(err.to_string().contains("Catalog not found"), "{}", err);
    }

    #[test]
    fn test_validate_build_ok() {
        // Arrange
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blogs.json"), "[]").unwrap();

        // Act
        let result = config(dir.path().to_path_buf()).validate();

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_missing_content_dir() {
        let result = config(PathBuf::from("/nonexistent/content")).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_render_missing_file() {
        // Arrange
        let mut config = config(PathBuf::from("."));
        config.command = Some(Command::Render {
            file: PathBuf::from("/nonexistent/post.md"),
        });

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err());
    }
}
