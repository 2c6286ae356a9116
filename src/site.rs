//! Static export of the blog.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::write_css_assets;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::highlight::Highlighter;
use crate::markdown::MarkdownRenderer;
use crate::pages;
use crate::pages::post::Article;
use crate::source::ContentRoot;

/// Summary of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Blog index page, the page to open after a build.
    pub index: PathBuf,
    /// Post pages written, in catalog order.
    pub posts: Vec<PathBuf>,
    /// Slugs of posts whose document failed to load.
    pub failed: Vec<String>,
}

/// Writes the whole site into the configured output directory.
///
/// Layout:
///
/// ```text
/// dist/
///   404.html
///   assets/site.css
///   assets/markdown.css
///   blog/index.html
///   blog/<slug>/index.html
/// ```
///
/// A post whose document cannot be loaded still gets a page, with an error
/// panel in place of the article.
///
/// # Errors
///
/// Returns error if the catalog cannot be loaded, the theme is unknown, or
/// any output file cannot be written.
pub fn build(config: &Config) -> Result<BuildReport> {
    let site_name = config.site_name()?;
    let catalog = Catalog::load(config.catalog_path()).context("Failed to load blog catalog")?;
    let highlighter = Highlighter::with_theme(&config.theme)
        .with_context(|| format!("Failed to create syntax highlighter with theme: {}", config.theme))?;
    let renderer = MarkdownRenderer::with_highlighter(highlighter);
    let content = ContentRoot::new(&config.content);

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;
    write_css_assets(&config.output.join("assets"))?;

    let blog_dir = config.output.join("blog");
    let index = blog_dir.join("index.html");
    write_page(
        &index,
        pages::blog_index::generate(catalog.posts(), &site_name).into_string(),
    )?;

    let mut posts = Vec::with_capacity(catalog.posts().len());
    let mut failed = Vec::new();
    for blog in catalog.posts() {
        let article = Article::load(blog, &content, &renderer);
        if !article.is_loaded() {
            failed.push(blog.slug.clone());
        }

        let page = blog_dir.join(&blog.slug).join("index.html");
        write_page(
            &page,
            pages::post::generate(blog, &article, &site_name).into_string(),
        )?;
        log::debug!("Generated post page: {}", page.display());
        posts.push(page);
    }

    write_page(
        &config.output.join("404.html"),
        pages::not_found::generate(&site_name).into_string(),
    )?;

    log::info!(
        "Generated {} posts into {} ({} failed to load)",
        posts.len(),
        config.output.display(),
        failed.len()
    );

    Ok(BuildReport {
        index,
        posts,
        failed,
    })
}

fn write_page(path: &Path, html: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write page: {}", path.display()))
}
