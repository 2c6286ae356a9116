//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

const SITE: &str = include_str!("../assets/site.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Stylesheet file names written by [`write_css_assets`].
pub const STYLESHEETS: [&str; 2] = ["site.css", "markdown.css"];

/// Writes all bundled CSS assets to output directory
pub fn write_css_assets(assets_dir: &Path) -> Result<()> {
    fs::create_dir_all(assets_dir).with_context(|| {
        format!(
            "Failed to create assets directory: {}",
            assets_dir.display()
        )
    })?;

    for (name, css) in STYLESHEETS.iter().zip([SITE, MARKDOWN]) {
        fs::write(assets_dir.join(name), css)
            .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    }
    Ok(())
}
