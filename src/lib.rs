//! Portfolio blog renderer: markdown to static HTML pages.

mod assets;
pub mod behaviors;
mod catalog;
pub mod components;
mod config;
mod highlight;
mod markdown;
pub mod pages;
pub mod site;
mod source;

pub use assets::write_css_assets;
pub use behaviors::{
    Clipboard, CodeBlockView, CopyOutcome, LinkAction, LinkInterceptor, MountedNavigator,
    MountedPost, Navigator, PostBindings, SystemClipboard, copy_payload,
};
pub use catalog::{Blog, CATALOG_FILE, Catalog};
pub use config::{Command, Config};
pub use highlight::{DEFAULT_THEME, Highlighter};
pub use markdown::{MarkdownRenderer, slugify};
pub use site::{BuildReport, build};
pub use source::ContentRoot;
