//! Markdown rendering for blog posts.
//!
//! A small, purpose built renderer rather than a CommonMark implementation:
//! an ordered sequence of pattern passes over the document text, with code
//! extracted up front behind placeholder tokens so later passes cannot touch
//! it. Output is an HTML fragment styled with the site's utility classes.

mod blocks;
mod inline;
mod renderer;
mod slug;
mod tokens;

pub(crate) use blocks::{
    CODE_CELL_CLASS, CODE_WRAPPER_CLASS, COPY_BUTTON_CLASS, COPY_LABEL, LINE_NUMBER_CLASS,
    ROW_CLASS,
};
pub use renderer::MarkdownRenderer;
pub use slug::slugify;
