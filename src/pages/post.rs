//! Post page generation

use maud::{Markup, PreEscaped, html};

use crate::catalog::Blog;
use crate::components::layout::{page_wrapper, stylesheets};
use crate::components::nav::{BACK_LABEL, back_link};
use crate::components::status::load_error;
use crate::markdown::MarkdownRenderer;
use crate::source::ContentRoot;

/// Directory depth of `blog/<slug>/index.html` below the output root.
const DEPTH: usize = 2;

const INDEX_HREF: &str = "../index.html";

/// Body of a post: its rendered document, or why it could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Article {
    Rendered(String),
    LoadError(String),
}

impl Article {
    /// Fetches and renders the post's document.
    ///
    /// A fetch failure is logged and kept as the message for the error
    /// panel. There is no retry.
    pub fn load(blog: &Blog, content: &ContentRoot, renderer: &MarkdownRenderer) -> Self {
        match content.fetch(&blog.content) {
            Ok(markdown) => Self::Rendered(renderer.render(&markdown)),
            Err(e) => {
                log::warn!("Failed to load post {}: {:#}", blog.slug, e);
                Self::LoadError(format!("{:#}", e))
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Generates a post page
///
/// Layout top to bottom: back link, header with title, date and excerpt,
/// a rule, the article or error panel, and a footer back link.
///
/// # Arguments
///
/// * `blog`: Post metadata
/// * `article`: Rendered document or load error
/// * `site_name`: Site name used in the title
///
/// # Returns
///
/// Complete HTML document
pub fn generate(blog: &Blog, article: &Article, site_name: &str) -> Markup {
    let body = html! {
        div class="mb-8" {
            (back_link(INDEX_HREF, BACK_LABEL))
        }

        header class="post-header mb-12" {
            h1 class="text-4xl lg:text-5xl font-bold mb-4" { (blog.title) }
            div class="flex items-center gap-2 text-sm opacity-60" {
                time { (blog.date) }
            }
            p class="text-lg opacity-70 mt-6" { (blog.excerpt) }
        }

        hr class="my-8 border-slate-300 dark:border-slate-700";

        @match article {
            Article::Rendered(html) => {
                article class="markdown-body prose max-w-none" {
                    (PreEscaped(html))
                }
            }
            Article::LoadError(message) => {
                (load_error(message))
            }
        }

        footer class="post-footer mt-16 pt-8 border-t border-slate-300 dark:border-slate-700" {
            (back_link(INDEX_HREF, BACK_LABEL))
        }
    };

    page_wrapper(&blog.title, site_name, &stylesheets(DEPTH), body)
}
