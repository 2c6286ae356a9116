//! Error and not found panels

use maud::{Markup, html};

use super::nav::back_link;

/// Panel shown in place of an article whose document could not be loaded.
pub fn load_error(message: &str) -> Markup {
    html! {
        div class="error-panel p-6 bg-red-50 dark:bg-red-900/20 rounded-lg border border-red-200 dark:border-red-800" {
            p class="text-red-600 dark:text-red-400 font-medium" { "Error loading blog post" }
            p class="text-sm text-red-500 dark:text-red-300 mt-2" { (message) }
        }
    }
}

/// Body of the page for an unknown post.
///
/// # Arguments
///
/// * `index_href`: Relative path to the blog index page
pub fn not_found(index_href: &str) -> Markup {
    html! {
        div class="not-found flex flex-col items-center justify-center" {
            h1 class="text-4xl font-bold mb-4" { "Blog Not Found" }
            p class="text-lg opacity-70 mb-8" { "The blog post you're looking for doesn't exist." }
            (back_link(index_href, "Back to Blogs"))
        }
    }
}
