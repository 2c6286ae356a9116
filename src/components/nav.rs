//! Back navigation component

use maud::{Markup, html};

/// Label of the link from a post back to the blog index.
pub const BACK_LABEL: &str = "Back to all posts";

/// Renders link back to the blog index
///
/// # Arguments
///
/// * `href`: Relative path to the blog index page
/// * `label`: Link text
pub fn back_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href) class="back-link flex items-center gap-2 text-sm font-medium text-orange-400 dark:text-purple-400 hover:opacity-70 transition-opacity" {
            span class="back-arrow" aria-hidden="true" { "←" }
            (label)
        }
    }
}
