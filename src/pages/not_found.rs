//! Page for posts that do not exist

use maud::Markup;

use crate::components::layout::{page_wrapper, stylesheets};
use crate::components::status::not_found;

/// Generates `404.html`, written at the output root.
pub fn generate(site_name: &str) -> Markup {
    page_wrapper(
        "Blog Not Found",
        site_name,
        &stylesheets(0),
        not_found("blog/index.html"),
    )
}
