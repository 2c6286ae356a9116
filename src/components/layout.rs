//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

/// Wraps page content with standard HTML structure
///
/// Provides DOCTYPE, head and container structure shared by every page.
/// The caller provides the page specific body content.
///
/// # Arguments
///
/// * `title`: Page title text
/// * `site_name`: Site name appended to the title
/// * `stylesheets`: CSS file paths to include, relative to the page
/// * `body`: Page specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, site_name: &str, stylesheets: &[String], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (site_name) }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                div class="container container-height px-6" {
                    (body)
                }
            }
        }
    }
}

/// Relative path from a page `depth` directories below the output root.
///
/// ```
/// use foliomark::components::layout::root_relative;
///
/// assert_eq!(root_relative(0, "assets/site.css"), "assets/site.css");
/// assert_eq!(root_relative(2, "assets/site.css"), "../../assets/site.css");
/// ```
pub fn root_relative(depth: usize, path: &str) -> String {
    format!("{}{}", "../".repeat(depth), path)
}

/// Stylesheets every page loads.
pub fn stylesheets(depth: usize) -> Vec<String> {
    vec![
        root_relative(depth, "assets/site.css"),
        root_relative(depth, "assets/markdown.css"),
    ]
}
