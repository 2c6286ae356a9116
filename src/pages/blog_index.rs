//! Blog index page listing every post

use maud::{Markup, html};

use crate::catalog::Blog;
use crate::components::layout::{page_wrapper, stylesheets};

/// Directory depth of `blog/index.html` below the output root.
const DEPTH: usize = 1;

/// Generates the blog index page
///
/// Lists posts in catalog order with date, title and excerpt, each linking
/// to its post page.
///
/// # Arguments
///
/// * `posts`: Posts to list, in display order
/// * `site_name`: Site name used in the title and intro
///
/// # Returns
///
/// Complete HTML document
pub fn generate(posts: &[Blog], site_name: &str) -> Markup {
    let body = html! {
        section class="blog-intro" {
            div class="eyebrow flex items-center gap-2 mb-4 text-orange-400 dark:text-purple-400" {
                span class="font-medium uppercase tracking-widest" { (site_name) }
            }
            h1 class="title-text mb-4 lg:mb-6" { "Thoughts & Articles" }
            p class="sub-desc-text max-w-2xl opacity-50 mb-16" {
                "My personal space for insights, experiments, and reflections on code, design, and productivity."
            }
        }

        @if posts.is_empty() {
            p class="empty-state" { "No posts yet" }
        } @else {
            div class="post-grid grid gap-8 sm:grid-cols-2 lg:grid-cols-3" {
                @for post in posts {
                    a href=(format!("{}/index.html", post.slug)) class="post-card" {
                        article class="p-6 border border-transparent rounded-2xl" {
                            time class="block text-sm opacity-50 mb-2" { (post.date) }
                            h2 class="text-lg font-semibold mb-3" { (post.title) }
                            p class="text-sm opacity-70" { (post.excerpt) }
                        }
                    }
                }
            }
        }
    };

    page_wrapper("Blog", site_name, &stylesheets(DEPTH), body)
}
