//! Span level passes: inline code, emphasis, images and links.

use maud::{PreEscaped, html};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::tokens::{Extractions, InlineCode};

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid regex"));

static STRONG_EM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid regex"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static EM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("valid regex"));

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

const INLINE_CODE_CLASS: &str = "bg-slate-200 shadow-sm dark:bg-slate-800 px-1 py-0.5 rounded text-sm font-mono text-orange-600 dark:text-purple-400";
const STRONG_CLASS: &str = "font-semibold";
const EM_CLASS: &str = "italic";
const IMAGE_CLASS: &str = "max-w-full h-auto rounded-lg my-6 shadow-lg";
const LINK_CLASS: &str = "text-orange-400 dark:text-purple-400 hover:underline";

/// Moves single backtick spans into the inline table.
///
/// Content is escaped for `&`, `<` and `>` only; quotes stay as written.
pub fn extract_inline_code(text: &str, tables: &mut Extractions) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| {
            let raw = caps[1].to_string();
            let escaped = html_escape::encode_text(&raw);
            let html = html! {
                code class=(INLINE_CODE_CLASS) { (PreEscaped(&*escaped)) }
            }
            .into_string();

            tables.push_inline(InlineCode { raw, html })
        })
        .into_owned()
}

/// Bold and italic markers.
///
/// Triple asterisks are handled first so they nest as bold around italic
/// instead of interleaving the two closing tags.
pub fn emphasis(text: &str) -> String {
    let text = STRONG_EM.replace_all(text, |caps: &Captures| {
        html! {
            strong class=(STRONG_CLASS) { em class=(EM_CLASS) { (PreEscaped(&caps[1])) } }
        }
        .into_string()
    });
    let text = STRONG.replace_all(&text, |caps: &Captures| {
        html! { strong class=(STRONG_CLASS) { (PreEscaped(&caps[1])) } }.into_string()
    });
    EM.replace_all(&text, |caps: &Captures| {
        html! { em class=(EM_CLASS) { (PreEscaped(&caps[1])) } }.into_string()
    })
    .into_owned()
}

/// Images, then links.
///
/// Order matters: the link pattern also matches the tail of image syntax.
/// Links always open in a new tab without leaking the opener or referrer.
pub fn images_and_links(text: &str) -> String {
    let text = IMAGE.replace_all(text, |caps: &Captures| {
        html! { img src=(&caps[2]) alt=(&caps[1]) class=(IMAGE_CLASS); }.into_string()
    });

    LINK.replace_all(&text, |caps: &Captures| {
        html! {
            a href=(&caps[2]) class=(LINK_CLASS) target="_blank" rel="noopener noreferrer" {
                (PreEscaped(&caps[1]))
            }
        }
        .into_string()
    })
    .into_owned()
}
