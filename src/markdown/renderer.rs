//! Ordered markdown to HTML pipeline.

use super::tokens::Extractions;
use super::{blocks, inline};
use crate::highlight::Highlighter;

/// State threaded through every pass of a single render.
struct RenderContext<'a> {
    highlighter: &'a Highlighter,
    tables: Extractions,
}

/// One text to text transformation.
type Pass = fn(&str, &mut RenderContext<'_>) -> String;

/// Passes in application order. Code is extracted before anything else so
/// no later pattern sees it; images run before links because the link
/// pattern also matches the tail of image syntax.
const PASSES: [(&str, Pass); 9] = [
    ("fenced code", fenced_code),
    ("inline code", inline_code),
    ("headings", headings),
    ("emphasis", emphasis),
    ("images and links", images_and_links),
    ("blockquotes", blockquotes),
    ("lists", lists),
    ("rules", rules),
    ("paragraphs", paragraphs),
];

fn fenced_code(text: &str, cx: &mut RenderContext<'_>) -> String {
    blocks::extract_fences(text, cx.highlighter, &mut cx.tables)
}

fn inline_code(text: &str, cx: &mut RenderContext<'_>) -> String {
    inline::extract_inline_code(text, &mut cx.tables)
}

fn headings(text: &str, cx: &mut RenderContext<'_>) -> String {
    blocks::headings(text, &cx.tables)
}

fn emphasis(text: &str, _: &mut RenderContext<'_>) -> String {
    inline::emphasis(text)
}

fn images_and_links(text: &str, _: &mut RenderContext<'_>) -> String {
    inline::images_and_links(text)
}

fn blockquotes(text: &str, _: &mut RenderContext<'_>) -> String {
    blocks::blockquotes(text)
}

fn lists(text: &str, _: &mut RenderContext<'_>) -> String {
    blocks::lists(text)
}

fn rules(text: &str, _: &mut RenderContext<'_>) -> String {
    blocks::rules(text)
}

fn paragraphs(text: &str, _: &mut RenderContext<'_>) -> String {
    blocks::paragraphs(text)
}

/// Renders blog markdown to an HTML fragment.
///
/// Supports fenced code blocks with highlighting and line numbers, inline
/// code, `#` to `###` headings with slug anchors, bold and italic, images,
/// links, single line blockquotes, flat ordered and unordered lists,
/// horizontal rules and paragraphs. Anything else, including malformed
/// syntax, passes through as text. Raw HTML in the source is not escaped.
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    /// Creates renderer with the default highlight theme.
    pub fn new() -> Self {
        Self::with_highlighter(Highlighter::default())
    }

    /// Creates renderer using the given highlighter for code blocks.
    pub fn with_highlighter(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }

    /// Renders markdown content to an HTML fragment.
    ///
    /// Pure function of the input: the same document always yields the same
    /// fragment. Windows line endings are normalised first. Never fails;
    /// highlighting problems degrade to plain code.
    ///
    /// # Examples
    ///
    /// ```
    /// use foliomark::MarkdownRenderer;
    ///
    /// let html = MarkdownRenderer::new().render("# Hello World");
    /// assert!(html.contains("id=\"hello-world\""));
    /// ```
    pub fn render(&self, content: &str) -> String {
        let mut cx = RenderContext {
            highlighter: &self.highlighter,
            tables: Extractions::default(),
        };

        let mut text = content.replace("\r\n", "\n");
        for (name, pass) in PASSES {
            text = pass(&text, &mut cx);
            log::trace!("markdown pass {}: {} bytes", name, text.len());
        }

        log::debug!(
            "Restoring {} code blocks and {} inline code spans",
            cx.tables.block_count(),
            cx.tables.inline_count()
        );
        cx.tables.restore(&text)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
