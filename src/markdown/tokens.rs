//! Placeholder tokens protecting extracted code from later passes.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Sentinels from the Unicode private use area. Markdown text never carries
/// them in practice, so tokens cannot be confused with document content.
const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

const BLOCK_TAG: &str = "CODE_BLOCK_";
const INLINE_TAG: &str = "INLINE_CODE_";

static BLOCK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}CODE_BLOCK_(\\d+)\u{E001}").expect("valid regex"));

static INLINE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}INLINE_CODE_(\\d+)\u{E001}").expect("valid regex"));

/// Inline code span pulled out of the working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineCode {
    /// Code text as written between the backticks.
    pub raw: String,
    /// Rendered `<code>` element.
    pub html: String,
}

/// Ordered extraction tables threaded through the render pipeline.
///
/// Token `n` of each kind refers to entry `n` of the matching table. Tables
/// live for a single render and are consumed by [`Extractions::restore`].
#[derive(Debug, Default)]
pub struct Extractions {
    code_blocks: Vec<String>,
    inline_codes: Vec<InlineCode>,
}

impl Extractions {
    /// Stores a rendered code block and returns its token.
    pub fn push_block(&mut self, html: String) -> String {
        self.code_blocks.push(html);
        token(BLOCK_TAG, self.code_blocks.len() - 1)
    }

    /// Stores an inline code span and returns its token.
    pub fn push_inline(&mut self, code: InlineCode) -> String {
        self.inline_codes.push(code);
        token(INLINE_TAG, self.inline_codes.len() - 1)
    }

    pub fn block_count(&self) -> usize {
        self.code_blocks.len()
    }

    pub fn inline_count(&self) -> usize {
        self.inline_codes.len()
    }

    /// Replaces inline tokens with the raw code they stand for.
    ///
    /// Used where plain text is needed before restoration, such as deriving
    /// heading anchors.
    pub fn resolve_raw(&self, text: &str) -> String {
        INLINE_TOKEN
            .replace_all(text, |caps: &Captures| {
                lookup(&caps[1], &self.inline_codes)
                    .map(|code| code.raw.clone())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Substitutes every token with its stored HTML, inline spans first.
    ///
    /// Each table entry is emitted once per token occurrence; since each
    /// token is inserted exactly once, every entry is restored exactly once.
    /// Unknown indices are left untouched.
    pub fn restore(self, text: &str) -> String {
        let text = INLINE_TOKEN.replace_all(text, |caps: &Captures| {
            lookup(&caps[1], &self.inline_codes)
                .map(|code| code.html.clone())
                .unwrap_or_else(|| caps[0].to_string())
        });

        BLOCK_TOKEN
            .replace_all(&text, |caps: &Captures| {
                lookup(&caps[1], &self.code_blocks)
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Whether a trimmed line is a code block token standing alone.
pub fn is_block_token_line(line: &str) -> bool {
    line.strip_prefix(OPEN)
        .is_some_and(|rest| rest.starts_with(BLOCK_TAG))
}

fn token(tag: &str, index: usize) -> String {
    format!("{OPEN}{tag}{index}{CLOSE}")
}

fn lookup<'t, T>(index: &str, table: &'t [T]) -> Option<&'t T> {
    index.parse::<usize>().ok().and_then(|i| table.get(i))
}
