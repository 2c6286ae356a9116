//! Structured read back of a rendered post.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::markdown::{
    CODE_CELL_CLASS, CODE_WRAPPER_CLASS, COPY_BUTTON_CLASS, LINE_NUMBER_CLASS, ROW_CLASS,
};

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?s)<div class="{}"><button type="button" class="{}">.*?</button>(.*?)</code></pre></div>"#,
        regex::escape(CODE_WRAPPER_CLASS),
        regex::escape(COPY_BUTTON_CLASS),
    ))
    .expect("valid regex")
});

static CODE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?s)<div class="{}"><span class="{}">(\d+)</span><span class="{}">(.*?)</span></div>"#,
        regex::escape(ROW_CLASS),
        regex::escape(LINE_NUMBER_CLASS),
        regex::escape(CODE_CELL_CLASS),
    ))
    .expect("valid regex")
});

static ANCHOR_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s[^>]*?href="([^"]*)""#).expect("valid regex"));

static HEADING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<h[1-6]\s[^>]*?id="([^"]*)""#).expect("valid regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// One numbered row of a rendered code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    /// Number shown in the gutter.
    pub number: usize,
    /// Displayed text of the code cell, markup stripped and entities decoded.
    pub code_text: String,
}

/// Rendered code block as the reader sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlockView {
    rows: Vec<CodeRow>,
}

impl CodeBlockView {
    pub fn rows(&self) -> &[CodeRow] {
        &self.rows
    }
}

/// A rendered post after it has been placed in a page.
///
/// Holds what the post render behaviours act on: code blocks in document
/// order (block `n` owns copy button `n`), anchor targets and heading ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountedPost {
    code_blocks: Vec<CodeBlockView>,
    anchors: Vec<String>,
    heading_ids: Vec<String>,
}

impl MountedPost {
    /// Reads code blocks, anchors and heading ids out of rendered HTML.
    pub fn mount(html: &str) -> Self {
        let code_blocks = CODE_BLOCK
            .captures_iter(html)
            .map(|block| CodeBlockView {
                rows: CODE_ROW
                    .captures_iter(&block[1])
                    .filter_map(|row| {
                        Some(CodeRow {
                            number: row[1].parse().ok()?,
                            code_text: text_content(&row[2]),
                        })
                    })
                    .collect(),
            })
            .collect();

        let anchors = ANCHOR_HREF
            .captures_iter(html)
            .map(|caps| html_escape::decode_html_entities(&caps[1]).into_owned())
            .collect();

        let heading_ids = HEADING_ID
            .captures_iter(html)
            .map(|caps| html_escape::decode_html_entities(&caps[1]).into_owned())
            .collect();

        Self {
            code_blocks,
            anchors,
            heading_ids,
        }
    }

    pub fn code_blocks(&self) -> &[CodeBlockView] {
        &self.code_blocks
    }

    /// Link targets in document order.
    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    pub fn heading_ids(&self) -> &[String] {
        &self.heading_ids
    }

    /// Whether an element with this id exists in the post.
    pub fn has_target(&self, id: &str) -> bool {
        self.heading_ids.iter().any(|h| h == id)
    }

    /// Heading ids used more than once, with their counts, in first use order.
    pub fn duplicate_ids(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for id in &self.heading_ids {
            *counts.entry(id.as_str()).or_default() += 1;
        }

        let mut duplicates: Vec<(&str, usize)> = Vec::new();
        for id in &self.heading_ids {
            let count = counts[id.as_str()];
            if count > 1 && !duplicates.iter().any(|(seen, _)| *seen == id.as_str()) {
                duplicates.push((id.as_str(), count));
            }
        }
        duplicates
    }
}

/// Visible text of an HTML snippet.
fn text_content(html: &str) -> String {
    let stripped = TAG.replace_all(html, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}
