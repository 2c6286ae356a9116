//! Block level passes: fenced code, headings, quotes, lists, rules, paragraphs.

use maud::{Markup, PreEscaped, html};
use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;

use super::slug::slugify;
use super::tokens::{Extractions, is_block_token_line};
use crate::highlight::Highlighter;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,3}) (.*)$").expect("valid regex"));
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^> (.*)$").expect("valid regex"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*]\s+(.+)").expect("valid regex"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+(.+)").expect("valid regex"));
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^---$").expect("valid regex"));

pub(crate) const CODE_WRAPPER_CLASS: &str = "code-block-wrapper relative";
pub(crate) const COPY_BUTTON_CLASS: &str = "copy-btn absolute top-2 right-2 text-xs bg-slate-700/80 text-white px-2 py-1 rounded transition hover:bg-slate-600";
pub(crate) const COPY_LABEL: &str = "Copy";
pub(crate) const ROW_CLASS: &str = "table-row";
pub(crate) const LINE_NUMBER_CLASS: &str =
    "table-cell text-right select-none pr-4 text-slate-500 dark:text-slate-400";
pub(crate) const CODE_CELL_CLASS: &str = "table-cell";

const PRE_CLASS: &str =
    "border-l-4 shadow-md border-gray-400 dark:border-purple-400 overflow-x-auto my-6";
const CODE_CLASS: &str = "bg-slate-100 dark:bg-slate-900 text-slate-700 dark:text-slate-100 table border-separate border-spacing-x-2";
const H1_CLASS: &str = "font-poppins text-4xl font-bold mt-12 mb-6 scroll-mt-24";
const H2_CLASS: &str = "font-poppins text-3xl font-bold mt-10 mb-5 scroll-mt-24";
const H3_CLASS: &str = "font-poppins text-2xl font-bold mt-8 mb-4 scroll-mt-24";
const BLOCKQUOTE_CLASS: &str =
    "border-l-4 border-orange-400 dark:border-purple-400 pl-4 italic my-4 opacity-80";
const LIST_ITEM_CLASS: &str = "my-1";
const RULE_CLASS: &str = "my-8 border-slate-300 dark:border-slate-700";
const PARAGRAPH_OPEN: &str = "<p class=\"mb-4 leading-relaxed whitespace-pre-wrap\">";

/// Line prefixes that mark output of earlier block passes.
const BLOCK_PREFIXES: [&str; 9] = [
    "<h",
    "<pre",
    "<ul",
    "</ul",
    "<ol",
    "</ol",
    "<li",
    "<hr",
    "<blockquote",
];

/// Renders fenced code blocks and parks them in the block table.
///
/// The first line inside the fence is the language tag. Each highlighted
/// line becomes a numbered row so the copy behaviour can read code cells
/// without the gutter. The fence is replaced by its token on a line of its
/// own; an unterminated fence stays literal.
pub fn extract_fences(text: &str, highlighter: &Highlighter, tables: &mut Extractions) -> String {
    FENCE
        .replace_all(text, |caps: &Captures| {
            let inner = &caps[1];
            let (tag, body) = inner.split_once('\n').unwrap_or((inner, ""));
            let language = tag.trim();
            let code = trim_blank_edges(body);

            let block = code_block(language, code, highlighter);
            format!("\n{}\n", tables.push_block(block.into_string()))
        })
        .into_owned()
}

fn code_block(language: &str, code: &str, highlighter: &Highlighter) -> Markup {
    let source: Vec<&str> = code.split('\n').collect();
    let highlighted = if code.is_empty() {
        vec![String::new()]
    } else {
        highlighter.highlight_lines(code, language)
    };

    html! {
        div class=(CODE_WRAPPER_CLASS) {
            button type="button" class=(COPY_BUTTON_CLASS) { (COPY_LABEL) }
            pre class=(PRE_CLASS) {
                code class=(format!("hljs language-{} {}", language, CODE_CLASS)) {
                    @for (index, line) in highlighted.iter().enumerate() {
                        div class=(ROW_CLASS) {
                            span class=(LINE_NUMBER_CLASS) { (index + 1) }
                            span class=(CODE_CELL_CLASS) {
                                @if source.get(index).is_none_or(|s| s.is_empty()) {
                                    (PreEscaped("&nbsp;"))
                                } @else {
                                    (PreEscaped(line))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Drops blank lines before the code and all trailing whitespace.
///
/// Indentation of the first code line is kept.
fn trim_blank_edges(body: &str) -> &str {
    let mut start = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    body[start..].trim_end()
}

/// Turns `#`, `##` and `###` lines into anchored headings.
///
/// The anchor is the slug of the heading text, with inline code resolved to
/// its raw text first. Duplicate headings share an anchor.
pub fn headings(text: &str, tables: &Extractions) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let title = &caps[2];
            let id = slugify(&tables.resolve_raw(title));

            let markup = match caps[1].len() {
                1 => html! { h1 id=(id) class=(H1_CLASS) { (PreEscaped(title)) } },
                2 => html! { h2 id=(id) class=(H2_CLASS) { (PreEscaped(title)) } },
                _ => html! { h3 id=(id) class=(H3_CLASS) { (PreEscaped(title)) } },
            };
            markup.into_string()
        })
        .into_owned()
}

/// One blockquote per `> ` line; adjacent lines are not merged.
pub fn blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, |caps: &Captures| {
            html! { blockquote class=(BLOCKQUOTE_CLASS) { (PreEscaped(&caps[1])) } }.into_string()
        })
        .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self, indent: usize) -> String {
        let (tag, style) = match self {
            ListKind::Unordered => ("ul", "list-disc"),
            ListKind::Ordered => ("ol", "list-decimal"),
        };
        format!("<{} class=\"my-4 {} {}\">", tag, style, indent_class(indent))
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// Groups consecutive list lines into flat `<ul>`/`<ol>` containers.
///
/// Indentation only picks the margin class of the container opened by that
/// line; deeper items never produce nested lists.
pub fn lists(text: &str) -> String {
    let mut lines = Vec::new();
    let mut open: Option<ListKind> = None;

    for line in text.split('\n') {
        let item = UNORDERED_ITEM
            .captures(line)
            .map(|caps| (ListKind::Unordered, caps))
            .or_else(|| {
                ORDERED_ITEM
                    .captures(line)
                    .map(|caps| (ListKind::Ordered, caps))
            });

        match item {
            Some((kind, caps)) => {
                if open != Some(kind) {
                    if let Some(previous) = open {
                        lines.push(previous.close_tag().to_string());
                    }
                    lines.push(kind.open_tag(caps[1].chars().count()));
                    open = Some(kind);
                }
                lines.push(
                    html! { li class=(LIST_ITEM_CLASS) { (PreEscaped(&caps[2])) } }.into_string(),
                );
            }
            None => {
                if let Some(previous) = open.take() {
                    lines.push(previous.close_tag().to_string());
                }
                lines.push(line.to_string());
            }
        }
    }

    if let Some(previous) = open {
        lines.push(previous.close_tag().to_string());
    }

    lines.join("\n")
}

/// Margin class for a list indented by `indent` characters.
///
/// Two characters per step, capped at `ml-12`; odd widths land on the
/// half steps.
fn indent_class(indent: usize) -> String {
    if indent == 0 {
        return "ml-6".to_string();
    }
    let capped = indent.min(24);
    if capped % 2 == 0 {
        format!("ml-{}", capped / 2)
    } else {
        format!("ml-{}.5", capped / 2)
    }
}

/// Exact `---` lines become rules.
pub fn rules(text: &str) -> String {
    let rule = html! { hr class=(RULE_CLASS); }.into_string();
    RULE.replace_all(text, NoExpand(&rule)).into_owned()
}

/// Wraps runs of plain lines in paragraphs.
///
/// Blank lines end a paragraph and are dropped. Lines produced by block
/// passes, and code block tokens, end a paragraph and pass through trimmed.
/// Leading spaces and tabs of wrapped lines become non breaking spaces so
/// indentation survives HTML whitespace collapsing.
pub fn paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_paragraph = false;

    for raw in text.split('\n') {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if in_paragraph {
                out.push("</p>".to_string());
                in_paragraph = false;
            }
            continue;
        }

        if is_block_line(trimmed) {
            if in_paragraph {
                out.push("</p>".to_string());
                in_paragraph = false;
            }
            out.push(trimmed.to_string());
            continue;
        }

        if !in_paragraph {
            out.push(PARAGRAPH_OPEN.to_string());
            in_paragraph = true;
        }
        let indent = &raw[..raw.len() - raw.trim_start().len()];
        out.push(format!("{}{}", preserve_indent(indent), trimmed));
    }

    if in_paragraph {
        out.push("</p>".to_string());
    }

    out.join("\n")
}

fn is_block_line(trimmed: &str) -> bool {
    BLOCK_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
        || is_block_token_line(trimmed)
}

fn preserve_indent(indent: &str) -> String {
    indent
        .chars()
        .map(|c| match c {
            ' ' => "&nbsp;".to_string(),
            '\t' => "&nbsp;".repeat(4),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fence_replaced_by_token() {
        // Arrange
        let highlighter = Highlighter::default();
        let mut tables = Extractions::default();

        // Act
        let text = extract_fences("before\n```js\nconst a = 1;\n```\nafter", &highlighter, &mut tables);

        // Assert
        assert_eq!(tables.block_count(), 1);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "before");
        assert!(is_block_token_line(lines[2]), "{:?}", lines);
        assert!(!text.contains("const"), "Code must be extracted: {:?}", text);
    }

    #[test]
    fn test_unterminated_fence_literal() {
        // Arrange
        let highlighter = Highlighter::default();
        let mut tables = Extractions::default();

        // Act
        let text = extract_fences("```js\nno end", &highlighter, &mut tables);

        // Assert
        assert_eq!(text, "```js\nno end");
        assert_eq!(tables.block_count(), 0);
    }

    #[test]
    fn test_code_block_rows_numbered() {
        // Arrange
        let highlighter = Highlighter::default();

        // Act
        let html = code_block("py", "a = 1\n\nb = 2", &highlighter).into_string();

        // Assert
        assert_eq!(html.matches("<div class=\"table-row\">").count(), 3);
        assert!(html.contains(">1</span>"));
        assert!(html.contains(">3</span>"));
        assert!(html.contains("<span class=\"table-cell\">&nbsp;</span>"), "{}", html);
        assert!(html.contains("hljs language-py"));
        assert!(html.contains(">Copy</button>"));
    }

    #[test]
    fn test_empty_fence_has_single_blank_row() {
        // Arrange
        let highlighter = Highlighter::default();

        // Act
        let html = code_block("", "", &highlighter).into_string();

        // Assert
        assert_eq!(html.matches("<div class=\"table-row\">").count(), 1);
    }

    #[test]
    fn test_trim_blank_edges_keeps_indent() {
        assert_eq!(trim_blank_edges("\n  \n    indented\nnext\n\n  "), "    indented\nnext");
        assert_eq!(trim_blank_edges(""), "");
    }

    #[test]
    fn test_heading_levels_and_ids() {
        // Arrange
        let tables = Extractions::default();

        // Act
        let html = headings("# One\n## Two Words\n### Three!\n#### Four", &tables);

        // Assert
        let lines: Vec<&str> = html.split('\n').collect();
        assert!(lines[0].starts_with("<h1 id=\"one\""), "{}", lines[0]);
        assert!(lines[1].starts_with("<h2 id=\"two-words\""), "{}", lines[1]);
        assert!(lines[2].starts_with("<h3 id=\"three\""), "{}", lines[2]);
        assert_eq!(lines[3], "#### Four");
    }

    #[test]
    fn test_heading_requires_space() {
        let tables = Extractions::default();
        assert_eq!(headings("#hashtag", &tables), "#hashtag");
    }

    #[test]
    fn test_blockquote_per_line() {
        // Act
        let html = blockquotes("> one\n> two\nplain > not");

        // Assert
        assert_eq!(html.matches("<blockquote").count(), 2);
        assert!(html.ends_with("\nplain > not"));
    }

    #[test]
    fn test_unordered_list_grouped() {
        // Act
        let html = lists("- a\n- b\n- c\n\nafter");

        // Assert
        assert_eq!(
            html,
            "<ul class=\"my-4 list-disc ml-6\">\n\
             <li class=\"my-1\">a</li>\n\
             <li class=\"my-1\">b</li>\n\
             <li class=\"my-1\">c</li>\n\
             </ul>\n\
             \n\
             after"
        );
    }

    #[test]
    fn test_list_closed_by_adjacent_text_line() {
        // Act
        let html = lists("- a\n- b\n- c\nAfter line");

        // Assert
        assert_eq!(html.matches("<li").count(), 3);
        assert!(html.ends_with("</ul>\nAfter line"), "{}", html);
    }

    #[test]
    fn test_ordered_list_closed_at_end() {
        // Act
        let html = lists("1. first\n2. second");

        // Assert
        assert!(html.starts_with("<ol class=\"my-4 list-decimal ml-6\">"));
        assert!(html.ends_with("</ol>"));
        assert_eq!(html.matches("<li").count(), 2);
    }

    #[test]
    fn test_switching_kind_closes_previous_list() {
        // Act
        let html = lists("- a\n1. b");

        // Assert
        let lines: Vec<&str> = html.split('\n').collect();
        assert_eq!(lines[2], "</ul>");
        assert!(lines[3].starts_with("<ol"));
        assert_eq!(lines[5], "</ol>");
    }

    #[test]
    fn test_indented_items_stay_flat() {
        // Act
        let html = lists("- top\n    - nested");

        // Assert
        assert_eq!(html.matches("<ul").count(), 1, "{}", html);
        assert_eq!(html.matches("<li").count(), 2);
    }

    #[test]
    fn test_indent_class_mapping() {
        assert_eq!(indent_class(0), "ml-6");
        assert_eq!(indent_class(2), "ml-1");
        assert_eq!(indent_class(3), "ml-1.5");
        assert_eq!(indent_class(40), "ml-12");
    }

    #[test]
    fn test_rule_only_exact_line() {
        // Act
        let html = rules("---\n----\n --- ");

        // Assert
        assert!(html.starts_with("<hr class="), "{}", html);
        assert!(html.ends_with("\n----\n --- "));
    }

    #[test]
    fn test_plain_lines_wrapped_once() {
        assert_eq!(
            paragraphs("first line\nsecond line"),
            "<p class=\"mb-4 leading-relaxed whitespace-pre-wrap\">\nfirst line\nsecond line\n</p>"
        );
    }

    #[test]
    fn test_block_lines_not_wrapped() {
        // Act
        let html = paragraphs("text\n<h2 id=\"x\">X</h2>\nmore\n\nlast");

        // Assert
        let lines: Vec<&str> = html.split('\n').collect();
        assert_eq!(lines[2], "</p>");
        assert_eq!(lines[3], "<h2 id=\"x\">X</h2>");
        assert_eq!(html.matches("<p ").count(), 3);
    }

    #[test]
    fn test_indentation_preserved_as_nbsp() {
        // Act
        let html = paragraphs("  two\n\tone tab");

        // Assert
        assert!(html.contains("\n&nbsp;&nbsp;two\n"), "{}", html);
        assert!(html.contains("\n&nbsp;&nbsp;&nbsp;&nbsp;one tab\n"), "{}", html);
    }
}
