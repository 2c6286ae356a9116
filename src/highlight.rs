//! Syntax highlighting for fenced code blocks.

use anyhow::{Context, Result, bail};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Fence tags with no syntax in syntect's default set, mapped to the
/// closest one that exists.
const LANGUAGE_ALIASES: [(&str, &str); 7] = [
    ("ts", "js"),
    ("tsx", "js"),
    ("typescript", "js"),
    ("jsx", "js"),
    ("mjs", "js"),
    ("shell", "bash"),
    ("zsh", "bash"),
];

/// Line oriented syntax highlighter backed by syntect.
///
/// Every line is highlighted into a self contained HTML string with inline
/// styles. Parser state carries across lines, so multi line constructs such as
/// block comments keep their colour, but no span is left open at a line end.
/// Callers can therefore place each line into its own table row.
#[derive(Clone)]
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Creates highlighter with the named syntect theme.
    ///
    /// # Errors
    ///
    /// Returns error if the theme is not among syntect's bundled themes.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foliomark::Highlighter;
    ///
    /// let highlighter = Highlighter::with_theme("InspiredGitHub")?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn with_theme(name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults().themes;

        let Some(theme) = themes.remove(name) else {
            let available: Vec<&str> = themes.keys().map(String::as_str).collect();
            bail!(
                "Unknown highlight theme: {} (available: {})",
                name,
                available.join(", ")
            );
        };

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlights code and returns one HTML string per source line.
    ///
    /// The language tag is matched against syntax names and file extensions.
    /// An empty or unknown tag falls back to first line detection (shebangs,
    /// XML prologs and the like), then to plain text. Errors from syntect are
    /// logged and degrade to escaped plain lines, so this never fails.
    ///
    /// # Arguments
    ///
    /// * `code`: Source code without the fence lines
    /// * `language`: Language tag from the opening fence (may be empty)
    pub fn highlight_lines(&self, code: &str, language: &str) -> Vec<String> {
        let syntax = self.resolve_syntax(code, language);

        match self.highlight_with(code, syntax) {
            Ok(lines) => lines,
            Err(e) => {
                log::warn!(
                    "Highlighting failed for language {:?}, using plain text: {:#}",
                    language,
                    e
                );
                plain_lines(code)
            }
        }
    }

    /// Returns theme names accepted by [`Highlighter::with_theme`].
    pub fn available_themes() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }

    fn resolve_syntax(&self, code: &str, language: &str) -> &SyntaxReference {
        let by_token = (!language.is_empty())
            .then(|| {
                self.syntax_set
                    .find_syntax_by_token(language)
                    .or_else(|| self.syntax_set.find_syntax_by_token(alias(language)?))
            })
            .flatten();

        by_token
            .or_else(|| {
                code.lines()
                    .next()
                    .and_then(|first| self.syntax_set.find_syntax_by_first_line(first))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn highlight_with(&self, code: &str, syntax: &SyntaxReference) -> Result<Vec<String>> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntax_set)
                .context("Failed to highlight line")?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
                .context("Failed to convert highlighted line to HTML")?;

            lines.push(strip_line_ending(&html));
        }

        Ok(lines)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: ThemeSet::load_defaults()
                .themes
                .remove(DEFAULT_THEME)
                .unwrap_or_default(),
        }
    }
}

fn alias(language: &str) -> Option<&'static str> {
    let language = language.to_ascii_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(tag, _)| *tag == language)
        .map(|(_, target)| *target)
}

/// Escaped, unstyled lines for the fallback path.
fn plain_lines(code: &str) -> Vec<String> {
    code.lines()
        .map(|line| html_escape::encode_text(line).into_owned())
        .collect()
}

fn strip_line_ending(html: &str) -> String {
    html.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
