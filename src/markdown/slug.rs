//! Heading anchor identifiers.

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_\s-]").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Derives an anchor id from heading text.
///
/// Lowercases, drops everything that is not a word character, whitespace or
/// hyphen, trims, then joins whitespace runs with single hyphens. Word
/// characters are ASCII letters, digits and `_`; accented letters are
/// dropped, so `Café` becomes `caf`.
///
/// Identical headings yield identical slugs; nothing here deduplicates.
///
/// # Examples
///
/// ```
/// use foliomark::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Caching: Config & Tips!"), "caching-config-tips");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    WHITESPACE
        .replace_all(stripped.trim(), "-")
        .into_owned()
}
