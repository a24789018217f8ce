//! Canonical output filenames for exported posts.

use crate::models::Metadata;
use regex::Regex;
use std::sync::OnceLock;

static STRIP_REGEX: OnceLock<Regex> = OnceLock::new();

fn strip_regex() -> &'static Regex {
    // Everything that is not a word character, whitespace, Hangul
    // (syllables or jamo), or a hyphen is dropped.
    STRIP_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s가-힣ㄱ-ㅎㅏ-ㅣ\-]").unwrap())
}

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Derive the published filename for a post: `{date}-{title}.md`.
///
/// The date is the portion of `metadata["date"]` before any time component;
/// the title is sanitized and whitespace runs become single hyphens. Both
/// the export path and the delete/overwrite lookup must call this with the
/// same inputs, making it the single source of truth for naming.
///
/// # Example
///
/// ```
/// use inkpress_core::filename::format_filename;
/// use inkpress_core::models::{MetaValue, Metadata};
///
/// let mut metadata = Metadata::new();
/// metadata.insert("date", MetaValue::from("2024-01-02 10:00:00"));
///
/// assert_eq!(
///     format_filename("My Title!", &metadata),
///     "2024-01-02-My-Title.md"
/// );
/// ```
pub fn format_filename(title: &str, metadata: &Metadata) -> String {
    let date = metadata
        .get_str("date")
        .unwrap_or_default()
        .split(' ')
        .next()
        .unwrap_or_default();

    let stripped = strip_regex().replace_all(title, "");
    let hyphenated = whitespace_regex().replace_all(&stripped, "-");

    format!("{}-{}.md", date, hyphenated)
}
