//! Callout header rewrites.

use super::TranspileContext;
use crate::assets::AssetCollector;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static EMPTY_TITLE: OnceLock<Regex> = OnceLock::new();

fn empty_title() -> &'static Regex {
    EMPTY_TITLE.get_or_init(|| Regex::new(r"(?m)^((?:\s*>)+\s*)\[!(\w+)\]\s*$").unwrap())
}

static EMPTY_TITLE_COLLAPSED: OnceLock<Regex> = OnceLock::new();

fn empty_title_collapsed() -> &'static Regex {
    EMPTY_TITLE_COLLAPSED.get_or_init(|| Regex::new(r"(?m)^((?:\s*>)+\s*)\[!(\w+)\]-\s*$").unwrap())
}

static TITLED_COLLAPSED: OnceLock<Regex> = OnceLock::new();

fn titled_collapsed() -> &'static Regex {
    TITLED_COLLAPSED.get_or_init(|| Regex::new(r"> \[!(\w+)\]-\s+(.+)").unwrap())
}

static TITLED: OnceLock<Regex> = OnceLock::new();

fn titled() -> &'static Regex {
    TITLED.get_or_init(|| Regex::new(r"> \[!(\w+)\]\s+(.+)").unwrap())
}

/// Fill `[!type]` headers that carry no title with the type name,
/// preserving the quote-marker indentation and the collapse marker.
pub(super) fn fill_empty_titles(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let text = empty_title().replace_all(text, |c: &Captures| {
        format!("{}[!{}] {}", &c[1], &c[2], &c[2])
    });
    empty_title_collapsed()
        .replace_all(&text, |c: &Captures| {
            format!("{}[!{}]- {}", &c[1], &c[2], &c[2])
        })
        .into_owned()
}

/// Append the configured separator after a callout title so the target
/// theme can split type from title. Collapsible headers first; the plain
/// pattern cannot re-match them because of the collapse marker.
pub(super) fn append_title_separator(
    text: &str,
    ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let separator = &ctx.rules.callout_title_separator;

    let text = titled_collapsed().replace_all(text, |c: &Captures| {
        format!("> [!{}]- {}{}", &c[1], &c[2], separator)
    });
    titled()
        .replace_all(&text, |c: &Captures| {
            format!("> [!{}] {}{}", &c[1], &c[2], separator)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;
    use crate::config::RulesConfig;

    fn auto_title(text: &str) -> String {
        let rules = RulesConfig::disabled();
        let ctx = context(&rules);
        fill_empty_titles(text, &ctx, &mut AssetCollector::new())
    }

    fn separator(text: &str) -> String {
        let rules = RulesConfig::disabled();
        let ctx = context(&rules);
        append_title_separator(text, &ctx, &mut AssetCollector::new())
    }

    #[test]
    fn test_empty_title_filled_with_type() {
        assert_eq!(auto_title("> [!note]"), "> [!note] note");
    }

    #[test]
    fn test_empty_title_collapsed() {
        assert_eq!(auto_title("> [!note]-"), "> [!note]- note");
    }

    #[test]
    fn test_nested_quote_indentation_preserved() {
        assert_eq!(auto_title("> > [!tip]"), "> > [!tip] tip");
    }

    #[test]
    fn test_titled_callout_untouched_by_auto_title() {
        assert_eq!(auto_title("> [!note] Already titled"), "> [!note] Already titled");
    }

    #[test]
    fn test_separator_appended() {
        assert_eq!(separator("> [!note] My Title"), "> [!note] My Title{title}");
    }

    #[test]
    fn test_separator_appended_collapsed() {
        assert_eq!(
            separator("> [!warning]- Collapsed"),
            "> [!warning]- Collapsed{title}"
        );
    }

    #[test]
    fn test_auto_title_then_separator() {
        let filled = auto_title("> [!note]");
        assert_eq!(separator(&filled), "> [!note] note{title}");
    }

    #[test]
    fn test_body_lines_untouched() {
        let text = "> [!note] Title\n> body line";
        assert_eq!(separator(text), "> [!note] Title{title}\n> body line");
    }
}
