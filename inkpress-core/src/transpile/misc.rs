//! Bare-URL hyperlinking and highlight spans.

use super::TranspileContext;
use crate::assets::AssetCollector;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static BARE_URL: OnceLock<Regex> = OnceLock::new();

fn bare_url() -> &'static Regex {
    BARE_URL.get_or_init(|| Regex::new(r"https?://[^\s\]>]+").unwrap())
}

/// Wrap bare URLs in angle brackets. A URL already inside markdown link,
/// parenthesis, or angle-bracket syntax is left alone, which also makes
/// the rule idempotent.
pub(super) fn wrap_bare_urls(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for matched in bare_url().find_iter(text) {
        let preceding = text[..matched.start()].chars().next_back();
        if matches!(preceding, Some('[') | Some('(') | Some('<')) {
            continue;
        }

        out.push_str(&text[last..matched.start()]);
        out.push('<');
        out.push_str(matched.as_str());
        out.push('>');
        last = matched.end();
    }

    out.push_str(&text[last..]);
    out
}

static HIGHLIGHT: OnceLock<Regex> = OnceLock::new();

fn highlight() -> &'static Regex {
    HIGHLIGHT.get_or_init(|| Regex::new(r"==(.*?)==").unwrap())
}

/// `==text==` wrapped in the configured separator on both sides.
pub(super) fn convert_highlights(
    text: &str,
    ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let separator = &ctx.rules.highlight_separator;
    highlight()
        .replace_all(text, |c: &Captures| {
            format!("{}{}{}", separator, &c[1], separator)
        })
        .into_owned()
}
