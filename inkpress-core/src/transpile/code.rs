//! Code fence rewrites.

use super::TranspileContext;
use crate::assets::AssetCollector;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static FENCE_LANG: OnceLock<Regex> = OnceLock::new();

fn fence_lang() -> &'static Regex {
    FENCE_LANG.get_or_init(|| Regex::new(r"```([A-Z][a-zA-Z0-9#]*)").unwrap())
}

static QUOTED_FENCE: OnceLock<Regex> = OnceLock::new();

fn quoted_fence() -> &'static Regex {
    QUOTED_FENCE.get_or_init(|| Regex::new(r"(?ms)^(?:\s*>)+\s*```.*?```").unwrap())
}

static ESCAPED_ANGLE: OnceLock<Regex> = OnceLock::new();

fn escaped_angle() -> &'static Regex {
    ESCAPED_ANGLE.get_or_init(|| Regex::new(r"\\([<>])").unwrap())
}

static FENCE_BLOCK: OnceLock<Regex> = OnceLock::new();

fn fence_block() -> &'static Regex {
    FENCE_BLOCK.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap())
}

/// Lowercase a fence language tag that starts with an uppercase letter.
pub(super) fn lowercase_fence_langs(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    fence_lang()
        .replace_all(text, |c: &Captures| format!("```{}", c[1].to_lowercase()))
        .into_owned()
}

/// Inside block-quoted code fences, turn `\<` and `\>` back into plain
/// angle brackets.
pub(super) fn unescape_quoted_fences(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    quoted_fence()
        .replace_all(text, |c: &Captures| {
            escaped_angle().replace_all(&c[0], "$1").into_owned()
        })
        .into_owned()
}

/// Replace tabs with the configured number of spaces inside each fence,
/// leaving the fence delimiter lines themselves alone.
pub(super) fn tabs_to_spaces(
    text: &str,
    ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let spaces = " ".repeat(ctx.rules.tab_size);

    fence_block()
        .replace_all(text, |c: &Captures| {
            let lines: Vec<&str> = c[0].split('\n').collect();
            let last = lines.len().saturating_sub(1);
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 || i == last {
                        (*line).to_string()
                    } else {
                        line.replace('\t', &spaces)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .into_owned()
}
