//! Math span rewrites for the target theme's renderer.
//!
//! Display spans are handled before inline spans wherever both patterns
//! could apply, so the inline pattern never truncates a display span at
//! its first lone `$`.

use super::TranspileContext;
use crate::assets::AssetCollector;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static INLINE_SPAN: OnceLock<Regex> = OnceLock::new();

fn inline_span() -> &'static Regex {
    INLINE_SPAN.get_or_init(|| Regex::new(r"\$.*?\$").unwrap())
}

static DISPLAY_SPAN: OnceLock<Regex> = OnceLock::new();

fn display_span() -> &'static Regex {
    DISPLAY_SPAN.get_or_init(|| Regex::new(r"\$\$.*?\$\$").unwrap())
}

static DOUBLE_BRACE: OnceLock<Regex> = OnceLock::new();

fn double_brace() -> &'static Regex {
    DOUBLE_BRACE.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").unwrap())
}

/// Wrap `{{..}}` groups inside math spans in raw-output escapes so the
/// templating engine does not expand them.
pub(super) fn wrap_raw_tags(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let text = inline_span().replace_all(text, |c: &Captures| wrap_braces(&c[0]));
    display_span()
        .replace_all(&text, |c: &Captures| wrap_braces(&c[0]))
        .into_owned()
}

fn wrap_braces(span: &str) -> String {
    double_brace()
        .replace_all(span, |c: &Captures| {
            format!("{{% raw %}}{{{{{}}}}}{{% endraw %}}", &c[1])
        })
        .into_owned()
}

static MATRIX_ENV: OnceLock<Regex> = OnceLock::new();

fn matrix_env() -> &'static Regex {
    MATRIX_ENV.get_or_init(|| Regex::new(r"(?s)matrix\}.*?\\end\{").unwrap())
}

static TIGHT_BREAK: OnceLock<Regex> = OnceLock::new();

fn tight_break() -> &'static Regex {
    TIGHT_BREAK.get_or_init(|| Regex::new(r"(\S)\\\\(\S)").unwrap())
}

/// Inside `matrix..\end{` environments, put a space on both sides of a
/// `\\` line break that touches non-space characters.
pub(super) fn space_matrix_breaks(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    matrix_env()
        .replace_all(text, |c: &Captures| {
            tight_break()
                .replace_all(&c[0], |b: &Captures| format!("{} \\\\ {}", &b[1], &b[2]))
                .into_owned()
        })
        .into_owned()
}

const BIG_OPS: &str = "sum|int|prod|coprod|bigcup|bigcap|bigoplus|bigotimes|bigsqcup";

static SCRIPTS_BOTH_BRACED: OnceLock<Regex> = OnceLock::new();

fn scripts_both_braced() -> &'static Regex {
    SCRIPTS_BOTH_BRACED.get_or_init(|| {
        Regex::new(&format!(r"\\({BIG_OPS})\^\{{([^}}]*)\}}_\{{([^}}]*)\}}")).unwrap()
    })
}

static SCRIPTS_UPPER_BARE: OnceLock<Regex> = OnceLock::new();

fn scripts_upper_bare() -> &'static Regex {
    SCRIPTS_UPPER_BARE.get_or_init(|| {
        Regex::new(&format!(r"\\({BIG_OPS})\^([^{{}}_\s]+)_\{{([^}}]*)\}}")).unwrap()
    })
}

static SCRIPTS_LOWER_BARE: OnceLock<Regex> = OnceLock::new();

fn scripts_lower_bare() -> &'static Regex {
    SCRIPTS_LOWER_BARE.get_or_init(|| {
        Regex::new(&format!(r"\\({BIG_OPS})\^\{{([^}}]*)\}}_([^{{}}_\s]+)")).unwrap()
    })
}

static SCRIPTS_BOTH_BARE: OnceLock<Regex> = OnceLock::new();

fn scripts_both_bare() -> &'static Regex {
    SCRIPTS_BOTH_BARE.get_or_init(|| {
        Regex::new(&format!(r"\\({BIG_OPS})\^([^{{}}_\s]+)_([^{{}}_\s]+)")).unwrap()
    })
}

/// Rewrite `\sum^upper_lower` into `\sum_lower^upper` for the big-operator
/// commands, one pass per braced/unbraced combination. Each argument keeps
/// its original braced-or-bare spelling.
pub(super) fn reorder_scripts(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let text = scripts_both_braced().replace_all(text, |c: &Captures| {
        format!("\\{}_{{{}}}^{{{}}}", &c[1], &c[3], &c[2])
    });
    let text = scripts_upper_bare().replace_all(&text, |c: &Captures| {
        format!("\\{}_{{{}}}^{}", &c[1], &c[3], &c[2])
    });
    let text = scripts_lower_bare().replace_all(&text, |c: &Captures| {
        format!("\\{}_{}^{{{}}}", &c[1], &c[3], &c[2])
    });
    scripts_both_bare()
        .replace_all(&text, |c: &Captures| {
            format!("\\{}_{}^{}", &c[1], &c[3], &c[2])
        })
        .into_owned()
}

static LIST_MATH: OnceLock<Regex> = OnceLock::new();

fn list_math() -> &'static Regex {
    LIST_MATH.get_or_init(|| {
        Regex::new(r"(?m)^(\s*(?:>+\s*)*(?:[-*]|\d+\.)\s+)(\${1,2}[^$]*?\${1,2})(\s*)$").unwrap()
    })
}

/// A list item whose content is exactly one math span gets a backslash in
/// front of the span. Already escaped lines start with `\$` and never
/// match the pattern in the first place.
pub(super) fn escape_list_math(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    list_math()
        .replace_all(text, |c: &Captures| {
            format!("{}\\{}{}", &c[1], &c[2], &c[3])
        })
        .into_owned()
}

static PIPE_DISPLAY: OnceLock<Regex> = OnceLock::new();

fn pipe_display() -> &'static Regex {
    PIPE_DISPLAY.get_or_init(|| Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap())
}

static PIPE_INLINE: OnceLock<Regex> = OnceLock::new();

fn pipe_inline() -> &'static Regex {
    PIPE_INLINE.get_or_init(|| Regex::new(r"\$(.*?)\$").unwrap())
}

/// Replace unescaped, non-doubled pipes inside math spans with `\mid`.
pub(super) fn convert_pipes(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let text = pipe_display().replace_all(text, |c: &Captures| {
        format!("$${}$$", replace_mid(&c[1]))
    });
    pipe_inline()
        .replace_all(&text, |c: &Captures| format!("${}$", replace_mid(&c[1])))
        .into_owned()
}

/// `|` → `\mid`, skipping escaped pipes and both pipes of a doubled pair.
/// A space follows `\mid` when the next character would otherwise touch it.
fn replace_mid(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch != '|' {
            out.push(ch);
            continue;
        }

        let prev = if i > 0 { chars.get(i - 1) } else { None };
        let next = chars.get(i + 1);
        let escaped = prev == Some(&'\\');
        let doubled = prev == Some(&'|') || next == Some(&'|');

        if escaped || doubled {
            out.push('|');
        } else {
            out.push_str("\\mid");
            if next.is_some_and(|n| !n.is_whitespace()) {
                out.push(' ');
            }
        }
    }

    out
}

static ADJACENT_DISPLAY: OnceLock<Regex> = OnceLock::new();

fn adjacent_display() -> &'static Regex {
    ADJACENT_DISPLAY.get_or_init(|| Regex::new(r"(?s)\$\$(.*?)\$\$\$\$(.*?)\$\$").unwrap())
}

static DISPLAY_BLOCK: OnceLock<Regex> = OnceLock::new();

fn display_block() -> &'static Regex {
    DISPLAY_BLOCK.get_or_init(|| Regex::new(r"(?ms)(^|\n)((?:>\s*)*)\$\$(.*?)\$\$").unwrap())
}

/// Split adjacent display spans onto separate lines, then reformat every
/// display span onto its own lines with blank-line padding, carrying any
/// block-quote prefix onto each emitted framing line.
pub(super) fn isolate_display_math(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let text = adjacent_display().replace_all(text, |c: &Captures| {
        format!("$${}$$\n$${}$$", &c[1], &c[2])
    });

    display_block()
        .replace_all(&text, |c: &Captures| {
            let newline = &c[1];
            let prefix = c[2].trim();
            let quote = if prefix.is_empty() {
                String::new()
            } else {
                format!("{} ", prefix)
            };
            let content = c[3].trim();

            format!(
                "{}{}\n{}$$\n{}{}\n{}$$\n{}",
                newline, quote, quote, quote, content, quote, quote
            )
        })
        .into_owned()
}

static TOKEN_DISPLAY: OnceLock<Regex> = OnceLock::new();

fn token_display() -> &'static Regex {
    TOKEN_DISPLAY.get_or_init(|| Regex::new(r"\$\$[^$]*?\$\$").unwrap())
}

static TOKEN_INLINE: OnceLock<Regex> = OnceLock::new();

fn token_inline() -> &'static Regex {
    TOKEN_INLINE.get_or_init(|| Regex::new(r"\$[^$]*?\$").unwrap())
}

static TOKEN_RESTORE: OnceLock<Regex> = OnceLock::new();

fn token_restore() -> &'static Regex {
    TOKEN_RESTORE.get_or_init(|| Regex::new(r"__MATH_BLOCK_(\d+)__").unwrap())
}

/// Promote inline spans to display spans. Display spans are tokenized out
/// first so they are never converted twice, then every remaining inline
/// span becomes a display span on its own line.
pub(super) fn promote_inline_math(
    text: &str,
    _ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let text = token_display().replace_all(text, |c: &Captures| {
        blocks.push(c[0].to_string());
        format!("__MATH_BLOCK_{}__", blocks.len() - 1)
    });
    let text = token_inline().replace_all(&text, |c: &Captures| {
        blocks.push(c[0].to_string());
        format!("__MATH_BLOCK_{}__", blocks.len() - 1)
    });

    let rendered: Vec<String> = blocks
        .iter()
        .map(|block| {
            if block.starts_with("$$") && block.ends_with("$$") {
                block.clone()
            } else {
                block
                    .split('$')
                    .filter(|part| !part.is_empty())
                    .map(|part| format!("$${}$$", part))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        })
        .collect();

    token_restore()
        .replace_all(&text, |c: &Captures| {
            c[1].parse::<usize>()
                .ok()
                .and_then(|index| rendered.get(index).cloned())
                .unwrap_or_default()
        })
        .into_owned()
}
