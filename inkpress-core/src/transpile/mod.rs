//! The dialect transpiler: an ordered pipeline of rewrite rules.
//!
//! Each rule takes whole-document text, returns whole-document text, and
//! may register discovered images with the [`AssetCollector`] as a side
//! channel. The order of [`RULES`] is significant: later rules match text
//! produced by earlier ones, or must not see text the earlier ones have
//! already consumed. No rule fails; a pattern that does not match leaves
//! the text untouched.

mod callouts;
mod code;
mod images;
mod links;
mod math;
mod misc;

#[cfg(test)]
mod test_pipeline;

use crate::assets::AssetCollector;
use crate::config::RulesConfig;

/// Everything a rule needs besides the text itself.
pub struct TranspileContext<'a> {
    pub rules: &'a RulesConfig,

    /// Base URL of the published blog, without a trailing slash
    pub blog_url: &'a str,

    /// Vault directory images are read from
    pub local_image_base: &'a str,

    /// Repository directory images are uploaded to
    pub upload_image_base: &'a str,
}

/// A single named rewrite rule.
pub struct Rule {
    pub name: &'static str,
    enabled: fn(&RulesConfig) -> bool,
    apply: fn(&str, &TranspileContext, &mut AssetCollector) -> String,
}

/// The fixed rule order. Reordering this table changes observable output.
pub const RULES: &[Rule] = &[
    Rule {
        name: "callout-auto-title",
        enabled: |rules| rules.callout_auto_title,
        apply: callouts::fill_empty_titles,
    },
    Rule {
        name: "callout-title-separator",
        enabled: |rules| rules.callout,
        apply: callouts::append_title_separator,
    },
    Rule {
        name: "image-embeds",
        enabled: |rules| rules.image,
        apply: images::convert_embeds,
    },
    Rule {
        name: "doc-embeds",
        enabled: |rules| rules.doc_ref,
        apply: links::convert_doc_embeds,
    },
    Rule {
        name: "wiki-links",
        enabled: |rules| rules.doc_link,
        apply: links::convert_wiki_links,
    },
    Rule {
        name: "code-lang-lowercase",
        enabled: |rules| rules.lowercase_code_lang,
        apply: code::lowercase_fence_langs,
    },
    Rule {
        name: "callout-code-unescape",
        enabled: |rules| rules.callout_code_escape,
        apply: code::unescape_quoted_fences,
    },
    Rule {
        name: "code-tabs-to-spaces",
        enabled: |rules| rules.tab_to_spaces,
        apply: code::tabs_to_spaces,
    },
    Rule {
        name: "math-raw-tag",
        enabled: |rules| rules.raw_tag,
        apply: math::wrap_raw_tags,
    },
    Rule {
        name: "matrix-line-break",
        enabled: |rules| rules.matrix_line_break,
        apply: math::space_matrix_breaks,
    },
    Rule {
        name: "math-notation",
        enabled: |rules| rules.math_notation,
        apply: math::reorder_scripts,
    },
    Rule {
        name: "list-math-escape",
        enabled: |rules| rules.list_math_escape,
        apply: math::escape_list_math,
    },
    Rule {
        name: "math-pipe",
        enabled: |rules| rules.math_pipe,
        apply: math::convert_pipes,
    },
    Rule {
        name: "math-line-break",
        enabled: |rules| rules.math_line_break,
        apply: math::isolate_display_math,
    },
    Rule {
        name: "inline-to-display",
        enabled: |rules| rules.inline_to_display,
        apply: math::promote_inline_math,
    },
    Rule {
        name: "auto-hyperlink",
        enabled: |rules| rules.auto_hyperlink,
        apply: misc::wrap_bare_urls,
    },
    Rule {
        name: "highlight",
        enabled: |rules| rules.highlight,
        apply: misc::convert_highlights,
    },
];

/// Applies the rule pipeline to document text.
///
/// The transpiler holds no state between calls; each call is independent
/// and reentrant given a distinct collector.
#[derive(Debug, Default)]
pub struct Transpiler;

impl Transpiler {
    pub fn new() -> Self {
        Self
    }

    /// Run every enabled rule over `text` in the fixed order, registering
    /// discovered images with `collector`.
    pub fn transpile(
        &self,
        text: &str,
        ctx: &TranspileContext,
        collector: &mut AssetCollector,
    ) -> String {
        let mut text = text.to_string();
        for rule in RULES {
            if (rule.enabled)(ctx.rules) {
                tracing::trace!("Applying rule {}", rule.name);
                text = (rule.apply)(&text, ctx, collector);
            }
        }
        text
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::TranspileContext;
    use crate::config::RulesConfig;

    /// Context over `rules` with the base paths used throughout the
    /// transpile tests.
    pub(crate) fn context(rules: &RulesConfig) -> TranspileContext<'_> {
        TranspileContext {
            rules,
            blog_url: "https://blog.example.com",
            local_image_base: "assets/img",
            upload_image_base: "assets/img/posts",
        }
    }
}
