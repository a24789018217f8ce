//! Wiki links and non-image embeds become blog hyperlinks.
//!
//! The link target is sanitized to a whitelist (word characters, Hangul,
//! digits, spaces), spaces collapse to hyphens, and the result is
//! percent-encoded into `[display](blogUrl/encoded/)`. The trailing slash
//! is required by the target site's routing.

use super::images;
use super::TranspileContext;
use crate::assets::AssetCollector;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Characters a browser-style URI-component encoder leaves unescaped,
/// minus alphanumerics (which `NON_ALPHANUMERIC` already keeps).
const URL_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static DOC_EMBED: OnceLock<Regex> = OnceLock::new();

fn doc_embed() -> &'static Regex {
    DOC_EMBED.get_or_init(|| Regex::new(r"!\[\[(.+?)\]\]").unwrap())
}

static WIKI_LINK: OnceLock<Regex> = OnceLock::new();

fn wiki_link() -> &'static Regex {
    // Brackets are excluded from the target so the pattern cannot span
    // into link syntax produced by the footnote pass.
    WIKI_LINK.get_or_init(|| Regex::new(r"\[\[([^\[\]]+?)\]\]").unwrap())
}

static FOOTNOTE_LINK: OnceLock<Regex> = OnceLock::new();

fn footnote_link() -> &'static Regex {
    FOOTNOTE_LINK.get_or_init(|| Regex::new(r"\^\[\[\[(.+?)\]\]\]").unwrap())
}

static SANITIZE: OnceLock<Regex> = OnceLock::new();

fn sanitize() -> &'static Regex {
    SANITIZE.get_or_init(|| Regex::new(r"[^가-힣a-zA-Z0-9\s]+").unwrap())
}

static SPACES: OnceLock<Regex> = OnceLock::new();

fn spaces() -> &'static Regex {
    SPACES.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn encoded_doc_name(doc_name: &str) -> String {
    let cleaned = sanitize().replace_all(doc_name, "");
    let hyphenated = spaces().replace_all(&cleaned, "-");
    utf8_percent_encode(&hyphenated, URL_KEEP).to_string()
}

fn doc_link(doc_name: &str, blog_url: &str) -> String {
    format!(
        "[{}]({}/{}/)",
        doc_name,
        blog_url,
        encoded_doc_name(doc_name)
    )
}

/// Embeds whose target is not an image become plain hyperlinks.
pub(super) fn convert_doc_embeds(
    text: &str,
    ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    doc_embed()
        .replace_all(text, |c: &Captures| {
            let doc_name = &c[1];
            if images::is_image(doc_name) {
                c[0].to_string()
            } else {
                doc_link(doc_name, ctx.blog_url)
            }
        })
        .into_owned()
}

/// Plain `[[name]]` links and the footnote-style `^[[[name]]]` variant.
/// The footnote form is handled first, otherwise the plain pattern would
/// consume it.
pub(super) fn convert_wiki_links(
    text: &str,
    ctx: &TranspileContext,
    _collector: &mut AssetCollector,
) -> String {
    let text = convert_footnote_links(text, ctx.blog_url);
    wiki_link()
        .replace_all(&text, |c: &Captures| doc_link(&c[1], ctx.blog_url))
        .into_owned()
}

/// `^[[[name]]]`, not followed by yet another bracket, becomes
/// `^[[name](url)]`. The trailing-bracket check stands in for the
/// lookahead the pattern needs.
fn convert_footnote_links(text: &str, blog_url: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for captures in footnote_link().captures_iter(text) {
        let matched = match captures.get(0) {
            Some(m) => m,
            None => continue,
        };
        if text[matched.end()..].starts_with(']') {
            continue;
        }

        out.push_str(&text[last..matched.start()]);
        out.push_str(&format!(
            "^[[{}]({}/{}/)]",
            &captures[1],
            blog_url,
            encoded_doc_name(&captures[1])
        ));
        last = matched.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;
    use crate::config::RulesConfig;

    fn embeds(text: &str) -> String {
        let rules = RulesConfig::disabled();
        let ctx = context(&rules);
        convert_doc_embeds(text, &ctx, &mut AssetCollector::new())
    }

    fn links(text: &str) -> String {
        let rules = RulesConfig::disabled();
        let ctx = context(&rules);
        convert_wiki_links(text, &ctx, &mut AssetCollector::new())
    }

    #[test]
    fn test_doc_embed_becomes_link() {
        assert_eq!(
            embeds("![[My Note]]"),
            "[My Note](https://blog.example.com/My-Note/)"
        );
    }

    #[test]
    fn test_image_embed_left_for_image_rule() {
        assert_eq!(embeds("![[photo.png]]"), "![[photo.png]]");
    }

    #[test]
    fn test_wiki_link_becomes_link() {
        assert_eq!(
            links("See [[Other Note]]."),
            "See [Other Note](https://blog.example.com/Other-Note/)."
        );
    }

    #[test]
    fn test_special_characters_stripped_from_target_only() {
        // Display text keeps the original name; the URL is sanitized.
        assert_eq!(
            links("[[What's new?]]"),
            "[What's new?](https://blog.example.com/Whats-new/)"
        );
    }

    #[test]
    fn test_hangul_target_is_percent_encoded() {
        let out = links("[[운영체제 정리]]");
        assert!(out.starts_with("[운영체제 정리](https://blog.example.com/"));
        assert!(out.ends_with("/)"));
        // Hangul is percent-encoded in the URL part
        assert!(out.contains('%'));
    }

    #[test]
    fn test_footnote_variant() {
        assert_eq!(
            links("^[[[My Note]]]"),
            "^[[My Note](https://blog.example.com/My-Note/)]"
        );
    }

    #[test]
    fn test_footnote_with_extra_bracket_falls_to_plain_link() {
        // The footnote pass skips it; the plain pass still rewrites the
        // inner double-bracket pair.
        assert_eq!(
            links("^[[[My Note]]]]"),
            "^[[My Note](https://blog.example.com/My-Note/)]]"
        );
    }

    #[test]
    fn test_footnote_and_plain_link_coexist() {
        let out = links("^[[[Foo]]] and [[Bar]]");
        assert_eq!(
            out,
            "^[[Foo](https://blog.example.com/Foo/)] and [Bar](https://blog.example.com/Bar/)"
        );
    }

    #[test]
    fn test_multiple_links_on_one_line() {
        let out = links("[[One]] then [[Two]]");
        assert_eq!(
            out,
            "[One](https://blog.example.com/One/) then [Two](https://blog.example.com/Two/)"
        );
    }
}
