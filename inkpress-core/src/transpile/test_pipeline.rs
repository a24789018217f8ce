//! Whole-pipeline tests: rule ordering, the disabled-config identity, and
//! representative documents with every rule enabled.

use super::test_support::context;
use super::{Transpiler, RULES};
use crate::assets::AssetCollector;
use crate::config::RulesConfig;

fn transpile_with(rules: &RulesConfig, text: &str) -> (String, AssetCollector) {
    let ctx = context(rules);
    let mut collector = AssetCollector::new();
    let out = Transpiler::new().transpile(text, &ctx, &mut collector);
    (out, collector)
}

#[test]
fn test_rule_order_is_fixed() {
    let names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(
        names,
        vec![
            "callout-auto-title",
            "callout-title-separator",
            "image-embeds",
            "doc-embeds",
            "wiki-links",
            "code-lang-lowercase",
            "callout-code-unescape",
            "code-tabs-to-spaces",
            "math-raw-tag",
            "matrix-line-break",
            "math-notation",
            "list-math-escape",
            "math-pipe",
            "math-line-break",
            "inline-to-display",
            "auto-hyperlink",
            "highlight",
        ]
    );
}

#[test]
fn test_disabled_config_is_identity() {
    let text = "> [!note]\n\
                ==mark== [[Link]] ![[img.png|300]]\n\
                ```Rust\n\tcode\n```\n\
                $a|b$ $$x$$ https://example.com\n\
                \\sum^{n}_{i=1}";

    let (out, collector) = transpile_with(&RulesConfig::disabled(), text);
    assert_eq!(out, text);
    assert!(collector.is_empty());
}

#[test]
fn test_image_round_trip_through_pipeline() {
    let (out, collector) = transpile_with(&RulesConfig::default(), "![[photo.png|center|300x200]]");

    assert_eq!(
        out,
        "![photo.png](/assets/img/posts/photo.png){: width=\"300\" height=\"200\" .center}"
    );

    let entries = collector.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].local_path, "assets/img/photo.png");
    assert_eq!(entries[0].upload_path, "assets/img/posts/photo.png");
    assert_eq!(entries[0].name, "photo.png");
}

#[test]
fn test_full_document_with_default_rules() {
    let text = "> [!note]\n\
                Some ==important== text with [[Other Note]].\n\
                \n\
                ![[photo.png|300]]\n\
                \n\
                - $x|y$";

    let (out, collector) = transpile_with(&RulesConfig::default(), text);

    let expected = r#"> [!note] note{title}
Some **important** text with [Other Note](https://blog.example.com/Other-Note/).

![photo.png](/assets/img/posts/photo.png){: width="300"}

- \$x\mid y$"#;

    assert_eq!(out, expected);
    assert_eq!(collector.list().len(), 1);
}

#[test]
fn test_inline_promotion_runs_after_line_breaking() {
    let mut rules = RulesConfig::default();
    rules.inline_to_display = true;

    let (out, _) = transpile_with(&rules, "$E=mc^2$");
    assert_eq!(out, "$$E=mc^2$$");
}

#[test]
fn test_callout_snapshot() {
    let (out, _) = transpile_with(&RulesConfig::default(), "> [!warning]- Careful");
    insta::assert_snapshot!(out, @"> [!warning]- Careful{title}");
}

#[test]
fn test_code_fence_pipeline() {
    let text = "```Python\n\tprint('hi')\n```";
    let (out, _) = transpile_with(&RulesConfig::default(), text);
    assert_eq!(out, "```python\n    print('hi')\n```");
}

#[test]
fn test_transpiler_is_reentrant() {
    let transpiler = Transpiler::new();
    let rules = RulesConfig::default();
    let ctx = context(&rules);

    let mut first = AssetCollector::new();
    let mut second = AssetCollector::new();

    let a = transpiler.transpile("![[a.png]]", &ctx, &mut first);
    let b = transpiler.transpile("![[b.png]]", &ctx, &mut second);

    assert_eq!(a, "![a.png](/assets/img/posts/a.png)");
    assert_eq!(b, "![b.png](/assets/img/posts/b.png)");
    assert_eq!(first.list().len(), 1);
    assert_eq!(second.list().len(), 1);
}
