//! Redaction tests: source Markdown → placeholder Markdown.

use insta::assert_snapshot;
use redactable::{redact_source, StrategySet};

fn redact(source: &str) -> String {
    redact_source(source, &StrategySet::with_defaults()).0
}

#[test]
fn test_plain_text_passes_through() {
    let source = "Nothing here needs protection.\n";
    assert_eq!(redact(source), source);
}

#[test]
fn test_links_become_placeholders() {
    assert_eq!(
        redact("A [black](http://example.com/black) [cat](http://example.com/cat).\n"),
        "A [black][0] [cat][1].\n"
    );
}

#[test]
fn test_images_become_placeholders() {
    assert_eq!(
        redact("Look: ![a cat sleeping](cat.png \"Zzz\")\n"),
        "Look: [a cat sleeping][0]\n"
    );
}

#[test]
fn test_image_inside_link_nests() {
    assert_eq!(
        redact("[![badge](badge.svg)](http://ci.example.com)\n"),
        "[[badge][1]][0]\n"
    );
}

#[test]
fn test_annotation_region_becomes_block_placeholder() {
    assert_eq!(
        redact("<!-- callout kind=warning -->\n\nMind the gap.\n\n<!-- /callout -->\n"),
        "[callout][0]\n\nMind the gap.\n\n[/][0]\n"
    );
}

#[test]
fn test_indices_interleave_across_levels() {
    let source = "\
# Guide

<!-- note -->

See the [manual](http://example.com/manual).

<!-- /note -->

Or the [FAQ](http://example.com/faq).
";
    assert_snapshot!(redact(source), @r"
    # Guide

    [note][0]

    See the [manual][1].

    [/][0]

    Or the [FAQ][2].
    ");
}

#[test]
fn test_autolinks_stay_visible() {
    let source = "Go to <http://example.com> now.\n";
    assert_eq!(redact(source), source);
}

#[test]
fn test_code_is_never_redacted() {
    let source = "```\n[not a link](http://example.com)\n```\n";
    assert_eq!(redact(source), source);
}

#[test]
fn test_redaction_is_deterministic() {
    let source = "A [b](http://b) and ![c](c.png) and [d](http://d).\n";
    assert_eq!(redact(source), redact(source));
}

#[test]
fn test_strategy_subset_limits_detection() {
    let strategies = StrategySet::from_names(&["image"]).unwrap();
    let (out, _) = redact_source("[link](http://l) and ![img](i.png)\n", &strategies);
    assert_eq!(out, "[link](http://l) and [img][0]\n");
}
