//! Nested placeholder tests: redactions inside redaction display text.

use redactable::{redact_source, restore_source, StrategySet};

fn defaults() -> StrategySet {
    StrategySet::with_defaults()
}

#[test]
fn test_single_nesting_round_trip() {
    let original = "[![une image](i.png)](http://example.com)\n";
    let (redacted, _) = redact_source(original, &defaults());
    assert_eq!(redacted, "[[une image][1]][0]\n");

    assert_eq!(
        restore_source(original, "[[an image][1]][0]\n", &defaults()),
        "[![an image](i.png)](http://example.com)\n"
    );
}

#[test]
fn test_nested_placeholder_alongside_text() {
    let original = "[before ![pic](p.png) after](http://example.com)\n";
    let (redacted, _) = redact_source(original, &defaults());
    assert_eq!(redacted, "[before [pic][1] after][0]\n");

    assert_eq!(
        restore_source(original, "[avant [image][1] après][0]\n", &defaults()),
        "[avant ![image](p.png) après](http://example.com)\n"
    );
}

#[test]
fn test_inner_index_unmatched_degrades_inside_outer() {
    let original = "[![pic](p.png)](http://example.com)\n";
    // The editor mangled the inner index; the outer link still restores and
    // its text carries the inner run literally.
    assert_eq!(
        restore_source(original, "[[image][9]][0]\n", &defaults()),
        "[[image][9]](http://example.com)\n"
    );
}

#[test]
fn test_outer_index_unmatched_degrades_whole_run() {
    let original = "[![pic](p.png)](http://example.com)\n";
    assert_eq!(
        restore_source(original, "[[image][1]][9]\n", &defaults()),
        "[![image](p.png)][9]\n"
    );
}

#[test]
fn test_multiple_nested_runs_in_one_paragraph() {
    let original =
        "[![a](a.png)](http://a.example) and [![b](b.png)](http://b.example)\n";
    let (redacted, _) = redact_source(original, &defaults());
    assert_eq!(redacted, "[[a][1]][0] and [[b][3]][2]\n");

    assert_eq!(
        restore_source(original, "[[b2][3]][2] et [[a2][1]][0]\n", &defaults()),
        "[![b2](b.png)](http://b.example) et [![a2](a.png)](http://a.example)\n"
    );
}

#[test]
fn test_nested_inside_block_region() {
    let original = "<!-- note -->\n\nA [link](http://example.com).\n\n<!-- /note -->\n";
    let (redacted, _) = redact_source(original, &defaults());
    assert_eq!(redacted, "[note][0]\n\nA [link][1].\n\n[/][0]\n");

    assert_eq!(
        restore_source(original, "[note][0]\n\nUn [lien][1].\n\n[/][0]\n", &defaults()),
        "<!-- note -->\n\nUn [lien](http://example.com).\n\n<!-- /note -->\n"
    );
}
