//! Restoration tests: edited placeholder Markdown + original → full Markdown.

use redactable::{redact_source, restore_source, StrategySet};

fn restore(original: &str, edited: &str) -> String {
    restore_source(original, edited, &StrategySet::with_defaults())
}

#[test]
fn test_translation_keeps_link_destinations() {
    assert_eq!(
        restore(
            "Une [chat](http://example.com/cat) [noir](http://example.com/black)\n",
            "A [black][1] [cat][0]\n",
        ),
        "A [black](http://example.com/black) [cat](http://example.com/cat)\n"
    );
}

#[test]
fn test_identity_round_trip() {
    let original = "\
# Guide

A [link](http://example.com \"Title\") and ![an image](img.png).

<!-- note -->

Inner *text*.

<!-- /note -->
";
    let strategies = StrategySet::with_defaults();
    let (redacted, _) = redact_source(original, &strategies);
    assert_eq!(restore_source(original, &redacted, &strategies), original);
}

#[test]
fn test_surrounding_edits_are_kept() {
    assert_eq!(
        restore(
            "See [docs](http://example.com/docs) for details.\n",
            "Consultez [la doc][0] pour en savoir plus.\n",
        ),
        "Consultez [la doc](http://example.com/docs) pour en savoir plus.\n"
    );
}

#[test]
fn test_placeholder_moved_across_blocks() {
    assert_eq!(
        restore(
            "Intro with a [link](http://example.com).\n",
            "New paragraph.\n\nMoved here: [lien][0].\n",
        ),
        "New paragraph.\n\nMoved here: [lien](http://example.com).\n"
    );
}

#[test]
fn test_duplicate_indices_restore_independently() {
    assert_eq!(
        restore(
            "One [link](http://example.com).\n",
            "[first][0] then [second][0]\n",
        ),
        "[first](http://example.com) then [second](http://example.com)\n"
    );
}

#[test]
fn test_unmatched_index_degrades_to_literal() {
    assert_eq!(
        restore("One [link](http://example.com).\n", "A [stray][7] run.\n"),
        "A [stray][7] run.\n"
    );
}

#[test]
fn test_block_region_body_is_editable() {
    assert_eq!(
        restore(
            "<!-- callout kind=tip -->\n\nOld body.\n\n<!-- /callout -->\n",
            "[callout][0]\n\nNew **edited** body.\n\nTwo paragraphs now.\n\n[/][0]\n",
        ),
        "<!-- callout kind=tip -->\n\nNew **edited** body.\n\nTwo paragraphs now.\n\n<!-- /callout -->\n"
    );
}

#[test]
fn test_block_region_emptied_by_editor() {
    assert_eq!(
        restore(
            "<!-- note -->\n\nRemove me.\n\n<!-- /note -->\n",
            "[note][0]\n\n\n\n[/][0]\n",
        ),
        "<!-- note -->\n<!-- /note -->\n"
    );
}

#[test]
fn test_degraded_text_survives_a_second_pass() {
    // Restoring a degraded document again is the identity: the literal run
    // re-tokenizes to the same unresolvable placeholder.
    let original = "Plain.\n";
    let once = restore(original, "A [stray][7] run.\n");
    assert_eq!(restore(original, &once), once);
}

#[test]
fn test_image_and_link_edits_in_one_document() {
    assert_eq!(
        restore(
            "![a cat](cat.png) sits on [the mat](http://example.com/mat).\n",
            "[un chat][0] est assis sur [le tapis][1].\n",
        ),
        "![un chat](cat.png) est assis sur [le tapis](http://example.com/mat).\n"
    );
}
