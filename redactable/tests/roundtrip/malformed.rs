//! Malformed placeholder syntax: everything the scanner declines must pass
//! through restoration byte-for-byte instead of erroring.

use redactable::{restore_source, StrategySet};

fn restore_identity(edited: &str) {
    let original = "A [link](http://example.com).\n";
    assert_eq!(
        restore_source(original, edited, &StrategySet::with_defaults()),
        edited
    );
}

#[test]
fn test_separated_bracket_groups() {
    restore_identity("a [cat] [1] pair\n");
}

#[test]
fn test_non_digit_index() {
    restore_identity("a [cat][dog] pair\n");
}

#[test]
fn test_empty_index_group() {
    restore_identity("a [cat][] pair\n");
}

#[test]
fn test_unbalanced_brackets() {
    restore_identity("a [cat][1 dangling\n");
    restore_identity("a stray ] bracket\n");
}

#[test]
fn test_lone_open_group() {
    restore_identity("just [cat] alone\n");
}

#[test]
fn test_index_overflow_is_literal() {
    restore_identity("big [cat][99999999999999999999999999] run\n");
}

#[test]
fn test_unterminated_block_region() {
    // An open marker without its close is an ordinary paragraph; the inline
    // run inside it still resolves nothing (index 7 is unknown) and stays
    // literal.
    restore_identity("[cap][7]\n\nbody text\n");
}

#[test]
fn test_close_marker_without_open() {
    restore_identity("[/][3]\n\nbody text\n");
}

#[test]
fn test_mismatched_block_indices() {
    restore_identity("[cap][7]\n\nbody\n\n[/][8]\n");
}

#[test]
fn test_bracket_noise_around_valid_placeholder() {
    let original = "A [link](http://example.com).\n";
    assert_eq!(
        restore_source(
            original,
            "noise ][ then [lien][0] then [more] noise\n",
            &StrategySet::with_defaults()
        ),
        "noise ][ then [lien](http://example.com) then [more] noise\n"
    );
}
