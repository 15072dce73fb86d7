//! Property tests for the round-trip guarantees.

use proptest::prelude::*;
use redactable::markdown::serialize;
use redactable::{placeholder, redact_source, restore_source, StrategySet};

/// Bracket-heavy text with no digits. Digit-free bracket runs can never form
/// a placeholder, so the parser must leave every character literal.
fn bracket_noise() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('['),
            Just(']'),
            Just('/'),
            Just(' '),
            prop::char::range('a', 'z'),
        ],
        1..60,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Link display text: printable, no brackets, newlines, or backticks, and at
/// least one non-space so emphasis and heading rules stay out of play.
fn display_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ,.!?']{1,30}".prop_filter("needs a letter", |s| s.contains(char::is_alphabetic))
}

proptest! {
    #[test]
    fn malformed_bracket_text_is_preserved(noise in bracket_noise()) {
        let source = format!("{noise}\n");
        let parsed = placeholder::pipeline().parse(&source);
        prop_assert_eq!(serialize(&parsed), source);
    }

    #[test]
    fn redact_then_restore_is_identity(text in display_text(), url_tail in "[a-z]{1,10}") {
        let original = format!("x [{text}](http://example.com/{url_tail}) y\n");
        let strategies = StrategySet::with_defaults();
        let (redacted, _) = redact_source(&original, &strategies);
        prop_assert_eq!(restore_source(&original, &redacted, &strategies), original);
    }

    #[test]
    fn edited_display_text_is_adopted(before in display_text(), after in display_text()) {
        let original = format!("[{before}](http://example.com/x)\n");
        let edited = format!("[{after}][0]\n");
        let strategies = StrategySet::with_defaults();
        prop_assert_eq!(
            restore_source(&original, &edited, &strategies),
            format!("[{after}](http://example.com/x)\n")
        );
    }

    #[test]
    fn encoded_run_tokenizes_back(text in "[a-zA-Z0-9 ,.!?']{1,30}", index in 0usize..10_000) {
        use redactable::ir::nodes::{Block, Inline, PlaceholderContent};

        let source = format!("[{text}][{index}]\n");
        let doc = placeholder::pipeline().parse(&source);
        let [Block::Paragraph(p)] = doc.children.as_slice() else {
            panic!("expected one paragraph, found {:?}", doc.children);
        };
        let [Inline::Placeholder(ph)] = p.content.as_slice() else {
            panic!("expected one placeholder, found {:?}", p.content);
        };
        prop_assert_eq!(ph.index, index);
        prop_assert_eq!(&ph.content, &PlaceholderContent::Text(text));
    }

    #[test]
    fn restore_never_panics_on_arbitrary_edits(edited in "[\\[\\]/a-z0-9 \n]{0,80}") {
        let original = "A [link](http://example.com) and ![img](i.png).\n";
        let strategies = StrategySet::with_defaults();
        let _ = restore_source(original, &edited, &strategies);
    }
}
