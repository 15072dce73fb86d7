//! Depth-counting bracket scanner.
//!
//! Extracts the two top-level bracketed groups of a placeholder run from the
//! start of a text buffer. The first group may contain arbitrarily nested
//! brackets (the nested placeholder form); the second group must be a run of
//! decimal digits (the redaction index). Anything else is a non-match and the
//! caller falls through to ordinary text handling.
//!
//! The scanner is a pure function over the input: it never consumes anything
//! itself, so probing for a match and committing to one are the same call.

/// A successful scan of a placeholder bracket run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketScan {
    /// `[cat][1]` — exactly two bracket pairs, no nesting.
    Flat {
        /// Display text of the first group.
        text: String,
        /// Parsed index from the second group.
        index: usize,
        /// Byte length of the whole matched run.
        len: usize,
    },
    /// `[[lien image][2]][3]` — the first group nests further brackets and
    /// must be re-tokenized as inline content by the caller.
    Nested {
        /// Raw text of the first group, inner brackets intact.
        raw: String,
        index: usize,
        len: usize,
    },
}

impl BracketScan {
    /// Byte length of the matched run.
    pub fn len(&self) -> usize {
        match self {
            BracketScan::Flat { len, .. } | BracketScan::Nested { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scan `input` for a placeholder bracket run starting at position 0.
///
/// Maintains running left/right bracket counts. A group boundary occurs when
/// the counts return to equal; the text accumulated since the previous
/// boundary, with its enclosing brackets stripped, becomes one group. The
/// scan succeeds once two adjacent groups are found and the second is all
/// digits; it stops there, so trailing text is never part of the match.
///
/// Declines on: input not starting with `[`, any character between the two
/// groups, a stray `]`, a non-digit or empty index group, an index too large
/// for `usize`, or input ending before the second group closes.
pub fn scan(input: &str) -> Option<BracketScan> {
    if !input.starts_with('[') {
        return None;
    }

    let mut left = 0usize;
    let mut right = 0usize;
    let mut group = String::new();
    let mut first: Option<String> = None;

    for (pos, ch) in input.char_indices() {
        match ch {
            '[' => {
                left += 1;
                group.push(ch);
            }
            ']' => {
                right += 1;
                if left > right {
                    group.push(ch);
                } else if left == right {
                    // Balance restored: the accumulated text minus its own
                    // opening bracket is one extracted group.
                    let text = group.split_off(1);
                    group.clear();
                    match first.take() {
                        None => first = Some(text),
                        Some(display) => {
                            if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                                return None;
                            }
                            // A digit run too long for usize declines rather
                            // than panicking.
                            let index = text.parse::<usize>().ok()?;
                            let len = pos + 1;
                            return Some(if left == 2 {
                                BracketScan::Flat {
                                    text: display,
                                    index,
                                    len,
                                }
                            } else {
                                BracketScan::Nested {
                                    raw: display,
                                    index,
                                    len,
                                }
                            });
                        }
                    }
                } else {
                    // More closes than opens: stray bracket.
                    return None;
                }
            }
            _ => {
                if left > right {
                    group.push(ch);
                } else {
                    // Balanced and outside a group: the groups are not
                    // adjacent, so this is not placeholder syntax.
                    return None;
                }
            }
        }
    }

    // Ran out of input before the index group closed.
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_form() {
        assert_eq!(
            scan("[cat][1]"),
            Some(BracketScan::Flat {
                text: "cat".to_string(),
                index: 1,
                len: 8,
            })
        );
    }

    #[test]
    fn test_flat_form_stops_at_match() {
        // Trailing text is not part of the run.
        assert_eq!(
            scan("[cat][12] and more"),
            Some(BracketScan::Flat {
                text: "cat".to_string(),
                index: 12,
                len: 9,
            })
        );
    }

    #[test]
    fn test_nested_form() {
        assert_eq!(
            scan("[[lien image][2]][3]"),
            Some(BracketScan::Nested {
                raw: "[lien image][2]".to_string(),
                index: 3,
                len: 20,
            })
        );
    }

    #[test]
    fn test_doubly_nested_form() {
        assert_eq!(
            scan("[[[lien image][1]][2]][3]"),
            Some(BracketScan::Nested {
                raw: "[[lien image][1]][2]".to_string(),
                index: 3,
                len: 25,
            })
        );
    }

    #[test]
    fn test_empty_display_text() {
        assert_eq!(
            scan("[][4]"),
            Some(BracketScan::Flat {
                text: String::new(),
                index: 4,
                len: 5,
            })
        );
    }

    #[test]
    fn test_declines_without_leading_bracket() {
        assert_eq!(scan("cat [cat][1]"), None);
        assert_eq!(scan("]оops["), None);
    }

    #[test]
    fn test_declines_non_digit_index() {
        assert_eq!(scan("[cat][dog]"), None);
        assert_eq!(scan("[cat][]"), None);
        assert_eq!(scan("[cat][1a]"), None);
    }

    #[test]
    fn test_declines_separated_groups() {
        assert_eq!(scan("[cat] [1]"), None);
        assert_eq!(scan("[cat]x[1]"), None);
    }

    #[test]
    fn test_declines_unbalanced() {
        assert_eq!(scan("[cat][1"), None);
        assert_eq!(scan("[[cat][1]"), None);
        assert_eq!(scan("[cat"), None);
    }

    #[test]
    fn test_declines_index_overflow() {
        assert_eq!(scan("[cat][99999999999999999999999999]"), None);
    }

    #[test]
    fn test_multibyte_display_text() {
        assert_eq!(
            scan("[chät][7]"),
            Some(BracketScan::Flat {
                text: "chät".to_string(),
                index: 7,
                // "ä" is two bytes; lengths are byte offsets.
                len: 10,
            })
        );
    }
}
