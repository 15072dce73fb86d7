//! Lossless Markdown redaction round-trips.
//!
//! `redactable` protects the non-translatable parts of a Markdown document
//! (link destinations, image URLs, annotation regions) while the visible
//! text goes through an external edit such as machine translation, then
//! merges the edited text back over the preserved originals:
//!
//! 1. **Redact** — parse the document, let strategies claim protected nodes,
//!    and serialize each claim as an indexed placeholder: `[a cat][0]` for
//!    inline nodes, an open/close marker pair for block regions.
//! 2. **Edit** — the placeholder text is translated or rewritten elsewhere.
//!    Editors may reword the display text and move, duplicate, or drop
//!    placeholders, but keep the bracket runs intact.
//! 3. **Restore** — re-parse the edited text, join every placeholder to its
//!    original redaction by index, and rebuild the full node with the edited
//!    display text in place.
//!
//! The crate is organized as a small pipeline of tree passes over one shared
//! IR:
//!
//! - [`ir`] — the document tree both directions operate on.
//! - [`markdown`] — the extensible host parser ([`markdown::Pipeline`]) and
//!   the serializer. Placeholder recognition is just another pair of rules
//!   inserted at a precise position, not a special mode.
//! - [`scan`] — the depth-counting bracket scanner shared by both
//!   placeholder rules.
//! - [`placeholder`] — the pipeline rules for `[text][i]` runs and block
//!   marker pairs.
//! - [`strategy`] — pluggable redact/restore pairs; built-ins for links,
//!   images, and annotations.
//! - [`redact`] / [`restore`] — the two round-trip passes.
//!
//! Nothing in the round-trip can fail: malformed placeholder syntax stays
//! literal text, and placeholders that cannot be resolved degrade to their
//! literal form rather than losing the edited content.
//!
//! ```
//! use redactable::{redact_source, restore_source, StrategySet};
//!
//! let original = "A [cat](http://example.com/cat).\n";
//! let strategies = StrategySet::with_defaults();
//!
//! let (redacted, _) = redact_source(original, &strategies);
//! assert_eq!(redacted, "A [cat][0].\n");
//!
//! // The display text comes back edited; the destination is reattached.
//! let restored = restore_source(original, "Un [chat][0].\n", &strategies);
//! assert_eq!(restored, "Un [chat](http://example.com/cat).\n");
//! ```

pub mod error;
pub mod ir;
pub mod markdown;
pub mod placeholder;
pub mod redact;
pub mod restore;
pub mod scan;
pub mod strategy;

pub use error::Error;
pub use ir::nodes::Document;
pub use markdown::{Pipeline, PipelineBuilder};
pub use redact::redact;
pub use restore::restore;
pub use strategy::{RedactionStrategy, StrategySet};

/// Redact `source` with the standard placeholder pipeline. Returns the
/// redacted Markdown and the redacted tree.
pub fn redact_source(source: &str, strategies: &StrategySet) -> (String, Document) {
    redact::redact(source, &placeholder::pipeline(), strategies)
}

/// Restore `edited` against the pristine `original` with the standard
/// placeholder pipeline.
pub fn restore_source(original: &str, edited: &str, strategies: &StrategySet) -> String {
    restore::restore(original, edited, &placeholder::pipeline(), strategies)
}
