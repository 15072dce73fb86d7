//! Markdown parsing and serialization.
//!
//! This module is the host tree-parser the redaction round-trip plugs into.
//! Unlike a conventional Markdown library it is built for extension: a
//! [`Pipeline`] is an immutable, ordered list of named block and inline rules
//! assembled by a [`PipelineBuilder`], and the placeholder tokenizer inserts
//! its own rules at precise positions relative to the built-ins (placeholder
//! syntax is lexically ambiguous with links and paragraphs, so ordering is
//! load-bearing).
//!
//! The dialect is a deliberate subset of CommonMark: ATX headings, fenced
//! code blocks, HTML-comment annotation regions, paragraphs; inline code
//! spans, `**strong**`, `*emphasis*`, images, links, and autolinks. Two
//! properties the round-trip relies on:
//!
//! - The serializer never escapes plain text, so tokenize → serialize is the
//!   identity on text the parser leaves literal (malformed placeholder runs
//!   survive an edit cycle byte-for-byte).
//! - Every rule declines cleanly; there is no input that fails to parse.

pub mod parser;
pub mod serializer;

pub use parser::{
    BlockMatch, BlockRule, InlineMatch, InlineRule, ParseCx, Pipeline, PipelineBuilder,
};
pub use serializer::{render_inlines, render_plain, serialize};
