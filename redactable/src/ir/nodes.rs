//! Core data structures for the document Intermediate Representation (IR).
//!
//! The tree carries the ordinary Markdown node kinds plus the four node kinds
//! that power the redaction round-trip:
//!
//! - [`InlineRedaction`] / [`BlockRedaction`] exist only in a source tree
//!   after the recognition pass; they retain the protected node so it can be
//!   regenerated later.
//! - [`InlinePlaceholder`] / [`BlockPlaceholder`] exist only in a candidate
//!   tree freshly tokenized from edited text; the restoration merger replaces
//!   every one of them, either with a rebuilt node or with literal text.

use serde::Serialize;

/// The root of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub children: Vec<Block>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    CodeBlock(CodeBlock),
    Annotation(Annotation),
    Redaction(BlockRedaction),
    Placeholder(BlockPlaceholder),
    /// Literal text emitted verbatim by the serializer. Produced by the
    /// restoration merger when a block placeholder cannot be matched.
    RawText(String),
}

/// A heading with a level of 1 through 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: usize,
    pub content: Vec<Inline>,
}

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub literal: String,
}

/// A labelled region delimited by HTML comments:
///
/// ```text
/// <!-- label key=value -->
///
/// nested block content
///
/// <!-- /label -->
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub label: String,
    pub parameters: Vec<(String, String)>,
    pub children: Vec<Block>,
}

/// Inline content, such as text, bold, links, etc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Code(String),
    Link(Link),
    Image(Image),
    Redaction(InlineRedaction),
    Placeholder(InlinePlaceholder),
}

/// A hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Inline>,
}

/// An image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

/// A protected inline node, replaced by `[display][index]` on serialization.
///
/// `index` is assigned by [`crate::redact::assign_indices`]; a redaction is
/// created with index 0 and must be numbered before the tree is serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineRedaction {
    /// Strategy tag naming the node kind (e.g. "link").
    pub kind: String,
    pub index: usize,
    /// The display content the external editor is allowed to change.
    pub content: Vec<Inline>,
    /// The protected node itself, kept so the rebuild strategy can
    /// regenerate its shape around the edited text.
    pub source: Box<Inline>,
}

/// A protected block node, replaced by a balanced `[display][index]` /
/// `[/][index]` marker pair on serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRedaction {
    pub kind: String,
    pub index: usize,
    pub content: Vec<Inline>,
    /// Nested block content serialized between the markers, still editable.
    pub children: Vec<Block>,
    pub source: Box<Block>,
}

/// An indexed inline placeholder found in edited text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlinePlaceholder {
    pub index: usize,
    pub content: PlaceholderContent,
}

/// Content of an inline placeholder.
///
/// The flat form `[cat][1]` carries plain text. The nested form
/// `[[lien image][2]][3]` carries the recursively tokenized inner run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaceholderContent {
    Text(String),
    Inlines(Vec<Inline>),
}

/// An indexed block placeholder found in edited text, with its open-marker
/// display text and the block content found between the markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockPlaceholder {
    pub index: usize,
    pub text: String,
    pub children: Vec<Block>,
}
