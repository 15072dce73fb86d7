//! Intermediate Representation of a Markdown document.

pub mod nodes;

pub use nodes::{
    Annotation, Block, BlockPlaceholder, BlockRedaction, CodeBlock, Document, Heading, Image,
    Inline, InlinePlaceholder, InlineRedaction, Link, Paragraph, PlaceholderContent,
};
