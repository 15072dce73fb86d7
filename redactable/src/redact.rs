//! Redaction: detect protected nodes and assign placeholder indices.
//!
//! Two tree passes. Detection walks the document and lets each strategy
//! claim nodes; a claimed node is wrapped in a redaction carrying its display
//! content and the preserved original. Index assignment then numbers every
//! redaction in a single preorder walk over one shared counter, outer before
//! inner, so indices are deterministic for a given document and strategy
//! order.
//!
//! Detection recurses into a fresh redaction's display content, which is how
//! an image inside a link ends up as a nested placeholder.

use crate::ir::nodes::{Block, Document, Inline};
use crate::markdown::parser::Pipeline;
use crate::markdown::serialize;
use crate::strategy::StrategySet;

/// Parse, redact, and serialize in one step. Returns the redacted Markdown
/// alongside the redacted tree the restoration pass needs.
pub fn redact(source: &str, pipeline: &Pipeline, strategies: &StrategySet) -> (String, Document) {
    let mut doc = pipeline.parse(source);
    redact_tree(&mut doc, strategies);
    assign_indices(&mut doc);
    (serialize(&doc), doc)
}

/// Run strategy detection over the whole tree. Indices are left at their
/// placeholder value of zero; call [`assign_indices`] afterwards.
pub fn redact_tree(doc: &mut Document, strategies: &StrategySet) {
    for block in &mut doc.children {
        redact_block(block, strategies);
    }
}

fn redact_block(block: &mut Block, strategies: &StrategySet) {
    if let Some(mut redaction) = strategies.iter().find_map(|s| s.redact_block(block)) {
        for inline in &mut redaction.content {
            redact_inline(inline, strategies);
        }
        for child in &mut redaction.children {
            redact_block(child, strategies);
        }
        *block = Block::Redaction(redaction);
        return;
    }
    match block {
        Block::Heading(h) => {
            for inline in &mut h.content {
                redact_inline(inline, strategies);
            }
        }
        Block::Paragraph(p) => {
            for inline in &mut p.content {
                redact_inline(inline, strategies);
            }
        }
        Block::Annotation(a) => {
            for child in &mut a.children {
                redact_block(child, strategies);
            }
        }
        Block::Redaction(r) => {
            for inline in &mut r.content {
                redact_inline(inline, strategies);
            }
            for child in &mut r.children {
                redact_block(child, strategies);
            }
        }
        Block::Placeholder(p) => {
            for child in &mut p.children {
                redact_block(child, strategies);
            }
        }
        Block::CodeBlock(_) | Block::RawText(_) => {}
    }
}

fn redact_inline(inline: &mut Inline, strategies: &StrategySet) {
    if let Some(mut redaction) = strategies.iter().find_map(|s| s.redact_inline(inline)) {
        // The preserved source stays pristine; only the display content is
        // searched for further redactions.
        for child in &mut redaction.content {
            redact_inline(child, strategies);
        }
        *inline = Inline::Redaction(redaction);
        return;
    }
    match inline {
        Inline::Bold(children) | Inline::Italic(children) => {
            for child in children {
                redact_inline(child, strategies);
            }
        }
        Inline::Link(link) => {
            for child in &mut link.children {
                redact_inline(child, strategies);
            }
        }
        Inline::Redaction(r) => {
            for child in &mut r.content {
                redact_inline(child, strategies);
            }
        }
        Inline::Text(_) | Inline::Code(_) | Inline::Image(_) | Inline::Placeholder(_) => {}
    }
}

/// Number every redaction in preorder from a single counter, outer before
/// inner. Returns the count assigned.
pub fn assign_indices(doc: &mut Document) -> usize {
    let mut next = 0;
    for block in &mut doc.children {
        number_block(block, &mut next);
    }
    next
}

fn number_block(block: &mut Block, next: &mut usize) {
    match block {
        Block::Redaction(r) => {
            r.index = *next;
            *next += 1;
            for inline in &mut r.content {
                number_inline(inline, next);
            }
            for child in &mut r.children {
                number_block(child, next);
            }
        }
        Block::Heading(h) => {
            for inline in &mut h.content {
                number_inline(inline, next);
            }
        }
        Block::Paragraph(p) => {
            for inline in &mut p.content {
                number_inline(inline, next);
            }
        }
        Block::Annotation(a) => {
            for child in &mut a.children {
                number_block(child, next);
            }
        }
        Block::Placeholder(p) => {
            for child in &mut p.children {
                number_block(child, next);
            }
        }
        Block::CodeBlock(_) | Block::RawText(_) => {}
    }
}

fn number_inline(inline: &mut Inline, next: &mut usize) {
    match inline {
        Inline::Redaction(r) => {
            r.index = *next;
            *next += 1;
            for child in &mut r.content {
                number_inline(child, next);
            }
        }
        Inline::Bold(children) | Inline::Italic(children) => {
            for child in children {
                number_inline(child, next);
            }
        }
        Inline::Link(link) => {
            for child in &mut link.children {
                number_inline(child, next);
            }
        }
        Inline::Text(_) | Inline::Code(_) | Inline::Image(_) | Inline::Placeholder(_) => {}
    }
}
