//! Restoration: merge an edited placeholder document with the original.
//!
//! The join is keyed by placeholder index, never by position: collect every
//! redaction of the original tree into a map, then walk the edited tree and
//! replace each placeholder with the node its strategy rebuilds from the
//! preserved source and the edited display text. Placeholders may be moved,
//! duplicated, or dropped by the edit; each occurrence resolves on its own.
//!
//! There is no failure path. A placeholder whose index is unknown, whose
//! redaction kind has no registered strategy, or whose level (inline/block)
//! does not match its redaction degrades to its literal text, so the edited
//! content is never lost.

use std::collections::HashMap;

use crate::ir::nodes::{
    Block, BlockRedaction, Document, Inline, InlineRedaction, PlaceholderContent,
};
use crate::markdown::parser::Pipeline;
use crate::markdown::{render_inlines, render_plain, serialize};
use crate::redact::{assign_indices, redact_tree};
use crate::strategy::StrategySet;

/// One redaction from the original tree, found by index.
enum RedactionRef<'a> {
    Inline(&'a InlineRedaction),
    Block(&'a BlockRedaction),
}

/// Full round-trip tail: re-derive the redactions from the pristine original,
/// parse the edited text with `pipeline` (which must carry the placeholder
/// rules), merge, and serialize.
pub fn restore(
    original: &str,
    edited: &str,
    pipeline: &Pipeline,
    strategies: &StrategySet,
) -> String {
    let mut source = pipeline.parse(original);
    redact_tree(&mut source, strategies);
    assign_indices(&mut source);
    let merged = restore_tree(&source, pipeline.parse(edited), strategies);
    serialize(&merged)
}

/// Merge an edited tree against the redacted original tree.
pub fn restore_tree(original: &Document, edited: Document, strategies: &StrategySet) -> Document {
    let mut redactions = HashMap::new();
    for block in &original.children {
        collect_block(block, &mut redactions);
    }
    let merger = Merger {
        redactions,
        strategies,
    };
    Document {
        children: merger.merge_blocks(edited.children),
    }
}

fn collect_block<'a>(block: &'a Block, out: &mut HashMap<usize, RedactionRef<'a>>) {
    match block {
        Block::Redaction(r) => {
            out.insert(r.index, RedactionRef::Block(r));
            for inline in &r.content {
                collect_inline(inline, out);
            }
            for child in &r.children {
                collect_block(child, out);
            }
        }
        Block::Heading(h) => {
            for inline in &h.content {
                collect_inline(inline, out);
            }
        }
        Block::Paragraph(p) => {
            for inline in &p.content {
                collect_inline(inline, out);
            }
        }
        Block::Annotation(a) => {
            for child in &a.children {
                collect_block(child, out);
            }
        }
        Block::Placeholder(p) => {
            for child in &p.children {
                collect_block(child, out);
            }
        }
        Block::CodeBlock(_) | Block::RawText(_) => {}
    }
}

fn collect_inline<'a>(inline: &'a Inline, out: &mut HashMap<usize, RedactionRef<'a>>) {
    match inline {
        Inline::Redaction(r) => {
            out.insert(r.index, RedactionRef::Inline(r));
            for child in &r.content {
                collect_inline(child, out);
            }
        }
        Inline::Bold(children) | Inline::Italic(children) => {
            for child in children {
                collect_inline(child, out);
            }
        }
        Inline::Link(link) => {
            for child in &link.children {
                collect_inline(child, out);
            }
        }
        Inline::Text(_) | Inline::Code(_) | Inline::Image(_) | Inline::Placeholder(_) => {}
    }
}

struct Merger<'a> {
    redactions: HashMap<usize, RedactionRef<'a>>,
    strategies: &'a StrategySet,
}

impl Merger<'_> {
    fn merge_blocks(&self, blocks: Vec<Block>) -> Vec<Block> {
        blocks
            .into_iter()
            .flat_map(|block| self.merge_block(block))
            .collect()
    }

    fn merge_block(&self, block: Block) -> Vec<Block> {
        match block {
            Block::Placeholder(p) => {
                // The body is merged first so nested placeholders resolve
                // before the outer rebuild sees them.
                let children = self.merge_blocks(p.children);
                if let Some(RedactionRef::Block(r)) = self.redactions.get(&p.index) {
                    if let Some(strategy) = self.strategies.get(&r.kind) {
                        if let Some(restored) =
                            strategy.restore_block(&r.source, &p.text, children.clone())
                        {
                            return restored;
                        }
                    }
                }
                // Degrade: reproduce the markers around the merged body.
                let mut out = vec![Block::RawText(format!("[{}][{}]", p.text, p.index))];
                out.extend(children);
                out.push(Block::RawText(format!("[/][{}]", p.index)));
                out
            }
            Block::Heading(mut h) => {
                h.content = self.merge_inlines(h.content);
                vec![Block::Heading(h)]
            }
            Block::Paragraph(mut p) => {
                p.content = self.merge_inlines(p.content);
                vec![Block::Paragraph(p)]
            }
            Block::Annotation(mut a) => {
                a.children = self.merge_blocks(a.children);
                vec![Block::Annotation(a)]
            }
            other => vec![other],
        }
    }

    fn merge_inlines(&self, inlines: Vec<Inline>) -> Vec<Inline> {
        inlines
            .into_iter()
            .map(|inline| self.merge_inline(inline))
            .collect()
    }

    fn merge_inline(&self, inline: Inline) -> Inline {
        match inline {
            Inline::Placeholder(p) => {
                let (text, children) = match p.content {
                    PlaceholderContent::Text(text) => (text, None),
                    PlaceholderContent::Inlines(children) => {
                        let merged = self.merge_inlines(children);
                        (render_plain(&merged), Some(merged))
                    }
                };
                if let Some(RedactionRef::Inline(r)) = self.redactions.get(&p.index) {
                    if let Some(strategy) = self.strategies.get(&r.kind) {
                        if let Some(restored) =
                            strategy.restore_inline(&r.source, &text, children.as_deref())
                        {
                            return restored;
                        }
                    }
                }
                // Degrade: the run becomes literal text, display preserved.
                let display = match &children {
                    Some(children) => render_inlines(children),
                    None => text,
                };
                Inline::Text(format!("[{}][{}]", display, p.index))
            }
            Inline::Bold(children) => Inline::Bold(self.merge_inlines(children)),
            Inline::Italic(children) => Inline::Italic(self.merge_inlines(children)),
            Inline::Link(mut link) => {
                link.children = self.merge_inlines(link.children);
                Inline::Link(link)
            }
            other => other,
        }
    }
}
