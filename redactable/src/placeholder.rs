//! Placeholder tokenizer rules.
//!
//! Two pipeline rules that recognize redaction placeholder syntax in edited
//! text: the inline form `[display][index]` and the block form
//!
//! ```text
//! [display][index]
//!
//! ...inner blocks...
//!
//! [/][index]
//! ```
//!
//! Both are installed by [`install`] at precise positions: the inline rule
//! ahead of `link` (a placeholder run is also a valid link label prefix) and
//! the block rule ahead of `paragraph` (an open marker line would otherwise
//! be swallowed as paragraph text). Anything the bracket scanner declines is
//! left for the ordinary rules, so malformed placeholder syntax degrades to
//! literal text instead of erroring.

use crate::ir::nodes::{Block, BlockPlaceholder, Inline, InlinePlaceholder, PlaceholderContent};
use crate::markdown::parser::{
    BlockMatch, BlockRule, InlineMatch, InlineRule, ParseCx, Pipeline, PipelineBuilder,
};
use crate::scan::{scan, BracketScan};
use crate::Error;

/// Inline placeholder runs: `[cat][1]` or the nested `[[lien image][2]][3]`.
pub struct InlinePlaceholderRule;

impl InlineRule for InlinePlaceholderRule {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find('[').map(|i| i + from)
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        let scanned = scan(input)?;
        if let BracketScan::Flat { text, .. } = &scanned {
            // A bare close marker stays literal; it only has meaning as the
            // tail of a block placeholder.
            if text == "/" {
                return None;
            }
        }
        let consumed = scanned.len();
        if probe {
            return Some(InlineMatch {
                consumed,
                node: None,
            });
        }
        let node = match scanned {
            BracketScan::Flat { text, index, .. } => Inline::Placeholder(InlinePlaceholder {
                index,
                content: PlaceholderContent::Text(text),
            }),
            BracketScan::Nested { raw, index, .. } => Inline::Placeholder(InlinePlaceholder {
                index,
                content: PlaceholderContent::Inlines(cx.tokenize_inline(&raw)),
            }),
        };
        Some(InlineMatch {
            consumed,
            node: Some(node),
        })
    }
}

/// Block placeholder regions: a flat open marker alone on its line, a blank
/// line, inner blocks, a blank line, and the paired `[/][index]` close.
pub struct BlockPlaceholderRule;

impl BlockRule for BlockPlaceholderRule {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<BlockMatch> {
        let (text, index, open_len) = match scan(input)? {
            BracketScan::Flat { text, index, len } => (text, index, len),
            // The block form carries plain display text only.
            BracketScan::Nested { .. } => return None,
        };
        if text == "/" || text.contains('\n') {
            return None;
        }
        let after = &input[open_len..];
        // The open marker must end its line, with a blank line after.
        if !after.starts_with("\n\n") {
            return None;
        }

        let close = format!("\n\n[/][{index}]");
        let (inner_end, close_end) = find_close(after, &close)?;
        let consumed = open_len + close_end;
        if probe {
            return Some(BlockMatch {
                consumed,
                node: None,
            });
        }
        // The close may reuse the open marker's own blank line, putting its
        // match before the inner content would start.
        let inner = if inner_end > 2 { &after[2..inner_end] } else { "" };
        let children = cx.tokenize_block(inner);
        Some(BlockMatch {
            consumed,
            node: Some(Block::Placeholder(BlockPlaceholder {
                index,
                text,
                children,
            })),
        })
    }
}

/// Find the paired close marker in `after`, requiring it to end its own line
/// so `[/][4]` does not claim the front of `[/][41]`. Returns the byte offset
/// where the inner content ends and the offset just past the close marker.
fn find_close(after: &str, close: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(rel) = after[from..].find(close) {
        let start = from + rel;
        let end = start + close.len();
        let tail = &after[end..];
        if tail.is_empty() || tail.starts_with('\n') {
            return Some((start, end));
        }
        from = start + 1;
    }
    None
}

/// Install the placeholder rules into a builder.
pub fn install(builder: PipelineBuilder) -> Result<PipelineBuilder, Error> {
    builder
        .insert_inline_before("link", Box::new(InlinePlaceholderRule))?
        .insert_block_before("paragraph", Box::new(BlockPlaceholderRule))
}

/// The standard pipeline for placeholder-bearing Markdown.
pub fn pipeline() -> Pipeline {
    install(PipelineBuilder::markdown())
        .expect("link and paragraph are built-in rules")
        .build()
}
