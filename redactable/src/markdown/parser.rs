//! Extensible Markdown parser.
//!
//! A [`Pipeline`] holds an ordered list of block rules and inline rules. Each
//! rule is tried in order at the current position; the first match consumes a
//! span and produces a node. Rules receive a [`ParseCx`] capability object for
//! recursive tokenization ("parse this substring as block/inline content")
//! and a `probe` flag: when probing, a rule must report whether it would
//! match without producing a node. Probing is how paragraph interruption is
//! decided, mirroring how hosts test competing syntaxes before committing.

use crate::ir::nodes::{Block, CodeBlock, Document, Heading, Image, Inline, Link, Paragraph};
use crate::ir::Annotation;
use crate::Error;

/// Result of a block rule matching at the current position.
pub struct BlockMatch {
    /// Bytes consumed from the input.
    pub consumed: usize,
    /// The produced node; `None` when probing.
    pub node: Option<Block>,
}

/// Result of an inline rule matching at the current position.
pub struct InlineMatch {
    pub consumed: usize,
    pub node: Option<Inline>,
}

/// A block-level tokenizer rule.
pub trait BlockRule {
    /// Unique name within the pipeline, used as an insertion anchor.
    fn name(&self) -> &'static str;

    /// Whether this rule may cut a paragraph short mid-flow. Rules that only
    /// make sense at a blank-line boundary leave this false.
    fn interrupts(&self) -> bool {
        false
    }

    /// Attempt to match at the start of `input`. Declining must leave no
    /// trace; when `probe` is set the rule must not build a node.
    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<BlockMatch>;
}

/// An inline-level tokenizer rule.
pub trait InlineRule {
    fn name(&self) -> &'static str;

    /// Earliest offset at or after `from` where this rule could possibly
    /// match, used to skip rule attempts while accumulating plain text.
    fn locator(&self, input: &str, from: usize) -> Option<usize>;

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch>;
}

/// An immutable, ordered parser configuration.
///
/// Construct with [`Pipeline::markdown`] for plain parsing or via
/// [`PipelineBuilder`] to insert additional rules. A pipeline is never
/// mutated after construction; registrations happen per-value, not in any
/// shared table.
pub struct Pipeline {
    block_rules: Vec<Box<dyn BlockRule>>,
    inline_rules: Vec<Box<dyn InlineRule>>,
}

impl Pipeline {
    /// The plain Markdown pipeline (no placeholder rules).
    pub fn markdown() -> Self {
        PipelineBuilder::markdown().build()
    }

    /// Parse `source` into a document. Total: any input yields some tree.
    pub fn parse(&self, source: &str) -> Document {
        Document {
            children: self.parse_blocks(source),
        }
    }

    pub(crate) fn parse_blocks(&self, source: &str) -> Vec<Block> {
        let cx = ParseCx { pipeline: self };
        let mut blocks = Vec::new();
        let mut rest = source;
        'outer: loop {
            rest = rest.trim_start_matches('\n');
            if rest.is_empty() {
                break;
            }
            for rule in &self.block_rules {
                if let Some(m) = rule.tokenize(rest, &cx, false) {
                    // A zero-length match cannot make progress; treat it as
                    // a decline.
                    if m.consumed == 0 {
                        continue;
                    }
                    if let Some(node) = m.node {
                        blocks.push(node);
                    }
                    rest = &rest[m.consumed..];
                    continue 'outer;
                }
            }
            // The paragraph rule matches any non-blank input, so this is
            // only reachable with a custom rule set. Consume one line
            // verbatim to stay total.
            let line_end = rest.find('\n').map(|i| i + 1).unwrap_or(rest.len());
            blocks.push(Block::RawText(rest[..line_end].trim_end_matches('\n').to_string()));
            rest = &rest[line_end..];
        }
        blocks
    }

    pub(crate) fn parse_inlines(&self, source: &str) -> Vec<Inline> {
        let cx = ParseCx { pipeline: self };
        let mut out: Vec<Inline> = Vec::new();
        let mut text = String::new();
        let mut rest = source;
        while !rest.is_empty() {
            let mut matched = false;
            for rule in &self.inline_rules {
                if rule.locator(rest, 0) != Some(0) {
                    continue;
                }
                if let Some(m) = rule.tokenize(rest, &cx, false) {
                    if m.consumed == 0 {
                        continue;
                    }
                    if !text.is_empty() {
                        out.push(Inline::Text(std::mem::take(&mut text)));
                    }
                    if let Some(node) = m.node {
                        out.push(node);
                    }
                    rest = &rest[m.consumed..];
                    matched = true;
                    break;
                }
            }
            if !matched {
                let ch = rest.chars().next().expect("input is non-empty");
                text.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        if !text.is_empty() {
            out.push(Inline::Text(text));
        }
        out
    }
}

/// Builder producing an immutable [`Pipeline`].
pub struct PipelineBuilder {
    block_rules: Vec<Box<dyn BlockRule>>,
    inline_rules: Vec<Box<dyn InlineRule>>,
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("block_rules", &self.block_rules.len())
            .field("inline_rules", &self.inline_rules.len())
            .finish()
    }
}

impl PipelineBuilder {
    /// An empty builder with no rules.
    pub fn new() -> Self {
        PipelineBuilder {
            block_rules: Vec::new(),
            inline_rules: Vec::new(),
        }
    }

    /// A builder pre-loaded with the built-in Markdown rules.
    pub fn markdown() -> Self {
        PipelineBuilder {
            block_rules: vec![
                Box::new(CodeFenceRule),
                Box::new(AnnotationRule),
                Box::new(HeadingRule),
                Box::new(ParagraphRule),
            ],
            inline_rules: vec![
                Box::new(CodeSpanRule),
                Box::new(StrongRule),
                Box::new(EmphasisRule),
                Box::new(ImageRule),
                Box::new(AutolinkRule),
                Box::new(LinkRule),
            ],
        }
    }

    /// Append a block rule after all existing ones.
    pub fn push_block(mut self, rule: Box<dyn BlockRule>) -> Self {
        self.block_rules.push(rule);
        self
    }

    /// Append an inline rule after all existing ones.
    pub fn push_inline(mut self, rule: Box<dyn InlineRule>) -> Self {
        self.inline_rules.push(rule);
        self
    }

    /// Insert a block rule immediately before the rule named `anchor`.
    pub fn insert_block_before(
        mut self,
        anchor: &str,
        rule: Box<dyn BlockRule>,
    ) -> Result<Self, Error> {
        let pos = self
            .block_rules
            .iter()
            .position(|r| r.name() == anchor)
            .ok_or_else(|| Error::UnknownRule(anchor.to_string()))?;
        self.block_rules.insert(pos, rule);
        Ok(self)
    }

    /// Insert an inline rule immediately before the rule named `anchor`.
    pub fn insert_inline_before(
        mut self,
        anchor: &str,
        rule: Box<dyn InlineRule>,
    ) -> Result<Self, Error> {
        let pos = self
            .inline_rules
            .iter()
            .position(|r| r.name() == anchor)
            .ok_or_else(|| Error::UnknownRule(anchor.to_string()))?;
        self.inline_rules.insert(pos, rule);
        Ok(self)
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            block_rules: self.block_rules,
            inline_rules: self.inline_rules,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Capability object handed to rules for recursive tokenization.
///
/// Rules never reach back into global parser state; nested reconstruction
/// goes through these two entry points.
pub struct ParseCx<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> ParseCx<'a> {
    /// Tokenize a substring as block-level document content.
    pub fn tokenize_block(&self, source: &str) -> Vec<Block> {
        self.pipeline.parse_blocks(source)
    }

    /// Tokenize a substring as inline content.
    pub fn tokenize_inline(&self, source: &str) -> Vec<Inline> {
        self.pipeline.parse_inlines(source)
    }

    /// Probe whether any interrupting block rule matches at `input`. Used by
    /// the paragraph rule to end a paragraph mid-flow.
    pub fn interrupts_paragraph(&self, input: &str) -> bool {
        self.pipeline
            .block_rules
            .iter()
            .filter(|r| r.interrupts())
            .any(|r| r.tokenize(input, self, true).is_some())
    }
}

fn line_of(input: &str) -> (&str, usize) {
    match input.find('\n') {
        Some(i) => (&input[..i], i + 1),
        None => (input, input.len()),
    }
}

/// ATX headings: `## Title`.
struct HeadingRule;

impl BlockRule for HeadingRule {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn interrupts(&self) -> bool {
        true
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<BlockMatch> {
        let (line, consumed) = line_of(input);
        let level = line.chars().take_while(|&c| c == '#').count();
        if level == 0 || level > 6 {
            return None;
        }
        let rest = &line[level..];
        if !rest.starts_with(' ') {
            return None;
        }
        if probe {
            return Some(BlockMatch {
                consumed,
                node: None,
            });
        }
        let content = cx.tokenize_inline(rest.trim());
        Some(BlockMatch {
            consumed,
            node: Some(Block::Heading(Heading { level, content })),
        })
    }
}

/// Fenced code blocks delimited by three backticks. An unterminated fence
/// runs to end of input, as in CommonMark.
struct CodeFenceRule;

impl BlockRule for CodeFenceRule {
    fn name(&self) -> &'static str {
        "code-fence"
    }

    fn interrupts(&self) -> bool {
        true
    }

    fn tokenize(&self, input: &str, _cx: &ParseCx<'_>, probe: bool) -> Option<BlockMatch> {
        let (line, first_len) = line_of(input);
        if !line.starts_with("```") {
            return None;
        }
        let info = line[3..].trim();
        let language = if info.is_empty() {
            None
        } else {
            Some(info.to_string())
        };

        let body = &input[first_len..];
        let (literal, consumed) = match find_closing_fence(body) {
            Some((content_len, fence_len)) => {
                (&body[..content_len], first_len + content_len + fence_len)
            }
            None => (body, input.len()),
        };
        if probe {
            return Some(BlockMatch {
                consumed,
                node: None,
            });
        }
        Some(BlockMatch {
            consumed,
            node: Some(Block::CodeBlock(CodeBlock {
                language,
                literal: literal.to_string(),
            })),
        })
    }
}

/// Find a line consisting of a closing fence; returns (bytes of content
/// including its trailing newline, bytes of the fence line).
fn find_closing_fence(body: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    while offset <= body.len() {
        let rest = &body[offset..];
        let (line, len) = line_of(rest);
        if line.trim_end() == "```" {
            return Some((offset, len));
        }
        if len == 0 {
            break;
        }
        offset += len;
    }
    None
}

/// Annotation regions delimited by HTML comments on their own lines:
/// `<!-- label key=value -->` ... `<!-- /label -->`. An open comment with no
/// matching close declines entirely and the text falls through to the
/// paragraph rule.
struct AnnotationRule;

impl BlockRule for AnnotationRule {
    fn name(&self) -> &'static str {
        "annotation"
    }

    fn interrupts(&self) -> bool {
        true
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<BlockMatch> {
        let (line, open_len) = line_of(input);
        let inner = line
            .trim_end()
            .strip_prefix("<!--")?
            .strip_suffix("-->")?
            .trim();
        if inner.starts_with('/') {
            return None;
        }
        let mut tokens = inner.split_whitespace();
        let label = tokens.next()?.to_string();

        let close = format!("\n<!-- /{label} -->");
        // Searching from one byte back makes the open line's own newline
        // available to the close pattern when the region is empty.
        let search = &input[open_len.saturating_sub(1)..];
        let rel = search.find(&close)?;
        let inner_end = open_len.saturating_sub(1) + rel;
        let consumed = inner_end + close.len();
        if probe {
            return Some(BlockMatch {
                consumed,
                node: None,
            });
        }

        let parameters: Vec<(String, String)> = tokens
            .filter_map(|t| {
                t.split_once('=')
                    .map(|(k, v)| (k.to_string(), v.to_string()))
            })
            .collect();
        let inner_text = if inner_end > open_len {
            &input[open_len..inner_end]
        } else {
            ""
        };
        let children = cx.tokenize_block(inner_text);
        Some(BlockMatch {
            consumed,
            node: Some(Block::Annotation(Annotation {
                label,
                parameters,
                children,
            })),
        })
    }
}

/// Paragraphs: consume lines until a blank line, end of input, or a line
/// where an interrupting block rule would match.
struct ParagraphRule;

impl BlockRule for ParagraphRule {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<BlockMatch> {
        let mut end = 0;
        let mut first = true;
        loop {
            let rest = &input[end..];
            if rest.is_empty() || rest.starts_with('\n') {
                break;
            }
            if !first && cx.interrupts_paragraph(rest) {
                break;
            }
            let (_, len) = line_of(rest);
            end += len;
            first = false;
        }
        if end == 0 {
            return None;
        }
        if probe {
            return Some(BlockMatch {
                consumed: end,
                node: None,
            });
        }
        let text = input[..end].trim_end_matches('\n');
        Some(BlockMatch {
            consumed: end,
            node: Some(Block::Paragraph(Paragraph {
                content: cx.tokenize_inline(text),
            })),
        })
    }
}

/// Inline code spans. The backtick run length is matched so literals
/// containing backticks can be expressed (`` `code` ``).
struct CodeSpanRule;

impl InlineRule for CodeSpanRule {
    fn name(&self) -> &'static str {
        "code"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find('`').map(|i| i + from)
    }

    fn tokenize(&self, input: &str, _cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        if !input.starts_with('`') {
            return None;
        }
        let ticks = input.chars().take_while(|&c| c == '`').count();
        let fence = &input[..ticks];
        let body = &input[ticks..];
        let close = body.find(fence)?;
        let mut literal = &body[..close];
        // One leading and trailing space is padding when the literal itself
        // starts or ends with a backtick.
        if literal.len() >= 2 && literal.starts_with(' ') && literal.ends_with(' ') {
            let trimmed = &literal[1..literal.len() - 1];
            if !trimmed.is_empty() {
                literal = trimmed;
            }
        }
        if probe {
            return Some(InlineMatch {
                consumed: ticks + close + ticks,
                node: None,
            });
        }
        Some(InlineMatch {
            consumed: ticks + close + ticks,
            node: Some(Inline::Code(literal.to_string())),
        })
    }
}

/// `**strong**` emphasis.
struct StrongRule;

impl InlineRule for StrongRule {
    fn name(&self) -> &'static str {
        "strong"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find("**").map(|i| i + from)
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        let body = input.strip_prefix("**")?;
        let close = body.find("**")?;
        if close == 0 {
            return None;
        }
        let consumed = close + 4;
        if probe {
            return Some(InlineMatch {
                consumed,
                node: None,
            });
        }
        Some(InlineMatch {
            consumed,
            node: Some(Inline::Bold(cx.tokenize_inline(&body[..close]))),
        })
    }
}

/// `*emphasis*`.
struct EmphasisRule;

impl InlineRule for EmphasisRule {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find('*').map(|i| i + from)
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        let body = input.strip_prefix('*')?;
        let close = body.find('*')?;
        if close == 0 {
            return None;
        }
        let consumed = close + 2;
        if probe {
            return Some(InlineMatch {
                consumed,
                node: None,
            });
        }
        Some(InlineMatch {
            consumed,
            node: Some(Inline::Italic(cx.tokenize_inline(&body[..close]))),
        })
    }
}

/// `![alt](url "title")` images. Alt text is plain, not recursively parsed.
struct ImageRule;

impl InlineRule for ImageRule {
    fn name(&self) -> &'static str {
        "image"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find("![").map(|i| i + from)
    }

    fn tokenize(&self, input: &str, _cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        let body = input.strip_prefix('!')?;
        let (label, dest, len) = scan_link_shape(body)?;
        if probe {
            return Some(InlineMatch {
                consumed: len + 1,
                node: None,
            });
        }
        let (url, title) = split_destination(dest);
        Some(InlineMatch {
            consumed: len + 1,
            node: Some(Inline::Image(Image {
                url,
                title,
                alt: label.to_string(),
            })),
        })
    }
}

/// `[text](url "title")` links.
struct LinkRule;

impl InlineRule for LinkRule {
    fn name(&self) -> &'static str {
        "link"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find('[').map(|i| i + from)
    }

    fn tokenize(&self, input: &str, cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        let (label, dest, len) = scan_link_shape(input)?;
        if probe {
            return Some(InlineMatch {
                consumed: len,
                node: None,
            });
        }
        let (url, title) = split_destination(dest);
        Some(InlineMatch {
            consumed: len,
            node: Some(Inline::Link(Link {
                url,
                title,
                children: cx.tokenize_inline(label),
            })),
        })
    }
}

/// `<scheme://...>` autolinks.
struct AutolinkRule;

impl InlineRule for AutolinkRule {
    fn name(&self) -> &'static str {
        "autolink"
    }

    fn locator(&self, input: &str, from: usize) -> Option<usize> {
        input[from..].find('<').map(|i| i + from)
    }

    fn tokenize(&self, input: &str, _cx: &ParseCx<'_>, probe: bool) -> Option<InlineMatch> {
        let body = input.strip_prefix('<')?;
        let close = body.find('>')?;
        let url = &body[..close];
        if !url.contains("://") || url.contains(char::is_whitespace) || url.contains('<') {
            return None;
        }
        let consumed = close + 2;
        if probe {
            return Some(InlineMatch {
                consumed,
                node: None,
            });
        }
        Some(InlineMatch {
            consumed,
            node: Some(Inline::Link(Link {
                url: url.to_string(),
                title: None,
                children: vec![Inline::Text(url.to_string())],
            })),
        })
    }
}

/// Match `[label](destination)` at the start of `input`, counting bracket
/// depth inside the label. Returns (label, destination, total byte length).
fn scan_link_shape(input: &str) -> Option<(&str, &str, usize)> {
    if !input.starts_with('[') {
        return None;
    }
    let mut depth = 0usize;
    let mut label_end = None;
    for (i, ch) in input.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    label_end = Some(i);
                    break;
                }
            }
            '\n' => return None,
            _ => {}
        }
    }
    let label_end = label_end?;
    let after = &input[label_end + 1..];
    let dest_body = after.strip_prefix('(')?;
    let dest_end = dest_body.find(')')?;
    if dest_body[..dest_end].contains('\n') {
        return None;
    }
    let len = label_end + 1 + 1 + dest_end + 1;
    Some((&input[1..label_end], &dest_body[..dest_end], len))
}

/// Split a link destination into URL and optional quoted title.
fn split_destination(dest: &str) -> (String, Option<String>) {
    let dest = dest.trim();
    if let Some(idx) = dest.find(" \"") {
        if dest.ends_with('"') && dest.len() > idx + 2 {
            return (
                dest[..idx].to_string(),
                Some(dest[idx + 2..dest.len() - 1].to_string()),
            );
        }
    }
    (dest.to_string(), None)
}
