//! Markdown serialization.
//!
//! A closed match over the IR, one renderer per node kind. Two of the
//! renderers are the redaction encoder: an inline redaction serializes to
//! `[display][index]` and a block redaction to a balanced marker pair with a
//! blank line on each side of the nested content. Placeholder nodes render
//! back to their own syntax, so a tokenized-but-unmerged tree prints
//! byte-for-byte what was tokenized.
//!
//! Plain text is never escaped. Serialization is a pure rendering step: it
//! can run any number of times over the same tree with identical output.

use crate::ir::nodes::{Block, Document, Inline, PlaceholderContent};

/// Serialize a document to Markdown. Blocks are separated by blank lines and
/// a non-empty document ends with a single newline.
pub fn serialize(doc: &Document) -> String {
    let blocks: Vec<String> = doc.children.iter().map(render_block).collect();
    if blocks.is_empty() {
        String::new()
    } else {
        blocks.join("\n\n") + "\n"
    }
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => render_inlines(&p.content),
        Block::Heading(h) => {
            format!("{} {}", "#".repeat(h.level), render_inlines(&h.content))
        }
        Block::CodeBlock(c) => {
            let lang = c.language.as_deref().unwrap_or("");
            let mut literal = c.literal.as_str();
            // The closing fence supplies the final newline.
            if let Some(stripped) = literal.strip_suffix('\n') {
                literal = stripped;
            }
            if literal.is_empty() {
                format!("```{lang}\n```")
            } else {
                format!("```{lang}\n{literal}\n```")
            }
        }
        Block::Annotation(a) => {
            let params: String = a
                .parameters
                .iter()
                .map(|(k, v)| format!(" {k}={v}"))
                .collect();
            let open = format!("<!-- {}{} -->", a.label, params);
            let close = format!("<!-- /{} -->", a.label);
            if a.children.is_empty() {
                format!("{open}\n{close}")
            } else {
                format!("{open}\n\n{}\n\n{close}", render_blocks(&a.children))
            }
        }
        Block::Redaction(r) => {
            // Even an empty body keeps its blank-line separators so the
            // placeholder tokenizer can find the close marker again.
            format!(
                "[{}][{}]\n\n{}\n\n[/][{}]",
                render_inlines(&r.content),
                r.index,
                render_blocks(&r.children),
                r.index
            )
        }
        Block::Placeholder(p) => {
            format!(
                "[{}][{}]\n\n{}\n\n[/][{}]",
                p.text,
                p.index,
                render_blocks(&p.children),
                p.index
            )
        }
        Block::RawText(text) => text.clone(),
    }
}

fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render inline content as Markdown.
pub fn render_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(render_inline).collect()
}

fn render_inline(inline: &Inline) -> String {
    match inline {
        Inline::Text(text) => text.clone(),
        Inline::Bold(children) => format!("**{}**", render_inlines(children)),
        Inline::Italic(children) => format!("*{}*", render_inlines(children)),
        Inline::Code(code) => {
            if code.contains('`') {
                format!("`` {code} ``")
            } else {
                format!("`{code}`")
            }
        }
        Inline::Link(link) => {
            // Autolink shape round-trips as an autolink.
            if link.title.is_none() && link.children == vec![Inline::Text(link.url.clone())] {
                return format!("<{}>", link.url);
            }
            match &link.title {
                Some(title) => format!(
                    "[{}]({} \"{}\")",
                    render_inlines(&link.children),
                    link.url,
                    title
                ),
                None => format!("[{}]({})", render_inlines(&link.children), link.url),
            }
        }
        Inline::Image(image) => match &image.title {
            Some(title) => format!("![{}]({} \"{}\")", image.alt, image.url, title),
            None => format!("![{}]({})", image.alt, image.url),
        },
        Inline::Redaction(r) => format!("[{}][{}]", render_inlines(&r.content), r.index),
        Inline::Placeholder(p) => match &p.content {
            PlaceholderContent::Text(text) => format!("[{}][{}]", text, p.index),
            PlaceholderContent::Inlines(children) => {
                format!("[{}][{}]", render_inlines(children), p.index)
            }
        },
    }
}

/// Render inline content as plain text: formatting markers dropped, links
/// and images reduced to their visible text. This is the "display text" a
/// rebuild strategy receives for nested placeholder content.
pub fn render_plain(inlines: &[Inline]) -> String {
    inlines.iter().map(render_plain_one).collect()
}

fn render_plain_one(inline: &Inline) -> String {
    match inline {
        Inline::Text(text) => text.clone(),
        Inline::Bold(children) | Inline::Italic(children) => render_plain(children),
        Inline::Code(code) => code.clone(),
        Inline::Link(link) => render_plain(&link.children),
        Inline::Image(image) => image.alt.clone(),
        Inline::Redaction(r) => render_plain(&r.content),
        Inline::Placeholder(p) => match &p.content {
            PlaceholderContent::Text(text) => text.clone(),
            PlaceholderContent::Inlines(children) => render_plain(children),
        },
    }
}
