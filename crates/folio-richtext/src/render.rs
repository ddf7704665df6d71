//! HTML rendering of rich-text blocks.

use serde_json::Value;

use crate::block::{Block, Inline, InlineKind, ListFormat};

/// Renders blocks into an HTML fragment.
///
/// Text is emitted verbatim by default; the content source is trusted. Use
/// [`Renderer::escaping`] when blocks may carry markup from untrusted users.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    escape: bool,
}

impl Renderer {
    /// A renderer that passes text through unescaped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that HTML-escapes text before applying marks.
    #[must_use]
    pub fn escaping() -> Self {
        Self { escape: true }
    }

    /// Render a document. Blocks are rendered in order and empty blocks
    /// produce no output.
    #[must_use]
    pub fn render(&self, blocks: &[Block]) -> String {
        blocks.iter().map(|block| self.render_block(block)).collect()
    }

    /// Render a raw JSON document. Anything but an array renders as `""`,
    /// and elements that are not objects are skipped.
    #[must_use]
    pub fn render_value(&self, document: &Value) -> String {
        match document {
            Value::Array(blocks) => blocks
                .iter()
                .filter_map(Block::read)
                .map(|block| self.render_block(&block))
                .collect(),
            _ => String::new(),
        }
    }

    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Paragraph(children) => {
                let text: String = children.iter().map(|c| self.marked(c)).collect();
                wrap("p", &text)
            }
            Block::Heading { level, children } => {
                wrap(&format!("h{level}"), &self.plain(children))
            }
            Block::List { format, items } => {
                let items: String = items
                    .iter()
                    .map(|item| wrap("li", &self.plain(&item.children)))
                    .collect();
                let tag = match format {
                    ListFormat::Ordered => "ol",
                    ListFormat::Unordered => "ul",
                };
                wrap(tag, &items)
            }
            Block::Quote(children) => wrap("blockquote", &self.plain(children)),
            Block::Code(children) => {
                let text = self.plain(children);
                if text.is_empty() {
                    String::new()
                } else {
                    format!("<pre><code>{text}</code></pre>")
                }
            }
            Block::Other { children, .. } => wrap("p", &self.plain(children)),
        }
    }

    /// Concatenated text of inline nodes, marks ignored.
    fn plain(&self, children: &[Inline]) -> String {
        children.iter().map(|c| self.text(&c.text)).collect()
    }

    /// A paragraph leaf with its marks applied. Marks nest in a fixed order,
    /// innermost first: bold, italic, underline, strikethrough, code.
    fn marked(&self, inline: &Inline) -> String {
        if inline.kind != InlineKind::Text {
            return String::new();
        }

        let marks = inline.marks;
        let mut content = self.text(&inline.text);
        for (set, tag) in [
            (marks.bold, "strong"),
            (marks.italic, "em"),
            (marks.underline, "u"),
            (marks.strikethrough, "s"),
            (marks.code, "code"),
        ] {
            if set {
                content = format!("<{tag}>{content}</{tag}>");
            }
        }
        content
    }

    fn text(&self, text: &str) -> String {
        if self.escape {
            html_escape(text)
        } else {
            text.to_string()
        }
    }
}

/// Wrap non-empty content in a tag; empty content yields nothing.
fn wrap(tag: &str, content: &str) -> String {
    if content.is_empty() {
        String::new()
    } else {
        format!("<{tag}>{content}</{tag}>")
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render a document with the default (unescaped) renderer.
#[must_use]
pub fn render(blocks: &[Block]) -> String {
    Renderer::new().render(blocks)
}

/// Render a raw JSON document with the default (unescaped) renderer.
#[must_use]
pub fn render_value(document: &Value) -> String {
    Renderer::new().render_value(document)
}
