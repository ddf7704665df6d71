//! The rich-text document model.
//!
//! Blocks are read leniently from JSON: a missing or mistyped field reads as
//! its empty value and an unrecognised `type` becomes [`Block::Other`].
//! [`Block::read`] rejects values that are not objects at all.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// A structural unit of rich text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        children: Vec<Inline>,
    },
    List {
        format: ListFormat,
        items: Vec<ListItem>,
    },
    Quote(Vec<Inline>),
    Code(Vec<Inline>),
    /// Any other block type; rendered as a plain paragraph.
    Other {
        kind: String,
        children: Vec<Inline>,
    },
}

/// List numbering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFormat {
    Ordered,
    #[default]
    Unordered,
}

/// One entry of a list block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub children: Vec<Inline>,
}

/// A leaf text unit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Inline {
    pub kind: InlineKind,
    pub text: String,
    pub marks: Marks,
}

/// Whether an inline node is a plain text leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InlineKind {
    Text,
    /// Links and other inline elements; only their `text` is kept.
    #[default]
    Other,
}

/// Formatting flags of a text leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Inline {
    /// A plain text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: InlineKind::Text,
            text: text.into(),
            marks: Marks::default(),
        }
    }

    /// The same leaf with the given marks.
    #[must_use]
    pub fn with_marks(mut self, marks: Marks) -> Self {
        self.marks = marks;
        self
    }
}

impl Block {
    /// The block's `type` tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading { .. } => "heading",
            Self::List { .. } => "list",
            Self::Quote(_) => "quote",
            Self::Code(_) => "code",
            Self::Other { kind, .. } => kind,
        }
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn flag(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

fn children(value: &Value) -> &[Value] {
    value
        .get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn inlines(value: &Value) -> Vec<Inline> {
    children(value).iter().map(Inline::from).collect()
}

impl From<&Value> for Inline {
    fn from(value: &Value) -> Self {
        let kind = if str_field(value, "type") == "text" {
            InlineKind::Text
        } else {
            InlineKind::Other
        };

        Self {
            kind,
            text: str_field(value, "text").to_string(),
            marks: Marks {
                bold: flag(value, "bold"),
                italic: flag(value, "italic"),
                underline: flag(value, "underline"),
                strikethrough: flag(value, "strikethrough"),
                code: flag(value, "code"),
            },
        }
    }
}

impl From<Value> for Inline {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<&Value> for Block {
    fn from(value: &Value) -> Self {
        match str_field(value, "type") {
            "paragraph" => Self::Paragraph(inlines(value)),
            "heading" => {
                let level = value
                    .get("level")
                    .and_then(Value::as_u64)
                    .filter(|l| *l > 0)
                    .unwrap_or(1)
                    .min(6);
                Self::Heading {
                    // clamped to 1..=6 above
                    level: u8::try_from(level).unwrap_or(1),
                    children: inlines(value),
                }
            }
            "list" => Self::List {
                format: if str_field(value, "format") == "ordered" {
                    ListFormat::Ordered
                } else {
                    ListFormat::Unordered
                },
                items: children(value)
                    .iter()
                    .map(|item| ListItem {
                        children: inlines(item),
                    })
                    .collect(),
            },
            "quote" => Self::Quote(inlines(value)),
            "code" => Self::Code(inlines(value)),
            other => Self::Other {
                kind: other.to_string(),
                children: inlines(value),
            },
        }
    }
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl Block {
    /// Read one element of a document. Values that are not objects have no
    /// block shape and yield `None`.
    #[must_use]
    pub fn read(value: &Value) -> Option<Self> {
        if value.is_object() {
            Some(Self::from(value))
        } else {
            debug!(%value, "skipping unreadable rich-text block");
            None
        }
    }
}
