//! folio Rich Text
//!
//! Converts Strapi "blocks" rich-text documents into HTML fragments.
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!([
//!     { "type": "heading", "level": 2, "children": [{ "type": "text", "text": "Results" }] },
//!     { "type": "paragraph", "children": [{ "type": "text", "text": "2x", "bold": true }] }
//! ]);
//!
//! assert_eq!(
//!     folio_richtext::render_value(&doc),
//!     "<h2>Results</h2><p><strong>2x</strong></p>"
//! );
//! ```

pub mod block;
pub mod render;

pub use block::{Block, Inline, InlineKind, ListFormat, ListItem, Marks};
pub use render::{Renderer, render, render_value};
