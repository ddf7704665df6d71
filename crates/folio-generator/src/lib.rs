//! folio Generator Library
//!
//! Static page generation for the portfolio site.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`meta`] - Page titles, descriptions and share images
//! - [`html`] - HTML generation from CMS content
//! - [`build`] - Build orchestration

pub mod build;
pub mod html;
pub mod meta;
pub mod template;

pub use build::{BuildError, BuildStats, Builder, SiteContent};
pub use html::HtmlGenerator;
pub use meta::PageMeta;
pub use template::{Template, TemplateContext, TemplateRegistry};
