//! folio Core Library
//!
//! Core types, configuration, CMS envelope normalization and error handling
//! for the folio portfolio toolkit.

pub mod config;
pub mod content;
pub mod dates;
pub mod envelope;
pub mod error;
pub mod media;

pub use config::{AccentColor, Config, SmtpConfig, SmtpSettings};
pub use content::{
    Certificate, EntityId, Experience, ImpactMetric, PortfolioProject, SiteSettings, StrapiImage,
};
pub use envelope::{ContentEnvelope, Entity, Normalized, Payload, normalize, normalize_value};
pub use error::{CoreError, Result};
pub use media::{ImageSize, MediaResolver};
