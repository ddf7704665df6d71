//! folio CMS Library
//!
//! Client for the Strapi REST API and the typed content queries the site is
//! built from.
//!
//! # Modules
//!
//! - [`client`] - HTTP access and envelope normalization
//! - [`query`] - Strapi query-string builder
//! - [`repository`] - Typed queries per content type

pub mod client;
pub mod query;
pub mod repository;

pub use client::{CmsClient, CmsError, Result};
pub use query::StrapiQuery;
pub use repository::ContentRepository;
