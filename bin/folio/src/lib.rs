//! folio CLI Library
//!
//! Command implementations for the `folio` binary: building the static
//! portfolio site from the CMS, serving the lead-intake endpoint and a few
//! content inspection tools.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, serve, render, normalize, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Print a rich-text document as HTML
//! cmd::render::run(Path::new("description.json"), false).unwrap();
//! ```

pub mod cmd;

pub use folio_core::Config;
pub use folio_generator::{BuildStats, Builder, SiteContent};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
