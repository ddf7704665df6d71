//! Serve command - runs the lead-intake service

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;

/// Run the serve command.
///
/// Configuration comes from the file when present, overlaid with `FOLIO__*`
/// environment variables; SMTP settings are only checked per request.
pub async fn run(config_path: &Path, bind: Option<&str>) -> Result<()> {
    let mut config =
        Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(bind) = bind {
        tracing::info!(bind, "Overriding bind address from CLI");
        config.server.bind = bind.to_string();
    }

    if let Err(e) = config.smtp.settings() {
        tracing::warn!(error = %e, "lead submissions will fail until SMTP is configured");
    }

    folio_lead::serve(&config)
        .await
        .wrap_err("Lead service failed")?;

    Ok(())
}
