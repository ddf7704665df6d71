//! Check command - validate configuration and CMS content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_cms::{CmsClient, StrapiQuery};
use folio_core::{Config, Entity};
use serde_json::Value;

/// Longest value a Strapi `string` attribute accepts.
pub const MAX_STRING_LEN: usize = 255;

const TITLE_PREVIEW_LEN: usize = 100;

/// Largest page Strapi serves by default (`api.rest.maxLimit`).
const PAGE_SIZE: u32 = 100;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration, then looks for portfolio entries whose
/// `string` fields exceed what Strapi stores.
pub async fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => match c.validate() {
            Ok(()) => {
                println!("  ✓ Configuration valid");
                Some(c)
            }
            Err(e) => {
                result.add_error(format!("Configuration error: {e}"));
                println!("  ✗ Configuration invalid: {e}");
                None
            }
        },
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        if let Err(e) = cfg.smtp.settings() {
            result.add_warning(format!("Lead intake disabled: {e}"));
        }

        println!("\nChecking portfolio entries...");
        check_portfolios(cfg, &mut result).await;
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

async fn check_portfolios(config: &Config, result: &mut ValidationResult) {
    let client = match CmsClient::new(&config.cms) {
        Ok(client) => client,
        Err(e) => {
            result.add_error(format!("CMS client error: {e}"));
            return;
        }
    };

    let query = StrapiQuery::new().publication_state("preview");
    let entries = match client.fetch_all("/portfolios", &query, PAGE_SIZE).await {
        Ok(entries) => entries,
        Err(e) => {
            result.add_warning(format!("Could not fetch portfolios: {e}"));
            return;
        }
    };

    if entries.is_empty() {
        println!("  No portfolio entries found.");
        return;
    }

    let mut clean = true;
    for entry in &entries {
        let issues = long_field_issues(entry);
        if issues.is_empty() {
            continue;
        }
        clean = false;

        println!("  ✗ Portfolio ID {}:", entry.id());
        for issue in &issues {
            println!("     - {issue}");
        }
        if let Some(title) = entry.get("title").and_then(Value::as_str) {
            let preview: String = title.chars().take(TITLE_PREVIEW_LEN).collect();
            println!("     Title preview: {preview}...");
        }
        result.add_warning(format!(
            "Portfolio ID {} has fields exceeding {MAX_STRING_LEN} characters",
            entry.id()
        ));
    }

    if clean {
        println!("  ✓ All portfolio fields are within the {MAX_STRING_LEN} character limit");
    }
}

/// Fields of a portfolio entry that are too long for a `string` attribute.
fn long_field_issues(entry: &Entity) -> Vec<String> {
    ["title", "shortDescription"]
        .into_iter()
        .filter_map(|field| {
            let len = entry.get(field)?.as_str()?.chars().count();
            (len > MAX_STRING_LEN)
                .then(|| format!("{field}: {len} characters (exceeds {MAX_STRING_LEN})"))
        })
        .collect()
}
