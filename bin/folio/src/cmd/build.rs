//! Build command - fetches CMS content and generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_cms::{CmsClient, ContentRepository};
use folio_core::Config;
use folio_generator::{Builder, SiteContent};

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, "Starting build");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    config.validate().wrap_err("Invalid configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let output = output.map_or_else(|| config.build.output_dir.clone().into(), Path::to_path_buf);

    let client = CmsClient::new(&config.cms).wrap_err("Failed to create CMS client")?;
    let content = fetch_content(&ContentRepository::new(client)).await;

    let builder = Builder::new(config, &output);
    let stats = builder.build(&content).wrap_err("Build failed")?;

    println!();
    println!("  Build complete!");
    println!();
    println!("  Pages:     {}", stats.pages);
    println!("  Projects:  {}", stats.projects);
    if stats.skipped > 0 {
        println!("  Skipped:   {}", stats.skipped);
    }
    println!("  Output:    {}", output.display());
    println!("  Time:      {:.2}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

/// Fetch everything the site needs, concurrently.
pub async fn fetch_content(repository: &ContentRepository) -> SiteContent {
    let (settings, projects, experience, certificates) = tokio::join!(
        repository.site_settings(),
        repository.portfolio_projects(),
        repository.experience(),
        repository.certificates(),
    );

    tracing::info!(
        projects = projects.len(),
        experience = experience.len(),
        certificates = certificates.len(),
        "fetched content"
    );

    SiteContent {
        settings,
        projects,
        experience,
        certificates,
    }
}
