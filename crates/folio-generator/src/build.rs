//! Build orchestration.
//!
//! Writes the landing page, one detail page per project and the not-found
//! page into the output directory.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{Certificate, Config, Experience, PortfolioProject, SiteSettings};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::html::{HtmlError, HtmlGenerator};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Everything fetched from the CMS for one build.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub settings: SiteSettings,
    pub projects: Vec<PortfolioProject>,
    pub experience: Vec<Experience>,
    pub certificates: Vec<Certificate>,
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// HTML documents written, including the landing and not-found pages.
    pub pages: usize,
    /// Project detail pages written.
    pub projects: usize,
    /// Projects left out because their slug cannot name a directory.
    pub skipped: usize,
    pub duration_ms: u64,
}

/// Whether a slug is safe to use as a single path segment.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Site builder.
#[derive(Debug)]
pub struct Builder {
    generator: HtmlGenerator,
    output_dir: PathBuf,
}

impl Builder {
    #[must_use]
    pub fn new(config: Config, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator: HtmlGenerator::new(config),
            output_dir: output_dir.into(),
        }
    }

    /// Build the site.
    pub fn build(&self, content: &SiteContent) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(output = %self.output_dir.display(), "starting build");

        self.clean_output()?;

        let (valid, invalid): (Vec<_>, Vec<_>) = content
            .projects
            .iter()
            .partition(|project| is_valid_slug(&project.slug));
        for project in &invalid {
            warn!(slug = %project.slug, title = %project.title, "skipping project with unusable slug");
        }
        stats.skipped = invalid.len();

        let listed: Vec<PortfolioProject> = valid.iter().map(|&p| p.clone()).collect();
        let home = self.generator.generate_home(
            &content.settings,
            &listed,
            &content.experience,
            &content.certificates,
        )?;
        self.write_page(&self.output_dir.join("index.html"), &home)?;

        let not_found = self.generator.generate_not_found()?;
        self.write_page(&self.output_dir.join("404.html"), &not_found)?;

        stats.projects = self.generate_projects(&valid)?;
        stats.pages = stats.projects + 2;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            projects = stats.projects,
            skipped = stats.skipped,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Generate project pages in parallel.
    fn generate_projects(&self, projects: &[&PortfolioProject]) -> Result<usize> {
        info!(count = projects.len(), "generating project pages");

        projects
            .par_iter()
            .map(|project| {
                let html = self.generator.generate_project(project)?;
                let path = self
                    .output_dir
                    .join("portfolio")
                    .join(&project.slug)
                    .join("index.html");
                self.write_page(&path, &html)
            })
            .collect::<Result<Vec<()>>>()
            .map(|written| written.len())
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        debug!(path = %path.display(), "wrote page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn project(slug: &str) -> PortfolioProject {
        PortfolioProject {
            title: format!("Project {slug}"),
            slug: slug.to_string(),
            ..PortfolioProject::default()
        }
    }

    #[test]
    fn test_valid_slug() {
        assert!(is_valid_slug("shop-2024"));
        assert!(is_valid_slug("my_app"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../etc"));
        assert!(!is_valid_slug("a/b"));
    }

    #[test]
    fn test_build_empty_site() {
        let output = TempDir::new().unwrap();
        let builder = Builder::new(Config::default(), output.path());

        let stats = builder.build(&SiteContent::default()).unwrap();

        assert_eq!(stats.pages, 2);
        assert_eq!(stats.projects, 0);
        assert!(output.path().join("index.html").exists());
        assert!(output.path().join("404.html").exists());
    }

    #[test]
    fn test_build_skips_bad_slugs() {
        let output = TempDir::new().unwrap();
        let builder = Builder::new(Config::default(), output.path());
        let content = SiteContent {
            projects: vec![project("shop"), project("../escape"), project("")],
            ..SiteContent::default()
        };

        let stats = builder.build(&content).unwrap();

        assert_eq!(stats.projects, 1);
        assert_eq!(stats.skipped, 2);
        assert!(output.path().join("portfolio/shop/index.html").exists());

        let home = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(!home.contains("escape"));
    }

    #[test]
    fn test_build_cleans_output() {
        let output = TempDir::new().unwrap();
        let stale = output.path().join("stale.html");
        fs::write(&stale, "old").unwrap();

        Builder::new(Config::default(), output.path())
            .build(&SiteContent::default())
            .unwrap();

        assert!(!stale.exists());
    }
}
