//! Page metadata: titles, descriptions, canonical paths and share images.

use folio_core::{ImageSize, MediaResolver, PortfolioProject};

/// Longest page title emitted before truncation.
pub const MAX_TITLE_LEN: usize = 60;

/// Longest page description emitted before truncation.
pub const MAX_DESCRIPTION_LEN: usize = 160;

const ELLIPSIS: &str = "...";

/// Head metadata for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    /// Site-relative path, starting with `/`.
    pub canonical_path: String,
    /// Absolute Open Graph image URL.
    pub image: Option<String>,
}

/// Cut `text` to `max` characters, replacing the tail with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(ELLIPSIS.len())).collect();
    format!("{kept}{ELLIPSIS}")
}

/// Site-relative path of a project's detail page.
#[must_use]
pub fn project_path(slug: &str) -> String {
    format!("/portfolio/{slug}")
}

impl PageMeta {
    /// Metadata for a project detail page.
    #[must_use]
    pub fn for_project(project: &PortfolioProject, media: &MediaResolver) -> Self {
        let title = format!("{} | Portfolio Project", project.title);
        let description = match project.short_description.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!(
                "View details about {}, a project showcasing modern web development and scalable solutions.",
                project.title
            ),
        };

        let image = project
            .cover()
            .map(|cover| media.image_url(Some(cover), ImageSize::Large))
            .filter(|url| !url.is_empty());

        Self {
            title: truncate(&title, MAX_TITLE_LEN),
            description: Some(truncate(&description, MAX_DESCRIPTION_LEN)),
            canonical_path: project_path(&project.slug),
            image,
        }
    }

    /// Metadata for the page served when a project does not exist.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            title: "Project Not Found".to_string(),
            description: None,
            canonical_path: "/404.html".to_string(),
            image: None,
        }
    }
}
