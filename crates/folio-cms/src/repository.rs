//! Typed queries for the portfolio content types.
//!
//! Page-facing queries never fail: a CMS outage degrades to empty collections
//! and default settings so a build can still produce a site. Errors are
//! logged where they are swallowed.

use folio_core::{
    Certificate, Entity, Experience, PortfolioProject, SiteSettings, normalize_value,
};
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::{
    client::{CmsClient, Result},
    query::StrapiQuery,
};

const LIVE: &str = "live";

/// Read access to the site's content types.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    client: CmsClient,
}

impl ContentRepository {
    /// Wrap a client.
    #[must_use]
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    /// All published projects, newest first.
    pub async fn portfolio_projects(&self) -> Vec<PortfolioProject> {
        let query = StrapiQuery::new()
            .populate(["images", "coverImage"])
            .sort(["publishedAt:desc"])
            .publication_state(LIVE);
        self.collection("portfolio projects", "/portfolios", &query)
            .await
    }

    /// The published project with the given slug.
    pub async fn portfolio_by_slug(&self, slug: &str) -> Option<PortfolioProject> {
        let query = StrapiQuery::new()
            .filter_eq("slug", slug)
            .populate(["images", "coverImage"])
            .publication_state(LIVE);
        self.collection("portfolio by slug", "/portfolios", &query)
            .await
            .into_iter()
            .next()
    }

    /// Experience entries by explicit order, then most recent start.
    pub async fn experience(&self) -> Vec<Experience> {
        let query = StrapiQuery::new()
            .sort(["order:asc", "startDate:desc"])
            .publication_state(LIVE);
        self.collection("experience", "/experiences", &query).await
    }

    /// Certificates, most recently issued first.
    pub async fn certificates(&self) -> Vec<Certificate> {
        let query = StrapiQuery::new()
            .populate(["logo", "image"])
            .sort(["issueDate:desc"])
            .publication_state(LIVE);
        self.collection("certificates", "/certificates", &query)
            .await
    }

    /// The site settings single type, or built-in defaults.
    pub async fn site_settings(&self) -> SiteSettings {
        let query = StrapiQuery::new().populate_all();
        let body = match self.client.fetch("/site-setting", &query).await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "error fetching site settings");
                return SiteSettings::default();
            }
        };

        match normalize_value(body).into_one().map(Entity::into_typed) {
            Some(Ok(settings)) => SiteSettings::with_fallbacks(settings),
            Some(Err(e)) => {
                error!(error = %e, "unreadable site settings, using defaults");
                SiteSettings::default()
            }
            None => {
                warn!("site settings not published, using defaults");
                SiteSettings::default()
            }
        }
    }

    /// Blog posts with cover image and author. Errors are returned to the
    /// caller.
    pub async fn blog_posts(&self) -> Result<Vec<Entity>> {
        let query = StrapiQuery::new()
            .populate(["coverImage", "author"])
            .sort(["publishedAt:desc"])
            .publication_state(LIVE);
        Ok(self
            .client
            .fetch_normalized("/blog-posts", &query)
            .await?
            .into_vec())
    }

    async fn collection<T: DeserializeOwned>(
        &self,
        label: &str,
        path: &str,
        query: &StrapiQuery,
    ) -> Vec<T> {
        let normalized = match self.client.fetch_normalized(path, query).await {
            Ok(normalized) => normalized,
            Err(e) => {
                error!(label, error = %e, "error fetching collection");
                return Vec::new();
            }
        };

        normalized
            .into_vec()
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id().clone();
                entity
                    .into_typed()
                    .map_err(|e| warn!(label, %id, error = %e, "skipping unreadable entry"))
                    .ok()
            })
            .collect()
    }
}
