//! HTTP client for the Strapi REST API.

use std::time::Duration;

use folio_core::{Entity, MediaResolver, Normalized, config::CmsConfig, normalize_value};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::query::StrapiQuery;

/// CMS client errors.
#[derive(Debug, Error)]
pub enum CmsError {
    /// The request URL could not be built.
    #[error("invalid CMS URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport, timeout or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} {reason}")]
    Status { status: u16, reason: String },
}

/// Result type for CMS operations.
pub type Result<T> = std::result::Result<T, CmsError>;

/// Client for one Strapi instance.
#[derive(Debug, Clone)]
pub struct CmsClient {
    api_url: String,
    http: reqwest::Client,
    media: MediaResolver,
}

impl CmsClient {
    /// Create a client from configuration.
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            http,
            media: MediaResolver::new(&config.api_url),
        })
    }

    /// The REST API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Media resolver for uploads served by this instance.
    #[must_use]
    pub fn media(&self) -> &MediaResolver {
        &self.media
    }

    /// Build the request URL for `path` (e.g. `/portfolios`).
    pub fn request_url(&self, path: &str, query: &StrapiQuery) -> Result<Url> {
        let raw = format!("{}{path}", self.api_url);
        let mut url = Url::parse(&raw).map_err(|source| CmsError::Url { url: raw, source })?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                query
                    .pairs()
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }

        Ok(url)
    }

    /// GET a path and return the decoded JSON body.
    pub async fn fetch(&self, path: &str, query: &StrapiQuery) -> Result<Value> {
        let result = self.fetch_inner(path, query).await;
        if let Err(ref e) = result {
            error!(path, error = %e, "Strapi API error");
        }
        result
    }

    /// GET a path and normalize the response envelope.
    pub async fn fetch_normalized(&self, path: &str, query: &StrapiQuery) -> Result<Normalized> {
        Ok(normalize_value(self.fetch(path, query).await?))
    }

    /// Fetch every entry of a collection, one page of `page_size` at a time.
    ///
    /// Paging follows `meta.pagination.pageCount`. A response without
    /// pagination metadata is treated as the whole collection.
    pub async fn fetch_all(
        &self,
        path: &str,
        query: &StrapiQuery,
        page_size: u32,
    ) -> Result<Vec<Entity>> {
        let mut entries = Vec::new();
        let mut page = 1;
        loop {
            let body = self
                .fetch(path, &query.clone().paginate(page, page_size))
                .await?;
            let page_count = body
                .pointer("/meta/pagination/pageCount")
                .and_then(Value::as_u64);
            let batch = normalize_value(body).into_vec();
            debug!(path, page, count = batch.len(), ?page_count, "fetched page");

            let done = batch.is_empty() || page_count.is_none_or(|count| u64::from(page) >= count);
            entries.extend(batch);
            if done {
                return Ok(entries);
            }
            page += 1;
        }
    }

    async fn fetch_inner(&self, path: &str, query: &StrapiQuery) -> Result<Value> {
        let url = self.request_url(path, query)?;
        debug!(%url, "fetching CMS content");

        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    fn config(api_url: &str) -> CmsConfig {
        CmsConfig {
            api_url: api_url.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_request_url() {
        let client = CmsClient::new(&config("http://localhost:1337/api")).unwrap();
        let url = client
            .request_url("/portfolios", &StrapiQuery::new().filter_eq("slug", "a b"))
            .unwrap();

        assert_eq!(url.path(), "/api/portfolios");
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("filters[slug][$eq]".to_string(), "a b".to_string())]
        );
    }

    #[test]
    fn test_request_url_without_query() {
        let client = CmsClient::new(&config("http://localhost:1337/api")).unwrap();
        let url = client.request_url("/site-setting", &StrapiQuery::new()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1337/api/site-setting");
    }

    #[test]
    fn test_invalid_url() {
        let client = CmsClient::new(&config("not a url")).unwrap();
        let err = client.request_url("/x", &StrapiQuery::new()).unwrap_err();
        assert!(matches!(err, CmsError::Url { .. }));
    }

    #[test]
    fn test_media_origin() {
        let client = CmsClient::new(&config("https://cms.example.com/api")).unwrap();
        assert_eq!(client.media().origin(), "https://cms.example.com");
    }

    #[tokio::test]
    async fn test_fetch_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/portfolios"))
            .and(query_param("sort[0]", "publishedAt:desc"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 1, "attributes": { "slug": "one" } }]
            })))
            .mount(&server)
            .await;

        let client = CmsClient::new(&config(&format!("{}/api", server.uri()))).unwrap();
        let entities = client
            .fetch_normalized("/portfolios", &StrapiQuery::new().sort(["publishedAt:desc"]))
            .await
            .unwrap()
            .into_vec();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].get("slug"), Some(&json!("one")));
    }

    #[tokio::test]
    async fn test_fetch_all_pages() {
        let server = MockServer::start().await;
        for (page, ids) in [("1", [1, 2]), ("2", [3, 4])] {
            Mock::given(method("GET"))
                .and(path("/api/portfolios"))
                .and(query_param("pagination[page]", page))
                .and(query_param("pagination[pageSize]", "2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": ids.map(|id| json!({ "id": id, "attributes": {} })),
                    "meta": { "pagination": { "page": page, "pageSize": 2, "pageCount": 3 } }
                })))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/api/portfolios"))
            .and(query_param("pagination[page]", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 5, "attributes": {} }],
                "meta": { "pagination": { "page": 3, "pageSize": 2, "pageCount": 3 } }
            })))
            .mount(&server)
            .await;

        let client = CmsClient::new(&config(&format!("{}/api", server.uri()))).unwrap();
        let entries = client
            .fetch_all("/portfolios", &StrapiQuery::new(), 2)
            .await
            .unwrap();

        let ids: Vec<String> = entries.iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_fetch_all_without_pagination_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/portfolios"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 1 }, { "id": 2 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CmsClient::new(&config(&format!("{}/api", server.uri()))).unwrap();
        let entries = client
            .fetch_all("/portfolios", &StrapiQuery::new(), 2)
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CmsClient::new(&config(&format!("{}/api", server.uri()))).unwrap();
        let err = client
            .fetch("/missing", &StrapiQuery::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CmsError::Status { status: 404, .. }));
        assert_eq!(err.to_string(), "API error: 404 Not Found");
    }
}
