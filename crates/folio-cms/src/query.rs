//! Query-string builder for Strapi's REST parameters.
//!
//! Strapi parses its query with `qs`, so arrays and nested objects are sent
//! as bracketed keys: `populate[0]=images`, `filters[slug][$eq]=shop`.

/// An ordered list of Strapi query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrapiQuery {
    params: Vec<(String, String)>,
}

impl StrapiQuery {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the named relations.
    #[must_use]
    pub fn populate<I, S>(self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexed("populate", relations)
    }

    /// Populate every first-level relation (`populate=*`).
    #[must_use]
    pub fn populate_all(mut self) -> Self {
        self.params.push(("populate".to_string(), "*".to_string()));
        self
    }

    /// Sort by `field:asc` / `field:desc` entries, in priority order.
    #[must_use]
    pub fn sort<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexed("sort", fields)
    }

    /// Keep only entries whose `field` equals `value`.
    #[must_use]
    pub fn filter_eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.params
            .push((format!("filters[{field}][$eq]"), value.into()));
        self
    }

    /// Restrict to `live` or `preview` entries.
    #[must_use]
    pub fn publication_state(mut self, state: &str) -> Self {
        self.params
            .push(("publicationState".to_string(), state.to_string()));
        self
    }

    /// Request one page of a collection. Pages are numbered from 1.
    #[must_use]
    pub fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.params
            .retain(|(k, _)| !k.starts_with("pagination["));
        self.params
            .push(("pagination[page]".to_string(), page.to_string()));
        self.params
            .push(("pagination[pageSize]".to_string(), page_size.to_string()));
        self
    }

    /// The parameters as `(key, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// Whether no parameters were set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn indexed<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = self
            .params
            .iter()
            .filter(|(k, _)| k.starts_with(&format!("{key}[")))
            .count();
        for (i, value) in values.into_iter().enumerate() {
            self.params
                .push((format!("{key}[{}]", start + i), value.into()));
        }
        self
    }
}
