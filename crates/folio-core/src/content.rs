//! Typed content models for the portfolio collections.
//!
//! These are read from normalized entities (see [`crate::envelope`]). Every
//! field is lenient: the CMS omits empty relations and sends `null` for unset
//! JSON fields, so missing or `null` values fall back to defaults instead of
//! rejecting the record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a CMS record: numeric `id` or a v5 `documentId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An uploaded media file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrapiImage {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub alternative_text: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    /// Resized renditions generated by the upload plugin.
    #[serde(default)]
    pub formats: Option<ImageFormats>,

    /// Relation wrapper some endpoints leave around the file.
    #[serde(default)]
    pub data: Option<MediaRef>,
}

/// Resized renditions of an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFormats {
    #[serde(default)]
    pub thumbnail: Option<ImageFormat>,
    #[serde(default)]
    pub small: Option<ImageFormat>,
    #[serde(default)]
    pub medium: Option<ImageFormat>,
    #[serde(default)]
    pub large: Option<ImageFormat>,
}

/// A single rendition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFormat {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default)]
    pub url: Option<String>,
}

impl StrapiImage {
    /// Width over height, or 16:9 when dimensions are unknown.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => f64::from(w) / f64::from(h),
            _ => 16.0 / 9.0,
        }
    }
}

/// A single impact figure shown on a project page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetric {
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub value: String,
}

/// A portfolio project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProject {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,

    #[serde(default)]
    pub short_description: Option<String>,

    /// Rich-text blocks describing the project.
    #[serde(default)]
    pub description: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<StrapiImage>,

    #[serde(default)]
    pub cover_image: Option<StrapiImage>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: Vec<ImpactMetric>,

    /// `mobile`, `saas` or `website`.
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PortfolioProject {
    /// The explicit cover image, else the first gallery image.
    #[must_use]
    pub fn cover(&self) -> Option<&StrapiImage> {
        self.cover_image.as_ref().or_else(|| self.images.first())
    }

    /// Gallery images shown below the description (all but the first).
    #[must_use]
    pub fn gallery(&self) -> &[StrapiImage] {
        self.images.get(1..).unwrap_or_default()
    }
}

/// A position in the experience timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,

    #[serde(default)]
    pub logo: Option<StrapiImage>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,

    #[serde(default)]
    pub published_at: Option<String>,
}

/// A certificate or credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub issuer: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_date: String,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub credential_url: Option<String>,

    #[serde(default)]
    pub logo: Option<StrapiImage>,

    #[serde(default)]
    pub image: Option<StrapiImage>,

    #[serde(default)]
    pub published_at: Option<String>,
}

/// Social profile links shown in the hero and footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The site-wide single type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_subtitle: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub social_links: SocialLinks,

    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_email: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: Some(EntityId::Number(1)),
            hero_title: "Fullstack Developer".to_string(),
            hero_subtitle: "Creating apps that increase revenue".to_string(),
            social_links: SocialLinks {
                linkedin: Some(String::new()),
                github: Some(String::new()),
                email: None,
            },
            contact_email: String::new(),
        }
    }
}

impl SiteSettings {
    /// Replace blank hero text with the built-in defaults.
    #[must_use]
    pub fn with_fallbacks(mut self) -> Self {
        let defaults = Self::default();
        if self.hero_title.trim().is_empty() {
            self.hero_title = defaults.hero_title;
        }
        if self.hero_subtitle.trim().is_empty() {
            self.hero_subtitle = defaults.hero_subtitle;
        }
        self
    }
}
