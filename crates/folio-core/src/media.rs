//! Media URL resolution for uploaded files.

use crate::content::StrapiImage;

/// Rendition sizes produced by the upload plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    Thumbnail,
    Small,
    #[default]
    Medium,
    Large,
}

/// Turns upload paths into absolute URLs served by the CMS.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    origin: String,
}

impl MediaResolver {
    /// Build a resolver from the REST API base URL; uploads are served from
    /// the same host without the `/api` prefix.
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        Self {
            origin: api_url.replacen("/api", "", 1),
        }
    }

    /// The origin uploads are served from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolve an upload path. Absolute URLs pass through untouched.
    #[must_use]
    pub fn media_url(&self, url: Option<&str>) -> String {
        match url {
            None | Some("") => String::new(),
            Some(url) if url.starts_with("http") => url.to_string(),
            Some(url) => format!("{}{url}", self.origin),
        }
    }

    /// Resolve the best URL for an image: the preferred rendition, then
    /// large, medium and small, then the original file.
    #[must_use]
    pub fn image_url(&self, image: Option<&StrapiImage>, preferred: ImageSize) -> String {
        let Some(image) = image else {
            return String::new();
        };

        let rendition = image.formats.as_ref().and_then(|formats| {
            let pick = |size: ImageSize| {
                let format = match size {
                    ImageSize::Thumbnail => formats.thumbnail.as_ref(),
                    ImageSize::Small => formats.small.as_ref(),
                    ImageSize::Medium => formats.medium.as_ref(),
                    ImageSize::Large => formats.large.as_ref(),
                };
                format
                    .and_then(|format| format.url.as_deref())
                    .filter(|url| !url.is_empty())
            };

            [preferred, ImageSize::Large, ImageSize::Medium, ImageSize::Small]
                .into_iter()
                .find_map(pick)
        });

        if let Some(url) = rendition {
            return self.media_url(Some(url));
        }

        let original = image
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| image.data.as_ref().and_then(|d| d.url.as_deref()));

        match original {
            Some(url) if !url.is_empty() => self.media_url(Some(url)),
            _ => {
                tracing::warn!(id = ?image.id, "image object missing URL");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ImageFormat, ImageFormats, MediaRef};

    fn resolver() -> MediaResolver {
        MediaResolver::new("https://cms.example.com/api")
    }

    fn rendition(url: &str) -> Option<ImageFormat> {
        Some(ImageFormat {
            url: Some(url.to_string()),
            ..ImageFormat::default()
        })
    }

    #[test]
    fn test_origin_strips_api_prefix() {
        assert_eq!(resolver().origin(), "https://cms.example.com");
        assert_eq!(
            MediaResolver::new("http://localhost:1337/api").origin(),
            "http://localhost:1337"
        );
    }

    #[test]
    fn test_media_url() {
        let media = resolver();
        assert_eq!(media.media_url(None), "");
        assert_eq!(media.media_url(Some("")), "");
        assert_eq!(
            media.media_url(Some("/uploads/a.png")),
            "https://cms.example.com/uploads/a.png"
        );
        assert_eq!(
            media.media_url(Some("https://cdn.example.com/a.png")),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_image_url_prefers_requested_format() {
        let image = StrapiImage {
            url: Some("/uploads/original.png".into()),
            formats: Some(ImageFormats {
                small: rendition("/uploads/small.png"),
                medium: rendition("/uploads/medium.png"),
                large: rendition("/uploads/large.png"),
                thumbnail: None,
            }),
            ..StrapiImage::default()
        };

        let media = resolver();
        assert_eq!(
            media.image_url(Some(&image), ImageSize::Small),
            "https://cms.example.com/uploads/small.png"
        );
        assert_eq!(
            media.image_url(Some(&image), ImageSize::Thumbnail),
            "https://cms.example.com/uploads/large.png"
        );
    }

    #[test]
    fn test_image_url_falls_back_to_original() {
        let media = resolver();
        let plain = StrapiImage {
            url: Some("/uploads/original.png".into()),
            ..StrapiImage::default()
        };
        let wrapped = StrapiImage {
            data: Some(MediaRef {
                url: Some("/uploads/wrapped.png".into()),
            }),
            ..StrapiImage::default()
        };

        assert_eq!(
            media.image_url(Some(&plain), ImageSize::Medium),
            "https://cms.example.com/uploads/original.png"
        );
        assert_eq!(
            media.image_url(Some(&wrapped), ImageSize::Large),
            "https://cms.example.com/uploads/wrapped.png"
        );
    }

    #[test]
    fn test_image_url_missing() {
        let media = resolver();
        assert_eq!(media.image_url(None, ImageSize::Medium), "");
        assert_eq!(media.image_url(Some(&StrapiImage::default()), ImageSize::Medium), "");
    }
}
