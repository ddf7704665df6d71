//! HTML generation for the portfolio pages.

use std::fmt::Write as _;

use folio_core::{
    Certificate, Config, Experience, ImageSize, MediaResolver, PortfolioProject, SiteSettings,
    StrapiImage, dates::{format_date, format_date_range},
};
use folio_richtext::Renderer;
use thiserror::Error;

use crate::{
    meta::{PageMeta, project_path},
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML operations.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Escape text for element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders site content into complete HTML documents.
#[derive(Debug, Clone)]
pub struct HtmlGenerator {
    config: Config,
    media: MediaResolver,
    templates: TemplateRegistry,
    renderer: Renderer,
}

impl HtmlGenerator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let media = MediaResolver::new(&config.cms.api_url);
        Self {
            config,
            media,
            templates: TemplateRegistry::new(),
            renderer: Renderer::new(),
        }
    }

    /// Wrap a page body in the document shell.
    fn wrap_in_base(&self, meta: &PageMeta, content: &str) -> Result<String> {
        let site = &self.config.site;
        let og_image = meta.image.as_deref().map(|url| {
            format!(
                r#"<meta property="og:image" content="{url}"><meta name="twitter:image" content="{url}">"#,
                url = escape(url)
            )
        });

        let ctx = TemplateContext::new()
            .with_var("title", escape(&meta.title))
            .with_opt("description", meta.description.as_deref().map(escape))
            .with_opt("author", site.author.as_deref().map(escape))
            .with_var(
                "canonical_url",
                escape(&self.config.url_for(&meta.canonical_path)),
            )
            .with_opt("og_image", og_image)
            .with_var("accent", site.accent.hex())
            .with_var("site_title", escape(&site.title))
            .with_var("content", content);

        Ok(self.templates.render("base", &ctx)?)
    }

    /// Generate the detail page of a project.
    pub fn generate_project(&self, project: &PortfolioProject) -> Result<String> {
        let meta = PageMeta::for_project(project, &self.media);

        let description_html = project
            .description
            .as_ref()
            .map(|doc| self.renderer.render_value(doc))
            .filter(|html| !html.is_empty())
            .map(|html| format!(r#"<div class="rich-text-content">{html}</div>"#));

        let ctx = TemplateContext::new()
            .with_var("project_title", escape(&project.title))
            .with_opt("cover", self.cover_html(project))
            .with_opt(
                "short_description",
                project.short_description.as_deref().map(escape),
            )
            .with_opt("description_html", description_html)
            .with_opt("tech_stack", tech_stack_html(&project.tech_stack))
            .with_opt("impact", impact_html(project))
            .with_opt("gallery", self.gallery_html(project));

        let content = self.templates.render("project", &ctx)?;
        self.wrap_in_base(&meta, &content)
    }

    /// Generate the landing page.
    pub fn generate_home(
        &self,
        settings: &SiteSettings,
        projects: &[PortfolioProject],
        experience: &[Experience],
        certificates: &[Certificate],
    ) -> Result<String> {
        let site = &self.config.site;
        let settings = &settings.clone().with_fallbacks();
        let meta = PageMeta {
            title: site.title.clone(),
            description: site.description.clone(),
            canonical_path: "/".to_string(),
            image: None,
        };

        let projects_html: String = projects.iter().map(|p| self.project_card(p)).collect();
        let experience_html: String = experience.iter().map(|e| self.experience_item(e)).collect();
        let certificates_html: String = certificates
            .iter()
            .map(|c| self.certificate_item(c))
            .collect();

        let ctx = TemplateContext::new()
            .with_var("hero_title", escape(&settings.hero_title))
            .with_var("hero_subtitle", escape(&settings.hero_subtitle))
            .with_opt("social_links", social_links_html(settings))
            .with_opt("projects", Some(projects_html))
            .with_opt("experience", Some(experience_html))
            .with_opt("certificates", Some(certificates_html))
            .with_opt("contact", contact_html(settings));

        let content = self.templates.render("home", &ctx)?;
        self.wrap_in_base(&meta, &content)
    }

    /// Generate the page served for unknown projects.
    pub fn generate_not_found(&self) -> Result<String> {
        let content = self
            .templates
            .render("not_found", &TemplateContext::new())?;
        self.wrap_in_base(&PageMeta::not_found(), &content)
    }

    fn image_tag(&self, image: &StrapiImage, size: ImageSize, fallback_alt: &str) -> Option<String> {
        let src = self.media.image_url(Some(image), size);
        if src.is_empty() {
            return None;
        }
        let alt = image
            .alternative_text
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(fallback_alt);
        Some(format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape(&src),
            escape(alt)
        ))
    }

    fn cover_html(&self, project: &PortfolioProject) -> Option<String> {
        let cover = project.cover()?;
        let img = self.image_tag(cover, ImageSize::Large, &project.title)?;
        Some(format!(
            r#"<figure class="cover" style="aspect-ratio: {}">{img}</figure>"#,
            cover.aspect_ratio()
        ))
    }

    fn gallery_html(&self, project: &PortfolioProject) -> Option<String> {
        let images: String = project
            .gallery()
            .iter()
            .filter_map(|image| self.image_tag(image, ImageSize::Large, &project.title))
            .map(|img| format!("<li>{img}</li>"))
            .collect();

        (!images.is_empty())
            .then(|| format!(r#"<section class="gallery"><h2>Gallery</h2><ul>{images}</ul></section>"#))
    }

    fn project_card(&self, project: &PortfolioProject) -> String {
        let href = format!("{}/", project_path(&project.slug));
        let thumb = project
            .cover()
            .and_then(|cover| self.image_tag(cover, ImageSize::Medium, &project.title))
            .unwrap_or_default();

        let mut card = format!(
            r#"<article class="card"><a href="{href}">{thumb}<h3>{}</h3></a>"#,
            escape(&project.title)
        );
        if let Some(short) = project.short_description.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(card, "<p>{}</p>", escape(short));
        }
        if let Some(stack) = badges(&project.tech_stack) {
            card.push_str(&stack);
        }
        card.push_str("</article>\n");
        card
    }

    fn experience_item(&self, experience: &Experience) -> String {
        let end = if experience.current {
            None
        } else {
            experience.end_date.as_deref()
        };
        let logo = experience
            .logo
            .as_ref()
            .and_then(|logo| self.image_tag(logo, ImageSize::Thumbnail, &experience.company))
            .unwrap_or_default();

        let mut item = format!(
            r#"<article class="experience">{logo}<h3>{role}</h3><p class="company">{company}</p><p class="meta"><time>{range}</time>"#,
            role = escape(&experience.role),
            company = escape(&experience.company),
            range = escape(&format_date_range(&experience.start_date, end)),
        );
        if !experience.location.is_empty() {
            let _ = write!(item, " &middot; {}", escape(&experience.location));
        }
        item.push_str("</p>");
        if let Some(description) = experience.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(item, "<p>{}</p>", escape(description));
        }
        if let Some(skills) = badges(&experience.skills) {
            item.push_str(&skills);
        }
        item.push_str("</article>\n");
        item
    }

    fn certificate_item(&self, certificate: &Certificate) -> String {
        let logo = certificate
            .logo
            .as_ref()
            .or(certificate.image.as_ref())
            .and_then(|logo| self.image_tag(logo, ImageSize::Thumbnail, &certificate.issuer))
            .unwrap_or_default();
        let issued = match certificate.end_date.as_deref().filter(|e| !e.is_empty()) {
            Some(end) => format_date_range(&certificate.issue_date, Some(end)),
            None => format_date(&certificate.issue_date),
        };

        let mut item = format!(
            r#"<article class="certificate">{logo}<h3>{name}</h3><p>{issuer} &middot; <time>{issued}</time></p>"#,
            name = escape(&certificate.name),
            issuer = escape(&certificate.issuer),
            issued = escape(&issued),
        );
        if let Some(url) = certificate.credential_url.as_deref().filter(|u| !u.is_empty()) {
            let _ = write!(
                item,
                r#"<a href="{}" rel="noopener noreferrer" target="_blank">View credential</a>"#,
                escape(url)
            );
        }
        item.push_str("</article>\n");
        item
    }
}

fn badges(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let list: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    Some(format!(r#"<ul class="badges">{list}</ul>"#))
}

fn tech_stack_html(stack: &[String]) -> Option<String> {
    badges(stack).map(|list| format!(r#"<section class="tech-stack"><h2>Tech Stack</h2>{list}</section>"#))
}

fn impact_html(project: &PortfolioProject) -> Option<String> {
    if project.impact.is_empty() {
        return None;
    }
    let metrics: String = project
        .impact
        .iter()
        .map(|impact| {
            format!(
                r#"<div class="metric"><strong>{}</strong><span>{}</span></div>"#,
                escape(&impact.value),
                escape(&impact.metric)
            )
        })
        .collect();
    Some(format!(
        r#"<section><h2>Impact</h2><div class="impact">{metrics}</div></section>"#
    ))
}

fn social_links_html(settings: &SiteSettings) -> Option<String> {
    let links = &settings.social_links;
    let mut html = String::new();
    for (label, href) in [
        ("LinkedIn", links.linkedin.clone()),
        ("GitHub", links.github.clone()),
        ("Email", links.email.as_ref().map(|email| format!("mailto:{email}"))),
    ] {
        if let Some(href) = href.filter(|h| !h.is_empty() && h != "mailto:") {
            let _ = write!(html, r#"<a href="{}">{label}</a> "#, escape(&href));
        }
    }
    (!html.is_empty()).then(|| format!(r#"<p class="social">{}</p>"#, html.trim_end()))
}

fn contact_html(settings: &SiteSettings) -> Option<String> {
    (!settings.contact_email.is_empty()).then(|| {
        let email = escape(&settings.contact_email);
        format!(r#"<p><a href="mailto:{email}">{email}</a></p>"#)
    })
}
