//! HTML template system for page generation.
//!
//! Plain string interpolation: `{{ name }}` inserts a required variable and
//! `{{ name? }}` an optional one. Values are inserted verbatim, so callers
//! escape text before putting it in a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Variables available to a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when `value` is present and non-empty, leaving optional
    /// placeholders blank otherwise.
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            let value = value.into();
            if !value.is_empty() {
                self.insert(key, value);
            }
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template string.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are never rescanned, so a value containing `{{`
    /// is emitted as-is.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim(), true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of named templates, preloaded with the site's pages.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", BASE_TEMPLATE));
        registry.register(Template::new("home", HOME_TEMPLATE));
        registry.register(Template::new("project", PROJECT_TEMPLATE));
        registry.register(Template::new("not_found", NOT_FOUND_TEMPLATE));
        registry
    }

    /// Register a template, replacing any with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Document shell shared by every page.
pub const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author? }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <meta property="og:type" content="website">
    <meta property="og:title" content="{{ title }}">
    <meta property="og:description" content="{{ description? }}">
    <meta property="og:url" content="{{ canonical_url }}">
    {{ og_image? }}
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{{ title }}">
    <meta name="twitter:description" content="{{ description? }}">
    <style>
        :root {
            --accent: {{ accent }};
            --background: #fafaf9;
            --foreground: #1c1917;
            --text-secondary: #57534e;
            --border: #e7e5e4;
            --badge-bg: #f5f5f4;
        }
        *, *::before, *::after { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: system-ui, -apple-system, sans-serif;
            line-height: 1.7;
            color: var(--foreground);
            background-color: var(--background);
        }
        main { max-width: 64rem; margin: 0 auto; padding: 6rem 1.5rem; }
        a { color: var(--accent); text-decoration: none; }
        a:hover { text-decoration: underline; }
        img { max-width: 100%; height: auto; border-radius: 0.5rem; }
        .badges { display: flex; flex-wrap: wrap; gap: 0.75rem; padding: 0; list-style: none; }
        .badges li { padding: 0.5rem 1rem; border-radius: 9999px; background: var(--badge-bg); border: 1px solid var(--border); }
        .impact { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1.5rem; }
        .metric { padding: 1.5rem; border: 1px solid var(--border); border-radius: 0.5rem; background: var(--badge-bg); }
        .metric strong { display: block; font-size: 1.875rem; }
        .cover { margin: 0; max-height: 70vh; background: var(--badge-bg); }
        .cover img { width: 100%; height: 100%; object-fit: contain; }
        .rich-text-content blockquote { border-left: 3px solid var(--accent); padding-left: 1rem; color: var(--text-secondary); }
        .rich-text-content pre { background: var(--badge-bg); padding: 1rem; border-radius: 0.5rem; overflow-x: auto; }
    </style>
</head>
<body>
    <header>
        <nav><a href="/">{{ site_title }}</a> <a href="/#work">Work</a> <a href="/#experience">Experience</a> <a href="/#contact">Contact</a></nav>
    </header>
    <main>
{{ content }}
    </main>
    <footer>
        <p>&copy; {{ site_title }}</p>
    </footer>
</body>
</html>
"##;

/// Landing page body.
pub const HOME_TEMPLATE: &str = r##"<section class="hero">
    <h1>{{ hero_title }}</h1>
    <p class="lead">{{ hero_subtitle }}</p>
    {{ social_links? }}
</section>
<section id="work">
    <h2>Work</h2>
    {{ projects? }}
</section>
<section id="experience">
    <h2>Experience</h2>
    {{ experience? }}
</section>
<section id="certificates">
    <h2>Certificates</h2>
    {{ certificates? }}
</section>
<section id="contact">
    <h2>Contact</h2>
    {{ contact? }}
</section>"##;

/// Portfolio project detail body.
pub const PROJECT_TEMPLATE: &str = r##"<a href="/#work" class="back">&larr; Back to Portfolio</a>
<article class="project">
    {{ cover? }}
    <h1>{{ project_title }}</h1>
    <p class="lead">{{ short_description? }}</p>
    {{ description_html? }}
    {{ tech_stack? }}
    {{ impact? }}
    {{ gallery? }}
</article>"##;

/// Body for unknown projects.
pub const NOT_FOUND_TEMPLATE: &str = r##"<section class="not-found">
    <h1>Project Not Found</h1>
    <p>The project you are looking for does not exist or has been removed.</p>
    <a href="/#work">&larr; Back to Portfolio</a>
</section>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_variables() {
        let template = Template::new("t", "<h1>{{ title }}</h1>{{ note? }}");
        let ctx = TemplateContext::new().with_var("title", "Hello");

        assert_eq!(template.render(&ctx).unwrap(), "<h1>Hello</h1>");
    }

    #[test]
    fn test_missing_variable() {
        let template = Template::new("t", "{{ title }}");
        let err = template.render(&TemplateContext::new()).unwrap_err();

        assert!(matches!(err, TemplateError::MissingVariable(name) if name == "title"));
    }

    #[test]
    fn test_unclosed_delimiter() {
        let template = Template::new("t", "{{ title");
        let err = template.render(&TemplateContext::new()).unwrap_err();

        assert!(matches!(err, TemplateError::InvalidSyntax(_)));
    }

    #[test]
    fn test_values_not_rescanned() {
        let template = Template::new("t", "{{ a }}|{{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "x");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}|x");
    }

    #[test]
    fn test_with_opt_skips_empty() {
        let ctx = TemplateContext::new()
            .with_opt("a", Some(""))
            .with_opt("b", None::<String>)
            .with_opt("c", Some("set"));

        assert_eq!(ctx.get("a"), None);
        assert_eq!(ctx.get("b"), None);
        assert_eq!(ctx.get("c"), Some("set"));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = TemplateRegistry::new();
        for name in ["base", "home", "project", "not_found"] {
            assert!(registry.get(name).is_some(), "{name} should be registered");
        }

        let err = registry.render("missing", &TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn test_not_found_renders_without_context() {
        let registry = TemplateRegistry::new();
        let html = registry
            .render("not_found", &TemplateContext::new())
            .unwrap();

        assert!(html.contains("Project Not Found"));
    }
}
