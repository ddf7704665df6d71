//! Site configuration management.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Content API settings.
    #[serde(default)]
    pub cms: CmsConfig,

    /// Outgoing mail settings for the lead form.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Lead-intake server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Public URL of the site (e.g., "https://example.com").
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Accent color used by the generated pages.
    #[serde(default)]
    pub accent: AccentColor,
}

/// The accent palette offered by the site theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Green,
    Orange,
    Purple,
}

impl AccentColor {
    /// CSS hex value of the accent.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#386641",
            Self::Orange => "#fb8500",
            Self::Purple => "#7b2cbf",
        }
    }
}

/// Content API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Base URL of the Strapi REST API, including the `/api` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// SMTP configuration as loaded. Every field is optional here; completeness
/// is checked when a message is about to be sent.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, skip_serializing)]
    pub pass: Option<String>,

    /// Sender address; falls back to `user`.
    #[serde(default)]
    pub from: Option<String>,

    /// Recipient of lead notifications.
    #[serde(default)]
    pub to: Option<String>,
}

/// Fully resolved SMTP settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

impl SmtpSettings {
    /// Port 465 speaks TLS from the first byte; everything else upgrades.
    #[must_use]
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

/// Lead-intake server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed to post the contact form from a browser.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

// Default value functions
fn default_title() -> String {
    "Portfolio".to_string()
}

fn default_site_url() -> String {
    "https://example.com".to_string()
}

fn default_api_url() -> String {
    "http://localhost:1337/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_smtp_port() -> u16 {
    587
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            url: default_site_url(),
            description: None,
            author: None,
            accent: AccentColor::default(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            user: None,
            pass: None,
            from: None,
            to: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl SmtpConfig {
    /// Resolve into complete settings, or report which options are missing.
    pub fn settings(&self) -> Result<SmtpSettings> {
        match (
            present(&self.host),
            present(&self.user),
            present(&self.pass),
            present(&self.to),
        ) {
            (Some(host), Some(user), Some(pass), Some(to)) => Ok(SmtpSettings {
                host: host.to_string(),
                port: self.port,
                user: user.to_string(),
                pass: pass.to_string(),
                from: present(&self.from).unwrap_or(user).to_string(),
                to: to.to_string(),
            }),
            (host, user, pass, to) => {
                let missing: Vec<&str> = [
                    ("host", host),
                    ("user", user),
                    ("pass", pass),
                    ("to", to),
                ]
                .into_iter()
                .filter_map(|(name, value)| value.is_none().then_some(name))
                .collect();

                Err(CoreError::config(format!(
                    "SMTP configuration missing: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration layered with `FOLIO__*` environment variables.
    ///
    /// The file is optional here so a deployment can be configured from the
    /// environment alone (e.g. `FOLIO__SMTP__HOST`).
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if !self.site.url.starts_with("http") {
            return Err(CoreError::config(
                "site.url must start with http:// or https://",
            ));
        }

        if !self.cms.api_url.starts_with("http") {
            return Err(CoreError::config(
                "cms.api_url must start with http:// or https://",
            ));
        }

        if self.site.url.ends_with('/') {
            tracing::warn!("site.url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full public URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Jane Doe"
url = "https://jane.dev"
accent = "purple"

[cms]
api_url = "https://cms.jane.dev/api"
timeout_secs = 5

[smtp]
host = "smtp.mail.test"
port = 465
user = "robot@jane.dev"
pass = "hunter2"
to = "jane@jane.dev"

[server]
bind = "0.0.0.0:8080"
cors_origins = ["http://localhost:3000"]

[build]
output_dir = "dist"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Jane Doe");
        assert_eq!(config.site.url, "https://jane.dev");
        assert_eq!(config.site.accent, AccentColor::Purple);
        assert_eq!(config.cms.api_url, "https://cms.jane.dev/api");
        assert_eq!(config.cms.timeout_secs, 5);
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.build.output_dir, "dist");
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "").expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Portfolio");
        assert_eq!(config.site.accent, AccentColor::Green);
        assert_eq!(config.cms.api_url, "http://localhost:1337/api");
        assert_eq!(config.cms.timeout_secs, 30);
        assert_eq!(config.smtp.port, 587);
        assert!(config.smtp.host.is_none());
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.build.output_dir, "public");
    }

    #[test]
    fn test_accent_hex() {
        assert_eq!(AccentColor::Green.hex(), "#386641");
        assert_eq!(AccentColor::Orange.hex(), "#fb8500");
        assert_eq!(AccentColor::Purple.hex(), "#7b2cbf");
    }

    #[test]
    fn test_smtp_settings_resolve() {
        let smtp = SmtpConfig {
            host: Some("smtp.mail.test".into()),
            port: 465,
            user: Some("robot@jane.dev".into()),
            pass: Some("hunter2".into()),
            from: None,
            to: Some("jane@jane.dev".into()),
        };

        let settings = smtp.settings().expect("complete settings");
        assert_eq!(settings.from, "robot@jane.dev");
        assert!(settings.implicit_tls());
        assert!(!format!("{settings:?}").contains("hunter2"));
    }

    #[test]
    fn test_smtp_settings_missing() {
        let smtp = SmtpConfig {
            host: Some("smtp.mail.test".into()),
            pass: Some("  ".into()),
            ..SmtpConfig::default()
        };

        let err = smtp.settings().unwrap_err().to_string();
        assert!(err.ends_with("SMTP configuration missing: user, pass, to"));
    }

    #[test]
    fn test_smtp_settings_blank_from_uses_user() {
        let smtp = SmtpConfig {
            host: Some("smtp.mail.test".into()),
            user: Some("robot@jane.dev".into()),
            pass: Some("hunter2".into()),
            from: Some("   ".into()),
            to: Some("jane@jane.dev".into()),
            ..SmtpConfig::default()
        };

        let settings = smtp.settings().expect("complete settings");
        assert_eq!(settings.host, "smtp.mail.test");
        assert_eq!(settings.port, 587);
        assert_eq!(settings.from, "robot@jane.dev");
        assert_eq!(settings.to, "jane@jane.dev");
    }

    #[test]
    fn test_config_parse_error_keeps_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[site\ntitle = ").expect("write");

        let err = Config::load(&config_path).unwrap_err();
        assert!(matches!(err, CoreError::Config { source: Some(_), .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_url_for() {
        let config = Config::default();

        assert_eq!(
            config.url_for("/portfolio/shop"),
            "https://example.com/portfolio/shop"
        );
        assert_eq!(
            config.url_for("portfolio/shop"),
            "https://example.com/portfolio/shop"
        );
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[site]\ntitle = \"\"\n").expect("write");

        let result = Config::load(&config_path);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_bad_api_url() {
        let mut config = Config::default();
        config.cms.api_url = "localhost:1337/api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/folio.toml"));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_with_env_without_file() {
        let config = Config::load_with_env(Path::new("/nonexistent/folio.toml"))
            .expect("env-only config");
        assert_eq!(config.cms.api_url, "http://localhost:1337/api");
    }
}
