//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    env::SiteEnv,
    error::{CoreError, Result},
    mode::BuildMode,
};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Search modal settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Preview server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Path prefix the site is served under (e.g., "/" or "/blog/").
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Search modal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether result thumbnails are shown.
    #[serde(default)]
    pub show_images: bool,

    /// Whether sub-results are expanded.
    #[serde(default = "default_true")]
    pub show_sub_results: bool,

    /// Upper bound in milliseconds before the deferred search UI load runs.
    #[serde(default = "default_idle_fallback_ms")]
    pub idle_fallback_ms: u32,

    /// Key that opens the search dialog.
    #[serde(default = "default_shortcut")]
    pub shortcut: String,
}

/// Preview server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory holding the built site.
    #[serde(default = "default_site_root")]
    pub site_root: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_title() -> String {
    "Folio".to_string()
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_idle_fallback_ms() -> u32 {
    1
}

fn default_shortcut() -> String {
    "/".to_string()
}

fn default_site_root() -> String {
    "target/site".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_path: default_base_path(),
            description: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            show_images: false,
            show_sub_results: default_true(),
            idle_fallback_ms: default_idle_fallback_ms(),
            shortcut: default_shortcut(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            site_root: default_site_root(),
            port: default_port(),
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
        Self::parse(&content).map_err(|e| match e {
            CoreError::Toml(e) => CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            ),
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// The frontend embeds the site's `config.toml` at compile time and
    /// reads it through this function.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, with `FOLIO__*` overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if !self.site.base_path.starts_with('/') {
            return Err(CoreError::config("site.base_path must start with '/'"));
        }

        if self.search.shortcut.chars().count() != 1 {
            return Err(CoreError::config(
                "search.shortcut must be a single character",
            ));
        }

        if self.search.idle_fallback_ms > 10_000 {
            tracing::warn!(
                idle_fallback_ms = self.search.idle_fallback_ms,
                "search.idle_fallback_ms is large; the search box may appear late"
            );
        }

        Ok(())
    }

    /// Get the site-relative URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_path.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Host environment for a build of this site in `mode`.
    pub fn site_env(&self, mode: BuildMode) -> SiteEnv {
        SiteEnv::new(mode, self.site.base_path.clone())
    }
}
