//! Host page environment captured at build time.

use serde::{Deserialize, Serialize};

use crate::{
    mode::BuildMode,
    options::{SearchUiOptions, bundle_path_for},
};

/// Base path of a site served from the domain root.
pub const DEFAULT_BASE_PATH: &str = "/";

/// Build-time values the page runs with.
///
/// Built from the site configuration with [`Config::site_env`](crate::Config::site_env),
/// so the browser and the preview server agree on the base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEnv {
    /// Development or production build.
    pub mode: BuildMode,

    /// Path prefix the site is served under (e.g. "/" or "/blog/").
    pub base_path: String,
}

impl SiteEnv {
    pub fn new(mode: BuildMode, base_path: impl Into<String>) -> Self {
        Self {
            mode,
            base_path: base_path.into(),
        }
    }

    /// Location of the search index bundle.
    pub fn bundle_path(&self) -> String {
        bundle_path_for(&self.base_path)
    }

    /// Search UI options mounting into `element`.
    pub fn search_ui_options(&self, element: impl Into<String>) -> SearchUiOptions {
        SearchUiOptions::new(self.base_path.clone(), element)
    }
}

impl Default for SiteEnv {
    fn default() -> Self {
        Self::new(BuildMode::default(), DEFAULT_BASE_PATH)
    }
}
