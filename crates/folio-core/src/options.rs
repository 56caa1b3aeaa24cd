//! Configuration handed to the search UI library.

use serde::{Deserialize, Serialize};

/// Path of the search index bundle below the site base path.
pub const BUNDLE_SUBPATH: &str = "/pagefind/";

/// Script shipped inside the bundle that defines the search UI constructor.
pub const UI_SCRIPT: &str = "pagefind-ui.js";

/// Stylesheet shipped inside the bundle for the search UI.
pub const UI_STYLESHEET: &str = "pagefind-ui.css";

/// Derive the bundle location from the site base path.
///
/// A single trailing slash is stripped before the bundle subpath is
/// appended, so `/docs/` and `/docs` both yield `/docs/pagefind/`.
pub fn bundle_path_for(base_path: &str) -> String {
    let base = base_path.strip_suffix('/').unwrap_or(base_path);
    format!("{base}{BUNDLE_SUBPATH}")
}

/// Options object passed to the search UI constructor.
///
/// Field names serialize in camelCase to match the library's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUiOptions {
    /// Site base path, used verbatim.
    pub base_url: String,

    /// Location of the pre-generated index bundle.
    pub bundle_path: String,

    /// Selector of the mount point inside the dialog.
    pub element: String,

    /// Whether result thumbnails are rendered.
    pub show_images: bool,

    /// Whether sub-results (matching headings) are expanded.
    pub show_sub_results: bool,
}

impl SearchUiOptions {
    /// Create options for a base path and mount selector with default flags.
    pub fn new(base_path: impl Into<String>, element: impl Into<String>) -> Self {
        let base_url = base_path.into();
        Self {
            bundle_path: bundle_path_for(&base_url),
            base_url,
            element: element.into(),
            show_images: false,
            show_sub_results: true,
        }
    }

    /// Set whether thumbnails are shown.
    pub fn with_show_images(mut self, show_images: bool) -> Self {
        self.show_images = show_images;
        self
    }

    /// Set whether sub-results are expanded.
    pub fn with_show_sub_results(mut self, show_sub_results: bool) -> Self {
        self.show_sub_results = show_sub_results;
        self
    }

    /// URL of the search UI script inside the bundle.
    pub fn script_url(&self) -> String {
        format!("{}{UI_SCRIPT}", self.bundle_path)
    }

    /// URL of the search UI stylesheet inside the bundle.
    pub fn stylesheet_url(&self) -> String {
        format!("{}{UI_STYLESHEET}", self.bundle_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_path_trailing_slash_is_optional() {
        assert_eq!(bundle_path_for("/docs/"), "/docs/pagefind/");
        assert_eq!(bundle_path_for("/docs"), "/docs/pagefind/");
    }

    #[test]
    fn test_bundle_path_for_root() {
        assert_eq!(bundle_path_for("/"), "/pagefind/");
        assert_eq!(bundle_path_for(""), "/pagefind/");
    }

    #[test]
    fn test_only_one_trailing_slash_is_stripped() {
        assert_eq!(bundle_path_for("/docs//"), "/docs//pagefind/");
    }

    #[test]
    fn test_defaults_and_urls() {
        let options = SearchUiOptions::new("/blog/", "#folio-search");

        assert_eq!(options.base_url, "/blog/");
        assert_eq!(options.bundle_path, "/blog/pagefind/");
        assert!(!options.show_images);
        assert!(options.show_sub_results);
        assert_eq!(options.script_url(), "/blog/pagefind/pagefind-ui.js");
        assert_eq!(options.stylesheet_url(), "/blog/pagefind/pagefind-ui.css");
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let options = SearchUiOptions::new("/", "#search").with_show_images(true);
        let json = serde_json::to_string(&options).unwrap();

        assert!(json.contains("\"baseUrl\":\"/\""));
        assert!(json.contains("\"bundlePath\":\"/pagefind/\""));
        assert!(json.contains("\"element\":\"#search\""));
        assert!(json.contains("\"showImages\":true"));
        assert!(json.contains("\"showSubResults\":true"));
    }
}
