//! Error types for the Folio core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Folio.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Required markup is missing from a component.
    #[error("Structural error: missing required element `{element}`")]
    Structural { element: String },

    /// The search UI library could not be loaded or constructed.
    #[error("Search UI initialization failed: {0}")]
    SearchUi(String),

    /// A call into the host script engine threw.
    #[error("Script error: {0}")]
    Script(String),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new structural error naming the missing element.
    pub fn structural(element: impl Into<String>) -> Self {
        Self::Structural {
            element: element.into(),
        }
    }

    /// Create a new search UI initialization error.
    pub fn search_ui(message: impl Into<String>) -> Self {
        Self::SearchUi(message.into())
    }

    /// Create a new script error.
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_structural_error_names_element() {
        let err = CoreError::structural("dialog");
        assert!(err.to_string().contains("Structural error"));
        assert!(err.to_string().contains("`dialog`"));
    }

    #[test]
    fn test_search_ui_error() {
        let err = CoreError::search_ui("bundle not found");
        assert!(err.to_string().contains("Search UI initialization failed"));
        assert!(err.to_string().contains("bundle not found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
