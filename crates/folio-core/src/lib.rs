//! Folio Core Library
//!
//! Platform-neutral types shared by the browser frontend and the preview
//! server: build mode, host environment, search UI options, site
//! configuration, and error handling.

pub mod config;
pub mod env;
pub mod error;
pub mod mode;
pub mod options;

pub use config::Config;
pub use env::SiteEnv;
pub use error::{CoreError, Result};
pub use mode::BuildMode;
pub use options::SearchUiOptions;
