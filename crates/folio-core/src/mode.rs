//! Build mode of the running site.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether the site was built for local development or for production.
///
/// Fixed when the site is compiled and never changes while a page runs.
/// Only production builds ship a search index, so the search UI is loaded
/// only in [`BuildMode::Production`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    /// Resolve the mode from the `FOLIO_ENV` variable captured at compile time.
    ///
    /// Falls back to the compilation profile when the variable is unset or
    /// unrecognized: debug builds are development, release builds production.
    pub fn from_build_env() -> Self {
        Self::from_env_value(option_env!("FOLIO_ENV"))
    }

    /// Resolve the mode from a raw `FOLIO_ENV` value.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!(value, %err, "Ignoring unrecognized FOLIO_ENV");
                Self::from_profile()
            }),
            None => Self::from_profile(),
        }
    }

    /// Mode implied by the compilation profile.
    pub fn from_profile() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for BuildMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            other => Err(CoreError::config(format!("unknown build mode: {other:?}"))),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
