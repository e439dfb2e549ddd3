//! Studio configuration
//!
//! Loaded from TOML; every field has a default, so an empty file is a valid
//! configuration.
//!
//! ```toml
//! [catalog]
//! default_sort = "rating"
//! trending_limit = 3
//! cache_ttl_secs = 600
//!
//! [session]
//! history_capacity = 10
//! ```

use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use calc_catalog::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Message shown when a calculation fails without one of its own
pub const DEFAULT_FAILURE_MESSAGE: &str = "Calculation failed";

/// Calculation session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of history entries kept per session
    pub history_capacity: usize,
    /// Shown when a failed calculation carries no message
    pub failure_fallback_message: String,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With history capacity
    #[inline]
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// With fallback failure message
    #[inline]
    #[must_use]
    pub fn with_failure_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.failure_fallback_message = message.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            failure_fallback_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Catalog view settings
    pub catalog: CatalogConfig,
    /// Session settings
    pub session: SessionConfig,
}

impl StudioConfig {
    /// Parse TOML
    ///
    /// # Errors
    /// Invalid TOML or values of the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// IO and parse failures.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Serialization failures.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_catalog::SortBy;

    #[test]
    fn empty_file_is_default() {
        let config = StudioConfig::from_toml_str("").unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.session.history_capacity, 5);
        assert_eq!(config.session.failure_fallback_message, "Calculation failed");
        assert_eq!(config.catalog.default_sort, SortBy::Popular);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = StudioConfig::from_toml_str(
            "[catalog]\ndefault_sort = \"rating\"\n\n[session]\nhistory_capacity = 10\n",
        )
        .unwrap();
        assert_eq!(config.catalog.default_sort, SortBy::Rating);
        assert!(config.catalog.show_only_verified);
        assert_eq!(config.session.history_capacity, 10);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = StudioConfig {
            catalog: CatalogConfig::new().with_cache_ttl(std::time::Duration::from_secs(600)),
            session: SessionConfig::new().with_failure_fallback_message("Error"),
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(StudioConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            StudioConfig::from_toml_str("[catalog]\ndefault_sort = \"newest\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.toml");
        std::fs::write(&path, "[session]\nhistory_capacity = 3\n").unwrap();
        assert_eq!(StudioConfig::from_path(&path).unwrap().session.history_capacity, 3);
        assert!(matches!(
            StudioConfig::from_path(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
