//! Error types for the template catalog
//!
//! Provides error handling for:
//! - Template lookup (not found)
//! - Persistence calls (favorites, usage counters, saved results)
//! - Loading catalog files

use calc_template::{TemplateError, TemplateId};
use std::path::PathBuf;

/// What a UI can offer the user after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Leave the current view and return to the catalog
    BackToCatalog,
    /// Retry the same operation
    Retry,
    /// Nothing to offer; the error is informational
    None,
}

/// Catalog-level errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Template id does not resolve
    #[error("template not found: {0}")]
    NotFound(TemplateId),

    /// Backing store failed
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// Catalog file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Catalog file could not be parsed
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// A template in the catalog violates its schema
    #[error("invalid template '{id}': {source}")]
    InvalidTemplate {
        /// Offending template
        id: TemplateId,
        /// Schema violation
        #[source]
        source: TemplateError,
    },

    /// Two templates share an id
    #[error("duplicate template id: {0}")]
    DuplicateId(TemplateId),
}

impl CatalogError {
    /// Whether the failing view can stay on screen
    ///
    /// A missing template is a full-page error: the only way out is back to
    /// the catalog.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }

    /// Recovery offered to the user
    #[must_use]
    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::NotFound(_) => RecoveryAction::BackToCatalog,
            Self::Persistence(_) | Self::Io { .. } => RecoveryAction::Retry,
            Self::Parse(_) | Self::InvalidTemplate { .. } | Self::DuplicateId(_) => {
                RecoveryAction::None
            }
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures of persistence side effects (favorites, usage counters, saves)
///
/// Callers log these and leave local state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// Target template does not exist in the store
    #[error("no such template: {0}")]
    UnknownTemplate(TemplateId),

    /// Store unreachable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store refused the write
    #[error("write rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_goes_back_to_catalog() {
        let err = CatalogError::NotFound(TemplateId::new("x"));
        assert!(!err.is_recoverable());
        assert_eq!(err.recovery_action(), RecoveryAction::BackToCatalog);
        assert_eq!(err.to_string(), "template not found: x");
    }

    #[test]
    fn persistence_is_retryable() {
        let err = CatalogError::from(PersistenceError::Unavailable("offline".to_string()));
        assert!(err.is_recoverable());
        assert_eq!(err.recovery_action(), RecoveryAction::Retry);
    }
}
