//! Error types for calculation sessions
//!
//! Provides error handling for:
//! - Illegal step transitions and re-entrant submits
//! - Calculation failures reported by an executor
//! - Loading configuration files

use crate::step::SessionStep;
use calc_catalog::PersistenceError;
use calc_params::StoreError;
use std::path::PathBuf;
use ulid::Ulid;

/// Errors returned by `CalculationSession` operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Transition not in the step table
    #[error("illegal step transition: {from} -> {to}")]
    IllegalTransition { from: SessionStep, to: SessionStep },

    /// Parameter edits are not possible in this step
    #[error("parameters cannot be edited in the {0} step")]
    NotEditable(SessionStep),

    /// Submit while a calculation is in flight
    #[error("a calculation is already running")]
    AlreadyCalculating,

    /// Operation needs a current result
    #[error("no calculation result to show")]
    NoResult,

    /// History entry id does not resolve
    #[error("history entry not found: {0}")]
    UnknownHistoryEntry(Ulid),

    /// Store rejected a write
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Saving a result failed
    #[error("failed to save result: {0}")]
    Persistence(#[from] PersistenceError),
}

impl SessionError {
    /// Whether the error came from the user driving the UI out of order
    ///
    /// These are programming errors in a front end, not user-facing failures.
    #[inline]
    #[must_use]
    pub fn is_flow_error(&self) -> bool {
        matches!(
            self,
            Self::IllegalTransition { .. }
                | Self::NotEditable(_)
                | Self::AlreadyCalculating
                | Self::NoResult
        )
    }
}

/// Failures reported by a `CalculationExecutor`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// Calculation ran and failed; the message is shown to the user as is
    #[error("{0}")]
    Failed(String),

    /// Execution service could not be reached
    #[error("calculation service unavailable: {0}")]
    Unavailable(String),

    /// Failure without a usable message
    #[error("calculation failed without a message")]
    Unspecified,
}

impl ExecutionError {
    /// Message for the user, `None` when the configured fallback should be shown
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Failed(msg) if msg.trim().is_empty() => None,
            Self::Failed(msg) => Some(msg.clone()),
            Self::Unavailable(_) => Some(self.to_string()),
            Self::Unspecified => None,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML or unknown values
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_is_verbatim() {
        let err = ExecutionError::Failed("Voltage drop exceeds 3%".into());
        assert_eq!(err.user_message().as_deref(), Some("Voltage drop exceeds 3%"));
        assert_eq!(err.to_string(), "Voltage drop exceeds 3%");
    }

    #[test]
    fn blank_and_unspecified_use_fallback() {
        assert_eq!(ExecutionError::Failed("  ".into()).user_message(), None);
        assert_eq!(ExecutionError::Unspecified.user_message(), None);
        assert_eq!(
            ExecutionError::Unavailable("connection refused".into()).user_message().as_deref(),
            Some("calculation service unavailable: connection refused")
        );
    }

    #[test]
    fn flow_errors() {
        assert!(SessionError::AlreadyCalculating.is_flow_error());
        assert!(SessionError::IllegalTransition {
            from: SessionStep::Overview,
            to: SessionStep::Results
        }
        .is_flow_error());
        assert!(!SessionError::Store(StoreError::UnknownParameter("x".into())).is_flow_error());
    }
}
