//! Session steps and the transition table
//!
//! Every step change in a `CalculationSession` goes through
//! [`validate_transition`]. `Overview` is the only initial step and no step
//! is terminal.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step of the calculation workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStep {
    /// Template summary, before any input
    #[default]
    Overview,
    /// Entering parameter values
    Parameters,
    /// Executor call in flight
    Calculating,
    /// Showing a calculation result
    Results,
}

impl SessionStep {
    /// Steps in step-indicator order
    pub const ALL: [SessionStep; 4] = [
        SessionStep::Overview,
        SessionStep::Parameters,
        SessionStep::Calculating,
        SessionStep::Results,
    ];

    /// Lowercase step name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Parameters => "parameters",
            Self::Calculating => "calculating",
            Self::Results => "results",
        }
    }

    /// Whether parameter values may be edited in this step
    #[inline]
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Parameters | Self::Results)
    }
}

impl fmt::Display for SessionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a step transition
///
/// # Errors
/// `SessionError::IllegalTransition` when `to` is not reachable from `from`.
pub fn validate_transition(from: SessionStep, to: SessionStep) -> Result<(), SessionError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(SessionError::IllegalTransition { from, to })
    }
}

/// Steps reachable from `from` in one transition
pub fn allowed_transitions(from: SessionStep) -> Vec<SessionStep> {
    use SessionStep::*;
    match from {
        Overview => vec![Parameters],
        Parameters => vec![Calculating, Results, Overview],
        Calculating => vec![Results, Parameters],
        Results => vec![Parameters, Results, Overview],
    }
}

fn allowed(from: SessionStep, to: SessionStep) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_allowed() {
        use SessionStep::*;
        for (from, to) in [
            (Overview, Parameters),
            (Parameters, Calculating),
            (Calculating, Results),
            (Results, Parameters),
        ] {
            assert!(validate_transition(from, to).is_ok(), "{from} -> {to}");
        }
    }

    #[test]
    fn overview_only_leads_to_parameters() {
        use SessionStep::*;
        assert_eq!(
            validate_transition(Overview, Calculating),
            Err(SessionError::IllegalTransition {
                from: Overview,
                to: Calculating
            })
        );
        assert!(validate_transition(Overview, Results).is_err());
        assert!(validate_transition(Overview, Overview).is_err());
    }

    #[test]
    fn calculating_is_only_entered_from_parameters() {
        for from in SessionStep::ALL {
            let ok = validate_transition(from, SessionStep::Calculating).is_ok();
            assert_eq!(ok, from == SessionStep::Parameters, "{from}");
        }
    }

    #[test]
    fn no_terminal_step() {
        for from in SessionStep::ALL {
            assert!(!allowed_transitions(from).is_empty());
        }
    }
}
