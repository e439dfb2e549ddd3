//! Calculation results

use calc_template::{ParameterValueMap, ResultValue, ResultValueMap, TemplateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one executor call
///
/// Created once per calculation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Unique result id
    pub id: Uuid,
    /// Whether the calculation succeeded
    pub was_successful: bool,
    /// Output values, keyed by output parameter name
    #[serde(default)]
    pub results: ResultValueMap,
    /// Failure message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// When the result was produced
    pub calculated_at: DateTime<Utc>,
}

impl CalculationResult {
    /// Successful result carrying `results`
    #[must_use]
    pub fn success(results: ResultValueMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            was_successful: true,
            results,
            error_message: None,
            calculated_at: Utc::now(),
        }
    }

    /// Unsuccessful result
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            was_successful: false,
            results: ResultValueMap::new(),
            error_message: Some(message.into()),
            calculated_at: Utc::now(),
        }
    }

    /// Add one output value
    #[inline]
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<ResultValue>) -> Self {
        self.results.insert(name.into(), value.into());
        self
    }

    /// Output value by name
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&ResultValue> {
        self.results.get(name)
    }

    /// Error message when unsuccessful, ignoring blank messages
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Context passed along when a result is saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    /// Template the result belongs to
    pub template_id: TemplateId,
    /// Template display name
    pub template_name: String,
    /// Template version at calculation time
    pub template_version: String,
    /// Inputs the result was computed from
    pub inputs: ParameterValueMap,
    /// Free-form user notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ResultMetadata {
    /// With notes
    #[inline]
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
