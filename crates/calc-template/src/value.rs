//! Parameter and result values
//!
//! User input is held as a [`ParameterValue`], a tagged union keyed by the
//! parameter's declared type. Absence is expressed by the key being missing
//! from the [`ParameterValueMap`], never by a sentinel variant.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered map from parameter name to the value currently entered
pub type ParameterValueMap = IndexMap<String, ParameterValue>;

/// Ordered map from output name to a computed value
pub type ResultValueMap = IndexMap<String, ResultValue>;

/// A single entered parameter value
///
/// Deserialization is untagged, so a plain JSON string always becomes
/// [`ParameterValue::Text`]. Select values are produced by conforming a value
/// to its parameter (see `TemplateParameter::conform`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Boolean toggle
    Boolean(bool),
    /// Numeric value
    Number(f64),
    /// Free text, including partially typed numbers
    Text(String),
    /// Chosen option of a select parameter
    Select(String),
}

impl ParameterValue {
    /// Create a text value
    #[inline]
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a select value
    #[inline]
    #[must_use]
    pub fn select(value: impl Into<String>) -> Self {
        Self::Select(value.into())
    }

    /// Whether the value counts as "not entered" (empty string)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Select(s) => s.is_empty(),
            Self::Number(_) | Self::Boolean(_) => false,
        }
    }

    /// Numeric coercion used by number parameters
    ///
    /// Strings are trimmed and parsed. Booleans are not numeric. The result may
    /// be non-finite; callers decide what to do with `NaN`/infinity.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) | Self::Select(s) => s.trim().parse::<f64>().ok(),
            Self::Boolean(_) => None,
        }
    }

    /// Short name of the variant, for diagnostics
    #[inline]
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Select(_) => "select",
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) | Self::Select(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A computed output value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// Numeric output
    Number(f64),
    /// Textual output (classification, verdict, ...)
    Text(String),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ResultValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
