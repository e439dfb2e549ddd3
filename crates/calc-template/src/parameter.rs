//! Template parameter schema
//!
//! A [`TemplateParameter`] describes one input or output slot. Type-specific
//! constraints live inside [`ParameterKind`], so bounds can only exist on
//! number parameters, options only on selects, and patterns only on text.

use crate::value::ParameterValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a parameter is entered by the user or produced by the calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterScope {
    /// Entered by the user
    #[default]
    Input,
    /// Produced by the calculation, never entered
    Output,
}

/// Declared type of a parameter, without its constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// Numeric value
    Number,
    /// Free text
    Text,
    /// One of a list of options
    Select,
    /// Yes/no
    Boolean,
}

impl ParameterType {
    /// Lowercase name as used in template files
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Select => "select",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern constraint for text parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextValidation {
    /// Regular expression the value must match (unanchored search)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown when the pattern does not match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Parameter type together with its type-specific constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    /// Numeric input with optional inclusive bounds
    Number {
        /// Inclusive lower bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Free text with an optional pattern
    Text {
        /// Optional pattern
        #[serde(default, skip_serializing_if = "Option::is_none")]
        validation: Option<TextValidation>,
    },
    /// One of an ordered list of options
    Select {
        /// Allowed options, in display order
        #[serde(default)]
        options: Vec<String>,
    },
    /// Yes/no toggle
    Boolean,
}

impl ParameterKind {
    /// Declared type
    #[inline]
    #[must_use]
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Self::Number { .. } => ParameterType::Number,
            Self::Text { .. } => ParameterType::Text,
            Self::Select { .. } => ParameterType::Select,
            Self::Boolean => ParameterType::Boolean,
        }
    }
}

/// One input or output slot of a calculation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParameter {
    /// Unique key within the template
    pub name: String,
    /// Display label
    pub label: String,
    /// Type and constraints
    #[serde(flatten)]
    pub kind: ParameterKind,
    /// Whether a value must be entered
    #[serde(default)]
    pub required: bool,
    /// Display unit ("V", "kN/m²", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Input or output
    #[serde(default)]
    pub scope: ParameterScope,
    /// Value seeded when a session starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,
    /// Help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TemplateParameter {
    fn with_kind(name: impl Into<String>, label: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            unit: None,
            scope: ParameterScope::Input,
            default_value: None,
            description: None,
        }
    }

    /// Unbounded number parameter
    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(name, label, ParameterKind::Number { min: None, max: None })
    }

    /// Unconstrained text parameter
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(name, label, ParameterKind::Text { validation: None })
    }

    /// Select parameter with the given options
    #[must_use]
    pub fn select<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::with_kind(name, label, ParameterKind::Select { options })
    }

    /// Boolean parameter
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(name, label, ParameterKind::Boolean)
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark as an output slot
    #[inline]
    #[must_use]
    pub fn output(mut self) -> Self {
        self.scope = ParameterScope::Output;
        self
    }

    /// Set the lower bound. Ignored for non-number parameters.
    #[must_use]
    pub fn with_min(mut self, value: f64) -> Self {
        if let ParameterKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    /// Set the upper bound. Ignored for non-number parameters.
    #[must_use]
    pub fn with_max(mut self, value: f64) -> Self {
        if let ParameterKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    /// Set both bounds. Ignored for non-number parameters.
    #[inline]
    #[must_use]
    pub fn with_bounds(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }

    /// Set a pattern and its failure message. Ignored for non-text parameters.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>, message: Option<&str>) -> Self {
        if let ParameterKind::Text { validation } = &mut self.kind {
            *validation = Some(TextValidation {
                pattern: Some(pattern.into()),
                message: message.map(str::to_string),
            });
        }
        self
    }

    /// Set display unit
    #[inline]
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, value: impl Into<ParameterValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set help text
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declared type
    #[inline]
    #[must_use]
    pub fn parameter_type(&self) -> ParameterType {
        self.kind.parameter_type()
    }

    /// Whether the user enters this parameter
    #[inline]
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.scope == ParameterScope::Input
    }

    /// Options of a select parameter, empty otherwise
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            ParameterKind::Select { options } => options,
            _ => &[],
        }
    }

    /// Whether `value` has the variant this parameter expects
    ///
    /// Text is accepted for select parameters since untagged input cannot
    /// tell the two apart.
    #[must_use]
    pub fn accepts(&self, value: &ParameterValue) -> bool {
        matches!(
            (&self.kind, value),
            (ParameterKind::Number { .. }, ParameterValue::Number(_))
                | (ParameterKind::Text { .. }, ParameterValue::Text(_))
                | (
                    ParameterKind::Select { .. },
                    ParameterValue::Select(_) | ParameterValue::Text(_)
                )
                | (ParameterKind::Boolean, ParameterValue::Boolean(_))
        )
    }

    /// Normalize a value to this parameter's natural variant
    ///
    /// Only the text/select ambiguity is resolved; other values pass through.
    #[must_use]
    pub fn conform(&self, value: ParameterValue) -> ParameterValue {
        match (&self.kind, value) {
            (ParameterKind::Select { .. }, ParameterValue::Text(s)) => ParameterValue::Select(s),
            (ParameterKind::Text { .. }, ParameterValue::Select(s)) => ParameterValue::Text(s),
            (_, other) => other,
        }
    }

    /// Default value conformed to this parameter's variant
    #[must_use]
    pub fn conformed_default(&self) -> Option<ParameterValue> {
        self.default_value.clone().map(|v| self.conform(v))
    }
}
