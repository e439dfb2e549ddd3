//! Parameter validation
//!
//! [`ParameterValidator`] checks a value map against a template's parameter
//! schema. Validation never fails as an `Err`: per-field problems are returned
//! as data in a [`ValidationResult`] so callers can render them inline.
//!
//! Text patterns are compiled once per validator and reused across calls.

use calc_template::{CalculationTemplate, ParameterKind, ParameterValue, ParameterValueMap, TemplateParameter};
use indexmap::IndexMap;
use parking_lot::RwLock;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Message for a missing required value
pub const MSG_REQUIRED: &str = "required";
/// Message for a number field that does not hold a finite number
pub const MSG_NOT_A_NUMBER: &str = "must be a valid number";
/// Fallback message for a failed pattern
pub const MSG_INVALID_FORMAT: &str = "invalid format";

/// Outcome of validating a value map
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: IndexMap<String, String>,
    warnings: IndexMap<String, String>,
}

impl ValidationResult {
    fn from_errors(errors: IndexMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: IndexMap::new(),
        }
    }

    /// True when no field has an error
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Errors keyed by parameter name, in template order
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Warnings keyed by parameter name; currently always empty
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &IndexMap<String, String> {
        &self.warnings
    }

    /// Error message for one field
    #[inline]
    #[must_use]
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Number of fields with errors
    #[inline]
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Compiled patterns keyed by source; `None` marks a pattern that does not compile
type PatternCache = HashMap<String, Option<Regex>>;

/// Schema validator for parameter values
///
/// Clones share one pattern cache.
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    patterns: Arc<RwLock<PatternCache>>,
}

impl ParameterValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every input parameter of `template` against `values`
    ///
    /// Output parameters are skipped. Keys in `values` that match no input
    /// parameter are ignored.
    #[must_use]
    pub fn validate(
        &self,
        template: &CalculationTemplate,
        values: &ParameterValueMap,
    ) -> ValidationResult {
        let errors: IndexMap<String, String> = template
            .input_parameters()
            .filter_map(|param| {
                self.check(param, values.get(&param.name)).map(|msg| (param.name.clone(), msg))
            })
            .collect();

        if !errors.is_empty() {
            tracing::debug!(
                template = %template.id,
                errors = errors.len(),
                "parameter validation failed"
            );
        }
        ValidationResult::from_errors(errors)
    }

    /// Validate a single field, for inline feedback while editing
    ///
    /// Returns `None` when the field is valid or is not an input parameter.
    #[must_use]
    pub fn validate_field(
        &self,
        template: &CalculationTemplate,
        name: &str,
        values: &ParameterValueMap,
    ) -> Option<String> {
        let param = template.input_parameter(name)?;
        self.check(param, values.get(name))
    }

    /// Check one parameter; `None` means valid
    fn check(&self, param: &TemplateParameter, value: Option<&ParameterValue>) -> Option<String> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ if param.required => return Some(MSG_REQUIRED.to_string()),
            _ => return None,
        };

        match &param.kind {
            ParameterKind::Number { min, max } => {
                let Some(number) = value.as_number().filter(|n| n.is_finite()) else {
                    return Some(MSG_NOT_A_NUMBER.to_string());
                };
                if let Some(min) = min {
                    if number < *min {
                        return Some(format!("minimum value is {min}"));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Some(format!("maximum value is {max}"));
                    }
                }
                None
            }
            ParameterKind::Text {
                validation: Some(validation),
            } => {
                let pattern = validation.pattern.as_deref()?;
                if self.pattern_matches(&param.name, pattern, &value.to_string()) {
                    None
                } else {
                    Some(
                        validation
                            .message
                            .clone()
                            .unwrap_or_else(|| MSG_INVALID_FORMAT.to_string()),
                    )
                }
            }
            ParameterKind::Text { validation: None }
            | ParameterKind::Select { .. }
            | ParameterKind::Boolean => None,
        }
    }

    /// Unanchored regex search; a pattern that does not compile never matches
    fn pattern_matches(&self, name: &str, pattern: &str, text: &str) -> bool {
        if let Some(compiled) = self.patterns.read().get(pattern) {
            return compiled.as_ref().is_some_and(|re| re.is_match(text));
        }

        let compiled = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(parameter = name, error = %e, "parameter pattern does not compile");
                None
            }
        };
        let matched = compiled.as_ref().is_some_and(|re| re.is_match(text));
        self.patterns.write().insert(pattern.to_string(), compiled);
        matched
    }
}
