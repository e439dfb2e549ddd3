//! Parameter value store
//!
//! [`ParameterStore`] owns the values entered for the active template. Writes
//! are not validated: transient invalid text (a half-typed number) must
//! survive until the field loses focus, where [`ParameterStore::commit_field`]
//! applies the numeric coercion policy.

use crate::error::StoreError;
use crate::validator::{ParameterValidator, ValidationResult};
use calc_template::{CalculationTemplate, ParameterKind, ParameterValue, ParameterValueMap, TemplateParameter};
use std::sync::Arc;

/// Values entered for one template
#[derive(Debug, Clone)]
pub struct ParameterStore {
    template: Arc<CalculationTemplate>,
    values: ParameterValueMap,
    /// Bumped on every mutation so readers can memoize derived data
    revision: u64,
}

impl ParameterStore {
    /// Create a store for `template`, seeded with its defaults
    #[must_use]
    pub fn new(template: Arc<CalculationTemplate>) -> Self {
        let mut store = Self {
            template,
            values: ParameterValueMap::new(),
            revision: 0,
        };
        store.seed_defaults();
        store
    }

    /// Replace the active template, clearing every value and re-seeding defaults
    pub fn load(&mut self, template: Arc<CalculationTemplate>) {
        self.template = template;
        self.seed_defaults();
    }

    /// Clear the store and insert every input default
    ///
    /// Parameters without a default stay absent.
    pub fn seed_defaults(&mut self) {
        self.values = self
            .template
            .input_parameters()
            .filter_map(|p| p.conformed_default().map(|v| (p.name.clone(), v)))
            .collect();
        self.bump();
    }

    /// Active template
    #[inline]
    #[must_use]
    pub fn template(&self) -> &CalculationTemplate {
        &self.template
    }

    /// Overwrite or insert a value
    ///
    /// # Errors
    /// Fails only when `name` is not an input parameter of the template.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<ParameterValue>,
    ) -> Result<(), StoreError> {
        let param = self.input(name)?;
        let value = param.conform(value.into());
        self.values.insert(name.to_string(), value);
        self.bump();
        Ok(())
    }

    /// Store raw user text, converted to the parameter's natural variant
    ///
    /// Number input is kept verbatim (see [`Self::commit_field`]). Booleans
    /// accept `true/false`, `yes/no`, `on/off` and `1/0`.
    ///
    /// # Errors
    /// Unknown or output parameters, and unrecognised boolean text.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<(), StoreError> {
        let param = self.input(name)?;
        let value = match &param.kind {
            ParameterKind::Number { .. } | ParameterKind::Text { .. } => ParameterValue::text(raw),
            ParameterKind::Select { .. } => ParameterValue::select(raw),
            ParameterKind::Boolean => ParameterValue::Boolean(parse_bool(raw).ok_or_else(|| {
                StoreError::InvalidBoolean {
                    name: name.to_string(),
                    raw: raw.to_string(),
                }
            })?),
        };
        self.values.insert(name.to_string(), value);
        self.bump();
        Ok(())
    }

    /// Remove a value, returning it
    pub fn clear_value(&mut self, name: &str) -> Option<ParameterValue> {
        let removed = self.values.shift_remove(name);
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    /// Apply the blur policy to a number field
    ///
    /// Text that parses to a finite number becomes a `Number`; anything else
    /// (including empty text and `NaN`) is cleared. Non-number fields are left
    /// untouched.
    ///
    /// # Errors
    /// Unknown or output parameters.
    pub fn commit_field(&mut self, name: &str) -> Result<Option<&ParameterValue>, StoreError> {
        let is_number = matches!(self.input(name)?.kind, ParameterKind::Number { .. });
        if is_number {
            match self.values.get(name).map(|v| v.as_number().filter(|n| n.is_finite())) {
                Some(Some(n)) => {
                    if self.values.get(name) != Some(&ParameterValue::Number(n)) {
                        self.values.insert(name.to_string(), ParameterValue::Number(n));
                        self.bump();
                    }
                }
                Some(None) => {
                    self.values.shift_remove(name);
                    self.bump();
                }
                None => {}
            }
        }
        Ok(self.values.get(name))
    }

    /// Convert every parseable number field to a `Number`, keeping the rest
    ///
    /// Unlike [`Self::commit_field`] this never drops text, so invalid input
    /// still reaches the validator.
    pub fn normalize_numbers(&mut self) {
        let mut changed = false;
        for param in self.template.input_parameters() {
            if !matches!(param.kind, ParameterKind::Number { .. }) {
                continue;
            }
            let Some(value) = self.values.get_mut(&param.name) else {
                continue;
            };
            if matches!(value, ParameterValue::Number(_) | ParameterValue::Boolean(_)) {
                continue;
            }
            if let Some(n) = value.as_number().filter(|n| n.is_finite()) {
                *value = ParameterValue::Number(n);
                changed = true;
            }
        }
        if changed {
            self.bump();
        }
    }

    /// Replace the whole map, e.g. from a history snapshot
    ///
    /// Keys that are not inputs of the active template are dropped; the number
    /// dropped is returned.
    pub fn replace_all(&mut self, snapshot: ParameterValueMap) -> usize {
        let before = snapshot.len();
        self.values = snapshot
            .into_iter()
            .filter_map(|(name, value)| {
                let param = self.template.input_parameter(&name)?;
                let value = param.conform(value);
                Some((name, value))
            })
            .collect();
        self.bump();
        before - self.values.len()
    }

    /// Current value of one parameter
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// All current values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &ParameterValueMap {
        &self.values
    }

    /// Owned copy of the current values
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ParameterValueMap {
        self.values.clone()
    }

    /// Validate the current values against the active template
    #[must_use]
    pub fn validate(&self, validator: &ParameterValidator) -> ValidationResult {
        validator.validate(&self.template, &self.values)
    }

    /// Mutation counter
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of stored values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn input(&self, name: &str) -> Result<&TemplateParameter, StoreError> {
        match self.template.parameter(name) {
            Some(p) if p.is_input() => Ok(p),
            Some(_) => Err(StoreError::OutputParameter(name.to_string())),
            None => Err(StoreError::UnknownParameter(name.to_string())),
        }
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
