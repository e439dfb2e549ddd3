//! Calculation templates
//!
//! A [`CalculationTemplate`] is the read-only description of one engineering
//! calculation: its catalog metadata (category, difficulty, regulatory
//! reference, community counters) and its ordered parameter schema.

use crate::error::TemplateError;
use crate::parameter::{ParameterKind, TemplateParameter};
use crate::value::ParameterValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Template identifier, assigned by the template author
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Create from any string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Skill level a template expects from its user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Introductory calculations
    #[default]
    Basic,
    /// Requires some domain knowledge
    Intermediate,
    /// Specialist calculations
    Advanced,
}

impl Difficulty {
    /// Lowercase name as used in template files
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Named, versioned unit of engineering calculation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationTemplate {
    /// Unique template id
    pub id: TemplateId,
    /// Display name
    pub name: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Top-level category
    pub category: String,
    /// Optional subcategory within the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Search keywords
    #[serde(default)]
    pub tags: Vec<String>,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Regulatory citation (e.g. "NEC 310.16")
    #[serde(default)]
    pub nec_reference: String,
    /// Template version string
    #[serde(default = "default_version")]
    pub version: String,
    /// Input and output slots, in display order
    #[serde(default)]
    pub parameters: Vec<TemplateParameter>,
    /// Number of completed calculations; never decreases
    #[serde(default)]
    pub usage_count: u64,
    /// Community rating, 0-5
    #[serde(default)]
    pub average_rating: f64,
    /// Number of ratings behind `average_rating`
    #[serde(default)]
    pub rating_count: u32,
    /// Marked as favorite by the user
    #[serde(default)]
    pub is_favorite: bool,
    /// Reviewed and verified by maintainers
    #[serde(default)]
    pub is_verified: bool,
    /// Externally flagged by the community service
    #[serde(default)]
    pub is_trending: bool,
    /// Template author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// Last completed calculation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl CalculationTemplate {
    /// Create a template with empty metadata
    #[must_use]
    pub fn new(
        id: impl Into<TemplateId>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            subcategory: None,
            tags: Vec::new(),
            difficulty: Difficulty::default(),
            nec_reference: String::new(),
            version: default_version(),
            parameters: Vec::new(),
            usage_count: 0,
            average_rating: 0.0,
            rating_count: 0,
            is_favorite: false,
            is_verified: false,
            is_trending: false,
            author: None,
            created_at: DateTime::<Utc>::default(),
            last_used_at: None,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With subcategory
    #[inline]
    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// With search tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// With difficulty
    #[inline]
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// With regulatory citation
    #[inline]
    #[must_use]
    pub fn with_nec_reference(mut self, reference: impl Into<String>) -> Self {
        self.nec_reference = reference.into();
        self
    }

    /// Append a parameter
    #[inline]
    #[must_use]
    pub fn with_parameter(mut self, parameter: TemplateParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// With usage count
    #[inline]
    #[must_use]
    pub fn with_usage_count(mut self, count: u64) -> Self {
        self.usage_count = count;
        self
    }

    /// With average rating and rating count
    #[inline]
    #[must_use]
    pub fn with_rating(mut self, average: f64, count: u32) -> Self {
        self.average_rating = average;
        self.rating_count = count;
        self
    }

    /// With creation time
    #[inline]
    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// With last-use time
    #[inline]
    #[must_use]
    pub fn with_last_used_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_used_at = Some(at);
        self
    }

    /// Mark as verified
    #[inline]
    #[must_use]
    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    /// Mark as favorite
    #[inline]
    #[must_use]
    pub fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }

    /// Mark as trending
    #[inline]
    #[must_use]
    pub fn trending(mut self) -> Self {
        self.is_trending = true;
        self
    }

    /// Look up a parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&TemplateParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Look up a parameter the user may enter
    #[must_use]
    pub fn input_parameter(&self, name: &str) -> Option<&TemplateParameter> {
        self.parameter(name).filter(|p| p.is_input())
    }

    /// Parameters entered by the user, in declaration order
    pub fn input_parameters(&self) -> impl Iterator<Item = &TemplateParameter> {
        self.parameters.iter().filter(|p| p.is_input())
    }

    /// Parameters produced by the calculation, in declaration order
    pub fn output_parameters(&self) -> impl Iterator<Item = &TemplateParameter> {
        self.parameters.iter().filter(|p| !p.is_input())
    }

    /// Most recent activity: last use, or creation when never used
    #[inline]
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_used_at.unwrap_or(self.created_at)
    }

    /// Count one completed calculation
    pub fn record_usage(&mut self, at: DateTime<Utc>) -> u64 {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used_at = Some(at);
        self.usage_count
    }

    /// Check the parameter schema and metadata invariants
    ///
    /// # Errors
    /// Returns the first [`TemplateError`] found, in parameter order.
    pub fn check_schema(&self) -> Result<(), TemplateError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TemplateError::EmptyId);
        }
        if !(0.0..=5.0).contains(&self.average_rating) {
            return Err(TemplateError::RatingOutOfRange(self.average_rating));
        }

        let mut seen = HashSet::new();
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(TemplateError::DuplicateParameter(param.name.clone()));
            }
            check_parameter(param)?;
        }
        Ok(())
    }
}

fn check_parameter(param: &TemplateParameter) -> Result<(), TemplateError> {
    match &param.kind {
        ParameterKind::Number {
            min: Some(min),
            max: Some(max),
        } if min > max => {
            return Err(TemplateError::InvalidBounds {
                name: param.name.clone(),
                min: *min,
                max: *max,
            });
        }
        ParameterKind::Select { options } if options.is_empty() => {
            return Err(TemplateError::EmptyOptions(param.name.clone()));
        }
        ParameterKind::Text {
            validation: Some(validation),
        } => {
            if let Some(pattern) = &validation.pattern {
                regex::Regex::new(pattern).map_err(|e| TemplateError::InvalidPattern {
                    name: param.name.clone(),
                    reason: e.to_string(),
                })?;
            }
        }
        _ => {}
    }

    let Some(default) = &param.default_value else {
        return Ok(());
    };
    if !param.is_input() {
        return Err(TemplateError::OutputWithDefault(param.name.clone()));
    }
    if !param.accepts(default) {
        return Err(TemplateError::DefaultTypeMismatch {
            name: param.name.clone(),
            expected: param.parameter_type().as_str(),
            found: default.variant_name(),
        });
    }
    if let (ParameterKind::Select { options }, ParameterValue::Text(v) | ParameterValue::Select(v)) =
        (&param.kind, default)
    {
        if !options.iter().any(|o| o == v) {
            return Err(TemplateError::DefaultNotAnOption {
                name: param.name.clone(),
                value: v.clone(),
            });
        }
    }
    Ok(())
}
