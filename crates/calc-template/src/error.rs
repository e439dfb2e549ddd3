//! Schema errors for calculation templates

/// Problems detected by `CalculationTemplate::check_schema`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    /// Two parameters share a name
    #[error("duplicate parameter name: '{0}'")]
    DuplicateParameter(String),

    /// Number parameter with min above max
    #[error("parameter '{name}': min {min} is greater than max {max}")]
    InvalidBounds { name: String, min: f64, max: f64 },

    /// Select parameter without options
    #[error("parameter '{0}': select has no options")]
    EmptyOptions(String),

    /// Default value of the wrong variant
    #[error("parameter '{name}': default of type {found} does not match declared type {expected}")]
    DefaultTypeMismatch {
        /// Parameter name
        name: String,
        /// Declared type
        expected: &'static str,
        /// Type of the default
        found: &'static str,
    },

    /// Select default not among the options
    #[error("parameter '{name}': default '{value}' is not one of the options")]
    DefaultNotAnOption { name: String, value: String },

    /// Output parameters are computed and cannot be seeded
    #[error("parameter '{0}': output parameters cannot carry a default")]
    OutputWithDefault(String),

    /// Text pattern does not compile
    #[error("parameter '{name}': invalid pattern: {reason}")]
    InvalidPattern { name: String, reason: String },

    /// Rating outside 0-5
    #[error("average rating {0} is outside 0-5")]
    RatingOutOfRange(f64),

    /// Template without an id
    #[error("template id is empty")]
    EmptyId,
}
