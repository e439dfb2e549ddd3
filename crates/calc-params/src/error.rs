//! Parameter store errors

/// Errors raised by `ParameterStore` writes
///
/// These guard the shape of the value map (which keys may exist), never the
/// values themselves: value problems are reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No parameter with this name in the active template
    #[error("unknown parameter: '{0}'")]
    UnknownParameter(String),

    /// Output parameters are computed, not entered
    #[error("parameter '{0}' is an output and cannot be set")]
    OutputParameter(String),

    /// Raw input for a boolean parameter was not recognised
    #[error("parameter '{name}': '{raw}' is not a boolean")]
    InvalidBoolean { name: String, raw: String },
}
