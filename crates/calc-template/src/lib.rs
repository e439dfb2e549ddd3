//! Calc Template Model
//!
//! Typed description of calculation templates and their parameter schemas.
//!
//! # Core Concepts
//!
//! - [`CalculationTemplate`]: catalog metadata plus an ordered parameter schema
//! - [`TemplateParameter`]: one input or output slot
//! - [`ParameterKind`]: type-specific constraints (bounds, options, pattern)
//! - [`ParameterValue`]: tagged union of entered values
//!
//! # Example
//!
//! ```rust
//! use calc_template::{CalculationTemplate, TemplateParameter};
//!
//! let template = CalculationTemplate::new("vd-01", "Voltage drop", "electrical")
//!     .with_parameter(
//!         TemplateParameter::number("voltage", "Voltage")
//!             .required()
//!             .with_bounds(100.0, 240.0),
//!     );
//!
//! assert!(template.check_schema().is_ok());
//! assert!(template.input_parameter("voltage").is_some());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod parameter;
pub mod template;
pub mod value;

// Re-exports
pub use error::TemplateError;
pub use parameter::{ParameterKind, ParameterScope, ParameterType, TemplateParameter, TextValidation};
pub use template::{CalculationTemplate, Difficulty, TemplateId};
pub use value::{ParameterValue, ParameterValueMap, ResultValue, ResultValueMap};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with templates
    pub use crate::{
        CalculationTemplate, Difficulty, ParameterKind, ParameterValue, ParameterValueMap,
        TemplateId, TemplateParameter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
