//! Calc Parameters
//!
//! Validation and storage of the values a user enters for a calculation
//! template.
//!
//! # Overview
//!
//! - **ParameterValidator**: pure schema check producing a [`ValidationResult`]
//! - **ParameterStore**: owned value map with default seeding and the
//!   numeric blur policy
//!
//! # Example
//!
//! ```rust
//! use calc_params::{ParameterStore, ParameterValidator};
//! use calc_template::{CalculationTemplate, TemplateParameter};
//! use std::sync::Arc;
//!
//! let template = Arc::new(
//!     CalculationTemplate::new("vd-01", "Voltage drop", "electrical").with_parameter(
//!         TemplateParameter::number("voltage", "Voltage")
//!             .required()
//!             .with_bounds(100.0, 240.0),
//!     ),
//! );
//!
//! let mut store = ParameterStore::new(template);
//! store.set_value("voltage", 300.0).unwrap();
//!
//! let result = store.validate(&ParameterValidator::new());
//! assert_eq!(result.error_for("voltage"), Some("maximum value is 240"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod store;
pub mod validator;

// Re-exports
pub use error::StoreError;
pub use store::ParameterStore;
pub use validator::{
    ParameterValidator, ValidationResult, MSG_INVALID_FORMAT, MSG_NOT_A_NUMBER, MSG_REQUIRED,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
