//! Calc Session
//!
//! The calculation workflow for one template: parameter entry, validation
//! gating, a single executor call per submit, and a bounded history of
//! successful results.
//!
//! # Architecture
//!
//! ```text
//! overview ──begin──▶ parameters ──submit──▶ calculating ──ok──▶ results
//!                        ▲   ▲                   │                │
//!                        │   └──────failure──────┘                │
//!                        └──────────────back / edit───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use calc_session::{CalculationSession, SessionConfig, SessionStep};
//! use calc_template::{CalculationTemplate, TemplateParameter};
//! use std::sync::Arc;
//!
//! let template = Arc::new(
//!     CalculationTemplate::new("vd-01", "Voltage drop", "electrical").with_parameter(
//!         TemplateParameter::number("voltage", "Voltage").required().with_bounds(100.0, 240.0),
//!     ),
//! );
//!
//! let mut session = CalculationSession::new(template, SessionConfig::default());
//! session.begin().unwrap();
//! session.set_input("voltage", "300").unwrap();
//! assert_eq!(session.validation().error_for("voltage"), Some("maximum value is 240"));
//! assert_eq!(session.step(), SessionStep::Parameters);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod result;
pub mod session;
pub mod step;

// Re-exports
pub use config::{SessionConfig, StudioConfig, DEFAULT_FAILURE_MESSAGE};
pub use error::{ConfigError, ExecutionError, SessionError};
pub use executor::{CalculationExecutor, CalculationOutcome};
pub use history::{CalculationHistory, CalculationHistoryEntry, DEFAULT_HISTORY_CAPACITY};
pub use result::{CalculationResult, ResultMetadata};
pub use session::{CalculationSession, CalculationStart, CalculationTicket, SubmitOutcome};
pub use step::{allowed_transitions, validate_transition, SessionStep};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a session
    pub use crate::{
        CalculationExecutor, CalculationResult, CalculationSession, ExecutionError,
        SessionConfig, SessionError, SessionStep, SubmitOutcome,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
