//! Calculation executor boundary
//!
//! The session never computes anything itself: it hands validated inputs
//! to a [`CalculationExecutor`] and records what comes back.

use crate::error::ExecutionError;
use crate::result::{CalculationResult, ResultMetadata};
use calc_catalog::PersistenceError;
use calc_template::{ParameterValueMap, TemplateId};

/// What a calculation produced, as delivered to the session
pub type CalculationOutcome = Result<CalculationResult, ExecutionError>;

/// Backend that runs calculations and stores their results
///
/// Implement this trait to connect a session to a calculation service.
#[async_trait::async_trait]
pub trait CalculationExecutor: Send + Sync {
    /// Run one calculation
    ///
    /// # Errors
    /// `ExecutionError` when the calculation could not be performed; its
    /// message is shown to the user.
    async fn execute(
        &self,
        template_id: &TemplateId,
        values: &ParameterValueMap,
    ) -> Result<CalculationResult, ExecutionError>;

    /// Persist a result
    async fn save_result(
        &self,
        result: &CalculationResult,
        metadata: &ResultMetadata,
    ) -> Result<(), PersistenceError>;
}
