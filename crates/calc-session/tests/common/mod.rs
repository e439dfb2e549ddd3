//! Shared executors for session integration tests

use async_trait::async_trait;
use calc_catalog::PersistenceError;
use calc_session::{CalculationExecutor, CalculationResult, ExecutionError, ResultMetadata};
use calc_template::{ParameterValueMap, ResultValueMap, TemplateId};
use parking_lot::Mutex;

/// Echoes the `voltage` input back as a `drop` result and counts calls
#[derive(Debug, Default)]
pub struct EchoExecutor {
    pub calls: Mutex<Vec<ParameterValueMap>>,
    pub saved: Mutex<Vec<ResultMetadata>>,
}

#[async_trait]
impl CalculationExecutor for EchoExecutor {
    async fn execute(
        &self,
        _template_id: &TemplateId,
        values: &ParameterValueMap,
    ) -> Result<CalculationResult, ExecutionError> {
        self.calls.lock().push(values.clone());
        let voltage = values
            .get("voltage")
            .and_then(calc_template::ParameterValue::as_number)
            .ok_or(ExecutionError::Unspecified)?;
        Ok(CalculationResult::success(ResultValueMap::new()).with_value("drop", voltage / 100.0))
    }

    async fn save_result(
        &self,
        _result: &CalculationResult,
        metadata: &ResultMetadata,
    ) -> Result<(), PersistenceError> {
        self.saved.lock().push(metadata.clone());
        Ok(())
    }
}
