//! Executor interaction checked with mocks

use async_trait::async_trait;
use calc_catalog::PersistenceError;
use calc_session::{
    CalculationExecutor, CalculationResult, CalculationSession, ExecutionError, ResultMetadata,
    SessionConfig, SessionError, SessionStep, SubmitOutcome,
};
use calc_template::{ParameterValueMap, ResultValueMap, TemplateId};
use calc_test_utils::voltage_template;
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Executor {}

    #[async_trait]
    impl CalculationExecutor for Executor {
        async fn execute(
            &self,
            template_id: &TemplateId,
            values: &ParameterValueMap,
        ) -> Result<CalculationResult, ExecutionError>;
        async fn save_result(
            &self,
            result: &CalculationResult,
            metadata: &ResultMetadata,
        ) -> Result<(), PersistenceError>;
    }
}

fn session() -> CalculationSession {
    let mut session = CalculationSession::new(Arc::new(voltage_template()), SessionConfig::default());
    session.begin().unwrap();
    session
}

#[tokio::test]
async fn invalid_input_is_never_executed() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().times(0);

    let mut session = session();
    session.set_input("voltage", "300").unwrap();
    let outcome = session.submit(&executor).await.unwrap();

    let SubmitOutcome::Invalid(validation) = outcome else {
        panic!("expected validation failure");
    };
    assert_eq!(validation.error_for("voltage"), Some("maximum value is 240"));
    assert_eq!(session.step(), SessionStep::Parameters);
}

#[tokio::test]
async fn valid_input_is_executed_exactly_once() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Ok(CalculationResult::success(ResultValueMap::new()).with_value("ok", "yes")));

    let mut session = session();
    session.set_value("voltage", 150.0).unwrap();
    assert!(session.validation().is_valid());
    assert!(session.submit(&executor).await.unwrap().is_completed());
    assert_eq!(session.step(), SessionStep::Results);
}

#[tokio::test]
async fn executor_message_is_surfaced_verbatim() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Err(ExecutionError::Failed("Divisor cannot be zero".to_string())));

    let mut session = session();
    session.set_value("voltage", 150.0).unwrap();
    session.submit(&executor).await.unwrap();
    assert_eq!(session.step(), SessionStep::Parameters);
    assert_eq!(session.last_error(), Some("Divisor cannot be zero"));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn save_failure_is_reported_without_state_change() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_, _| Ok(CalculationResult::success(ResultValueMap::new())));
    executor
        .expect_save_result()
        .times(1)
        .returning(|_, _| Err(PersistenceError::Rejected("quota exceeded".to_string())));

    let mut session = session();
    session.set_value("voltage", 150.0).unwrap();
    session.submit(&executor).await.unwrap();
    let before = session.current_result().cloned();

    let metadata = session.result_metadata().unwrap();
    let err = session.save_result(&executor, &metadata).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Persistence(PersistenceError::Rejected("quota exceeded".to_string()))
    );
    assert_eq!(session.current_result().cloned(), before);
    assert_eq!(session.step(), SessionStep::Results);
}
