//! Calculation session
//!
//! [`CalculationSession`] drives one template through
//! `overview → parameters → calculating → results`. It owns the parameter
//! store, the current result and a bounded history of successful runs.
//!
//! Calculations can be run in one call with [`CalculationSession::submit`],
//! or split around an event loop with [`CalculationSession::start_calculation`]
//! and [`CalculationSession::finish_calculation`]. Every ticket carries the
//! session generation it was issued in. Starting, abandoning and loading
//! another template each move the generation on, so an outcome is accepted
//! only for the most recent ticket.

use crate::config::SessionConfig;
use crate::error::{ExecutionError, SessionError};
use crate::executor::{CalculationExecutor, CalculationOutcome};
use crate::history::{CalculationHistory, CalculationHistoryEntry};
use crate::result::{CalculationResult, ResultMetadata};
use crate::step::{validate_transition, SessionStep};
use calc_params::{ParameterStore, ParameterValidator, ValidationResult};
use calc_template::{CalculationTemplate, ParameterValue, ParameterValueMap, TemplateId};
use std::cell::OnceCell;
use std::sync::Arc;
use ulid::Ulid;

/// Handle for one in-flight calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationTicket {
    generation: u64,
    template_id: TemplateId,
    inputs: ParameterValueMap,
}

impl CalculationTicket {
    /// Template the ticket was issued for
    #[inline]
    #[must_use]
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    /// Validated inputs to send to the executor
    #[inline]
    #[must_use]
    pub fn inputs(&self) -> &ParameterValueMap {
        &self.inputs
    }

    /// Session generation at issue time
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of asking to start a calculation
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationStart {
    /// Inputs are valid; the session is now `calculating`
    Started(CalculationTicket),
    /// Inputs are invalid; the session stays in `parameters`
    Invalid(ValidationResult),
}

/// How a submitted calculation ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was executed
    Invalid(ValidationResult),
    /// Calculation succeeded and was added to history
    Completed(CalculationResult),
    /// Calculation failed; the message is also available from `last_error`
    Failed(String),
    /// The session moved on while the calculation ran
    Discarded,
}

impl SubmitOutcome {
    /// Whether the calculation succeeded
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// One template's calculation workflow
#[derive(Debug)]
pub struct CalculationSession {
    store: ParameterStore,
    validator: ParameterValidator,
    step: SessionStep,
    history: CalculationHistory,
    current_result: Option<CalculationResult>,
    last_error: Option<String>,
    config: SessionConfig,
    generation: u64,
    /// Reset on every store write
    validation: OnceCell<ValidationResult>,
}

impl CalculationSession {
    /// Create a session on `template`, starting at `overview`
    #[must_use]
    pub fn new(template: Arc<CalculationTemplate>, config: SessionConfig) -> Self {
        Self {
            store: ParameterStore::new(template),
            validator: ParameterValidator::new(),
            step: SessionStep::Overview,
            history: CalculationHistory::new(config.history_capacity),
            current_result: None,
            last_error: None,
            config,
            generation: 0,
            validation: OnceCell::new(),
        }
    }

    /// Leave the overview and start entering parameters
    ///
    /// The store is re-seeded with the template defaults.
    ///
    /// # Errors
    /// `IllegalTransition` outside `overview`.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.step != SessionStep::Overview {
            return Err(SessionError::IllegalTransition {
                from: self.step,
                to: SessionStep::Parameters,
            });
        }
        self.store_mut().seed_defaults();
        self.last_error = None;
        self.transition(SessionStep::Parameters)
    }

    /// Set a typed value
    ///
    /// Editing from `results` returns the session to `parameters`.
    ///
    /// # Errors
    /// Edits outside `parameters`/`results` and store errors.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<ParameterValue>,
    ) -> Result<(), SessionError> {
        self.check_editable()?;
        self.store_mut().set_value(name, value)?;
        self.after_edit()
    }

    /// Set raw user text (see `ParameterStore::set_input`)
    ///
    /// # Errors
    /// Edits outside `parameters`/`results` and store errors.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<(), SessionError> {
        self.check_editable()?;
        self.store_mut().set_input(name, raw)?;
        self.after_edit()
    }

    /// Remove a value
    ///
    /// # Errors
    /// Edits outside `parameters`/`results`.
    pub fn clear_value(&mut self, name: &str) -> Result<Option<ParameterValue>, SessionError> {
        self.check_editable()?;
        let removed = self.store_mut().clear_value(name);
        self.after_edit()?;
        Ok(removed)
    }

    /// Apply the blur policy to one field, returning its value afterwards
    ///
    /// # Errors
    /// Edits outside `parameters`/`results` and store errors.
    pub fn commit_field(&mut self, name: &str) -> Result<Option<ParameterValue>, SessionError> {
        self.check_editable()?;
        let value = self.store_mut().commit_field(name)?.cloned();
        self.after_edit()?;
        Ok(value)
    }

    /// Validation of the current values, recomputed only after edits
    #[must_use]
    pub fn validation(&self) -> &ValidationResult {
        self.validation
            .get_or_init(|| self.store.validate(&self.validator))
    }

    /// Run a calculation to completion
    ///
    /// The executor is called at most once, and never with invalid inputs.
    ///
    /// # Errors
    /// `AlreadyCalculating` while another calculation is in flight and
    /// `IllegalTransition` outside `parameters`. Executor failures are not
    /// errors: they come back as [`SubmitOutcome::Failed`].
    pub async fn submit(
        &mut self,
        executor: &dyn CalculationExecutor,
    ) -> Result<SubmitOutcome, SessionError> {
        let ticket = match self.start_calculation()? {
            CalculationStart::Started(ticket) => ticket,
            CalculationStart::Invalid(validation) => return Ok(SubmitOutcome::Invalid(validation)),
        };
        let outcome = executor.execute(ticket.template_id(), ticket.inputs()).await;
        Ok(self.finish_calculation(ticket, outcome))
    }

    /// Validate and, if valid, enter `calculating`
    ///
    /// Parseable number text is converted to numbers first.
    ///
    /// # Errors
    /// Same as [`Self::submit`].
    pub fn start_calculation(&mut self) -> Result<CalculationStart, SessionError> {
        match self.step {
            SessionStep::Parameters => {}
            SessionStep::Calculating => return Err(SessionError::AlreadyCalculating),
            from => {
                return Err(SessionError::IllegalTransition {
                    from,
                    to: SessionStep::Calculating,
                })
            }
        }

        self.store_mut().normalize_numbers();
        let validation = self.validation();
        if !validation.is_valid() {
            tracing::debug!(
                template = %self.template().id,
                errors = validation.error_count(),
                "calculation blocked by validation"
            );
            return Ok(CalculationStart::Invalid(validation.clone()));
        }

        self.last_error = None;
        self.transition(SessionStep::Calculating)?;
        self.generation += 1;
        Ok(CalculationStart::Started(CalculationTicket {
            generation: self.generation,
            template_id: self.template().id.clone(),
            inputs: self.store.snapshot(),
        }))
    }

    /// Deliver the outcome for `ticket`
    ///
    /// Success moves to `results` and records history. Failure, including an
    /// `Ok` result with `was_successful == false`, moves back to `parameters`
    /// with a message. Outcomes for orphaned tickets are dropped.
    pub fn finish_calculation(
        &mut self,
        ticket: CalculationTicket,
        outcome: CalculationOutcome,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation || !self.is_calculating() {
            tracing::debug!(
                template = %ticket.template_id,
                generation = ticket.generation,
                current = self.generation,
                "discarding orphaned calculation outcome"
            );
            return SubmitOutcome::Discarded;
        }

        match outcome {
            Ok(result) if result.was_successful => {
                self.enter(SessionStep::Results);
                let entry =
                    CalculationHistoryEntry::new(ticket.template_id, ticket.inputs, result.clone());
                if let Some(evicted) = self.history.push(entry) {
                    tracing::debug!(entry = %evicted.id, "history entry evicted");
                }
                self.current_result = Some(result.clone());
                tracing::info!(
                    template = %self.template().id,
                    result = %result.id,
                    history = self.history.len(),
                    "calculation completed"
                );
                SubmitOutcome::Completed(result)
            }
            Ok(result) => {
                let message = result.failure_message().map(str::to_string);
                self.fail(message, None)
            }
            Err(e) => {
                let message = e.user_message();
                self.fail(message, Some(&e))
            }
        }
    }

    /// Orphan the in-flight calculation and return to `parameters`
    ///
    /// Returns whether a calculation was in flight. The executor is not told;
    /// its eventual outcome is discarded.
    pub fn abandon(&mut self) -> bool {
        if !self.is_calculating() {
            return false;
        }
        self.generation += 1;
        self.enter(SessionStep::Parameters);
        tracing::info!(template = %self.template().id, "calculation abandoned");
        true
    }

    /// From `results` back to `parameters`, values unchanged
    ///
    /// # Errors
    /// `IllegalTransition` outside `results`.
    pub fn back(&mut self) -> Result<(), SessionError> {
        if self.step != SessionStep::Results {
            return Err(SessionError::IllegalTransition {
                from: self.step,
                to: SessionStep::Parameters,
            });
        }
        self.transition(SessionStep::Parameters)
    }

    /// Show a history entry again, restoring its inputs
    ///
    /// Nothing is executed.
    ///
    /// # Errors
    /// Unknown entries, and calls outside `parameters`/`results`.
    pub fn restore_from_history(&mut self, entry_id: Ulid) -> Result<(), SessionError> {
        match self.step {
            SessionStep::Parameters | SessionStep::Results => {}
            SessionStep::Calculating => return Err(SessionError::AlreadyCalculating),
            from => {
                return Err(SessionError::IllegalTransition {
                    from,
                    to: SessionStep::Results,
                })
            }
        }
        let entry = self
            .history
            .get(entry_id)
            .cloned()
            .ok_or(SessionError::UnknownHistoryEntry(entry_id))?;

        let dropped = self.store_mut().replace_all(entry.inputs);
        if dropped > 0 {
            tracing::warn!(entry = %entry_id, dropped, "history snapshot had unknown parameters");
        }
        self.current_result = Some(entry.result);
        self.last_error = None;
        self.transition(SessionStep::Results)
    }

    /// Step-indicator navigation
    ///
    /// `calculating` is never a navigation target and `results` needs a
    /// current result. Navigating to the current step is a no-op.
    ///
    /// # Errors
    /// `IllegalTransition`, `NoResult`, or `AlreadyCalculating` while a
    /// calculation is in flight.
    pub fn navigate(&mut self, to: SessionStep) -> Result<(), SessionError> {
        if to == SessionStep::Calculating {
            return Err(SessionError::IllegalTransition {
                from: self.step,
                to,
            });
        }
        if self.is_calculating() {
            return Err(SessionError::AlreadyCalculating);
        }
        if to == self.step {
            return Ok(());
        }
        if to == SessionStep::Results && self.current_result.is_none() {
            return Err(SessionError::NoResult);
        }
        self.transition(to)
    }

    /// Switch to another template
    ///
    /// Values, history, the current result and any in-flight calculation are
    /// dropped; the session returns to `overview`.
    pub fn load_template(&mut self, template: Arc<CalculationTemplate>) {
        self.generation += 1;
        self.store_mut().load(template);
        self.history.clear();
        self.current_result = None;
        self.last_error = None;
        self.enter(SessionStep::Overview);
    }

    /// Metadata describing the current result, for [`Self::save_result`]
    #[must_use]
    pub fn result_metadata(&self) -> Option<ResultMetadata> {
        let result = self.current_result.as_ref()?;
        let inputs = self
            .history
            .iter()
            .find(|e| e.result.id == result.id)
            .map_or_else(|| self.store.snapshot(), |e| e.inputs.clone());
        let template = self.template();
        Some(ResultMetadata {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            template_version: template.version.clone(),
            inputs,
            notes: None,
        })
    }

    /// Persist the current result
    ///
    /// Failures are logged and returned; session state is not touched either
    /// way.
    ///
    /// # Errors
    /// `NoResult` without a current result, `Persistence` when saving fails.
    pub async fn save_result(
        &self,
        executor: &dyn CalculationExecutor,
        metadata: &ResultMetadata,
    ) -> Result<(), SessionError> {
        let result = self.current_result.as_ref().ok_or(SessionError::NoResult)?;
        executor.save_result(result, metadata).await.map_err(|e| {
            tracing::warn!(result = %result.id, error = %e, "failed to save result");
            SessionError::Persistence(e)
        })
    }

    /// Current step
    #[inline]
    #[must_use]
    pub fn step(&self) -> SessionStep {
        self.step
    }

    /// Active template
    #[inline]
    #[must_use]
    pub fn template(&self) -> &CalculationTemplate {
        self.store.template()
    }

    /// Parameter store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Current input values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &ParameterValueMap {
        self.store.values()
    }

    /// Calculation history, newest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &CalculationHistory {
        &self.history
    }

    /// Result shown on the results step
    #[inline]
    #[must_use]
    pub fn current_result(&self) -> Option<&CalculationResult> {
        self.current_result.as_ref()
    }

    /// Message of the last failed calculation
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a calculation is in flight
    #[inline]
    #[must_use]
    pub fn is_calculating(&self) -> bool {
        self.step == SessionStep::Calculating
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn store_mut(&mut self) -> &mut ParameterStore {
        self.validation = OnceCell::new();
        &mut self.store
    }

    fn check_editable(&self) -> Result<(), SessionError> {
        if self.step.is_editable() {
            Ok(())
        } else if self.is_calculating() {
            Err(SessionError::AlreadyCalculating)
        } else {
            Err(SessionError::NotEditable(self.step))
        }
    }

    fn after_edit(&mut self) -> Result<(), SessionError> {
        if self.step == SessionStep::Results {
            self.transition(SessionStep::Parameters)?;
        }
        Ok(())
    }

    fn fail(&mut self, message: Option<String>, error: Option<&ExecutionError>) -> SubmitOutcome {
        let message = message.unwrap_or_else(|| self.config.failure_fallback_message.clone());
        self.enter(SessionStep::Parameters);
        match error {
            Some(e) => tracing::warn!(template = %self.template().id, error = %e, "calculation failed"),
            None => tracing::warn!(template = %self.template().id, %message, "calculation unsuccessful"),
        }
        self.last_error = Some(message.clone());
        SubmitOutcome::Failed(message)
    }

    fn transition(&mut self, to: SessionStep) -> Result<(), SessionError> {
        validate_transition(self.step, to)?;
        self.enter(to);
        Ok(())
    }

    fn enter(&mut self, to: SessionStep) {
        tracing::info!(template = %self.template().id, from = %self.step, to = %to, "session step changed");
        self.step = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_catalog::PersistenceError;
    use calc_template::{ResultValueMap, TemplateParameter};
    use parking_lot::Mutex;

    /// Replays queued outcomes and records what it was asked
    #[derive(Default)]
    struct QueueExecutor {
        outcomes: Mutex<Vec<CalculationOutcome>>,
        calls: Mutex<Vec<ParameterValueMap>>,
    }

    impl QueueExecutor {
        fn with(outcomes: Vec<CalculationOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into_iter().rev().collect()),
                calls: Mutex::default(),
            }
        }
    }

    #[async_trait::async_trait]
    impl CalculationExecutor for QueueExecutor {
        async fn execute(
            &self,
            _template_id: &TemplateId,
            values: &ParameterValueMap,
        ) -> Result<CalculationResult, ExecutionError> {
            self.calls.lock().push(values.clone());
            self.outcomes.lock().pop().unwrap_or(Err(ExecutionError::Unspecified))
        }

        async fn save_result(
            &self,
            _result: &CalculationResult,
            _metadata: &ResultMetadata,
        ) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("read-only".into()))
        }
    }

    fn template() -> Arc<CalculationTemplate> {
        Arc::new(
            CalculationTemplate::new("vd", "Voltage drop", "electrical")
                .with_parameter(
                    TemplateParameter::number("voltage", "Voltage")
                        .required()
                        .with_bounds(100.0, 240.0),
                )
                .with_parameter(TemplateParameter::number("length", "Length").with_default(10.0))
                .with_parameter(TemplateParameter::number("drop", "Drop").output()),
        )
    }

    fn ok(drop: f64) -> CalculationOutcome {
        Ok(CalculationResult::success(ResultValueMap::new()).with_value("drop", drop))
    }

    fn ready() -> CalculationSession {
        let mut session = CalculationSession::new(template(), SessionConfig::default());
        session.begin().unwrap();
        session
    }

    #[test]
    fn starts_at_overview_with_defaults() {
        let session = CalculationSession::new(template(), SessionConfig::default());
        assert_eq!(session.step(), SessionStep::Overview);
        assert_eq!(session.values().get("length"), Some(&ParameterValue::Number(10.0)));
        assert!(matches!(
            CalculationSession::new(template(), SessionConfig::default()).set_value("voltage", 120.0),
            Err(SessionError::NotEditable(SessionStep::Overview))
        ));
    }

    #[tokio::test]
    async fn invalid_inputs_never_reach_the_executor() {
        let mut session = ready();
        let executor = QueueExecutor::with(vec![ok(1.0)]);

        let outcome = session.submit(&executor).await.unwrap();
        match outcome {
            SubmitOutcome::Invalid(v) => assert_eq!(v.error_for("voltage"), Some("required")),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(session.step(), SessionStep::Parameters);
        assert!(executor.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn success_records_history_and_shows_results() {
        let mut session = ready();
        session.set_input("voltage", "150").unwrap();
        let executor = QueueExecutor::with(vec![ok(2.5)]);

        let outcome = session.submit(&executor).await.unwrap();
        assert!(outcome.is_completed());
        assert_eq!(session.step(), SessionStep::Results);
        assert_eq!(session.history().len(), 1);
        assert_eq!(
            executor.calls.lock()[0].get("voltage"),
            Some(&ParameterValue::Number(150.0))
        );
        assert_eq!(session.last_error(), None);
    }

    #[tokio::test]
    async fn failures_return_to_parameters_with_message() {
        let mut session = ready();
        session.set_value("voltage", 120.0).unwrap();
        let executor = QueueExecutor::with(vec![
            Err(ExecutionError::Failed("Conductor overloaded".into())),
            Ok(CalculationResult::failure("")),
            Err(ExecutionError::Unspecified),
        ]);

        for expected in ["Conductor overloaded", "Calculation failed", "Calculation failed"] {
            let outcome = session.submit(&executor).await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Failed(expected.to_string()));
            assert_eq!(session.step(), SessionStep::Parameters);
            assert_eq!(session.last_error(), Some(expected));
        }
        assert!(session.history().is_empty());
        assert!(session.current_result().is_none());
    }

    #[test]
    fn second_start_is_rejected_while_calculating() {
        let mut session = ready();
        session.set_value("voltage", 120.0).unwrap();
        assert!(matches!(session.start_calculation(), Ok(CalculationStart::Started(_))));
        assert_eq!(session.start_calculation(), Err(SessionError::AlreadyCalculating));
        assert_eq!(session.set_value("voltage", 130.0), Err(SessionError::AlreadyCalculating));
    }

    #[test]
    fn abandoned_ticket_outcome_is_discarded() {
        let mut session = ready();
        session.set_value("voltage", 120.0).unwrap();
        let CalculationStart::Started(ticket) = session.start_calculation().unwrap() else {
            panic!("expected a ticket");
        };
        assert!(session.abandon());
        assert_eq!(session.step(), SessionStep::Parameters);

        assert_eq!(session.finish_calculation(ticket, ok(1.0)), SubmitOutcome::Discarded);
        assert!(session.history().is_empty());
        assert!(!session.abandon());
    }

    #[test]
    fn loading_a_template_orphans_the_ticket() {
        let mut session = ready();
        session.set_value("voltage", 120.0).unwrap();
        let CalculationStart::Started(ticket) = session.start_calculation().unwrap() else {
            panic!("expected a ticket");
        };
        session.load_template(template());
        assert_eq!(session.step(), SessionStep::Overview);

        session.begin().unwrap();
        session.set_value("voltage", 200.0).unwrap();
        let CalculationStart::Started(fresh) = session.start_calculation().unwrap() else {
            panic!("expected a ticket");
        };
        assert_eq!(session.finish_calculation(ticket, ok(1.0)), SubmitOutcome::Discarded);
        assert!(session.finish_calculation(fresh, ok(2.0)).is_completed());
    }

    #[tokio::test]
    async fn editing_results_goes_back_to_parameters() {
        let mut session = ready();
        session.set_value("voltage", 120.0).unwrap();
        session.submit(&QueueExecutor::with(vec![ok(1.0)])).await.unwrap();

        session.set_input("voltage", "13").unwrap();
        assert_eq!(session.step(), SessionStep::Parameters);
        assert_eq!(session.validation().error_for("voltage"), Some("minimum value is 100"));
        assert_eq!(session.commit_field("voltage").unwrap(), Some(ParameterValue::Number(13.0)));

        session.navigate(SessionStep::Results).unwrap();
        assert_eq!(session.step(), SessionStep::Results);
        session.back().unwrap();
        assert_eq!(session.values().get("voltage"), Some(&ParameterValue::Number(13.0)));
    }

    #[tokio::test]
    async fn restore_replaces_inputs_and_result() {
        let mut session = ready();
        let executor = QueueExecutor::with(vec![ok(1.0), ok(2.0)]);
        session.set_value("voltage", 110.0).unwrap();
        session.submit(&executor).await.unwrap();
        let first = session.history().latest().unwrap().clone();

        session.set_value("voltage", 220.0).unwrap();
        session.submit(&executor).await.unwrap();

        session.restore_from_history(first.id).unwrap();
        assert_eq!(session.step(), SessionStep::Results);
        assert_eq!(session.values().get("voltage"), Some(&ParameterValue::Number(110.0)));
        assert_eq!(session.current_result(), Some(&first.result));
        assert_eq!(executor.calls.lock().len(), 2);

        let unknown = Ulid::new();
        assert_eq!(
            session.restore_from_history(unknown),
            Err(SessionError::UnknownHistoryEntry(unknown))
        );
    }

    #[test]
    fn navigation_rules() {
        let mut session = CalculationSession::new(template(), SessionConfig::default());
        assert!(session.navigate(SessionStep::Results).is_err());
        session.navigate(SessionStep::Parameters).unwrap();
        assert_eq!(session.navigate(SessionStep::Results), Err(SessionError::NoResult));
        assert!(matches!(
            session.navigate(SessionStep::Calculating),
            Err(SessionError::IllegalTransition { .. })
        ));
        session.navigate(SessionStep::Parameters).unwrap();
        session.navigate(SessionStep::Overview).unwrap();
        assert_eq!(session.step(), SessionStep::Overview);
    }

    #[tokio::test]
    async fn save_failure_leaves_state_alone() {
        let mut session = ready();
        let executor = QueueExecutor::with(vec![ok(1.0)]);
        session.set_value("voltage", 120.0).unwrap();

        let metadata = ResultMetadata {
            template_id: "vd".into(),
            template_name: "Voltage drop".into(),
            template_version: "1.0.0".into(),
            inputs: ParameterValueMap::new(),
            notes: None,
        };
        assert_eq!(
            session.save_result(&executor, &metadata).await,
            Err(SessionError::NoResult)
        );

        session.submit(&executor).await.unwrap();
        let metadata = session.result_metadata().unwrap();
        assert_eq!(metadata.inputs.get("voltage"), Some(&ParameterValue::Number(120.0)));
        assert!(matches!(
            session.save_result(&executor, &metadata).await,
            Err(SessionError::Persistence(_))
        ));
        assert_eq!(session.step(), SessionStep::Results);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn validation_is_recomputed_after_edits() {
        let mut session = ready();
        assert!(!session.validation().is_valid());
        session.set_value("voltage", 150.0).unwrap();
        assert!(session.validation().is_valid());
        session.clear_value("voltage").unwrap();
        assert!(!session.validation().is_valid());
    }
}
