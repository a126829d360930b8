//! WizardOrchestrator - the step processing state machine.
//!
//! Drives initialize → process-step → (skip | complete) → finish for one
//! wizard definition, owning the read-modify-write cycle against the
//! progress store and emitting lifecycle notifications.
//!
//! The orchestrator assumes a single writer per instance: one logical
//! session drives one instance at a time, and serializing concurrent
//! writers for the same instance id is the caller's contract. Distinct
//! instances are independent.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::{
    InstanceId, InstanceStatus, OwnerId, StepId, Timestamp, ValidationErrors, WizardError,
};
use crate::domain::instance::{WizardEvent, WizardInstance};
use crate::domain::navigation::{NavigationConfig, NavigationEngine, NavigationItem};
use crate::domain::progress::{ProgressCalculator, ProgressSnapshot};
use crate::domain::step::{NoopStepHandler, StepContext, StepHandler, WizardDefinition};
use crate::ports::{instance_key, InstanceRepository, Notifier, ProgressStore, StepValidator};

/// Engine behavior toggles, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub navigation: NavigationConfig,
    /// When false, no lifecycle notifications are emitted at all.
    pub emit_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            emit_events: true,
        }
    }
}

/// Outcome of a step submission or a completion attempt.
///
/// Validation failures are recoverable and reported here rather than as
/// errors; the caller retries with corrected input.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub success: bool,
    pub data: Option<Value>,
    pub errors: ValidationErrors,
    pub message: Option<String>,
}

impl StepResult {
    /// Builds a success result carrying the persisted payload.
    pub fn success(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    /// Builds a failure result carrying the structured error set.
    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            message: None,
        }
    }

    /// Attaches a human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// The state machine driving one wizard definition.
pub struct WizardOrchestrator {
    definition: WizardDefinition,
    store: Arc<dyn ProgressStore>,
    validator: Arc<dyn StepValidator>,
    notifier: Arc<dyn Notifier>,
    repository: Option<Arc<dyn InstanceRepository>>,
    handlers: HashMap<StepId, Arc<dyn StepHandler>>,
    default_handler: Arc<dyn StepHandler>,
    config: EngineConfig,
}

impl WizardOrchestrator {
    /// Creates an orchestrator over a definition and its collaborators.
    pub fn new(
        definition: WizardDefinition,
        store: Arc<dyn ProgressStore>,
        validator: Arc<dyn StepValidator>,
        notifier: Arc<dyn Notifier>,
        config: EngineConfig,
    ) -> Self {
        Self {
            definition,
            store,
            validator,
            notifier,
            repository: None,
            handlers: HashMap::new(),
            default_handler: Arc::new(NoopStepHandler),
            config,
        }
    }

    /// Attaches an optional durable backend for out-of-session flows.
    pub fn with_repository(mut self, repository: Arc<dyn InstanceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Registers processing hooks for one step.
    pub fn with_handler(mut self, step_id: StepId, handler: Arc<dyn StepHandler>) -> Self {
        self.handlers.insert(step_id, handler);
        self
    }

    /// Returns the configured definition.
    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Creates the instance record if none exists, positioned at the
    /// first step (or no step for a zero-step wizard), and emits the
    /// started event exactly once. Re-initializing an existing instance
    /// reloads it without side effects.
    pub async fn initialize(
        &self,
        instance_id: InstanceId,
        owner_id: Option<OwnerId>,
    ) -> Result<WizardInstance, WizardError> {
        let key = self.key(instance_id);

        if let Some(record) = self.store.get(&key).await? {
            tracing::debug!(wizard_id = %self.definition.id(), %instance_id, "reloading existing instance");
            return Ok(WizardInstance::from_record(record));
        }

        let first_step = self.definition.first_step().map(|s| s.id().clone());
        let instance = WizardInstance::new(
            self.definition.id().clone(),
            instance_id,
            owner_id,
            first_step,
        );
        self.store.put(&key, &instance.to_record()).await?;

        tracing::info!(wizard_id = %self.definition.id(), %instance_id, "wizard started");
        self.emit(WizardEvent::Started {
            wizard_id: self.definition.id().clone(),
            instance_id,
            started_at: instance.started_at(),
        })
        .await;

        Ok(instance)
    }

    /// Validates, processes, and persists one step submission, then
    /// advances the cursor to the next non-skipped step.
    pub async fn process_step(
        &self,
        instance_id: InstanceId,
        step_id: StepId,
        raw_data: Value,
    ) -> Result<StepResult, WizardError> {
        let key = self.key(instance_id);
        let mut instance = self.load(instance_id).await?;

        let step = self
            .definition
            .step(&step_id)
            .ok_or_else(|| {
                WizardError::invalid_step(self.definition.id(), &step_id, "unknown step id")
            })?;

        if !self.nav().can_reach(&instance, &step_id) {
            return Err(WizardError::invalid_step(
                self.definition.id(),
                &step_id,
                "step is not reachable",
            ));
        }

        // External validation; a failure mutates nothing.
        let validated = match self.validator.validate(&step_id, &raw_data).await {
            Ok(value) => value,
            Err(errors) => {
                tracing::debug!(wizard_id = %self.definition.id(), %instance_id, %step_id, "validation failed");
                return Ok(StepResult::failure(errors));
            }
        };

        let ctx = StepContext {
            wizard_id: self.definition.id().clone(),
            instance_id,
            step_id: step_id.clone(),
        };
        let handler = self.handler_for(&step_id);

        let data = match self.run_hooks(handler.as_ref(), &ctx, validated).await {
            Ok(data) => data,
            Err(WizardError::Validation(errors)) => return Ok(StepResult::failure(errors)),
            Err(other) => return Err(other),
        };

        instance.put_step_data(step_id.clone(), data.clone());
        let newly_completed = instance.mark_completed(step_id.clone());

        if let Some(next) = self.nav().next_step(&instance, Some(&step_id)) {
            instance.set_current_step(Some(next.id().clone()));
        }

        self.store.put(&key, &instance.to_record()).await?;

        if newly_completed {
            let snapshot = ProgressCalculator::for_instance(&self.definition, &instance);
            self.emit(WizardEvent::StepCompleted {
                wizard_id: self.definition.id().clone(),
                instance_id,
                step_id: step.id().clone(),
                percent_complete: snapshot.percent_complete,
                completed_at: Timestamp::now(),
            })
            .await;
        }

        Ok(StepResult::success(Some(data)))
    }

    /// Completes a skippable step without running its processing
    /// function, then advances the cursor.
    pub async fn skip_step(
        &self,
        instance_id: InstanceId,
        step_id: StepId,
    ) -> Result<StepResult, WizardError> {
        let key = self.key(instance_id);
        let mut instance = self.load(instance_id).await?;

        let step = self
            .definition
            .step(&step_id)
            .ok_or_else(|| {
                WizardError::invalid_step(self.definition.id(), &step_id, "unknown step id")
            })?;

        if !step.can_skip() {
            return Err(WizardError::invalid_step(
                self.definition.id(),
                &step_id,
                "step cannot be skipped",
            ));
        }

        let newly_completed = instance.mark_completed(step_id.clone());

        if let Some(next) = self.nav().next_step(&instance, Some(&step_id)) {
            instance.set_current_step(Some(next.id().clone()));
        }

        self.store.put(&key, &instance.to_record()).await?;

        if newly_completed {
            self.emit(WizardEvent::StepSkipped {
                wizard_id: self.definition.id().clone(),
                instance_id,
                step_id: step_id.clone(),
                skipped_at: Timestamp::now(),
            })
            .await;
        }

        Ok(StepResult::success(None))
    }

    /// Moves the cursor to a reachable step without touching data.
    pub async fn navigate_to_step(
        &self,
        instance_id: InstanceId,
        step_id: StepId,
    ) -> Result<WizardInstance, WizardError> {
        let key = self.key(instance_id);
        let mut instance = self.load(instance_id).await?;

        if !self.nav().can_reach(&instance, &step_id) {
            return Err(WizardError::invalid_step(
                self.definition.id(),
                &step_id,
                "step is not reachable",
            ));
        }

        instance.set_current_step(Some(step_id.clone()));

        // Cursor-only move: surgical field updates, not a full rewrite.
        self.store
            .update(&key, "current_step_id", serde_json::to_value(&step_id).unwrap_or(Value::Null))
            .await?;
        self.store
            .update(
                &key,
                "last_activity_at",
                serde_json::to_value(instance.last_activity_at()).unwrap_or(Value::Null),
            )
            .await?;

        Ok(instance)
    }

    /// Finishes the wizard once every non-skippable step is covered.
    ///
    /// Returns a failure result (no state change) while steps remain;
    /// on success the result data carries the full collected step data.
    pub async fn complete(&self, instance_id: InstanceId) -> Result<StepResult, WizardError> {
        let key = self.key(instance_id);
        let mut instance = self.load(instance_id).await?;

        // Repeat completion is idempotent: return the data, emit nothing.
        if instance.status() == InstanceStatus::Completed {
            return Ok(StepResult::success(Some(Self::collected_data(&instance)?)));
        }

        let snapshot = ProgressCalculator::for_instance(&self.definition, &instance);
        if !snapshot.is_complete {
            let remaining: Vec<&str> = snapshot
                .remaining_step_ids
                .iter()
                .map(|id| id.as_str())
                .collect();
            return Ok(StepResult::failure(ValidationErrors::new()).with_message(format!(
                "wizard is not complete; remaining steps: {}",
                remaining.join(", ")
            )));
        }

        instance.finish();
        self.store.put(&key, &instance.to_record()).await?;

        tracing::info!(wizard_id = %self.definition.id(), %instance_id, "wizard completed");
        self.emit(WizardEvent::Completed {
            wizard_id: self.definition.id().clone(),
            instance_id,
            completed_at: instance.completed_at().unwrap_or_else(Timestamp::now),
        })
        .await;

        Ok(StepResult::success(Some(Self::collected_data(&instance)?)))
    }

    /// Discards the stored instance and re-runs initialize from scratch.
    pub async fn reset(&self, instance_id: InstanceId) -> Result<WizardInstance, WizardError> {
        let key = self.key(instance_id);

        let owner_id = match self.store.get(&key).await? {
            Some(record) => record.owner_id,
            None => None,
        };
        self.store.forget(&key).await?;

        self.initialize(instance_id, owner_id).await
    }

    /// Rehydrates an instance from the durable backend into the working
    /// store, for out-of-session editing flows.
    pub async fn load_from_storage(
        &self,
        instance_id: InstanceId,
    ) -> Result<WizardInstance, WizardError> {
        let repository = self.repository_or_err()?;

        let record = repository
            .find(self.definition.id(), instance_id)
            .await?
            .ok_or_else(|| WizardError::NotFound {
                wizard_id: self.definition.id().clone(),
                instance_id,
            })?;

        self.store.put(&self.key(instance_id), &record).await?;
        Ok(WizardInstance::from_record(record))
    }

    /// Removes durable and working state for one instance.
    pub async fn delete_wizard(&self, instance_id: InstanceId) -> Result<(), WizardError> {
        if let Some(repository) = &self.repository {
            let deleted = repository.delete(self.definition.id(), instance_id).await?;
            if !deleted {
                return Err(WizardError::NotFound {
                    wizard_id: self.definition.id().clone(),
                    instance_id,
                });
            }
        }

        self.store.forget(&self.key(instance_id)).await?;
        tracing::info!(wizard_id = %self.definition.id(), %instance_id, "wizard deleted");
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Read paths
    // ───────────────────────────────────────────────────────────────

    /// Loads the current instance state.
    pub async fn instance(&self, instance_id: InstanceId) -> Result<WizardInstance, WizardError> {
        self.load(instance_id).await
    }

    /// Recomputes the progress snapshot for an instance.
    pub async fn progress(&self, instance_id: InstanceId) -> Result<ProgressSnapshot, WizardError> {
        let instance = self.load(instance_id).await?;
        Ok(ProgressCalculator::for_instance(&self.definition, &instance))
    }

    /// Builds the navigation item list for an instance.
    pub async fn navigation_items(
        &self,
        instance_id: InstanceId,
    ) -> Result<Vec<NavigationItem>, WizardError> {
        let instance = self.load(instance_id).await?;
        Ok(self.nav().items(&instance))
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn key(&self, instance_id: InstanceId) -> String {
        instance_key(self.definition.id(), instance_id)
    }

    fn collected_data(instance: &WizardInstance) -> Result<Value, WizardError> {
        serde_json::to_value(instance.step_data())
            .map_err(|e| crate::ports::StoreError::SerializationFailed(e.to_string()).into())
    }

    fn nav(&self) -> NavigationEngine<'_> {
        NavigationEngine::new(self.definition.steps(), &self.config.navigation)
    }

    fn handler_for(&self, step_id: &StepId) -> Arc<dyn StepHandler> {
        self.handlers
            .get(step_id)
            .cloned()
            .unwrap_or_else(|| self.default_handler.clone())
    }

    fn repository_or_err(&self) -> Result<&Arc<dyn InstanceRepository>, WizardError> {
        self.repository.as_ref().ok_or_else(|| {
            WizardError::Storage(crate::ports::StoreError::Backend(
                "no durable backend configured".to_string(),
            ))
        })
    }

    async fn load(&self, instance_id: InstanceId) -> Result<WizardInstance, WizardError> {
        match self.store.get(&self.key(instance_id)).await? {
            Some(record) => Ok(WizardInstance::from_record(record)),
            None => Err(WizardError::NotInitialized {
                wizard_id: self.definition.id().clone(),
                instance_id,
            }),
        }
    }

    async fn run_hooks(
        &self,
        handler: &dyn StepHandler,
        ctx: &StepContext,
        validated: Value,
    ) -> Result<Value, WizardError> {
        handler.before(ctx).await?;
        let data = handler.process(ctx, validated).await?;
        handler.after(ctx, &data).await?;
        Ok(data)
    }

    async fn emit(&self, event: WizardEvent) {
        if !self.config.emit_events {
            return;
        }
        tracing::debug!(event_type = event.event_type(), "emitting lifecycle event");
        self.notifier.notify(event).await;
    }
}
