//! Integration tests for the wizard navigation and progress engine.
//!
//! These tests drive the orchestrator end-to-end through the reference
//! adapters: a three-step wizard (A required, B optional and skippable,
//! C required with a dependency on A) is initialized, processed, skipped,
//! and completed, with every state transition observed through the
//! in-memory store and event sink.

use std::sync::Arc;

use serde_json::json;

use waypoint::adapters::events::InMemoryNotifier;
use waypoint::adapters::repository::InMemoryInstanceRepository;
use waypoint::adapters::storage::{FileProgressStore, InMemoryProgressStore};
use waypoint::adapters::validation::{FieldKind, FieldRuleValidator, FieldSpec};
use waypoint::application::{EngineConfig, WizardOrchestrator};
use waypoint::domain::foundation::{
    InstanceId, InstanceStatus, StepId, StepStatus, WizardError, WizardId,
};
use waypoint::domain::step::{StepDefinition, WizardDefinition};
use waypoint::ports::{InstanceRepository, ProgressStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn sid(s: &str) -> StepId {
    StepId::new(s).unwrap()
}

/// A (required), B (optional + skippable), C (required, depends on A).
fn definition() -> WizardDefinition {
    WizardDefinition::new(
        WizardId::new("onboarding").unwrap(),
        vec![
            StepDefinition::builder(sid("a"), "Account", 1).build(),
            StepDefinition::builder(sid("b"), "Preferences", 2)
                .optional()
                .skippable()
                .build(),
            StepDefinition::builder(sid("c"), "Confirmation", 3)
                .depends_on(sid("a"))
                .build(),
        ],
    )
    .unwrap()
}

fn validator() -> FieldRuleValidator {
    FieldRuleValidator::new()
        .rule(
            sid("a"),
            vec![FieldSpec::new("email").required().kind(FieldKind::String)],
        )
        .rule(
            sid("c"),
            vec![FieldSpec::new("accepted").required().kind(FieldKind::Boolean)],
        )
}

struct Harness {
    orchestrator: WizardOrchestrator,
    notifier: Arc<InMemoryNotifier>,
    instance_id: InstanceId,
}

fn harness() -> Harness {
    init_tracing();
    let notifier = Arc::new(InMemoryNotifier::new());
    let orchestrator = WizardOrchestrator::new(
        definition(),
        Arc::new(InMemoryProgressStore::new()),
        Arc::new(validator()),
        notifier.clone(),
        EngineConfig::default(),
    );
    Harness {
        orchestrator,
        notifier,
        instance_id: InstanceId::new(),
    }
}

// =============================================================================
// Scenario: straight-through run with a skip
// =============================================================================

#[tokio::test]
async fn full_run_with_skipped_optional_step() {
    let h = harness();

    // Initialize positions the cursor on A
    let instance = h.orchestrator.initialize(h.instance_id, None).await.unwrap();
    assert_eq!(instance.current_step_id(), Some(&sid("a")));

    // Processing A completes it and advances to B
    let result = h
        .orchestrator
        .process_step(h.instance_id, sid("a"), json!({"email": "ada@example.com"}))
        .await
        .unwrap();
    assert!(result.success);

    let instance = h.orchestrator.instance(h.instance_id).await.unwrap();
    assert_eq!(instance.completed_steps(), [sid("a")]);
    assert_eq!(instance.current_step_id(), Some(&sid("b")));

    // C is reachable before B resolves: B is optional, A's dependency holds
    let items = h.orchestrator.navigation_items(h.instance_id).await.unwrap();
    assert!(items[2].is_accessible);
    // ...but the sequence still lands on B first, since it is adjacent
    // and not yet skip-eligible
    assert_eq!(items[1].status, StepStatus::InProgress);

    // Completing now fails: C remains
    let premature = h.orchestrator.complete(h.instance_id).await.unwrap();
    assert!(!premature.success);

    // Skip B, process C
    h.orchestrator.skip_step(h.instance_id, sid("b")).await.unwrap();
    let instance = h.orchestrator.instance(h.instance_id).await.unwrap();
    assert_eq!(instance.completed_steps(), [sid("a"), sid("b")]);
    assert_eq!(instance.current_step_id(), Some(&sid("c")));

    h.orchestrator
        .process_step(h.instance_id, sid("c"), json!({"accepted": true}))
        .await
        .unwrap();

    // Completion succeeds and returns the collected payloads for A and C
    let done = h.orchestrator.complete(h.instance_id).await.unwrap();
    assert!(done.success);
    let data = done.data.unwrap();
    assert_eq!(data["a"]["email"], json!("ada@example.com"));
    assert_eq!(data["c"]["accepted"], json!(true));
    assert!(data.get("b").is_none());

    let instance = h.orchestrator.instance(h.instance_id).await.unwrap();
    assert_eq!(instance.status(), InstanceStatus::Completed);

    assert_eq!(
        h.notifier.event_types().await,
        [
            "wizard.started.v1",
            "step.completed.v1",
            "step.skipped.v1",
            "step.completed.v1",
            "wizard.completed.v1",
        ]
    );
}

// =============================================================================
// Scenario: failures leave no partial state
// =============================================================================

#[tokio::test]
async fn invalid_payload_leaves_state_untouched() {
    let h = harness();
    h.orchestrator.initialize(h.instance_id, None).await.unwrap();

    let result = h
        .orchestrator
        .process_step(h.instance_id, sid("a"), json!({"email": null}))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.errors.messages_for("email").unwrap(), ["is required"]);

    let instance = h.orchestrator.instance(h.instance_id).await.unwrap();
    assert_eq!(instance.completed_count(), 0);
    assert_eq!(instance.current_step_id(), Some(&sid("a")));
    assert!(instance.step_data().is_empty());
}

#[tokio::test]
async fn navigating_to_step_with_unmet_dependency_fails() {
    let h = harness();
    h.orchestrator.initialize(h.instance_id, None).await.unwrap();

    let result = h.orchestrator.navigate_to_step(h.instance_id, sid("c")).await;
    assert!(matches!(result, Err(WizardError::InvalidStep { .. })));

    let instance = h.orchestrator.instance(h.instance_id).await.unwrap();
    assert_eq!(instance.current_step_id(), Some(&sid("a")));
}

#[tokio::test]
async fn skipping_a_required_step_fails() {
    let h = harness();
    h.orchestrator.initialize(h.instance_id, None).await.unwrap();

    let result = h.orchestrator.skip_step(h.instance_id, sid("a")).await;
    assert!(matches!(result, Err(WizardError::InvalidStep { .. })));
}

// =============================================================================
// Scenario: editing after the fact
// =============================================================================

#[tokio::test]
async fn back_navigation_and_re_edit_keep_progress() {
    let h = harness();
    h.orchestrator.initialize(h.instance_id, None).await.unwrap();
    h.orchestrator
        .process_step(h.instance_id, sid("a"), json!({"email": "ada@example.com"}))
        .await
        .unwrap();
    h.orchestrator.skip_step(h.instance_id, sid("b")).await.unwrap();

    // Go back to A and supply corrected data
    h.orchestrator
        .navigate_to_step(h.instance_id, sid("a"))
        .await
        .unwrap();
    h.orchestrator
        .process_step(h.instance_id, sid("a"), json!({"email": "lovelace@example.com"}))
        .await
        .unwrap();

    let instance = h.orchestrator.instance(h.instance_id).await.unwrap();
    // Completion order is unchanged, data is replaced
    assert_eq!(instance.completed_steps(), [sid("a"), sid("b")]);
    assert_eq!(
        instance.data_for(&sid("a")).unwrap()["email"],
        json!("lovelace@example.com")
    );

    let snapshot = h.orchestrator.progress(h.instance_id).await.unwrap();
    assert_eq!(snapshot.completed_count, 2);
    assert_eq!(snapshot.percent_complete.value(), 67);
}

#[tokio::test]
async fn progress_percentages_track_each_completion() {
    let h = harness();
    h.orchestrator.initialize(h.instance_id, None).await.unwrap();

    let snapshot = h.orchestrator.progress(h.instance_id).await.unwrap();
    assert_eq!(snapshot.percent_complete.value(), 0);
    assert_eq!(snapshot.current_step_position, 1);

    h.orchestrator
        .process_step(h.instance_id, sid("a"), json!({"email": "a@b.c"}))
        .await
        .unwrap();
    let snapshot = h.orchestrator.progress(h.instance_id).await.unwrap();
    assert_eq!(snapshot.percent_complete.value(), 33);

    h.orchestrator.skip_step(h.instance_id, sid("b")).await.unwrap();
    h.orchestrator
        .process_step(h.instance_id, sid("c"), json!({"accepted": true}))
        .await
        .unwrap();

    let snapshot = h.orchestrator.progress(h.instance_id).await.unwrap();
    assert_eq!(snapshot.percent_complete.value(), 100);
    assert!(snapshot.is_complete);
    assert!(snapshot.remaining_step_ids.is_empty());
}

#[tokio::test]
async fn reset_starts_over_from_scratch() {
    let h = harness();
    h.orchestrator.initialize(h.instance_id, None).await.unwrap();
    h.orchestrator
        .process_step(h.instance_id, sid("a"), json!({"email": "a@b.c"}))
        .await
        .unwrap();

    let fresh = h.orchestrator.reset(h.instance_id).await.unwrap();
    assert_eq!(fresh.completed_count(), 0);
    assert_eq!(fresh.current_step_id(), Some(&sid("a")));

    let snapshot = h.orchestrator.progress(h.instance_id).await.unwrap();
    assert_eq!(snapshot.percent_complete.value(), 0);
}

// =============================================================================
// Scenario: durable backend round trip
// =============================================================================

#[tokio::test]
async fn out_of_session_edit_flow_round_trips_through_backend() {
    init_tracing();
    let repository = Arc::new(InMemoryInstanceRepository::new());
    let store = Arc::new(InMemoryProgressStore::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let orchestrator = WizardOrchestrator::new(
        definition(),
        store.clone(),
        Arc::new(validator()),
        notifier,
        EngineConfig::default(),
    )
    .with_repository(repository.clone());

    // First session: start, complete A, persist durably
    let instance_id = InstanceId::new();
    orchestrator.initialize(instance_id, None).await.unwrap();
    orchestrator
        .process_step(instance_id, sid("a"), json!({"email": "a@b.c"}))
        .await
        .unwrap();
    let record = orchestrator
        .instance(instance_id)
        .await
        .unwrap()
        .to_record();
    repository.save(&record).await.unwrap();

    // Session state evaporates
    store.clear().await;
    assert!(matches!(
        orchestrator.instance(instance_id).await,
        Err(WizardError::NotInitialized { .. })
    ));

    // Out-of-session edit: rehydrate from the durable backend
    let loaded = orchestrator.load_from_storage(instance_id).await.unwrap();
    assert!(loaded.is_completed(&sid("a")));
    assert_eq!(loaded.current_step_id(), Some(&sid("b")));

    // Delete removes both durable and working state
    orchestrator.delete_wizard(instance_id).await.unwrap();
    assert_eq!(repository.record_count().await, 0);
    assert!(matches!(
        orchestrator.instance(instance_id).await,
        Err(WizardError::NotInitialized { .. })
    ));
}

// =============================================================================
// Scenario: file-backed store
// =============================================================================

#[tokio::test]
async fn wizard_runs_against_file_backed_store() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(FileProgressStore::new(dir.path()));
    let notifier = Arc::new(InMemoryNotifier::new());
    let orchestrator = WizardOrchestrator::new(
        definition(),
        store.clone(),
        Arc::new(validator()),
        notifier,
        EngineConfig::default(),
    );

    let instance_id = InstanceId::new();
    orchestrator.initialize(instance_id, None).await.unwrap();
    orchestrator
        .process_step(instance_id, sid("a"), json!({"email": "a@b.c"}))
        .await
        .unwrap();

    // The record survives on disk, readable through the port
    let key = format!("wizard:onboarding:{}", instance_id);
    let record = store.get(&key).await.unwrap().unwrap();
    assert_eq!(record.completed_steps, [sid("a")]);
    assert_eq!(record.current_step_id, Some(sid("b")));

    orchestrator.skip_step(instance_id, sid("b")).await.unwrap();
    orchestrator
        .process_step(instance_id, sid("c"), json!({"accepted": true}))
        .await
        .unwrap();

    let done = orchestrator.complete(instance_id).await.unwrap();
    assert!(done.success);
}
