//! WizardInstance aggregate - one user's run through a step sequence.
//!
//! The aggregate owns the mutable per-instance state: cursor, completed
//! set, collected data, and lifecycle status. Completion order is
//! preserved (insertion order) while membership checks stay O(1).

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::domain::foundation::{
    InstanceId, InstanceStatus, OwnerId, StepId, Timestamp, WizardId,
};
use crate::domain::step::StepDataMap;

use super::InstanceRecord;

/// Mutable state of one wizard instance.
#[derive(Debug, Clone)]
pub struct WizardInstance {
    wizard_id: WizardId,
    instance_id: InstanceId,
    owner_id: Option<OwnerId>,
    current_step_id: Option<StepId>,
    completed_order: Vec<StepId>,
    completed_set: HashSet<StepId>,
    step_data: StepDataMap,
    metadata: HashMap<String, Value>,
    status: InstanceStatus,
    started_at: Timestamp,
    completed_at: Option<Timestamp>,
    last_activity_at: Option<Timestamp>,
}

impl WizardInstance {
    /// Creates a fresh instance positioned at the given first step.
    pub fn new(
        wizard_id: WizardId,
        instance_id: InstanceId,
        owner_id: Option<OwnerId>,
        first_step: Option<StepId>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            wizard_id,
            instance_id,
            owner_id,
            current_step_id: first_step,
            completed_order: Vec::new(),
            completed_set: HashSet::new(),
            step_data: StepDataMap::new(),
            metadata: HashMap::new(),
            status: InstanceStatus::InProgress,
            started_at: now,
            completed_at: None,
            last_activity_at: Some(now),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the wizard id.
    pub fn wizard_id(&self) -> &WizardId {
        &self.wizard_id
    }

    /// Returns the instance id.
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// Returns the owner, if attributed.
    pub fn owner_id(&self) -> Option<&OwnerId> {
        self.owner_id.as_ref()
    }

    /// Returns the cursor position.
    pub fn current_step_id(&self) -> Option<&StepId> {
        self.current_step_id.as_ref()
    }

    /// Returns the completed steps in completion order.
    pub fn completed_steps(&self) -> &[StepId] {
        &self.completed_order
    }

    /// Returns the number of completed steps.
    pub fn completed_count(&self) -> usize {
        self.completed_order.len()
    }

    /// O(1) membership test against the completed set.
    pub fn is_completed(&self, step_id: &StepId) -> bool {
        self.completed_set.contains(step_id)
    }

    /// Returns all collected validated data, keyed by step id.
    pub fn step_data(&self) -> &StepDataMap {
        &self.step_data
    }

    /// Returns the validated payload for one step, if present.
    pub fn data_for(&self, step_id: &StepId) -> Option<&Value> {
        self.step_data.get(step_id)
    }

    /// Returns the opaque metadata map.
    pub fn metadata(&self) -> &HashMap<String, Value> {
        &self.metadata
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> InstanceStatus {
        self.status
    }

    /// Returns when the instance was created.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Returns when the instance completed, if it has.
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Returns the last mutation time.
    pub fn last_activity_at(&self) -> Option<Timestamp> {
        self.last_activity_at
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Moves the cursor. The target's existence is the caller's contract.
    pub fn set_current_step(&mut self, step_id: Option<StepId>) {
        self.current_step_id = step_id;
        self.touch();
    }

    /// Appends a step to the completed set, idempotently.
    ///
    /// Returns true when the step was newly completed.
    pub fn mark_completed(&mut self, step_id: StepId) -> bool {
        if self.completed_set.contains(&step_id) {
            return false;
        }
        self.completed_set.insert(step_id.clone());
        self.completed_order.push(step_id);
        self.touch();
        true
    }

    /// Stores the validated payload for a step.
    pub fn put_step_data(&mut self, step_id: StepId, data: Value) {
        self.step_data.insert(step_id, data);
        self.touch();
    }

    /// Sets one metadata entry.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
        self.touch();
    }

    /// Transitions to Completed and stamps the completion time.
    pub fn finish(&mut self) {
        let now = Timestamp::now();
        self.status = InstanceStatus::Completed;
        self.completed_at = Some(now);
        self.last_activity_at = Some(now);
    }

    /// Soft-marks the instance abandoned.
    pub fn abandon(&mut self) {
        self.status = InstanceStatus::Abandoned;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_activity_at = Some(Timestamp::now());
    }

    // ───────────────────────────────────────────────────────────────
    // Record conversion
    // ───────────────────────────────────────────────────────────────

    /// Converts to the persisted record layout.
    pub fn to_record(&self) -> InstanceRecord {
        InstanceRecord {
            wizard_id: self.wizard_id.clone(),
            instance_id: self.instance_id,
            owner_id: self.owner_id.clone(),
            current_step_id: self.current_step_id.clone(),
            completed_steps: self.completed_order.clone(),
            step_data: self.step_data.clone(),
            metadata: self.metadata.clone(),
            status: self.status,
            started_at: self.started_at,
            completed_at: self.completed_at,
            last_activity_at: self.last_activity_at,
        }
    }

    /// Reconstitutes an instance from a persisted record.
    ///
    /// Rebuilds the O(1) membership index from the ordered list; used by
    /// the orchestrator when loading from a store, bypassing lifecycle
    /// side effects.
    pub fn from_record(record: InstanceRecord) -> Self {
        let completed_set = record.completed_steps.iter().cloned().collect();
        Self {
            wizard_id: record.wizard_id,
            instance_id: record.instance_id,
            owner_id: record.owner_id,
            current_step_id: record.current_step_id,
            completed_set,
            completed_order: record.completed_steps,
            step_data: record.step_data,
            metadata: record.metadata,
            status: record.status,
            started_at: record.started_at,
            completed_at: record.completed_at,
            last_activity_at: record.last_activity_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sid(s: &str) -> StepId {
        StepId::new(s).unwrap()
    }

    fn instance() -> WizardInstance {
        WizardInstance::new(
            WizardId::new("onboarding").unwrap(),
            InstanceId::new(),
            None,
            Some(sid("account")),
        )
    }

    #[test]
    fn new_instance_starts_in_progress_at_first_step() {
        let instance = instance();

        assert_eq!(instance.status(), InstanceStatus::InProgress);
        assert_eq!(instance.current_step_id(), Some(&sid("account")));
        assert_eq!(instance.completed_count(), 0);
        assert!(instance.step_data().is_empty());
        assert!(instance.completed_at().is_none());
        assert!(instance.last_activity_at().is_some());
    }

    #[test]
    fn mark_completed_preserves_order_and_membership() {
        let mut instance = instance();

        assert!(instance.mark_completed(sid("account")));
        assert!(instance.mark_completed(sid("profile")));

        assert_eq!(instance.completed_steps(), [sid("account"), sid("profile")]);
        assert!(instance.is_completed(&sid("account")));
        assert!(instance.is_completed(&sid("profile")));
        assert!(!instance.is_completed(&sid("billing")));
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut instance = instance();

        assert!(instance.mark_completed(sid("account")));
        assert!(!instance.mark_completed(sid("account")));

        assert_eq!(instance.completed_count(), 1);
        assert_eq!(instance.completed_steps(), [sid("account")]);
    }

    #[test]
    fn put_step_data_replaces_on_edit() {
        let mut instance = instance();

        instance.put_step_data(sid("account"), json!({"email": "old@x.y"}));
        instance.put_step_data(sid("account"), json!({"email": "new@x.y"}));

        assert_eq!(
            instance.data_for(&sid("account")).unwrap()["email"],
            json!("new@x.y")
        );
        assert_eq!(instance.step_data().len(), 1);
    }

    #[test]
    fn finish_stamps_completion() {
        let mut instance = instance();
        instance.finish();

        assert_eq!(instance.status(), InstanceStatus::Completed);
        assert!(instance.completed_at().is_some());
    }

    #[test]
    fn abandon_is_terminal_without_completion_stamp() {
        let mut instance = instance();
        instance.abandon();

        assert_eq!(instance.status(), InstanceStatus::Abandoned);
        assert!(instance.completed_at().is_none());
    }

    #[test]
    fn record_round_trip_preserves_state() {
        let mut instance = instance();
        instance.mark_completed(sid("account"));
        instance.put_step_data(sid("account"), json!({"email": "a@b.c"}));
        instance.set_current_step(Some(sid("profile")));
        instance.set_metadata("source", json!("mobile"));

        let record = instance.to_record();
        let back = WizardInstance::from_record(record);

        assert_eq!(back.wizard_id(), instance.wizard_id());
        assert_eq!(back.instance_id(), instance.instance_id());
        assert_eq!(back.current_step_id(), Some(&sid("profile")));
        assert_eq!(back.completed_steps(), instance.completed_steps());
        assert!(back.is_completed(&sid("account")));
        assert_eq!(back.data_for(&sid("account")), instance.data_for(&sid("account")));
        assert_eq!(back.metadata().get("source"), Some(&json!("mobile")));
    }

    #[test]
    fn from_record_rebuilds_membership_index() {
        let mut original = instance();
        original.mark_completed(sid("a"));
        original.mark_completed(sid("b"));

        let rebuilt = WizardInstance::from_record(original.to_record());
        assert!(rebuilt.is_completed(&sid("a")));
        assert!(rebuilt.is_completed(&sid("b")));
        assert!(!rebuilt.is_completed(&sid("c")));
    }
}
