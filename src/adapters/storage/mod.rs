//! Storage adapters implementing the ProgressStore port.

mod file_store;
mod in_memory_store;

pub use file_store::FileProgressStore;
pub use in_memory_store::InMemoryProgressStore;

use serde_json::{Map, Value};

use crate::ports::StoreError;

/// Applies a dot-separated path update to a JSON document in place.
///
/// Missing intermediate objects are created, so `step_data.profile` works
/// before any data exists for that step. The final segment is always an
/// insert-or-replace on an object.
pub(crate) fn apply_dot_path(
    root: &mut Value,
    dot_path: &str,
    value: Value,
) -> Result<(), StoreError> {
    let segments: Vec<&str> = dot_path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath {
            path: dot_path.to_string(),
            reason: "empty segment".to_string(),
        });
    }

    let mut target = root;
    for segment in &segments[..segments.len() - 1] {
        let object = target.as_object_mut().ok_or_else(|| StoreError::InvalidPath {
            path: dot_path.to_string(),
            reason: format!("'{}' is not an object", segment),
        })?;
        target = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    let object = target.as_object_mut().ok_or_else(|| StoreError::InvalidPath {
        path: dot_path.to_string(),
        reason: "target is not an object".to_string(),
    })?;
    object.insert(segments[segments.len() - 1].to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replaces_top_level_field() {
        let mut doc = json!({"current_step_id": "a", "status": "in_progress"});
        apply_dot_path(&mut doc, "current_step_id", json!("b")).unwrap();
        assert_eq!(doc["current_step_id"], json!("b"));
        assert_eq!(doc["status"], json!("in_progress"));
    }

    #[test]
    fn sets_nested_field_creating_intermediates() {
        let mut doc = json!({"step_data": {}});
        apply_dot_path(&mut doc, "step_data.profile", json!({"name": "Ada"})).unwrap();
        apply_dot_path(&mut doc, "metadata.source", json!("mobile")).unwrap();

        assert_eq!(doc["step_data"]["profile"]["name"], json!("Ada"));
        assert_eq!(doc["metadata"]["source"], json!("mobile"));
    }

    #[test]
    fn rejects_empty_segments() {
        let mut doc = json!({});
        let err = apply_dot_path(&mut doc, "step_data..x", json!(1)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath { .. }));
    }

    #[test]
    fn rejects_traversal_through_non_object() {
        let mut doc = json!({"completed_steps": ["a"]});
        let err = apply_dot_path(&mut doc, "completed_steps.first", json!("b")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath { .. }));
    }
}
