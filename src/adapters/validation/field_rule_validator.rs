//! Field Rule Validator - declarative StepValidator implementation.
//!
//! Validates step payloads against per-step field specifications
//! (presence, type, minimum length) declared at configuration time.
//! Steps without registered rules pass through unchanged.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::foundation::{StepId, ValidationErrors};
use crate::ports::StepValidator;

/// Expected JSON type of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }
}

/// Declarative rules for one payload field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    required: bool,
    kind: Option<FieldKind>,
    min_length: Option<usize>,
}

impl FieldSpec {
    /// Starts a spec for a named field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind: None,
            min_length: None,
        }
    }

    /// The field must be present and non-null.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The field, when present, must have this JSON type.
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// A string field, when present, must have at least this many chars;
    /// an array field at least this many items.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    fn check(&self, payload: &Value, errors: &mut ValidationErrors) {
        let value = payload.get(&self.name);

        let value = match value {
            None | Some(Value::Null) => {
                if self.required {
                    errors.add(&self.name, "is required");
                }
                return;
            }
            Some(value) => value,
        };

        if let Some(kind) = self.kind {
            if !kind.matches(value) {
                errors.add(&self.name, format!("must be a {}", kind.name()));
                return;
            }
        }

        if let Some(min) = self.min_length {
            let actual = match value {
                Value::String(s) => Some(s.chars().count()),
                Value::Array(a) => Some(a.len()),
                _ => None,
            };
            if let Some(actual) = actual {
                if actual < min {
                    errors.add(&self.name, format!("must have at least {} items", min));
                }
            }
        }
    }
}

/// StepValidator backed by per-step field specifications.
#[derive(Debug, Clone, Default)]
pub struct FieldRuleValidator {
    rules: HashMap<StepId, Vec<FieldSpec>>,
}

impl FieldRuleValidator {
    /// Create a validator with no rules; every payload passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers field specs for one step.
    pub fn rule(mut self, step_id: StepId, specs: Vec<FieldSpec>) -> Self {
        self.rules.insert(step_id, specs);
        self
    }
}

#[async_trait]
impl StepValidator for FieldRuleValidator {
    async fn validate(
        &self,
        step_id: &StepId,
        raw_data: &Value,
    ) -> Result<Value, ValidationErrors> {
        let Some(specs) = self.rules.get(step_id) else {
            return Ok(raw_data.clone());
        };

        let mut errors = ValidationErrors::new();

        if !raw_data.is_object() {
            errors.add("_root", "payload must be an object");
            return Err(errors);
        }

        for spec in specs {
            spec.check(raw_data, &mut errors);
        }

        if errors.is_empty() {
            Ok(raw_data.clone())
        } else {
            Err(errors)
        }
    }
}
