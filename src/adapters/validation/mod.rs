//! Validation adapters implementing the StepValidator port.

mod field_rule_validator;

pub use field_rule_validator::{FieldKind, FieldRuleValidator, FieldSpec};
