//! Composition keywords: `not`, `anyOf`, `oneOf` and `allOf`.
//!
//! Each keyword contributes at most one error at the field's own path; the
//! individual branch failures are not surfaced. A branch is evaluated against
//! the same runtime value as its parent field, using whichever of its
//! constraint sets applies to the value's type.

use serde_json::Value;

use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::{BranchSchema, FieldSchema};

use super::{numeric, string};

/// Errors produced by checking `value` against a single branch.
///
/// A branch with no constraints passes vacuously. A branch whose populated
/// constraint sets do not cover the value's type fails with `invalid_type`.
pub(crate) fn check_branch(
    value: &Value,
    branch: &BranchSchema,
    path: &FieldPath,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if branch.is_empty() {
        return errors;
    }

    let applied = match value {
        Value::String(s) if !branch.string.is_empty() => {
            if !s.is_empty() {
                string::check_str(s, &branch.string, path, &mut errors);
            }
            true
        }
        Value::Number(n) if !branch.number.is_empty() => {
            if let Some(n) = n.as_f64() {
                numeric::check_f64(n, value, &branch.number, path, &mut errors);
            }
            true
        }
        Value::Bool(b) if !branch.boolean.is_empty() => {
            numeric::check_bool_const(*b, &branch.boolean, path, &mut errors);
            true
        }
        _ => false,
    };

    if !applied {
        errors.push(
            ValidationError::new(
                path.clone(),
                format!("expected {}", branch_types(branch).join(" or ")),
            )
            .with_code("invalid_type")
            .with_value(value.clone()),
        );
    }
    errors
}

fn passes(value: &Value, branch: &BranchSchema, path: &FieldPath) -> bool {
    check_branch(value, branch, path).is_empty()
}

fn branch_types(branch: &BranchSchema) -> Vec<&'static str> {
    let mut types = Vec::new();
    if !branch.string.is_empty() {
        types.push("string");
    }
    if !branch.number.is_empty() {
        types.push("number");
    }
    if !branch.boolean.is_empty() {
        types.push("boolean");
    }
    types
}

/// Applies every composition keyword declared on `field`.
pub(crate) fn check(
    value: &Value,
    field: &FieldSchema,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let violation = |message: String, code: &str| {
        ValidationError::new(path.clone(), message)
            .with_code(code)
            .with_value(value.clone())
    };

    if let Some(ref not) = field.not {
        if passes(value, not, path) {
            errors.push(violation(
                "must not match the schema in 'not'".to_string(),
                "not",
            ));
        }
    }

    if !field.any_of.is_empty() && !field.any_of.iter().any(|b| passes(value, b, path)) {
        errors.push(violation(
            "must match at least one schema in 'anyOf'".to_string(),
            "any_of",
        ));
    }

    if !field.one_of.is_empty() {
        let matched = field
            .one_of
            .iter()
            .filter(|b| passes(value, b, path))
            .count();
        if matched != 1 {
            errors.push(violation(
                format!(
                    "must match exactly one schema in 'oneOf' (matched {})",
                    matched
                ),
                "one_of",
            ));
        }
    }

    if !field.all_of.is_empty() && !field.all_of.iter().all(|b| passes(value, b, path)) {
        errors.push(violation(
            "must match all schemas in 'allOf'".to_string(),
            "all_of",
        ));
    }
}
