//! The validation engine.
//!
//! Walks a live value alongside its [`ObjectSchema`], checking every field
//! and collecting every violation with its path. Nothing short-circuits
//! across fields; within a field, a "required but empty" string, array or
//! map stops further checks on that field only.
//!
//! Values are `serde_json::Value` trees. A non-optional field that is missing
//! or null is checked as the zero value of its kind, the same value a typed
//! record would have serialized. Optional fields (`Option<T>`) that are
//! missing or null are absent: they fail only when `required` and not
//! `nullable`.

mod collection;
mod combinators;
pub mod format;
mod numeric;
mod object;
mod string;

pub use numeric::{is_multiple_of, MULTIPLE_OF_TOLERANCE};
pub(crate) use object::is_zero;

use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::debug;

use crate::error::{ValidationError, ValidationErrors};
use crate::path::FieldPath;
use crate::schema::{FieldKind, FieldSchema, ObjectSchema};
use crate::ValidationResult;

/// Whether the remaining checks for a field (composition) should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

/// Validates `value` against `schema`, accumulating every violation.
///
/// A null root fails with a single `nil` error at the root path. A root that
/// is not a JSON object fails with a single `invalid_type` error at the root
/// path. The typed entry points reject non-record types earlier, when the
/// schema is built, as [`BuildError::NotAStruct`](crate::BuildError::NotAStruct).
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tagschema::{validate_value, FieldKind, FieldSchema, ObjectSchema, StringConstraints};
///
/// let mut schema = ObjectSchema::default();
/// schema.fields.insert(
///     "name".to_string(),
///     FieldSchema::new(
///         "name",
///         FieldKind::String(StringConstraints {
///             min_length: Some(2),
///             ..Default::default()
///         }),
///     ),
/// );
///
/// assert!(validate_value(&json!({"name": "Al"}), &schema).is_success());
/// assert!(validate_value(&json!({"name": "A"}), &schema).is_failure());
/// ```
pub fn validate_value(value: &Value, schema: &ObjectSchema) -> ValidationResult<()> {
    if value.is_null() {
        return Validation::Failure(ValidationErrors::single(nil_error()));
    }

    let mut errors = Vec::new();
    object::check_object(value, schema, &FieldPath::root(), &mut errors);
    debug!(errors = errors.len(), "validated value");

    match ValidationErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

pub(crate) fn nil_error() -> ValidationError {
    ValidationError::new(FieldPath::root(), "value is nil").with_code("nil")
}

pub(crate) fn check_field(
    raw: Option<&Value>,
    field: &FieldSchema,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let zero;
    let value = match raw.filter(|v| !v.is_null()) {
        Some(value) => value,
        None if field.nullable => return,
        None => match zero_value(&field.kind) {
            Some(z) if !field.optional => {
                zero = z;
                &zero
            }
            _ => {
                if field.required {
                    errors.push(ValidationError::required(path.clone(), "field is required"));
                }
                return;
            }
        },
    };

    let flow = match &field.kind {
        FieldKind::String(c) => string::check(value, c, path, errors),
        FieldKind::Integer(c) => numeric::check(value, c, true, path, errors),
        FieldKind::Number(c) => numeric::check(value, c, false, path, errors),
        FieldKind::Boolean(c) => numeric::check_bool(value, c, path, errors),
        FieldKind::Array(c) => collection::check_array(value, c, path, errors),
        FieldKind::Map(c) => collection::check_map(value, c, path, errors),
        FieldKind::Object(nested) => {
            object::check_object(value, nested, path, errors);
            Flow::Continue
        }
        FieldKind::Any => Flow::Continue,
    };

    if flow == Flow::Continue && field.has_composition() {
        combinators::check(value, field, path, errors);
    }
}

/// The value a typed record holds for a field it never set.
pub(crate) fn zero_value(kind: &FieldKind) -> Option<Value> {
    match kind {
        FieldKind::String(_) => Some(Value::String(String::new())),
        FieldKind::Integer(_) | FieldKind::Number(_) => Some(Value::from(0)),
        FieldKind::Boolean(_) => Some(Value::Bool(false)),
        FieldKind::Array(_) => Some(Value::Array(Vec::new())),
        FieldKind::Map(_) | FieldKind::Object(_) => Some(Value::Object(Map::new())),
        FieldKind::Any => None,
    }
}

pub(crate) fn type_error(path: &FieldPath, expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        path.clone(),
        format!("expected {}, got {}", expected, json_type_name(value)),
    )
    .with_code("invalid_type")
    .with_value(value.clone())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
