//! Record-level checks: field traversal and `dependentRequired`.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::ObjectSchema;

use super::{check_field, type_error};

/// Validates every declared field of `value`, then the schema's
/// `dependentRequired` rules. Undeclared keys are not inspected here.
pub(crate) fn check_object(
    value: &Value,
    schema: &ObjectSchema,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let record = match value.as_object() {
        Some(record) => record,
        None => {
            errors.push(type_error(path, "object", value));
            return;
        }
    };

    for (name, field) in &schema.fields {
        check_field(record.get(name), field, &path.join_field(name), errors);
    }

    check_dependent_required(record, schema, path, errors);
}

fn check_dependent_required(
    record: &Map<String, Value>,
    schema: &ObjectSchema,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    for (source, dependents) in &schema.dependent_required {
        if is_zero(record.get(source)) {
            continue;
        }
        for dependent in dependents {
            if is_zero(record.get(dependent)) {
                errors.push(
                    ValidationError::new(
                        path.join_field(dependent),
                        format!("field is required when '{}' is present", source),
                    )
                    .with_code("dependent_required"),
                );
            }
        }
    }
}

/// Missing, null and the zero value of each JSON type count as "not set".
pub(crate) fn is_zero(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(entries)) => entries.is_empty(),
    }
}
