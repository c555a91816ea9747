//! The default filler.
//!
//! Back-fills fields that are still unset from their `default=` literal,
//! before validation runs. Only scalar kinds take defaults; a literal that
//! does not parse for the field's kind is ignored.

use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::schema::{FieldKind, FieldSchema, ObjectSchema};
use crate::validate::is_zero;

/// Fills defaults into `value` in place, recursing into nested records.
///
/// A non-optional field is filled when it is missing, null or the zero value
/// of its type. An optional field is filled only when missing or null, since
/// `Some("")` is a deliberate value. Non-object values are left untouched.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tagschema::{apply_defaults_value, FieldKind, FieldSchema, ObjectSchema, StringConstraints};
///
/// let mut field = FieldSchema::new("lang", FieldKind::String(StringConstraints::default()));
/// field.default = Some("en".to_string());
/// let mut schema = ObjectSchema::default();
/// schema.fields.insert("lang".to_string(), field);
///
/// let mut value = json!({"lang": ""});
/// apply_defaults_value(&mut value, &schema);
/// assert_eq!(value, json!({"lang": "en"}));
/// ```
pub fn apply_defaults_value(value: &mut Value, schema: &ObjectSchema) {
    let Some(record) = value.as_object_mut() else {
        return;
    };

    for (name, field) in &schema.fields {
        if let Some(ref literal) = field.default {
            let unset = if field.optional {
                record.get(name).map_or(true, Value::is_null)
            } else {
                is_zero(record.get(name))
            };
            if unset {
                if let Some(filled) = parse_default(literal, &field.kind) {
                    trace!(field = %name, default = %literal, "applied default");
                    record.insert(name.clone(), filled);
                }
            }
        }

        if let FieldKind::Object(ref nested) = field.kind {
            fill_nested(record, name, field, nested);
        }
    }
}

fn fill_nested(
    record: &mut Map<String, Value>,
    name: &str,
    field: &FieldSchema,
    nested: &ObjectSchema,
) {
    match record.get_mut(name) {
        Some(child) if child.is_object() => apply_defaults_value(child, nested),
        Some(Value::Null) | None if !field.optional => {
            let mut child = Value::Object(Map::new());
            apply_defaults_value(&mut child, nested);
            record.insert(name.to_string(), child);
        }
        _ => {}
    }
}

/// Converts a default literal to a value of the field's kind.
fn parse_default(literal: &str, kind: &FieldKind) -> Option<Value> {
    match kind {
        FieldKind::String(_) => Some(Value::String(literal.to_string())),
        FieldKind::Integer(_) => literal.trim().parse::<i64>().ok().map(Value::from),
        FieldKind::Number(_) => literal
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        FieldKind::Boolean(_) => Some(Value::Bool(literal == "true")),
        _ => None,
    }
}
