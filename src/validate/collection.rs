//! Array and map constraint checks.

use serde_json::Value;

use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::{ArrayConstraints, MapConstraints};

use super::combinators::check_branch;
use super::{type_error, Flow};

pub(crate) fn check_array(
    value: &Value,
    constraints: &ArrayConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) -> Flow {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            errors.push(type_error(path, "array", value));
            return Flow::Stop;
        }
    };

    let len = items.len();
    if constraints.required && len == 0 {
        errors.push(
            ValidationError::required(path.clone(), "field is required (empty slice)")
                .with_value(Value::Array(Vec::new())),
        );
        return Flow::Stop;
    }

    if let Some(min) = constraints.min_items {
        if len < min {
            errors.push(
                ValidationError::new(
                    path.clone(),
                    format!("must have at least {} items (got {})", min, len),
                )
                .with_code("min_items"),
            );
        }
    }
    if let Some(max) = constraints.max_items {
        if len > max {
            errors.push(
                ValidationError::new(
                    path.clone(),
                    format!("must have at most {} items (got {})", max, len),
                )
                .with_code("max_items"),
            );
        }
    }

    if constraints.unique_items {
        if let Some(duplicate) = first_duplicate(items) {
            errors.push(
                ValidationError::new(
                    path.clone(),
                    format!("items must be unique (duplicate: {})", duplicate),
                )
                .with_code("unique_items")
                .with_value(duplicate.clone()),
            );
        }
    }

    if let Some(ref branch) = constraints.items {
        for (index, item) in items.iter().enumerate() {
            if item.is_null() {
                continue;
            }
            errors.extend(check_branch(item, branch, &path.join_index(index)));
        }
    }

    Flow::Continue
}

/// The first element structurally equal to an earlier one.
fn first_duplicate(items: &[Value]) -> Option<&Value> {
    items
        .iter()
        .enumerate()
        .find(|(i, item)| items[..*i].contains(item))
        .map(|(_, item)| item)
}

pub(crate) fn check_map(
    value: &Value,
    constraints: &MapConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) -> Flow {
    let entries = match value.as_object() {
        Some(entries) => entries,
        None => {
            errors.push(type_error(path, "object", value));
            return Flow::Stop;
        }
    };

    let len = entries.len();
    if constraints.required && len == 0 {
        errors.push(ValidationError::required(
            path.clone(),
            "field is required (empty map)",
        ));
        return Flow::Stop;
    }

    if let Some(min) = constraints.min_properties {
        if len < min {
            errors.push(
                ValidationError::new(
                    path.clone(),
                    format!("must have at least {} properties (got {})", min, len),
                )
                .with_code("min_properties"),
            );
        }
    }
    if let Some(max) = constraints.max_properties {
        if len > max {
            errors.push(
                ValidationError::new(
                    path.clone(),
                    format!("must have at most {} properties (got {})", max, len),
                )
                .with_code("max_properties"),
            );
        }
    }

    Flow::Continue
}
