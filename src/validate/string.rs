//! String constraint checks.

use regex::Regex;
use serde_json::Value;

use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::StringConstraints;

use super::{format, type_error, Flow};

/// Checks a string field. An empty value fails only when required; an empty
/// optional value skips every other check.
pub(crate) fn check(
    value: &Value,
    constraints: &StringConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) -> Flow {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            errors.push(type_error(path, "string", value));
            return Flow::Stop;
        }
    };

    if s.is_empty() {
        if constraints.required {
            errors.push(
                ValidationError::required(path.clone(), "field is required").with_value(""),
            );
        }
        return Flow::Stop;
    }

    check_str(s, constraints, path, errors);
    Flow::Continue
}

/// Applies length, pattern, format, enum and const to a non-empty string.
pub(crate) fn check_str(
    s: &str,
    constraints: &StringConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let violation = |message: String, code: &str| {
        ValidationError::new(path.clone(), message)
            .with_code(code)
            .with_value(s)
    };

    let len = s.chars().count();
    if let Some(min) = constraints.min_length {
        if len < min {
            errors.push(violation(
                format!("must be at least {} characters long (got {})", min, len),
                "min_length",
            ));
        }
    }
    if let Some(max) = constraints.max_length {
        if len > max {
            errors.push(violation(
                format!("must be at most {} characters long (got {})", max, len),
                "max_length",
            ));
        }
    }

    if let Some(ref pattern) = constraints.pattern {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(s) => errors.push(violation(
                format!("must match pattern {:?}", pattern),
                "pattern",
            )),
            Ok(_) => {}
            Err(err) => errors.push(violation(
                format!("invalid pattern {:?}: {}", pattern, err),
                "invalid_pattern",
            )),
        }
    }

    if let Some(ref name) = constraints.format {
        if let Some(re) = format::matcher(name) {
            if !re.is_match(s) {
                errors.push(violation(format!("must be a valid {}", name), "format"));
            }
        }
    }

    if !constraints.enumeration.is_empty() && !constraints.enumeration.iter().any(|e| e == s) {
        errors.push(violation(
            format!("must be one of [{}]", constraints.enumeration.join(" ")),
            "enum",
        ));
    }

    if let Some(ref expected) = constraints.constant {
        if s != expected {
            errors.push(violation(format!("must equal {:?}", expected), "const"));
        }
    }
}
