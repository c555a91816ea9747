//! Number and boolean constraint checks.
//!
//! Integers and floats are compared as `f64`. `multipleOf` divides and checks
//! the quotient against its nearest integer so that representation error in
//! values like `0.3` does not cause false rejections.

use serde_json::Value;

use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::{BoolConstraints, NumberConstraints};

use super::{type_error, Flow};

/// Absolute tolerance for the `multipleOf` quotient test.
pub const MULTIPLE_OF_TOLERANCE: f64 = 1e-9;

pub(crate) fn check(
    value: &Value,
    constraints: &NumberConstraints,
    integer: bool,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) -> Flow {
    let n = match value {
        Value::Number(num) if integer && !(num.is_i64() || num.is_u64()) => None,
        Value::Number(num) => num.as_f64(),
        _ => None,
    };
    match n {
        Some(n) => {
            check_f64(n, value, constraints, path, errors);
            Flow::Continue
        }
        None => {
            let expected = if integer { "integer" } else { "number" };
            errors.push(type_error(path, expected, value));
            Flow::Stop
        }
    }
}

pub(crate) fn check_f64(
    n: f64,
    original: &Value,
    constraints: &NumberConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let violation = |message: String, code: &str| {
        ValidationError::new(path.clone(), message)
            .with_code(code)
            .with_value(original.clone())
    };

    if let Some(min) = constraints.minimum {
        if n < min {
            errors.push(violation(format!("must be >= {} (got {})", min, n), "minimum"));
        }
    }
    if let Some(max) = constraints.maximum {
        if n > max {
            errors.push(violation(format!("must be <= {} (got {})", max, n), "maximum"));
        }
    }
    if let Some(min) = constraints.exclusive_minimum {
        if n <= min {
            errors.push(violation(
                format!("must be > {} (got {})", min, n),
                "exclusive_minimum",
            ));
        }
    }
    if let Some(max) = constraints.exclusive_maximum {
        if n >= max {
            errors.push(violation(
                format!("must be < {} (got {})", max, n),
                "exclusive_maximum",
            ));
        }
    }
    if let Some(divisor) = constraints.multiple_of {
        if !is_multiple_of(n, divisor) {
            errors.push(violation(
                format!("must be a multiple of {} (got {})", divisor, n),
                "multiple_of",
            ));
        }
    }
    if let Some(expected) = constraints.constant {
        if n != expected {
            errors.push(violation(format!("must equal {}", expected), "const"));
        }
    }
}

/// A zero divisor accepts every value.
pub fn is_multiple_of(n: f64, divisor: f64) -> bool {
    if divisor == 0.0 {
        return true;
    }
    let quotient = n / divisor;
    (quotient - quotient.round()).abs() <= MULTIPLE_OF_TOLERANCE
}

pub(crate) fn check_bool(
    value: &Value,
    constraints: &BoolConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) -> Flow {
    match value.as_bool() {
        Some(b) => {
            check_bool_const(b, constraints, path, errors);
            Flow::Continue
        }
        None => {
            errors.push(type_error(path, "boolean", value));
            Flow::Stop
        }
    }
}

pub(crate) fn check_bool_const(
    b: bool,
    constraints: &BoolConstraints,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(expected) = constraints.constant {
        if b != expected {
            errors.push(
                ValidationError::new(path.clone(), format!("must equal {}", expected))
                    .with_code("const")
                    .with_value(b),
            );
        }
    }
}
