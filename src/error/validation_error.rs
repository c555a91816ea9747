//! Validation failure types.
//!
//! [`ValidationError`] describes one violated constraint; [`ValidationErrors`]
//! is the non-empty, ordered collection returned when a value fails.

use std::fmt::{self, Display};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use stillwater::prelude::*;

use crate::path::FieldPath;

/// A single constraint violation.
///
/// # Example
///
/// ```rust
/// use tagschema::{FieldPath, ValidationError};
/// use serde_json::json;
///
/// let error = ValidationError::new(FieldPath::root().join_field("age"), "must be >= 0 (got -3)")
///     .with_code("minimum")
///     .with_value(json!(-3));
///
/// assert_eq!(error.to_string(), "age: must be >= 0 (got -3) (got: -3)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Where the offending value lives, in wire names.
    pub path: FieldPath,
    /// Human-readable reason.
    pub message: String,
    /// The offending runtime value, when there is one.
    pub value: Option<Value>,
    /// Machine-readable constraint name (e.g. `min_length`).
    pub code: String,
}

impl ValidationError {
    /// Creates an error with the generic `validation_error` code.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            value: None,
            code: "validation_error".to_string(),
        }
    }

    /// Creates the "field is required" error used for absent and empty values.
    pub fn required(path: FieldPath, message: impl Into<String>) -> Self {
        Self::new(path, message).with_code("required")
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ValidationError", len)?;
        state.serialize_field("field", &self.path.to_string())?;
        state.serialize_field("message", &self.message)?;
        if let Some(ref value) = self.value {
            state.serialize_field("value", value)?;
        }
        state.end()
    }
}

/// A non-empty, ordered collection of [`ValidationError`]s.
///
/// Order follows field declaration order, then nested-recursion order, then
/// the order constraints are checked within a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps the accumulated errors, or returns `None` when there are none.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns true if any error was reported at the rendered path, e.g.
    /// `"address.street"` or `"items[2]"`.
    pub fn has(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path.to_string() == path)
    }

    pub fn at_path(&self, path: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.path.to_string() == path).collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Rendered paths in report order.
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(|e| e.path.to_string()).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidationError>();
    assert_send_sync::<ValidationErrors>();
};
