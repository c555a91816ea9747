//! Errors raised while deriving a schema from a type description.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// A schema could not be derived. Build errors are fatal to the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The root, or a field declared as a nested record, is not a struct.
    #[error("expected struct, got {0}")]
    NotAStruct(String),

    /// A field's annotation could not be turned into constraints.
    #[error("field {field:?}: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<BuildError>,
    },

    #[error("{key} must be an integer (got {value:?}): {source}")]
    InvalidInteger {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{key} must be a number (got {value:?}): {source}")]
    InvalidNumber {
        key: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl BuildError {
    pub(crate) fn in_field(self, field: impl Into<String>) -> Self {
        BuildError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Dot-joined internal field names leading to the offending annotation,
    /// or `None` when the error is not tied to a field.
    pub fn field_path(&self) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self;
        while let BuildError::Field { field, source } = current {
            names.push(field.as_str());
            current = source;
        }
        if names.is_empty() {
            None
        } else {
            Some(names.join("."))
        }
    }
}
