//! Error types.
//!
//! Two classes of failure exist. [`BuildError`] means a schema could not be
//! derived and is fatal. [`ValidationErrors`] is data: every violated
//! constraint, collected in one pass. [`Error`] unifies both for the typed
//! entry points together with the serde conversions they perform.

mod build_error;
mod validation_error;

pub use build_error::BuildError;
pub use validation_error::{ValidationError, ValidationErrors};

use thiserror::Error;

use crate::path::FieldPath;

/// Failure of a typed entry point.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The value could not be converted to or from its JSON form.
    #[error("tagschema: value conversion failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The input bytes are not valid JSON for the target type.
    #[error("tagschema: parse error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The input carries a key the schema does not declare while
    /// `additionalProperties=false` is in force.
    #[error("tagschema: parse error: unknown field {path:?}")]
    UnknownField { path: String },

    #[error("{0}")]
    Invalid(ValidationErrors),
}

impl Error {
    pub(crate) fn unknown_field(path: &FieldPath) -> Self {
        Error::UnknownField {
            path: path.to_string(),
        }
    }

    /// The collected violations, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
