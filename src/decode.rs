//! Decode, default and validate raw JSON input in one step.

use serde::de::DeserializeOwned;
use serde_json::Value;
use stillwater::Validation;
use tracing::debug;

use crate::defaults::apply_defaults_value;
use crate::describe::Describe;
use crate::error::Error;
use crate::path::FieldPath;
use crate::schema::{build_schema, ObjectSchema};
use crate::validate::validate_value;

/// Options for [`parse_with`].
///
/// # Example
///
/// ```rust
/// use tagschema::ParseOptions;
///
/// let options = ParseOptions::new()
///     .deny_unknown_fields(true)
///     .apply_defaults(false);
/// assert_eq!(options.unknown_fields_override(), Some(true));
/// assert!(!options.applies_defaults());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    deny_unknown_fields: Option<bool>,
    apply_defaults: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            deny_unknown_fields: None,
            apply_defaults: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides every record's `additionalProperties` setting.
    pub fn deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = Some(deny);
        self
    }

    pub fn apply_defaults(mut self, apply: bool) -> Self {
        self.apply_defaults = apply;
        self
    }

    /// `None` when each record follows its own `additionalProperties`.
    pub fn unknown_fields_override(&self) -> Option<bool> {
        self.deny_unknown_fields
    }

    pub fn applies_defaults(&self) -> bool {
        self.apply_defaults
    }
}

/// Parses JSON `bytes` into `T` with default options.
pub fn parse<T>(bytes: &[u8]) -> Result<T, Error>
where
    T: Describe + DeserializeOwned,
{
    parse_with(bytes, &ParseOptions::default())
}

/// Parses JSON `bytes` into `T`.
///
/// The input is decoded, checked for undeclared keys wherever unknown fields
/// are denied, back-filled with defaults, validated and finally converted to
/// `T`. Each stage stops the pipeline on failure. Missing keys are validated
/// as zero values, so a missing required field is reported together with
/// every other violation instead of failing deserialization.
pub fn parse_with<T>(bytes: &[u8], options: &ParseOptions) -> Result<T, Error>
where
    T: Describe + DeserializeOwned,
{
    let schema = build_schema::<T>()?;
    let mut value: Value = serde_json::from_slice(bytes).map_err(|err| {
        debug!(error = %err, "rejected malformed input");
        Error::Decode(err)
    })?;

    reject_unknown_fields(&value, &schema, &FieldPath::root(), options.deny_unknown_fields)?;

    if options.apply_defaults {
        apply_defaults_value(&mut value, &schema);
    }

    if let Validation::Failure(errors) = validate_value(&value, &schema) {
        debug!(errors = errors.len(), "rejected invalid input");
        return Err(Error::Invalid(errors));
    }

    serde_json::from_value(value).map_err(|err| {
        debug!(error = %err, "rejected input that does not fit the target type");
        Error::Decode(err)
    })
}

fn reject_unknown_fields(
    value: &Value,
    schema: &ObjectSchema,
    path: &FieldPath,
    deny_override: Option<bool>,
) -> Result<(), Error> {
    let Some(record) = value.as_object() else {
        return Ok(());
    };

    let deny = deny_override.unwrap_or(!schema.allows_additional_properties());
    if deny {
        if let Some(key) = record.keys().find(|key| !schema.fields.contains_key(*key)) {
            let path = path.join_field(key.as_str());
            debug!(path = %path, "rejected unknown field");
            return Err(Error::unknown_field(&path));
        }
    }

    for (name, field) in &schema.fields {
        if let (Some(nested), Some(child)) = (field.nested(), record.get(name)) {
            reject_unknown_fields(child, nested, &path.join_field(name), deny_override)?;
        }
    }
    Ok(())
}
