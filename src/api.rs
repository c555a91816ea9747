//! Typed entry points.
//!
//! Each call builds the schema for `T` from its [`Describe`] shape, converts
//! the value to its JSON form and hands both to the core engine. Nothing is
//! cached between calls.

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::defaults::apply_defaults_value;
use crate::describe::Describe;
use crate::error::Error;
use crate::interop::ToJsonSchema;
use crate::schema::build_schema;
use crate::validate::validate_value;
use crate::ValidationResult;

/// Validates `value` against the schema derived from its type.
///
/// `Err` means the schema could not be built or the value could not be
/// converted; constraint violations are reported in the returned
/// [`ValidationResult`]. A `None` optional root fails with a single `nil`
/// error.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use tagschema::{validate, Describe, FieldShape, StructShape, TypeShape};
///
/// #[derive(Serialize)]
/// struct Signup {
///     email: String,
/// }
///
/// impl Describe for Signup {
///     fn shape() -> TypeShape {
///         StructShape::new("Signup")
///             .field(FieldShape::of::<String>("email").tag("required,format=email"))
///             .into()
///     }
/// }
///
/// let ok = validate(&Signup { email: "a@example.com".to_string() }).unwrap();
/// assert!(ok.is_success());
///
/// let bad = validate(&Signup { email: "nope".to_string() }).unwrap();
/// assert!(bad.is_failure());
/// ```
pub fn validate<T>(value: &T) -> Result<ValidationResult<()>, Error>
where
    T: Describe + Serialize + ?Sized,
{
    let schema = build_schema::<T>()?;
    let json = serde_json::to_value(value).map_err(Error::Serialize)?;
    Ok(validate_value(&json, &schema))
}

/// Validates every value in `values` in parallel against one schema built
/// for this call. Results are returned in input order.
pub fn validate_batch<T>(values: &[T]) -> Result<Vec<ValidationResult<()>>, Error>
where
    T: Describe + Serialize + Sync,
{
    let schema = build_schema::<T>()?;
    values
        .par_iter()
        .map(|value| {
            let json = serde_json::to_value(value).map_err(Error::Serialize)?;
            Ok(validate_value(&json, &schema))
        })
        .collect()
}

/// Fills declared defaults into the still-unset fields of `value`.
pub fn apply_defaults<T>(value: &mut T) -> Result<(), Error>
where
    T: Describe + Serialize + DeserializeOwned,
{
    let schema = build_schema::<T>()?;
    let mut json = serde_json::to_value(&*value).map_err(Error::Serialize)?;
    apply_defaults_value(&mut json, &schema);
    *value = serde_json::from_value(json).map_err(Error::Serialize)?;
    Ok(())
}

/// The JSON Schema (draft-07 compatible) descriptor for `T`.
pub fn to_json_schema<T: Describe + ?Sized>() -> Result<Value, Error> {
    Ok(build_schema::<T>()?.to_json_schema())
}

/// [`to_json_schema`] rendered as indented JSON text.
pub fn to_json_schema_pretty<T: Describe + ?Sized>() -> Result<String, Error> {
    let schema = to_json_schema::<T>()?;
    serde_json::to_string_pretty(&schema).map_err(Error::Serialize)
}
