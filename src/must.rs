//! Panicking variants of the entry points, for setup code and tests where a
//! failure is a programming error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use stillwater::Validation;

use crate::api::{to_json_schema_pretty, validate};
use crate::decode::parse;
use crate::describe::Describe;

/// Like [`validate`], but panics on any failure.
#[track_caller]
pub fn must_validate<T>(value: &T)
where
    T: Describe + Serialize + ?Sized,
{
    match validate(value) {
        Ok(Validation::Success(())) => {}
        Ok(Validation::Failure(errors)) => panic!("tagschema: must_validate failed: {}", errors),
        Err(err) => panic!("tagschema: must_validate failed: {}", err),
    }
}

/// Like [`parse`], but panics on any failure.
#[track_caller]
pub fn must_parse<T>(bytes: &[u8]) -> T
where
    T: Describe + DeserializeOwned,
{
    match parse(bytes) {
        Ok(value) => value,
        Err(err) => panic!("tagschema: must_parse failed: {}", err),
    }
}

/// Like [`to_json_schema_pretty`], but panics if the schema cannot be built.
#[track_caller]
pub fn must_to_json_schema_pretty<T: Describe + ?Sized>() -> String {
    match to_json_schema_pretty::<T>() {
        Ok(text) => text,
        Err(err) => panic!("tagschema: must_to_json_schema_pretty failed: {}", err),
    }
}
