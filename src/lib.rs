//! # Tagschema
//!
//! Derives a constraint schema from validation annotations attached to a
//! type's fields, validates values against it while accumulating ALL
//! violations, and emits the equivalent JSON Schema.
//!
//! ## Overview
//!
//! A type states its structure through [`Describe`], attaching an annotation
//! such as `required,minLength=2,format=email` to each field. The schema
//! builder turns those annotations into an [`ObjectSchema`]; the validation
//! engine walks a value alongside it and reports every violated constraint
//! with the path where it occurred. Results use stillwater's `Validation`
//! type, so errors from independent checks accumulate instead of stopping at
//! the first one.
//!
//! ## Core Types
//!
//! - [`Describe`]: how a type declares its fields and their annotations
//! - [`ObjectSchema`] / [`FieldSchema`]: the resolved constraint tree
//! - [`ValidationError`]: a single violation (path, message, offending value, code)
//! - [`ValidationErrors`]: a non-empty collection of violations
//! - [`FieldPath`]: where a violation occurred (e.g. `items[2].sku`)
//!
//! ## Example
//!
//! ```rust
//! use serde::Serialize;
//! use tagschema::{validate, Describe, FieldShape, StructShape, TypeShape};
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     age: i64,
//!     tags: Vec<String>,
//! }
//!
//! impl Describe for User {
//!     fn shape() -> TypeShape {
//!         StructShape::new("User")
//!             .field(FieldShape::of::<String>("name").tag("required,minLength=2"))
//!             .field(FieldShape::of::<i64>("age").tag("minimum=0,maximum=150"))
//!             .field(FieldShape::of::<Vec<String>>("tags").tag("uniqueItems"))
//!             .into()
//!     }
//! }
//!
//! let user = User {
//!     name: "A".to_string(),
//!     age: 200,
//!     tags: vec!["x".to_string(), "x".to_string()],
//! };
//!
//! let errors = validate(&user).unwrap().into_result().unwrap_err();
//! assert_eq!(errors.len(), 3);
//! assert!(errors.has("name"));
//! assert!(errors.has("age"));
//! assert!(errors.has("tags"));
//! ```

pub mod api;
pub mod decode;
pub mod defaults;
pub mod describe;
pub mod error;
pub mod interop;
pub mod must;
pub mod path;
pub mod schema;
pub mod tags;
pub mod validate;

pub use api::{apply_defaults, to_json_schema, to_json_schema_pretty, validate, validate_batch};
pub use decode::{parse, parse_with, ParseOptions};
pub use defaults::apply_defaults_value;
pub use describe::{Describe, FieldShape, StructShape, TypeShape};
pub use error::{BuildError, Error, ValidationError, ValidationErrors};
pub use interop::ToJsonSchema;
pub use path::{FieldPath, PathSegment};
pub use schema::{
    build_object_schema, build_schema, ArrayConstraints, BoolConstraints, BranchSchema, FieldKind,
    FieldSchema, MapConstraints, NumberConstraints, ObjectSchema, StringConstraints,
};
pub use validate::validate_value;

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
