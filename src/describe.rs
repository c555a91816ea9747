//! Type descriptions.
//!
//! The schema builder never inspects values to learn their structure. Each
//! type states its own shape through [`Describe`]; record types register their
//! fields with [`StructShape`], attaching the wire-name and validation
//! annotations a field carries.
//!
//! # Example
//!
//! ```rust
//! use tagschema::{Describe, FieldShape, StructShape, TypeShape};
//!
//! struct Address {
//!     street: String,
//!     city: String,
//! }
//!
//! impl Describe for Address {
//!     fn shape() -> TypeShape {
//!         StructShape::new("Address")
//!             .meta("title=Address")
//!             .field(FieldShape::of::<String>("street").tag("minLength=3,required"))
//!             .field(FieldShape::of::<String>("city").rename("town,omitempty"))
//!             .into()
//!     }
//! }
//! # let _ = Address { street: String::new(), city: String::new() };
//! ```
//!
//! Self-referential types are not supported: describing one recurses forever.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use serde_json::Value;

/// Name of the placeholder field whose annotation carries struct-level metadata.
pub const META_FIELD: &str = "_";

/// The declared shape of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    String,
    Integer,
    Number,
    Boolean,
    /// A sequence; the payload is the element shape.
    Array(Box<TypeShape>),
    /// A string-keyed associative container; the payload is the value shape.
    Map(Box<TypeShape>),
    Struct(StructShape),
    /// An optional reference: absent values are allowed unless `required`.
    Optional(Box<TypeShape>),
    /// Anything else; carries no kind-specific constraints.
    Any,
}

impl TypeShape {
    /// Short name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeShape::String => "string",
            TypeShape::Integer => "integer",
            TypeShape::Number => "number",
            TypeShape::Boolean => "boolean",
            TypeShape::Array(_) => "array",
            TypeShape::Map(_) => "map",
            TypeShape::Struct(_) => "struct",
            TypeShape::Optional(_) => "optional",
            TypeShape::Any => "any",
        }
    }

    /// Strips one optional layer, reporting whether one was present.
    pub fn strip_optional(&self) -> (&TypeShape, bool) {
        match self {
            TypeShape::Optional(inner) => (inner, true),
            other => (other, false),
        }
    }
}

/// A record type: its name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructShape {
    pub name: String,
    pub fields: Vec<FieldShape>,
}

impl StructShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    /// Registers the unnamed placeholder field. Its annotation supplies
    /// `title`, `description`, `additionalProperties` and
    /// `dependentRequired:<source>=a|b` entries instead of being validated.
    pub fn meta(self, tag: impl Into<String>) -> Self {
        self.field(FieldShape::new(META_FIELD, TypeShape::Any).tag(tag))
    }
}

impl From<StructShape> for TypeShape {
    fn from(shape: StructShape) -> Self {
        TypeShape::Struct(shape)
    }
}

/// One field of a [`StructShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    /// Internal field name.
    pub name: String,
    /// Serialization annotation, e.g. `"display_name,omitempty"` or `"-"`.
    pub rename: Option<String>,
    /// Validation annotation, see [`crate::tags`].
    pub tag: String,
    pub shape: TypeShape,
}

impl FieldShape {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            rename: None,
            tag: String::new(),
            shape,
        }
    }

    /// A field whose shape is taken from `T`.
    pub fn of<T: Describe + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::shape())
    }

    /// Sets the serialization annotation. Only its first comma-delimited
    /// segment names the wire field; `"-"` excludes the field.
    pub fn rename(mut self, annotation: impl Into<String>) -> Self {
        self.rename = Some(annotation.into());
        self
    }

    pub fn tag(mut self, annotation: impl Into<String>) -> Self {
        self.tag = annotation.into();
        self
    }

    /// True for the metadata placeholder.
    pub fn is_meta(&self) -> bool {
        self.name.is_empty() || self.name == META_FIELD
    }

    /// The wire name: the first segment of the serialization annotation,
    /// falling back to the field name when absent or empty.
    pub fn wire_name(&self) -> &str {
        match self.rename.as_deref().and_then(|r| r.split(',').next()) {
            Some(first) if !first.trim().is_empty() => first.trim(),
            _ => &self.name,
        }
    }
}

/// Types that can describe their own shape to the schema builder.
pub trait Describe {
    fn shape() -> TypeShape;
}

macro_rules! describe_as {
    ($shape:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> TypeShape {
                    $shape
                }
            }
        )+
    };
}

describe_as!(TypeShape::String => String, str, char);
describe_as!(TypeShape::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_as!(TypeShape::Number => f32, f64);
describe_as!(TypeShape::Boolean => bool);
describe_as!(TypeShape::Any => Value);
describe_as!(TypeShape::Map(Box::new(TypeShape::Any)) => serde_json::Map<String, Value>);

impl<T: Describe> Describe for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Optional(Box::new(T::shape()))
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }
}

impl<T: Describe> Describe for [T] {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }
}

impl<V: Describe, S> Describe for HashMap<String, V, S> {
    fn shape() -> TypeShape {
        TypeShape::Map(Box::new(V::shape()))
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn shape() -> TypeShape {
        TypeShape::Map(Box::new(V::shape()))
    }
}

impl<V: Describe, S> Describe for IndexMap<String, V, S> {
    fn shape() -> TypeShape {
        TypeShape::Map(Box::new(V::shape()))
    }
}
