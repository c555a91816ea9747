//! The schema model.
//!
//! An [`ObjectSchema`] is the resolved constraint description of one record
//! type: an ordered tree of [`FieldSchema`]s, each carrying a [`FieldKind`]
//! with the constraint set for that kind. Nested records own their child
//! schema, composition branches are owned [`BranchSchema`]s, and the tree has
//! no back-references. A schema is built fresh for each call and dropped when
//! the call returns.

mod builder;
mod constraints;

pub use builder::{build_object_schema, build_schema};
pub use constraints::{
    ArrayConstraints, BoolConstraints, MapConstraints, NumberConstraints, StringConstraints,
};

use indexmap::IndexMap;

/// Resolved schema for a record type. Field keys are wire names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub title: String,
    pub description: String,
    pub fields: IndexMap<String, FieldSchema>,
    /// `None` means additional properties are allowed.
    pub additional_properties: Option<bool>,
    /// Source wire name → wire names that must be set whenever the source is.
    pub dependent_required: IndexMap<String, Vec<String>>,
}

impl ObjectSchema {
    pub fn field(&self, wire_name: &str) -> Option<&FieldSchema> {
        self.fields.get(wire_name)
    }

    /// Wire names of the fields declared `required`, in declaration order.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| f.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn allows_additional_properties(&self) -> bool {
        self.additional_properties.unwrap_or(true)
    }
}

/// The kind of a field together with the constraints for that kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String(StringConstraints),
    Integer(NumberConstraints),
    Number(NumberConstraints),
    Boolean(BoolConstraints),
    Array(ArrayConstraints),
    Map(MapConstraints),
    /// A nested record; validated by recursing into its own schema.
    Object(Box<ObjectSchema>),
    Any,
}

impl FieldKind {
    /// The JSON Schema `type` name, `None` for [`FieldKind::Any`].
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            FieldKind::String(_) => Some("string"),
            FieldKind::Integer(_) => Some("integer"),
            FieldKind::Number(_) => Some("number"),
            FieldKind::Boolean(_) => Some("boolean"),
            FieldKind::Array(_) => Some("array"),
            FieldKind::Map(_) | FieldKind::Object(_) => Some("object"),
            FieldKind::Any => None,
        }
    }
}

/// Resolved schema for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub kind: FieldKind,
    pub wire_name: String,
    /// Raw default literal, applied to zero-valued fields before validation.
    pub default: Option<String>,
    pub required: bool,
    /// An absent value is accepted even when `required` is set.
    pub nullable: bool,
    /// Declared as an optional reference (`Option<T>`).
    pub optional: bool,
    pub any_of: Vec<BranchSchema>,
    pub one_of: Vec<BranchSchema>,
    pub all_of: Vec<BranchSchema>,
    pub not: Option<Box<BranchSchema>>,
}

impl FieldSchema {
    pub fn new(wire_name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            kind,
            wire_name: wire_name.into(),
            default: None,
            required: false,
            nullable: false,
            optional: false,
            any_of: Vec::new(),
            one_of: Vec::new(),
            all_of: Vec::new(),
            not: None,
        }
    }

    pub fn nested(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            FieldKind::Object(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn has_composition(&self) -> bool {
        self.not.is_some()
            || !self.any_of.is_empty()
            || !self.one_of.is_empty()
            || !self.all_of.is_empty()
    }
}

/// A kind-agnostic, constraint-only micro-schema.
///
/// Used for `anyOf`/`oneOf`/`allOf`/`not` branches and for array `items`.
/// All three constraint sets are built from the same annotation; the
/// validator checks whichever populated set matches the runtime value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchSchema {
    pub string: StringConstraints,
    pub number: NumberConstraints,
    pub boolean: BoolConstraints,
}

impl BranchSchema {
    pub fn is_empty(&self) -> bool {
        self.string.is_empty() && self.number.is_empty() && self.boolean.is_empty()
    }
}
