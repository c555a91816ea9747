//! Derives an [`ObjectSchema`] from a type description and its annotations.

use tracing::{debug, trace};

use crate::describe::{Describe, FieldShape, TypeShape};
use crate::error::BuildError;
use crate::tags::{self, TagOptions};

use super::{
    ArrayConstraints, BoolConstraints, BranchSchema, FieldKind, FieldSchema, MapConstraints,
    NumberConstraints, ObjectSchema, StringConstraints,
};

/// Separator between composition branches inside one annotation value.
const BRANCH_SEPARATOR: char = ';';
/// Separator between alternatives in `enum` and `dependentRequired` values.
const LIST_SEPARATOR: char = '|';
const ITEMS_PREFIX: &str = "items:";
const DEPENDENT_REQUIRED_PREFIX: &str = "dependentRequired:";

/// Builds the schema for `T`. An optional root (`Option<S>`) is unwrapped once.
///
/// # Example
///
/// ```rust
/// use tagschema::{build_schema, Describe, FieldKind, FieldShape, StructShape, TypeShape};
///
/// struct Login {
///     user: String,
///     attempts: u32,
/// }
///
/// impl Describe for Login {
///     fn shape() -> TypeShape {
///         StructShape::new("Login")
///             .field(FieldShape::of::<String>("user").tag("required,minLength=3"))
///             .field(FieldShape::of::<u32>("attempts").tag("maximum=5"))
///             .into()
///     }
/// }
/// # let _ = Login { user: String::new(), attempts: 0 };
///
/// let schema = build_schema::<Login>().unwrap();
/// assert_eq!(schema.required_fields(), vec!["user"]);
/// assert!(matches!(schema.fields["attempts"].kind, FieldKind::Integer(_)));
/// ```
pub fn build_schema<T: Describe + ?Sized>() -> Result<ObjectSchema, BuildError> {
    let shape = T::shape();
    let (root, _) = shape.strip_optional();
    build_object_schema(root)
}

/// Builds the schema for a record shape, recursing into nested records.
pub fn build_object_schema(shape: &TypeShape) -> Result<ObjectSchema, BuildError> {
    let record = match shape {
        TypeShape::Struct(record) => record,
        other => return Err(BuildError::NotAStruct(other.kind_name().to_string())),
    };

    let mut schema = ObjectSchema::default();
    for field in &record.fields {
        if field.is_meta() {
            apply_struct_meta(&mut schema, &field.tag);
            continue;
        }

        let wire_name = field.wire_name();
        if wire_name == "-" {
            trace!(type_name = %record.name, field = %field.name, "field excluded from schema");
            continue;
        }

        let field_schema =
            build_field_schema(field, wire_name).map_err(|e| e.in_field(&field.name))?;
        schema.fields.insert(wire_name.to_string(), field_schema);
    }

    debug!(
        type_name = %record.name,
        fields = schema.fields.len(),
        "built object schema"
    );
    Ok(schema)
}

fn apply_struct_meta(schema: &mut ObjectSchema, raw: &str) {
    let opts = TagOptions::parse(raw);
    if let Some(title) = opts.get("title") {
        schema.title = title.to_string();
    }
    if let Some(description) = opts.get("description") {
        schema.description = description.to_string();
    }
    if let Some(allowed) = opts.get("additionalProperties") {
        schema.additional_properties = Some(allowed == "true");
    }
    for (source, dependents) in opts.with_prefix(DEPENDENT_REQUIRED_PREFIX) {
        schema
            .dependent_required
            .entry(source.to_string())
            .or_default()
            .extend(split_list(dependents));
    }
}

fn build_field_schema(field: &FieldShape, wire_name: &str) -> Result<FieldSchema, BuildError> {
    let (shape, optional) = field.shape.strip_optional();
    let opts = TagOptions::parse(&field.tag);

    // Optional references stay optional unless `required` is declared outright.
    let required = opts.is_true("required")
        || (!optional
            && tags::has_key(&field.tag, "required")
            && opts.get("required") != Some("false"));

    let kind = match shape {
        TypeShape::String => FieldKind::String(string_constraints(&opts, required)?),
        TypeShape::Integer => FieldKind::Integer(number_constraints(&opts, required)?),
        TypeShape::Number => FieldKind::Number(number_constraints(&opts, required)?),
        TypeShape::Boolean => FieldKind::Boolean(BoolConstraints {
            constant: opts.get("const").map(|v| v == "true"),
            required,
        }),
        TypeShape::Array(_) => FieldKind::Array(array_constraints(&opts, required)?),
        TypeShape::Map(_) => FieldKind::Map(map_constraints(&opts, required)?),
        TypeShape::Struct(_) => FieldKind::Object(Box::new(build_object_schema(shape)?)),
        TypeShape::Optional(_) | TypeShape::Any => FieldKind::Any,
    };

    let mut schema = FieldSchema::new(wire_name, kind);
    schema.required = required;
    schema.optional = optional;
    schema.nullable = opts.is_true("nullable");
    schema.default = opts.get("default").map(str::to_string);

    if let Some(raw) = opts.get("not") {
        schema.not = Some(Box::new(build_branch(raw)?));
    }
    schema.any_of = build_branches(opts.get("anyOf"))?;
    schema.one_of = build_branches(opts.get("oneOf"))?;
    schema.all_of = build_branches(opts.get("allOf"))?;

    Ok(schema)
}

fn build_branches(raw: Option<&str>) -> Result<Vec<BranchSchema>, BuildError> {
    match raw {
        Some(raw) => raw.split(BRANCH_SEPARATOR).map(build_branch).collect(),
        None => Ok(Vec::new()),
    }
}

/// Builds a kind-agnostic branch by running every scalar constraint builder
/// over the same options. A `const` literal only populates the number and
/// boolean sets when it reads as that type.
fn build_branch(raw: &str) -> Result<BranchSchema, BuildError> {
    let opts = TagOptions::parse(raw);

    let mut number = NumberConstraints {
        minimum: parse_f64(&opts, "minimum")?,
        maximum: parse_f64(&opts, "maximum")?,
        exclusive_minimum: parse_f64(&opts, "exclusiveMinimum")?,
        exclusive_maximum: parse_f64(&opts, "exclusiveMaximum")?,
        multiple_of: parse_f64(&opts, "multipleOf")?,
        ..NumberConstraints::default()
    };
    number.constant = opts.get("const").and_then(|v| v.parse().ok());

    let boolean = BoolConstraints {
        constant: match opts.get("const") {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        },
        required: false,
    };

    Ok(BranchSchema {
        string: string_constraints(&opts, false)?,
        number,
        boolean,
    })
}

fn string_constraints(opts: &TagOptions, required: bool) -> Result<StringConstraints, BuildError> {
    Ok(StringConstraints {
        min_length: parse_usize(opts, "minLength")?,
        max_length: parse_usize(opts, "maxLength")?,
        pattern: opts.get("pattern").map(str::to_string),
        format: opts.get("format").map(str::to_string),
        enumeration: opts.get("enum").map(split_list).unwrap_or_default(),
        constant: opts.get("const").map(str::to_string),
        required,
    })
}

fn number_constraints(opts: &TagOptions, required: bool) -> Result<NumberConstraints, BuildError> {
    Ok(NumberConstraints {
        minimum: parse_f64(opts, "minimum")?,
        maximum: parse_f64(opts, "maximum")?,
        exclusive_minimum: parse_f64(opts, "exclusiveMinimum")?,
        exclusive_maximum: parse_f64(opts, "exclusiveMaximum")?,
        multiple_of: parse_f64(opts, "multipleOf")?,
        constant: parse_f64(opts, "const")?,
        required,
    })
}

fn array_constraints(opts: &TagOptions, required: bool) -> Result<ArrayConstraints, BuildError> {
    let items_raw = opts
        .with_prefix(ITEMS_PREFIX)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(",");
    let items = if items_raw.is_empty() {
        None
    } else {
        Some(Box::new(build_branch(&items_raw)?))
    };

    Ok(ArrayConstraints {
        min_items: parse_usize(opts, "minItems")?,
        max_items: parse_usize(opts, "maxItems")?,
        unique_items: opts.is_true("uniqueItems"),
        items,
        required,
    })
}

fn map_constraints(opts: &TagOptions, required: bool) -> Result<MapConstraints, BuildError> {
    Ok(MapConstraints {
        min_properties: parse_usize(opts, "minProperties")?,
        max_properties: parse_usize(opts, "maxProperties")?,
        required,
    })
}

fn parse_usize(opts: &TagOptions, key: &str) -> Result<Option<usize>, BuildError> {
    opts.get(key)
        .map(|value| {
            value.parse().map_err(|source| BuildError::InvalidInteger {
                key: key.to_string(),
                value: value.to_string(),
                source,
            })
        })
        .transpose()
}

fn parse_f64(opts: &TagOptions, key: &str) -> Result<Option<f64>, BuildError> {
    opts.get(key)
        .map(|value| {
            value.parse().map_err(|source| BuildError::InvalidNumber {
                key: key.to_string(),
                value: value.to_string(),
                source,
            })
        })
        .transpose()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::StructShape;

    fn record(fields: Vec<FieldShape>) -> TypeShape {
        fields
            .into_iter()
            .fold(StructShape::new("Fixture"), StructShape::field)
            .into()
    }

    fn single(field: FieldShape) -> FieldSchema {
        let schema = build_object_schema(&record(vec![field])).unwrap();
        schema.fields.into_iter().next().unwrap().1
    }

    #[test]
    fn test_root_must_be_struct() {
        let err = build_object_schema(&TypeShape::String).unwrap_err();
        assert_eq!(err, BuildError::NotAStruct("string".to_string()));
    }

    #[test]
    fn test_string_constraints_parsed() {
        let field = single(
            FieldShape::of::<String>("role")
                .tag("minLength=2,maxLength=8,pattern=^[a-z]+$,format=email,enum=admin|viewer,const=admin,required"),
        );
        assert!(field.required);
        match field.kind {
            FieldKind::String(c) => {
                assert_eq!(c.min_length, Some(2));
                assert_eq!(c.max_length, Some(8));
                assert_eq!(c.pattern.as_deref(), Some("^[a-z]+$"));
                assert_eq!(c.format.as_deref(), Some("email"));
                assert_eq!(c.enumeration, vec!["admin", "viewer"]);
                assert_eq!(c.constant.as_deref(), Some("admin"));
                assert!(c.required);
            }
            other => panic!("expected string kind, got {:?}", other),
        }
    }

    #[test]
    fn test_number_constraints_parsed() {
        let field = single(
            FieldShape::of::<f64>("score")
                .tag("minimum=0,maximum=100,exclusiveMinimum=-1,exclusiveMaximum=101,multipleOf=0.5,const=50"),
        );
        match field.kind {
            FieldKind::Number(c) => {
                assert_eq!(c.minimum, Some(0.0));
                assert_eq!(c.maximum, Some(100.0));
                assert_eq!(c.exclusive_minimum, Some(-1.0));
                assert_eq!(c.exclusive_maximum, Some(101.0));
                assert_eq!(c.multiple_of, Some(0.5));
                assert_eq!(c.constant, Some(50.0));
            }
            other => panic!("expected number kind, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_numeric_literal_names_field() {
        let shape = record(vec![FieldShape::of::<String>("Name").tag("minLength=two")]);
        let err = build_object_schema(&shape).unwrap_err();
        assert_eq!(err.field_path(), Some("Name".to_string()));
        assert!(err.to_string().contains("minLength must be an integer"));

        let shape = record(vec![FieldShape::of::<i32>("Age").tag("maximum=old")]);
        let err = build_object_schema(&shape).unwrap_err();
        assert!(err.to_string().contains("maximum must be a number"));
    }

    #[test]
    fn test_optional_reference_not_required_by_default() {
        let field = single(FieldShape::of::<Option<String>>("nick").tag("minLength=2"));
        assert!(field.optional);
        assert!(!field.required);
        assert!(matches!(field.kind, FieldKind::String(_)));

        let field = single(FieldShape::of::<Option<String>>("nick").tag("required"));
        assert!(field.required);
    }

    #[test]
    fn test_explicit_required_false() {
        let field = single(FieldShape::of::<String>("name").tag("required=false"));
        assert!(!field.required);
    }

    #[test]
    fn test_dash_wire_name_excludes_field() {
        let shape = record(vec![
            FieldShape::of::<String>("secret").rename("-").tag("required,minLength=10"),
            FieldShape::of::<String>("name").rename("display_name,omitempty"),
        ]);
        let schema = build_object_schema(&shape).unwrap();
        assert_eq!(schema.fields.keys().collect::<Vec<_>>(), vec!["display_name"]);
        assert_eq!(schema.fields["display_name"].wire_name, "display_name");
    }

    #[test]
    fn test_struct_meta() {
        let shape: TypeShape = StructShape::new("Billing")
            .meta("title=Billing,description=Payment details,additionalProperties=false,dependentRequired:billing_id=credit_card|billing_addr")
            .field(FieldShape::of::<String>("billing_id"))
            .into();
        let schema = build_object_schema(&shape).unwrap();

        assert_eq!(schema.title, "Billing");
        assert_eq!(schema.description, "Payment details");
        assert_eq!(schema.additional_properties, Some(false));
        assert_eq!(
            schema.dependent_required["billing_id"],
            vec!["credit_card", "billing_addr"]
        );
        assert!(!schema.fields.contains_key("_"));
    }

    #[test]
    fn test_items_prefix_builds_element_schema() {
        let field = single(
            FieldShape::of::<Vec<String>>("tags")
                .tag("items:minLength=5,minItems=1,items:pattern=^t"),
        );
        match field.kind {
            FieldKind::Array(c) => {
                assert_eq!(c.min_items, Some(1));
                let items = c.items.expect("items schema");
                assert_eq!(items.string.min_length, Some(5));
                assert_eq!(items.string.pattern.as_deref(), Some("^t"));
            }
            other => panic!("expected array kind, got {:?}", other),
        }
    }

    #[test]
    fn test_composition_branches_split_on_semicolon() {
        let field = single(
            FieldShape::of::<String>("code")
                .tag("anyOf=minLength=5;pattern=^[0-9]+$,not=const=00000"),
        );
        assert_eq!(field.any_of.len(), 2);
        assert_eq!(field.any_of[0].string.min_length, Some(5));
        assert_eq!(field.any_of[1].string.pattern.as_deref(), Some("^[0-9]+$"));

        let not = field.not.expect("not branch");
        assert_eq!(not.string.constant.as_deref(), Some("00000"));
        assert_eq!(not.number.constant, Some(0.0));
        assert_eq!(not.boolean.constant, None);
    }

    #[test]
    fn test_branch_const_non_numeric_is_string_only() {
        let field = single(FieldShape::of::<String>("lang").tag("oneOf=const=en;const=it"));
        assert_eq!(field.one_of[0].string.constant.as_deref(), Some("en"));
        assert_eq!(field.one_of[0].number.constant, None);
    }

    #[test]
    fn test_nested_struct_recurses() {
        let inner: TypeShape = StructShape::new("Inner")
            .field(FieldShape::of::<i64>("value").tag("minimum=1"))
            .into();
        let shape = record(vec![FieldShape::new("inner", inner).tag("required")]);
        let schema = build_object_schema(&shape).unwrap();

        let nested = schema.fields["inner"].nested().expect("nested schema");
        assert!(nested.fields.contains_key("value"));
    }

    #[test]
    fn test_map_and_nullable() {
        let field = single(
            FieldShape::of::<std::collections::HashMap<String, String>>("labels")
                .tag("minProperties=1,maxProperties=3,nullable"),
        );
        assert!(field.nullable);
        match field.kind {
            FieldKind::Map(c) => {
                assert_eq!(c.min_properties, Some(1));
                assert_eq!(c.max_properties, Some(3));
            }
            other => panic!("expected map kind, got {:?}", other),
        }
    }
}
