//! JSON Schema emission.
//!
//! Converts a resolved schema into a draft-07 compatible descriptor. This is
//! a pure structural transform; nothing is validated here.

use serde_json::{Map, Number, Value};

use crate::schema::{
    ArrayConstraints, BoolConstraints, BranchSchema, FieldKind, FieldSchema, MapConstraints,
    NumberConstraints, ObjectSchema, StringConstraints,
};

/// Trait for converting schema types to JSON Schema format.
pub trait ToJsonSchema {
    /// Converts this schema to a JSON Schema representation.
    fn to_json_schema(&self) -> Value;
}

impl ToJsonSchema for ObjectSchema {
    fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.to_json_schema()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::from("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !self.title.is_empty() {
            schema.insert("title".to_string(), Value::from(self.title.as_str()));
        }
        if !self.description.is_empty() {
            schema.insert(
                "description".to_string(),
                Value::from(self.description.as_str()),
            );
        }
        let required = self.required_fields();
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::from(required));
        }
        if let Some(allowed) = self.additional_properties {
            schema.insert("additionalProperties".to_string(), Value::Bool(allowed));
        }
        if !self.dependent_required.is_empty() {
            let dependencies: Map<String, Value> = self
                .dependent_required
                .iter()
                .map(|(source, deps)| (source.clone(), Value::from(deps.clone())))
                .collect();
            schema.insert(
                "dependentRequired".to_string(),
                Value::Object(dependencies),
            );
        }
        Value::Object(schema)
    }
}

impl ToJsonSchema for FieldSchema {
    fn to_json_schema(&self) -> Value {
        let mut schema = match &self.kind {
            FieldKind::String(c) => typed("string", |m| string_keywords(c, m)),
            FieldKind::Integer(c) => typed("integer", |m| number_keywords(c, m)),
            FieldKind::Number(c) => typed("number", |m| number_keywords(c, m)),
            FieldKind::Boolean(c) => typed("boolean", |m| bool_keywords(c, m)),
            FieldKind::Array(c) => typed("array", |m| array_keywords(c, m)),
            FieldKind::Map(c) => typed("object", |m| map_keywords(c, m)),
            FieldKind::Object(nested) => match nested.to_json_schema() {
                Value::Object(m) => m,
                _ => Map::new(),
            },
            FieldKind::Any => Map::new(),
        };

        if let Some(ref literal) = self.default {
            schema.insert("default".to_string(), default_value(literal, &self.kind));
        }
        if self.nullable {
            schema.insert("nullable".to_string(), Value::Bool(true));
        }
        if let Some(ref not) = self.not {
            schema.insert("not".to_string(), not.to_json_schema());
        }
        for (keyword, branches) in [
            ("anyOf", &self.any_of),
            ("oneOf", &self.one_of),
            ("allOf", &self.all_of),
        ] {
            if !branches.is_empty() {
                let emitted = branches.iter().map(ToJsonSchema::to_json_schema).collect();
                schema.insert(keyword.to_string(), Value::Array(emitted));
            }
        }
        Value::Object(schema)
    }
}

/// A branch names its `type` only when exactly one constraint set is
/// populated. Keywords of every populated set are emitted. A `const` that
/// populated several sets is written as the string literal, so `00000`
/// keeps its leading zeros.
impl ToJsonSchema for BranchSchema {
    fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();
        let mut types = Vec::new();
        if !self.string.is_empty() {
            types.push("string");
            string_keywords(&self.string, &mut schema);
        }
        if !self.number.is_empty() {
            types.push("number");
            number_keywords(&self.number, &mut schema);
        }
        if !self.boolean.is_empty() {
            types.push("boolean");
            bool_keywords(&self.boolean, &mut schema);
        }
        if let Some(ref constant) = self.string.constant {
            schema.insert("const".to_string(), Value::from(constant.as_str()));
        }
        if let [only] = types.as_slice() {
            schema.insert("type".to_string(), Value::from(*only));
        }
        Value::Object(schema)
    }
}

fn typed(type_name: &str, keywords: impl FnOnce(&mut Map<String, Value>)) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::from(type_name));
    keywords(&mut schema);
    schema
}

fn string_keywords(c: &StringConstraints, schema: &mut Map<String, Value>) {
    if let Some(min) = c.min_length {
        schema.insert("minLength".to_string(), Value::from(min));
    }
    if let Some(max) = c.max_length {
        schema.insert("maxLength".to_string(), Value::from(max));
    }
    if let Some(ref pattern) = c.pattern {
        schema.insert("pattern".to_string(), Value::from(pattern.as_str()));
    }
    if let Some(ref format) = c.format {
        schema.insert("format".to_string(), Value::from(format.as_str()));
    }
    if !c.enumeration.is_empty() {
        schema.insert("enum".to_string(), Value::from(c.enumeration.clone()));
    }
    if let Some(ref constant) = c.constant {
        schema.insert("const".to_string(), Value::from(constant.as_str()));
    }
}

fn number_keywords(c: &NumberConstraints, schema: &mut Map<String, Value>) {
    for (keyword, bound) in [
        ("minimum", c.minimum),
        ("maximum", c.maximum),
        ("exclusiveMinimum", c.exclusive_minimum),
        ("exclusiveMaximum", c.exclusive_maximum),
        ("multipleOf", c.multiple_of),
        ("const", c.constant),
    ] {
        if let Some(n) = bound {
            schema.insert(keyword.to_string(), number_value(n));
        }
    }
}

fn bool_keywords(c: &BoolConstraints, schema: &mut Map<String, Value>) {
    if let Some(constant) = c.constant {
        schema.insert("const".to_string(), Value::Bool(constant));
    }
}

fn array_keywords(c: &ArrayConstraints, schema: &mut Map<String, Value>) {
    if let Some(min) = c.min_items {
        schema.insert("minItems".to_string(), Value::from(min));
    }
    if let Some(max) = c.max_items {
        schema.insert("maxItems".to_string(), Value::from(max));
    }
    if c.unique_items {
        schema.insert("uniqueItems".to_string(), Value::Bool(true));
    }
    if let Some(ref items) = c.items {
        schema.insert("items".to_string(), items.to_json_schema());
    }
}

fn map_keywords(c: &MapConstraints, schema: &mut Map<String, Value>) {
    if let Some(min) = c.min_properties {
        schema.insert("minProperties".to_string(), Value::from(min));
    }
    if let Some(max) = c.max_properties {
        schema.insert("maxProperties".to_string(), Value::from(max));
    }
}

/// Integral values are written as JSON integers so `0.0` round-trips as `0`.
pub fn number_value(n: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// The `default` keyword, typed per kind when the literal parses.
fn default_value(literal: &str, kind: &FieldKind) -> Value {
    let parsed = match kind {
        FieldKind::Integer(_) => literal.trim().parse::<i64>().ok().map(Value::from),
        FieldKind::Number(_) => literal.trim().parse::<f64>().ok().map(number_value),
        FieldKind::Boolean(_) => Some(Value::Bool(literal == "true")),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::from(literal))
}
