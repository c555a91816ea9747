//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stillwater::Validation;
use tagschema::{
    Describe, FieldShape, StructShape, TypeShape, ValidationError, ValidationErrors,
    ValidationResult,
};

/// The errors of a failed result, or an empty list on success.
pub fn errors_of(result: ValidationResult<()>) -> Vec<ValidationError> {
    match result {
        Validation::Success(()) => Vec::new(),
        Validation::Failure(errors) => errors.into_vec(),
    }
}

pub fn expect_failure(result: ValidationResult<()>) -> ValidationErrors {
    match result {
        Validation::Success(()) => panic!("expected validation to fail"),
        Validation::Failure(errors) => errors,
    }
}

pub fn paths(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(|e| e.path.to_string()).collect()
}

pub fn codes(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.code.as_str()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub tags: Vec<String>,
    pub nickname: Option<String>,
}

impl Describe for User {
    fn shape() -> TypeShape {
        StructShape::new("User")
            .meta("title=User,description=A registered account")
            .field(FieldShape::of::<String>("name").tag("required,minLength=2,maxLength=50"))
            .field(FieldShape::of::<String>("email").tag("required,format=email"))
            .field(FieldShape::of::<i64>("age").tag("minimum=0,maximum=150"))
            .field(FieldShape::of::<Vec<String>>("tags").tag("uniqueItems,maxItems=5"))
            .field(FieldShape::of::<Option<String>>("nickname").tag("minLength=3"))
            .into()
    }
}

pub fn valid_user() -> User {
    User {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        age: 30,
        tags: vec!["admin".to_string(), "ops".to_string()],
        nickname: None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub step: f64,
    pub ratio: f64,
    pub count: i64,
}

impl Describe for Measurement {
    fn shape() -> TypeShape {
        StructShape::new("Measurement")
            .field(FieldShape::of::<f64>("step").tag("multipleOf=0.1"))
            .field(FieldShape::of::<f64>("ratio").tag("exclusiveMinimum=0,exclusiveMaximum=1"))
            .field(FieldShape::of::<i64>("count").tag("minimum=1,maximum=10"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inner {
    pub value: String,
}

impl Describe for Inner {
    fn shape() -> TypeShape {
        StructShape::new("Inner")
            .field(FieldShape::of::<String>("value").tag("required"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Middle {
    pub inner: Inner,
}

impl Describe for Middle {
    fn shape() -> TypeShape {
        StructShape::new("Middle")
            .field(FieldShape::of::<Inner>("inner"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outer {
    pub mid: Middle,
}

impl Describe for Outer {
    fn shape() -> TypeShape {
        StructShape::new("Outer")
            .field(FieldShape::of::<Middle>("mid"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Describe for Address {
    fn shape() -> TypeShape {
        StructShape::new("Address")
            .field(FieldShape::of::<String>("street").tag("required,minLength=3"))
            .field(FieldShape::of::<String>("city").tag("required"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub home: Address,
    pub work: Option<Address>,
    pub billing: Option<Address>,
}

impl Describe for Customer {
    fn shape() -> TypeShape {
        StructShape::new("Customer")
            .field(FieldShape::of::<String>("name").tag("required"))
            .field(FieldShape::of::<Address>("home"))
            .field(FieldShape::of::<Option<Address>>("work"))
            .field(FieldShape::of::<Option<Address>>("billing").tag("required"))
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lang: String,
    pub limit: i64,
    pub verbose: bool,
    pub theme: Option<String>,
}

impl Describe for Settings {
    fn shape() -> TypeShape {
        StructShape::new("Settings")
            .field(FieldShape::of::<String>("lang").tag("required,enum=en|fr|de,default=en"))
            .field(FieldShape::of::<i64>("limit").tag("default=25,maximum=100"))
            .field(FieldShape::of::<bool>("verbose").tag("default=true"))
            .field(FieldShape::of::<Option<String>>("theme").tag("default=dark"))
            .into()
    }
}

/// Deserialized without `serde(default)`, so missing keys fail decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub age: i64,
    pub level: u8,
}

impl Describe for Account {
    fn shape() -> TypeShape {
        StructShape::new("Account")
            .field(FieldShape::of::<String>("name").tag("required,minLength=2"))
            .field(FieldShape::of::<i64>("age").tag("minimum=18"))
            .field(FieldShape::of::<u8>("level"))
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strict {
    pub name: String,
    pub port: i64,
}

impl Describe for Strict {
    fn shape() -> TypeShape {
        StructShape::new("Strict")
            .meta("additionalProperties=false")
            .field(FieldShape::of::<String>("name").tag("required"))
            .field(FieldShape::of::<i64>("port").tag("minimum=1,maximum=65535,default=8080"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    pub card: String,
    pub billing_address: String,
    pub cvv: String,
}

impl Describe for Payment {
    fn shape() -> TypeShape {
        StructShape::new("Payment")
            .meta("dependentRequired:card=billing_address|cvv")
            .field(FieldShape::of::<String>("card"))
            .field(FieldShape::of::<String>("billing_address"))
            .field(FieldShape::of::<String>("cvv"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coded {
    pub code: String,
    pub id: String,
    pub level: i64,
    pub slug: String,
}

impl Describe for Coded {
    fn shape() -> TypeShape {
        StructShape::new("Coded")
            .field(FieldShape::of::<String>("code").tag("oneOf=minLength=5;pattern=^[0-9]+$"))
            .field(FieldShape::of::<String>("id").tag("anyOf=format=uuid;pattern=^id-[0-9]+$"))
            .field(FieldShape::of::<i64>("level").tag("allOf=minimum=1;maximum=5"))
            .field(FieldShape::of::<String>("slug").tag("not=pattern=^admin"))
            .into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub skus: Vec<String>,
    pub scores: Vec<i64>,
    pub labels: HashMap<String, String>,
}

impl Describe for Inventory {
    fn shape() -> TypeShape {
        StructShape::new("Inventory")
            .field(
                FieldShape::of::<Vec<String>>("skus")
                    .tag("required,minItems=1,items:pattern=^[A-Z]{3}-[0-9]{4}$"),
            )
            .field(FieldShape::of::<Vec<i64>>("scores").tag("uniqueItems,items:minimum=0"))
            .field(FieldShape::of::<HashMap<String, String>>("labels").tag("maxProperties=2"))
            .into()
    }
}
