//! Tests for nested records, optional references and record-level rules.

mod common;

use common::{
    codes, errors_of, expect_failure, paths, valid_user, Address, Customer, Inner, Middle, Outer,
    Payment, User,
};
use serde_json::json;
use tagschema::{build_schema, validate, validate_value};

fn address(street: &str, city: &str) -> Address {
    Address {
        street: street.to_string(),
        city: city.to_string(),
    }
}

fn customer() -> Customer {
    Customer {
        name: "Ada".to_string(),
        home: address("Main Street", "Springfield"),
        work: None,
        billing: Some(address("Elm Street", "Shelbyville")),
    }
}

#[test]
fn test_three_level_path() {
    let errors = errors_of(validate(&Outer::default()).unwrap());
    assert_eq!(paths(&errors), vec!["mid.inner.value"]);
    assert_eq!(errors[0].to_string(), "mid.inner.value: field is required (got: \"\")");

    let filled = Outer {
        mid: Middle {
            inner: Inner {
                value: "x".to_string(),
            },
        },
    };
    assert!(validate(&filled).unwrap().is_success());
}

#[test]
fn test_nested_errors_prefixed_with_parent() {
    let value = Customer {
        home: address("St", ""),
        ..customer()
    };
    let errors = errors_of(validate(&value).unwrap());
    assert_eq!(paths(&errors), vec!["home.street", "home.city"]);
}

#[test]
fn test_absent_optional_reference_not_validated() {
    assert!(validate(&customer()).unwrap().is_success());

    let present = Customer {
        work: Some(address("", "")),
        ..customer()
    };
    let errors = errors_of(validate(&present).unwrap());
    assert_eq!(paths(&errors), vec!["work.street", "work.city"]);
}

#[test]
fn test_absent_required_reference_single_error() {
    let value = Customer {
        billing: None,
        ..customer()
    };
    let errors = errors_of(validate(&value).unwrap());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "billing");
    assert_eq!(errors[0].message, "field is required");
}

#[test]
fn test_optional_scalar_reference() {
    let absent = valid_user();
    assert!(validate(&absent).unwrap().is_success());

    let short = User {
        nickname: Some("al".to_string()),
        ..valid_user()
    };
    let errors = errors_of(validate(&short).unwrap());
    assert_eq!(paths(&errors), vec!["nickname"]);
    assert_eq!(codes(&errors), vec!["min_length"]);
}

#[test]
fn test_four_violations_in_one_value() {
    let user = User {
        name: "A".to_string(),
        email: "invalid".to_string(),
        age: -5,
        tags: vec!["x".to_string(), "x".to_string()],
        nickname: None,
    };
    let errors = expect_failure(validate(&user).unwrap());
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.paths(), vec!["name", "email", "age", "tags"]);
}

#[test]
fn test_none_root_is_nil() {
    let errors = expect_failure(validate(&None::<User>).unwrap());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "nil");
    assert_eq!(errors.first().to_string(), "(root): value is nil");

    assert!(validate(&Some(valid_user())).unwrap().is_success());
}

#[test]
fn test_non_record_root_is_build_error() {
    let err = validate(&vec![1, 2, 3]).unwrap_err();
    assert_eq!(err.to_string(), "expected struct, got array");
}

#[test]
fn test_dependent_required() {
    let value = Payment {
        card: "4111111111111111".to_string(),
        billing_address: String::new(),
        cvv: "123".to_string(),
    };
    let errors = errors_of(validate(&value).unwrap());
    assert_eq!(paths(&errors), vec!["billing_address"]);
    assert_eq!(codes(&errors), vec!["dependent_required"]);
    assert_eq!(
        errors[0].message,
        "field is required when 'card' is present"
    );

    assert!(validate(&Payment::default()).unwrap().is_success());
}

#[test]
fn test_raw_value_missing_fields_are_zero_values() {
    let schema = build_schema::<Customer>().unwrap();
    let errors = errors_of(validate_value(&json!({"billing": null}), &schema));
    assert_eq!(
        paths(&errors),
        vec!["name", "home.street", "home.city", "billing"]
    );
}

#[test]
fn test_raw_value_type_mismatch() {
    let schema = build_schema::<User>().unwrap();
    let errors = errors_of(validate_value(
        &json!({"name": "Bob", "email": "bob@example.com", "age": "old", "tags": []}),
        &schema,
    ));
    assert_eq!(paths(&errors), vec!["age"]);
    assert_eq!(errors[0].message, "expected integer, got string");
}
