//! Kind-specific constraint sets.
//!
//! Every limit is optional and present only when the annotation declared it.
//! `required` mirrors the owning field's flag so the string/array/map checks
//! can apply their "required but empty" short-circuit on their own.

use super::BranchSchema;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringConstraints {
    /// Minimum length in Unicode scalar values.
    pub min_length: Option<usize>,
    /// Maximum length in Unicode scalar values.
    pub max_length: Option<usize>,
    /// Regular expression source, compiled at validation time.
    pub pattern: Option<String>,
    /// Named format (`email`, `uri`, `date`, ...).
    pub format: Option<String>,
    pub enumeration: Vec<String>,
    pub constant: Option<String>,
    pub required: bool,
}

impl StringConstraints {
    /// True when no limit is declared.
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.format.is_none()
            && self.enumeration.is_empty()
            && self.constant.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberConstraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    pub multiple_of: Option<f64>,
    pub constant: Option<f64>,
    pub required: bool,
}

impl NumberConstraints {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.maximum.is_none()
            && self.exclusive_minimum.is_none()
            && self.exclusive_maximum.is_none()
            && self.multiple_of.is_none()
            && self.constant.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolConstraints {
    pub constant: Option<bool>,
    pub required: bool,
}

impl BoolConstraints {
    pub fn is_empty(&self) -> bool {
        self.constant.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayConstraints {
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,
    /// Applied to every element, collected from `items:<key>` tokens.
    pub items: Option<Box<BranchSchema>>,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapConstraints {
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,
    pub required: bool,
}
