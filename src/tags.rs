//! Annotation grammar.
//!
//! A validation annotation is a comma-separated list of tokens. A token is
//! either a bare keyword (`required`, `uniqueItems`), stored as `"true"`, or a
//! `key=value` pair where the value runs to the next comma:
//!
//! ```text
//! minLength=2,maxLength=50,pattern=^[a-z]+$,required
//! ```
//!
//! Commas cannot be escaped: a pattern containing a literal comma is split at
//! that comma. Namespaced keys such as `items:minLength` or
//! `dependentRequired:billing_id` are ordinary keys recognised by prefix.

use indexmap::IndexMap;

/// Parsed annotation: key → raw value, in first-seen order.
///
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    entries: IndexMap<String, String>,
}

impl TagOptions {
    /// Parses one raw annotation. The empty string yields no options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagschema::tags::TagOptions;
    ///
    /// let opts = TagOptions::parse("minLength=2, required ,enum=a|b");
    /// assert_eq!(opts.get("minLength"), Some("2"));
    /// assert_eq!(opts.get("required"), Some("true"));
    /// assert_eq!(opts.get("enum"), Some("a|b"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut entries = IndexMap::new();
        for token in split_tokens(raw) {
            match token.split_once('=') {
                Some((key, value)) => {
                    entries.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    entries.insert(token.to_string(), "true".to_string());
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when the key is present with the value `true` (bare flags included).
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Entries whose key starts with `prefix`, with the prefix stripped.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries
            .iter()
            .filter_map(move |(k, v)| k.strip_prefix(prefix).map(|rest| (rest, v.as_str())))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns true if the raw annotation contains `key` as a token, either bare
/// or with a value. Distinguishes an explicit `required=false` from a tag that
/// never mentions `required`.
pub fn has_key(raw: &str, key: &str) -> bool {
    split_tokens(raw).any(|token| {
        token == key
            || token
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
    })
}

fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}
