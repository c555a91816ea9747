//! Field paths for locating violations inside nested values.
//!
//! A [`FieldPath`] is a chain of wire names and element indices rendered as
//! `address.street` or `tags[2]`. Paths are immutable: every `join_*` call
//! returns a new path so sibling fields can share a common prefix.

use std::fmt::{self, Display};

/// A single step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A struct field, addressed by its wire name.
    Field(String),
    /// An element of an array field.
    Index(usize),
}

/// The location of a value relative to the root of a validated struct.
///
/// # Example
///
/// ```rust
/// use tagschema::FieldPath;
///
/// let path = FieldPath::root()
///     .join_field("orders")
///     .join_index(3)
///     .join_field("sku");
///
/// assert_eq!(path.to_string(), "orders[3].sku");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, pointing at the validated value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn join_field(&self, name: impl Into<String>) -> Self {
        self.join(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn join_index(&self, index: usize) -> Self {
        self.join(PathSegment::Index(index))
    }

    fn join(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments in the path.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The last segment, or `None` at the root.
    pub fn leaf(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
