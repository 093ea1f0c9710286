//! JSONPath types based on RFC 9535.

use std::fmt;

use serde_json::Value;

use crate::util::format_normalized_path;

/// Selector types for JSONPath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Named selector for property access: `.name`, `['key']`
    Name(String),
    /// Index selector for array element access: `[0]`, `[-1]`
    Index(isize),
    /// Slice selector for array slicing: `[start:end:step]`
    Slice { start: Option<isize>, end: Option<isize>, step: Option<isize> },
    /// Wildcard selector for selecting all children: `.*`, `[*]`
    Wildcard,
}

/// Path segment containing one or more selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Selectors in this segment, applied in order.
    pub selectors: Vec<Selector>,
    /// Whether this is a descendant segment (`..`).
    pub recursive: bool,
}

impl PathSegment {
    pub fn new(selectors: Vec<Selector>, recursive: bool) -> Self {
        Self { selectors, recursive }
    }
}

/// Complete JSONPath expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JSONPath {
    /// Path segments.
    pub segments: Vec<PathSegment>,
}

impl JSONPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

/// A component of a normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

/// Location of exactly one node inside a document.
///
/// Produced by [`JsonPathEval::locate`](crate::JsonPathEval::locate). A
/// normalized path stays valid for as long as the document keeps its shape,
/// so values may be rewritten in place between lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    components: Vec<PathComponent>,
}

impl NormalizedPath {
    pub fn new(components: Vec<PathComponent>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    pub(crate) fn child(&self, component: PathComponent) -> Self {
        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.extend_from_slice(&self.components);
        components.push(component);
        Self { components }
    }

    /// Immutable navigation to the node at this location.
    pub fn get<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        self.components
            .iter()
            .try_fold(doc, |current, component| match (component, current) {
                (PathComponent::Key(key), Value::Object(map)) => map.get(key),
                (PathComponent::Index(idx), Value::Array(arr)) => arr.get(*idx),
                _ => None,
            })
    }

    /// Mutable navigation to the node at this location.
    pub fn get_mut<'a>(&self, doc: &'a mut Value) -> Option<&'a mut Value> {
        self.components
            .iter()
            .try_fold(doc, |current, component| match (component, current) {
                (PathComponent::Key(key), Value::Object(map)) => map.get_mut(key),
                (PathComponent::Index(idx), Value::Array(arr)) => arr.get_mut(*idx),
                _ => None,
            })
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_normalized_path(&self.components))
    }
}

impl From<Vec<PathComponent>> for NormalizedPath {
    fn from(components: Vec<PathComponent>) -> Self {
        Self::new(components)
    }
}
