//! file: core/src/loader/arguments.rs
//! description: argument types handed to strategy objects.

use crate::ir::Expression;
use crate::location::Location;
use crate::resolve::TypeRef;

/// One resolved argument for a constructor call or property assignment.
/// Either field may be absent when resolution failed; callers decide
/// whether the absence is fatal to their own operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentInfo {
    pub type_info: Option<TypeRef>,
    pub expression: Option<Expression>,
    pub position: Location,
}

impl ArgumentInfo {
    pub fn new(position: Location) -> Self {
        ArgumentInfo {
            type_info: None,
            expression: None,
            position,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.type_info.is_some() && self.expression.is_some()
    }
}

/// Ordered multi-map from property name to resolved arguments. Loaders
/// observe insertion order, so constructor arguments keep the order they
/// were gathered in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentMap {
    entries: Vec<(String, ArgumentInfo)>,
}

impl ArgumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, property: impl Into<String>, argument: ArgumentInfo) {
        self.entries.push((property.into(), argument));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == property)
    }

    /// All arguments gathered for one property, in insertion order.
    pub fn values_of<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a ArgumentInfo> {
        self.entries
            .iter()
            .filter(move |(name, _)| name == property)
            .map(|(_, argument)| argument)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentInfo)> {
        self.entries
            .iter()
            .map(|(name, argument)| (name.as_str(), argument))
    }
}
