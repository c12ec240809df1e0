//! file: core/src/markup/node.rs
//! description: resolved markup tree node definitions.
//!
//! Defines `ValueNode` along with the attribute/constructor node types and
//! setter values. A tree of these nodes is produced by an external markup
//! parser and annotated by an external resolution phase before the lowering
//! pass consumes it; the lowering never mutates it.

use crate::location::Location;

/// Identifier assigned to every markup node at construction time. The
/// resolution phase keys its per-node annotations by this id.
pub type NodeId = usize;

fn create_id() -> NodeId {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// How a setter's values are bound to the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingMode {
    /// Plain values, assigned through the owning loader.
    Default,
    /// The sole value names an already-declared instance to rebind to.
    Rebind,
    /// A named binder turns the raw text into an argument expression.
    Named(String),
}

/// One declared property setter: a binding mode plus the ordered values
/// supplied for the property. The value list is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SetterValue {
    pub binding: BindingMode,
    pub values: Vec<ValueNode>,
    pub position: Location,
}

impl SetterValue {
    pub fn new(binding: BindingMode, values: Vec<ValueNode>, position: Location) -> Self {
        SetterValue {
            binding,
            values,
            position,
        }
    }
}

/// A raw text value in value position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    id: NodeId,
    pub text: String,
    pub position: Location,
}

impl TextNode {
    pub fn new(text: impl Into<String>, position: Location) -> Self {
        TextNode {
            id: create_id(),
            text: text.into(),
            position,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

/// A set of property setters attached to a (possibly anonymous) instance
/// name. In tree position an attribute node refers to an instance that
/// already exists; only its properties are filled.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNode {
    id: NodeId,
    /// Symbolic instance name; `None` for anonymous nodes.
    pub instance_name: Option<String>,
    /// Setters in declaration order. Property names are unique.
    pub setters: Vec<(String, SetterValue)>,
    pub position: Location,
}

impl AttributeNode {
    pub fn new(instance_name: Option<String>, position: Location) -> Self {
        AttributeNode {
            id: create_id(),
            instance_name,
            setters: Vec::new(),
            position,
        }
    }

    pub fn with_setter(mut self, property: impl Into<String>, setter: SetterValue) -> Self {
        self.setters.push((property.into(), setter));
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Look up a declared setter by property name.
    pub fn setter(&self, property: &str) -> Option<&SetterValue> {
        self.setters
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, setter)| setter)
    }
}

/// An attribute node plus a type reference: a fresh instance of the named
/// type is constructed, then its properties are filled. May be the
/// designated root of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructNode {
    pub type_name: String,
    pub attributes: AttributeNode,
}

impl ConstructNode {
    pub fn new(
        type_name: impl Into<String>,
        instance_name: Option<String>,
        position: Location,
    ) -> Self {
        ConstructNode {
            type_name: type_name.into(),
            attributes: AttributeNode::new(instance_name, position),
        }
    }

    pub fn with_setter(mut self, property: impl Into<String>, setter: SetterValue) -> Self {
        self.attributes = self.attributes.with_setter(property, setter);
        self
    }

    pub fn id(&self) -> NodeId {
        self.attributes.id()
    }
}

/// A value in the markup tree. The union is closed: every consumer matches
/// exhaustively on these three variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    Text(TextNode),
    Attributes(AttributeNode),
    Construct(ConstructNode),
}

impl ValueNode {
    pub fn id(&self) -> NodeId {
        match self {
            ValueNode::Text(node) => node.id(),
            ValueNode::Attributes(node) => node.id(),
            ValueNode::Construct(node) => node.id(),
        }
    }

    pub fn position(&self) -> &Location {
        match self {
            ValueNode::Text(node) => &node.position,
            ValueNode::Attributes(node) => &node.position,
            ValueNode::Construct(node) => &node.attributes.position,
        }
    }

    /// Instance name carried by the node, if it is an instance-bearing kind.
    pub fn instance_name(&self) -> Option<&str> {
        match self {
            ValueNode::Text(_) => None,
            ValueNode::Attributes(node) => node.instance_name.as_deref(),
            ValueNode::Construct(node) => node.attributes.instance_name.as_deref(),
        }
    }

    /// The attribute set of an instance-bearing node.
    pub fn as_attributes(&self) -> Option<&AttributeNode> {
        match self {
            ValueNode::Text(_) => None,
            ValueNode::Attributes(node) => Some(node),
            ValueNode::Construct(node) => Some(&node.attributes),
        }
    }
}
