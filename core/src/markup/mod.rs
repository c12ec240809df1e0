pub mod node;

pub use node::{
    AttributeNode, BindingMode, ConstructNode, NodeId, SetterValue, TextNode, ValueNode,
};
