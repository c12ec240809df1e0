//! file: core/src/ir/expr.rs
//! description: expression nodes of the emitted wiring script.

use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// Reference to a named instance slot.
    Reference { name: String },
    /// Member access on a parent expression.
    Member { parent: Box<Expression>, name: String },
    /// A literal value.
    Literal { value: Value },
    /// Construction of a new instance of a named type.
    Construct { type_name: String, args: Vec<Expression> },
    /// A method invocation on a target expression.
    Invoke { target: Box<Expression>, method: String, args: Vec<Expression> },
}

/// An expression of the emitted script, optionally tagged with the markup
/// position it originated from for diagnostic mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub position: Option<Location>,
}

impl Expression {
    pub fn new(kind: ExpressionKind) -> Self {
        Expression {
            kind,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Location) -> Self {
        self.position = Some(position);
        self
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expression::new(ExpressionKind::Reference { name: name.into() })
    }

    pub fn member(parent: Expression, name: impl Into<String>) -> Self {
        Expression::new(ExpressionKind::Member {
            parent: Box::new(parent),
            name: name.into(),
        })
    }

    pub fn literal(value: Value) -> Self {
        Expression::new(ExpressionKind::Literal { value })
    }

    pub fn construct(type_name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::new(ExpressionKind::Construct {
            type_name: type_name.into(),
            args,
        })
    }

    pub fn invoke(target: Expression, method: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::new(ExpressionKind::Invoke {
            target: Box::new(target),
            method: method.into(),
            args,
        })
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_args(f: &mut std::fmt::Formatter<'_>, args: &[Expression]) -> std::fmt::Result {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            Ok(())
        }

        match &self.kind {
            ExpressionKind::Reference { name } => write!(f, "{}", name),
            ExpressionKind::Member { parent, name } => write!(f, "{}.{}", parent, name),
            ExpressionKind::Literal { value } => write!(f, "{}", value),
            ExpressionKind::Construct { type_name, args } => {
                write!(f, "new {}(", type_name)?;
                fmt_args(f, args)?;
                write!(f, ")")
            }
            ExpressionKind::Invoke { target, method, args } => {
                write!(f, "{}.{}(", target, method)?;
                fmt_args(f, args)?;
                write!(f, ")")
            }
        }
    }
}
