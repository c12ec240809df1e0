//! file: core/src/ir/stmt.rs
//! description: statement nodes and the output block of the emitted script.

use serde::{Deserialize, Serialize};

use super::expr::Expression;
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `target = value`
    Assign { target: Expression, value: Expression },
    /// Evaluate an expression for its effect.
    Eval { expression: Expression },
    /// Several statements emitted as one unit.
    Block { statements: Vec<Statement> },
}

/// A statement of the emitted script, optionally tagged with the markup
/// position it originated from for diagnostic mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub position: Option<Location>,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Statement {
            kind,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Location) -> Self {
        self.position = Some(position);
        self
    }

    pub fn assign(target: Expression, value: Expression) -> Self {
        Statement::new(StatementKind::Assign { target, value })
    }

    pub fn eval(expression: Expression) -> Self {
        Statement::new(StatementKind::Eval { expression })
    }

    pub fn block(statements: Vec<Statement>) -> Self {
        Statement::new(StatementKind::Block { statements })
    }

    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
        for _ in 0..indent {
            write!(f, "    ")?;
        }
        match &self.kind {
            StatementKind::Assign { target, value } => writeln!(f, "{} = {};", target, value),
            StatementKind::Eval { expression } => writeln!(f, "{};", expression),
            StatementKind::Block { statements } => {
                writeln!(f, "{{")?;
                for stmt in statements {
                    stmt.fmt_indented(f, indent + 1)?;
                }
                for _ in 0..indent {
                    write!(f, "    ")?;
                }
                writeln!(f, "}}")
            }
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// The ordered statement sequence accumulated by one lowering pass.
/// Append-only; owned by the driver and handed to strategy objects only
/// through the statements they return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementBlock {
    pub statements: Vec<Statement>,
}

impl StatementBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for StatementBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            stmt.fmt_indented(f, 0)?;
        }
        Ok(())
    }
}
