//! Abstract syntax tree for statements and expressions
//!
//! The parser builds these nodes; the evaluator consumes them. Identifier
//! resolution mutates `Expression::Column` qualifiers in place before a
//! SELECT executes.

pub mod expressions;
pub mod statements;

pub use expressions::{Expression, InfixOperator, PostfixOperator, PrefixOperator};
pub use statements::{
    CreateTableStatement, FromClause, InsertStatement, Join, JoinKind, OrderBy, SelectStatement,
};

use std::fmt;

/// A statement: the root node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTableStatement),
    Insert(InsertStatement),
    Select(SelectStatement),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateTable(stmt) => write!(f, "{stmt}"),
            Statement::Insert(stmt) => write!(f, "{stmt}"),
            Statement::Select(stmt) => write!(f, "{stmt}"),
        }
    }
}

/// A parsed program: the statements of one input, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
