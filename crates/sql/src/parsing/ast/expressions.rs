//! Expression nodes and operators

use std::fmt;

/// An expression, e.g. `a + 7 > b`. Can be nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// An integer literal.
    Integer(i64),
    /// A float literal.
    Float(f64),
    /// A boolean literal.
    Boolean(bool),
    /// A string literal.
    String(String),
    /// The NULL literal.
    Null,
    /// A column reference, optionally qualified with a table name. The
    /// qualifier starts out as written (or `None`) and is filled in with
    /// the original table name during identifier resolution.
    Column(Option<String>, String),
    /// A prefix operator applied to an operand.
    Prefix(PrefixOperator, Box<Expression>),
    /// An infix operator applied to two operands.
    Infix(InfixOperator, Box<Expression>, Box<Expression>),
    /// A postfix operator (`IS [NOT] NULL`) applied to an operand.
    Postfix(Box<Expression>, PostfixOperator),
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negate, // -a
    Not,    // NOT a
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Add,                 // a + b
    Subtract,            // a - b
    Multiply,            // a * b
    Divide,              // a / b
    Remainder,           // a % b
    Exponentiate,        // a ^ b
    Equal,               // a = b
    NotEqual,            // a != b
    LessThan,            // a < b
    LessThanOrEqual,     // a <= b
    GreaterThan,         // a > b
    GreaterThanOrEqual,  // a >= b
    And,                 // a AND b
    Or,                  // a OR b
    Concat,              // a || b
}

/// Postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    IsNull,    // a IS NULL
    IsNotNull, // a IS NOT NULL
}

impl Expression {
    /// Transforms the expression tree depth-first, applying a closure to
    /// every node. Identifier resolution uses this to rewrite column
    /// qualifiers in place.
    pub fn transform<E>(
        &mut self,
        transformer: &mut impl FnMut(&mut Expression) -> Result<(), E>,
    ) -> Result<(), E> {
        match self {
            Expression::Prefix(_, operand) => operand.transform(transformer)?,
            Expression::Infix(_, lhs, rhs) => {
                lhs.transform(transformer)?;
                rhs.transform(transformer)?;
            }
            Expression::Postfix(operand, _) => operand.transform(transformer)?,
            Expression::Integer(_)
            | Expression::Float(_)
            | Expression::Boolean(_)
            | Expression::String(_)
            | Expression::Null
            | Expression::Column(_, _) => {}
        }
        transformer(self)
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Remainder => "%",
            InfixOperator::Exponentiate => "^",
            InfixOperator::Equal => "=",
            InfixOperator::NotEqual => "!=",
            InfixOperator::LessThan => "<",
            InfixOperator::LessThanOrEqual => "<=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::GreaterThanOrEqual => ">=",
            InfixOperator::And => "AND",
            InfixOperator::Or => "OR",
            InfixOperator::Concat => "||",
        };
        write!(f, "{symbol}")
    }
}

impl fmt::Display for PostfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixOperator::IsNull => write!(f, "IS NULL"),
            PostfixOperator::IsNotNull => write!(f, "IS NOT NULL"),
        }
    }
}

/// The canonical string form, used for unaliased result headers. Prefix
/// and infix expressions are fully parenthesised; qualified columns print
/// as the bare column name.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(i) => write!(f, "{i}"),
            Expression::Float(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            Expression::Float(v) => write!(f, "{v}"),
            Expression::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Expression::String(s) => write!(f, "'{s}'"),
            Expression::Null => write!(f, "NULL"),
            Expression::Column(_, name) => write!(f, "{name}"),
            Expression::Prefix(PrefixOperator::Negate, operand) => write!(f, "(-{operand})"),
            Expression::Prefix(PrefixOperator::Not, operand) => write!(f, "(NOT {operand})"),
            Expression::Infix(op, lhs, rhs) => write!(f, "({lhs} {op} {rhs})"),
            Expression::Postfix(operand, op) => write!(f, "({operand} {op})"),
        }
    }
}
