//! Statement nodes

use super::expressions::Expression;
use crate::types::Column;
use std::fmt;

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Expressions to select, each with an optional column alias.
    pub projections: Vec<(Expression, Option<String>)>,
    /// FROM: tables to select from, cross-joined in declared order.
    pub from: Vec<FromClause>,
    /// WHERE: optional condition to filter rows.
    pub r#where: Option<Expression>,
    /// ORDER BY: expressions to sort by, with direction.
    pub order_by: Vec<OrderBy>,
    /// LIMIT: maximum number of rows to return.
    pub limit: Option<usize>,
    /// OFFSET: row offset to start from; only applied when LIMIT is set.
    pub offset: Option<usize>,
}

/// One ORDER BY key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expression: Expression,
    pub descending: bool,
}

/// A FROM item: a table, an optional alias, and any chained joins.
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table: String,
    pub alias: Option<String>,
    pub joins: Vec<Join>,
}

/// Join kinds. The parser only produces `Inner` (`JOIN … ON`);
/// comma-separated FROM items are the cross-join path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Cross,
}

/// One step in a FROM item's join chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub alias: Option<String>,
    /// The join condition; `None` for a cross join.
    pub predicate: Option<Expression>,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub name: String,
    pub columns: Vec<Column>,
}

/// An INSERT statement: one or more value tuples for a table.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    pub rows: Vec<Vec<Expression>>,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        for (i, (expression, alias)) in self.projections.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{expression}")?;
            if let Some(alias) = alias {
                write!(f, " AS {alias}")?;
            }
        }
        if !self.from.is_empty() {
            write!(f, " FROM ")?;
            for (i, from) in self.from.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{from}")?;
            }
        }
        if let Some(predicate) = &self.r#where {
            write!(f, " WHERE {predicate}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY ")?;
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", order.expression)?;
                if order.descending {
                    write!(f, " DESC")?;
                }
            }
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " {alias}")?;
        }
        for join in &self.joins {
            write!(f, " JOIN {}", join.table)?;
            if let Some(alias) = &join.alias {
                write!(f, " {alias}")?;
            }
            if let Some(predicate) = &join.predicate {
                write!(f, " ON {predicate}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", self.name)?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", column.name, column.datatype)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} VALUES ", self.table)?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "(")?;
            for (j, expression) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{expression}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
