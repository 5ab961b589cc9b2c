//! Statement execution
//!
//! The evaluator walks parsed statements and drives a backend through the
//! narrow `Backend` capability: table creation, row insertion, and the
//! SELECT pipeline (resolve identifiers, materialise the working set,
//! project and filter per row, sort, window).

use super::expression::evaluate;
use super::{join, resolve};
use crate::error::{Error, Result};
use crate::parsing::ast::{
    CreateTableStatement, InsertStatement, Program, SelectStatement, Statement,
};
use crate::storage::Backend;
use crate::types::{Cell, ResultSet, Row, StatementResult, Value};
use std::cmp::Ordering;

/// One ORDER BY key evaluated for a row.
struct SortKey {
    value: Value,
    descending: bool,
}

/// A tree-walking evaluator over a storage backend.
pub struct Evaluator<B: Backend> {
    backend: B,
}

impl<B: Backend> Evaluator<B> {
    pub fn new(backend: B) -> Self {
        Evaluator { backend }
    }

    /// Opens the backend. Called once before the first statement.
    pub fn open(&mut self) -> Result<()> {
        self.backend.open()
    }

    /// Closes the backend. Called exactly once at end of session.
    pub fn close(&mut self) -> Result<()> {
        self.backend.close()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Executes the program's statements in order, stopping at the first
    /// failure. Returns the result of the last statement.
    pub fn execute_program(&mut self, program: Program) -> Result<StatementResult> {
        let mut result = StatementResult::Ok;
        for statement in program.statements {
            result = self.execute(statement)?;
        }
        Ok(result)
    }

    pub fn execute(&mut self, statement: Statement) -> Result<StatementResult> {
        match statement {
            Statement::CreateTable(statement) => self.create_table(statement),
            Statement::Insert(statement) => self.insert(statement),
            Statement::Select(statement) => self.select(statement).map(StatementResult::Query),
        }
    }

    fn create_table(&mut self, statement: CreateTableStatement) -> Result<StatementResult> {
        self.backend.create_table(&statement.name, statement.columns)?;
        Ok(StatementResult::Ok)
    }

    /// Validates every tuple against the table's columns before writing
    /// any of them, so an INSERT is atomic at statement granularity.
    fn insert(&mut self, statement: InsertStatement) -> Result<StatementResult> {
        let columns = self.backend.columns(&statement.table)?;
        let empty = Row::default();

        let mut rows = Vec::with_capacity(statement.rows.len());
        for tuple in &statement.rows {
            if columns.len() != tuple.len() {
                let column_plural = if columns.len() > 1 { "s" } else { "" };
                let value_plural = if tuple.len() > 1 { "s" } else { "" };
                return Err(Error::ExecutionError(format!(
                    "table \"{}\" has {} column{} but {} value{} were supplied",
                    statement.table,
                    columns.len(),
                    column_plural,
                    tuple.len(),
                    value_plural
                )));
            }

            let mut cells = Vec::with_capacity(tuple.len());
            for (expression, column) in tuple.iter().zip(&columns) {
                cells.push(Cell {
                    value: evaluate(expression, &empty)?,
                    column: column.name.clone(),
                    table: statement.table.clone(),
                });
            }
            for (cell, column) in cells.iter().zip(&columns) {
                if cell.value.datatype() != Some(column.datatype) {
                    return Err(Error::ExecutionError(format!(
                        "cannot insert {} with value {} in {} column in table \"{}\"",
                        cell.value.type_name(),
                        cell.value,
                        column.datatype,
                        statement.table
                    )));
                }
            }
            rows.push(Row::new(cells));
        }

        for row in rows {
            self.backend.insert(&statement.table, row)?;
        }
        Ok(StatementResult::Ok)
    }

    fn select(&mut self, mut statement: SelectStatement) -> Result<ResultSet> {
        resolve::normalize(&self.backend, &mut statement)?;
        let source_rows = join::materialize(&self.backend, &statement.from)?;

        let mut output: Vec<(Vec<Value>, Vec<SortKey>)> = Vec::new();
        for row in &source_rows {
            let mut values = Vec::with_capacity(statement.projections.len());
            for (expression, _) in &statement.projections {
                values.push(evaluate(expression, row)?);
            }

            if let Some(predicate) = &statement.r#where {
                match evaluate(predicate, row)? {
                    Value::Boolean(true) => {}
                    Value::Boolean(false) => continue,
                    value => {
                        return Err(Error::ExecutionError(format!(
                            "argument of WHERE must be type boolean, not type integer: {value}"
                        )));
                    }
                }
            }

            let mut keys = Vec::with_capacity(statement.order_by.len());
            for order in &statement.order_by {
                keys.push(SortKey {
                    value: evaluate(&order.expression, row)?,
                    descending: order.descending,
                });
            }
            output.push((values, keys));
        }

        if !statement.order_by.is_empty() {
            output.sort_by(|(_, a), (_, b)| {
                for (x, y) in a.iter().zip(b) {
                    let order = x.value.compare(&y.value);
                    let order = if x.descending { order.reverse() } else { order };
                    if order != Ordering::Equal {
                        return order;
                    }
                }
                Ordering::Equal
            });
        }

        // OFFSET only applies when a LIMIT is present.
        if let Some(limit) = statement.limit {
            let offset = statement.offset.unwrap_or(0);
            if offset >= output.len() {
                output.clear();
            } else {
                output.truncate(offset.saturating_add(limit).min(output.len()));
                output.drain(..offset);
            }
        }

        let columns = statement
            .projections
            .iter()
            .map(|(expression, alias)| {
                alias.clone().unwrap_or_else(|| expression.to_string())
            })
            .collect();
        Ok(ResultSet { columns, rows: output.into_iter().map(|(values, _)| values).collect() })
    }
}
