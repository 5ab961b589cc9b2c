//! Row materialisation
//!
//! Grows a working set one FROM item at a time: a cross join per item,
//! then each chained join filtered by its predicate. Row order follows the
//! declared FROM order's nested iteration, with the leftmost table as the
//! outer loop.

use super::expression::evaluate;
use crate::error::{Error, Result};
use crate::parsing::ast::{Expression, FromClause};
use crate::storage::Backend;
use crate::types::{Row, Value};

/// Materialises the full working set for the FROM clauses.
pub fn materialize<B: Backend>(backend: &B, from: &[FromClause]) -> Result<Vec<Row>> {
    let mut rows = vec![Row::default()];
    for clause in from {
        rows = join(backend, rows, &clause.table, None)?;
        for step in &clause.joins {
            rows = join(backend, rows, &step.table, step.predicate.as_ref())?;
        }
    }
    Ok(rows)
}

/// Joins the working set with a table's rows. Without a predicate this is
/// the cross product; with one, rows where it evaluates false are dropped.
fn join<B: Backend>(
    backend: &B,
    rows: Vec<Row>,
    table: &str,
    predicate: Option<&Expression>,
) -> Result<Vec<Row>> {
    let right = backend.rows(table)?;
    let mut joined = Vec::new();
    for left in &rows {
        for row in &right {
            let candidate = left.concat(row);
            if let Some(predicate) = predicate {
                match evaluate(predicate, &candidate)? {
                    Value::Boolean(true) => {}
                    Value::Boolean(false) => continue,
                    value => {
                        return Err(Error::ExecutionError(format!(
                            "join condition must be of type boolean, not {}: {}",
                            value.type_name(),
                            value
                        )));
                    }
                }
            }
            joined.push(candidate);
        }
    }
    Ok(joined)
}
