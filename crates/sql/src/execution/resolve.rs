//! Identifier resolution
//!
//! Before a SELECT runs, every column reference is rewritten in place so
//! its qualifier names the original (unaliased) table it belongs to.
//! Qualified references are validated against the FROM scope first; then
//! bare references are checked for existence and ambiguity and given their
//! table.

use crate::error::{Error, Result};
use crate::parsing::ast::{Expression, SelectStatement};
use crate::storage::Backend;
use std::collections::{BTreeMap, BTreeSet};

/// The FROM scope of one SELECT.
struct Scope {
    /// Which real tables expose each column name.
    columns: BTreeMap<String, BTreeSet<String>>,
    /// Alias per table, for tables that were given one.
    table_to_alias: BTreeMap<String, String>,
    /// Every (table, alias) entry, in declared order.
    entries: Vec<(String, Option<String>)>,
}

impl Scope {
    fn build<B: Backend>(backend: &B, statement: &SelectStatement) -> Result<Scope> {
        let mut scope = Scope {
            columns: BTreeMap::new(),
            table_to_alias: BTreeMap::new(),
            entries: Vec::new(),
        };
        let mut references: BTreeMap<String, usize> = BTreeMap::new();

        for from in &statement.from {
            scope.add_entry(backend, &mut references, &from.table, from.alias.as_ref())?;
            for join in &from.joins {
                scope.add_entry(backend, &mut references, &join.table, join.alias.as_ref())?;
            }
        }

        for (name, count) in references {
            if count > 1 {
                return Err(Error::DuplicateTableReference(name));
            }
        }
        Ok(scope)
    }

    fn add_entry<B: Backend>(
        &mut self,
        backend: &B,
        references: &mut BTreeMap<String, usize>,
        table: &str,
        alias: Option<&String>,
    ) -> Result<()> {
        let referenced = alias.map(|a| a.as_str()).unwrap_or(table);
        *references.entry(referenced.to_string()).or_default() += 1;
        if let Some(alias) = alias {
            self.table_to_alias.insert(table.to_string(), alias.clone());
        }
        self.entries.push((table.to_string(), alias.cloned()));
        for column in backend.columns(table)? {
            self.columns.entry(column.name).or_default().insert(table.to_string());
        }
        Ok(())
    }
}

/// Resolves every identifier in the statement, mutating the AST. Fails on
/// duplicate table references, unknown or ambiguous columns, and
/// references to tables outside the FROM scope.
pub fn normalize<B: Backend>(backend: &B, statement: &mut SelectStatement) -> Result<()> {
    let scope = Scope::build(backend, statement)?;

    // First pass: validate qualified references against the FROM entries,
    // rewriting alias qualifiers to the underlying table name.
    for_each_expression(statement, &mut |expression| {
        expression.transform(&mut |node| {
            let Expression::Column(Some(table), _) = node else {
                return Ok(());
            };
            for (entry_table, entry_alias) in &scope.entries {
                match entry_alias {
                    None if table == entry_table => return Ok(()),
                    Some(alias) if table == alias => {
                        *table = entry_table.clone();
                        return Ok(());
                    }
                    _ => {}
                }
            }
            if let Some(alias) = scope.table_to_alias.get(table.as_str()) {
                return Err(Error::AliasedTableReference(table.clone(), alias.clone()));
            }
            Err(Error::MissingFromEntry(table.clone()))
        })
    })?;

    // Second pass: every referenced column must exist somewhere in scope;
    // bare references must be unambiguous and get their table filled in.
    for_each_expression(statement, &mut |expression| {
        expression.transform(&mut |node| {
            let Expression::Column(table, name) = node else {
                return Ok(());
            };
            let tables = match scope.columns.get(name.as_str()) {
                Some(tables) if !tables.is_empty() => tables,
                _ => return Err(Error::ColumnNotFound(name.clone())),
            };
            if table.is_some() {
                return Ok(());
            }
            if tables.len() > 1 {
                return Err(Error::AmbiguousColumn(name.clone()));
            }
            *table = tables.first().cloned();
            Ok(())
        })
    })
}

/// Applies a closure to every expression site of the statement, in the
/// order identifiers are reported on: projections, join predicates, WHERE,
/// ORDER BY.
fn for_each_expression(
    statement: &mut SelectStatement,
    f: &mut impl FnMut(&mut Expression) -> Result<()>,
) -> Result<()> {
    for (expression, _) in &mut statement.projections {
        f(expression)?;
    }
    for from in &mut statement.from {
        for join in &mut from.joins {
            if let Some(predicate) = &mut join.predicate {
                f(predicate)?;
            }
        }
    }
    if let Some(predicate) = &mut statement.r#where {
        f(predicate)?;
    }
    for order in &mut statement.order_by {
        f(&mut order.expression)?;
    }
    Ok(())
}
