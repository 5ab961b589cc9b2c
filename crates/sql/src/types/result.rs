//! Statement results

use super::value::Value;

/// The rows produced by a SELECT: the header names and the projected
/// values, one vector per row, each as long as the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// The outcome of executing a statement. CREATE TABLE and INSERT produce
/// `Ok`; SELECT produces a `Query` result.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
    Ok,
    Query(ResultSet),
}
