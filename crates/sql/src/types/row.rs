//! Stored rows

use super::value::Value;
use serde::{Deserialize, Serialize};

/// One value in a row, tagged with the column it is exposed as and the
/// table it originated from. The table tag is what lets a joined row
/// discriminate `foo.a` from `bar.a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: Value,
    pub column: String,
    pub table: String,
}

/// A row as stored by a backend and as materialised by the join engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells }
    }

    /// Looks up the value exposed under `column` for the given source table.
    pub fn get(&self, table: &str, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|cell| cell.column == column && cell.table == table)
            .map(|cell| &cell.value)
    }

    /// Splices two rows together, preserving cell order. Used when joining.
    pub fn concat(&self, other: &Row) -> Row {
        let mut cells = Vec::with_capacity(self.cells.len() + other.cells.len());
        cells.extend(self.cells.iter().cloned());
        cells.extend(other.cells.iter().cloned());
        Row { cells }
    }
}
