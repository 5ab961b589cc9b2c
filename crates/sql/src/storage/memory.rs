//! In-memory backend

use super::Backend;
use crate::error::{Error, Result};
use crate::types::{Column, Row};
use std::collections::HashMap;

struct TableData {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

/// A transient backend holding all tables in process memory. Rows keep
/// their insertion order.
#[derive(Default)]
pub struct MemoryBackend {
    tables: HashMap<String, TableData>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl Backend for MemoryBackend {
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn create_table(&mut self, name: &str, columns: Vec<Column>) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(Error::DuplicateTable(name.to_string()));
        }
        self.tables.insert(name.to_string(), TableData { columns, rows: Vec::new() });
        Ok(())
    }

    fn insert(&mut self, name: &str, row: Row) -> Result<()> {
        let table =
            self.tables.get_mut(name).ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        table.rows.push(row);
        Ok(())
    }

    fn rows(&self, name: &str) -> Result<Vec<Row>> {
        let table = self.tables.get(name).ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        Ok(table.rows.clone())
    }

    fn columns(&self, name: &str) -> Result<Vec<Column>> {
        let table = self.tables.get(name).ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        Ok(table.columns.clone())
    }
}
