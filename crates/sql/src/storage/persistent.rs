//! Persistent backend over a fjall keyspace
//!
//! Layout: a `_tables` metadata partition maps `table:<name>` to the
//! serialised column list, so `open` can enumerate tables. Each table gets
//! a `<name>_data` partition holding the column list under the key
//! `columns`, the row count under `seq`, and the rows themselves under
//! 8-byte big-endian keys `0, 1, 2, …` in insertion order.

use super::encoding::{decode_row_key, deserialize, encode_row_key, serialize};
use super::Backend;
use crate::error::{Error, Result};
use crate::types::{Column, Row};
use fjall::{Keyspace, Partition, PartitionCreateOptions, PersistMode};
use std::collections::HashMap;
use std::path::PathBuf;

const COLUMNS_KEY: &[u8] = b"columns";
const SEQ_KEY: &[u8] = b"seq";
const TABLE_PREFIX: &str = "table:";

struct TableState {
    columns: Vec<Column>,
    data: Partition,
    /// Number of rows inserted so far; the next row's key.
    next_row: u64,
}

struct State {
    keyspace: Keyspace,
    catalog: Partition,
    tables: HashMap<String, TableState>,
}

/// A backend storing tables in a fjall keyspace under a database
/// directory. Not opened until `open` is called; `close` syncs the
/// keyspace to disk.
pub struct PersistentBackend {
    path: PathBuf,
    state: Option<State>,
}

impl PersistentBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PersistentBackend { path: path.into(), state: None }
    }

    fn state(&self) -> Result<&State> {
        self.state.as_ref().ok_or_else(|| Error::Storage("backend is not open".to_string()))
    }

    fn state_mut(&mut self) -> Result<&mut State> {
        self.state.as_mut().ok_or_else(|| Error::Storage("backend is not open".to_string()))
    }

    fn open_data_partition(keyspace: &Keyspace, table: &str) -> Result<Partition> {
        let partition = keyspace
            .open_partition(&format!("{table}_data"), PartitionCreateOptions::default())?;
        Ok(partition)
    }

    /// The stored row count, falling back to a key scan when the `seq` key
    /// is missing.
    fn read_row_count(data: &Partition) -> Result<u64> {
        if let Some(bytes) = data.get(SEQ_KEY)? {
            if let Some(count) = decode_row_key(&bytes) {
                return Ok(count);
            }
        }
        let mut count = 0;
        for entry in data.iter() {
            let (key, _) = entry?;
            if let Some(row) = decode_row_key(&key) {
                count = count.max(row + 1);
            }
        }
        Ok(count)
    }
}

impl Backend for PersistentBackend {
    fn open(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.path)?;
        let keyspace = fjall::Config::new(&self.path).open()?;
        let catalog =
            keyspace.open_partition("_tables", PartitionCreateOptions::default())?;

        let mut tables = HashMap::new();
        for entry in catalog.prefix(TABLE_PREFIX) {
            let (key, value) = entry?;
            let name = std::str::from_utf8(&key[TABLE_PREFIX.len()..])
                .map_err(|err| Error::Storage(format!("invalid table name: {err}")))?
                .to_string();
            let columns: Vec<Column> = deserialize(&value)?;
            let data = Self::open_data_partition(&keyspace, &name)?;
            let next_row = Self::read_row_count(&data)?;
            tables.insert(name, TableState { columns, data, next_row });
        }

        self.state = Some(State { keyspace, catalog, tables });
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(state) = self.state.take() {
            state.keyspace.persist(PersistMode::SyncAll)?;
        }
        Ok(())
    }

    fn create_table(&mut self, name: &str, columns: Vec<Column>) -> Result<()> {
        let state = self.state_mut()?;
        if state.tables.contains_key(name) {
            return Err(Error::DuplicateTable(name.to_string()));
        }

        let data = Self::open_data_partition(&state.keyspace, name)?;
        data.insert(COLUMNS_KEY, serialize(&columns)?)?;
        data.insert(SEQ_KEY, encode_row_key(0))?;
        state.catalog.insert(format!("{TABLE_PREFIX}{name}"), serialize(&columns)?)?;

        state.tables.insert(name.to_string(), TableState { columns, data, next_row: 0 });
        Ok(())
    }

    fn insert(&mut self, name: &str, row: Row) -> Result<()> {
        let state = self.state_mut()?;
        let table =
            state.tables.get_mut(name).ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        table.data.insert(encode_row_key(table.next_row), serialize(&row)?)?;
        table.next_row += 1;
        table.data.insert(SEQ_KEY, encode_row_key(table.next_row))?;
        Ok(())
    }

    fn rows(&self, name: &str) -> Result<Vec<Row>> {
        let state = self.state()?;
        let table =
            state.tables.get(name).ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        let mut rows = Vec::with_capacity(table.next_row as usize);
        for i in 0..table.next_row {
            let bytes = table
                .data
                .get(encode_row_key(i))?
                .ok_or_else(|| Error::Storage(format!("row {i} not found")))?;
            rows.push(deserialize(&bytes)?);
        }
        Ok(rows)
    }

    fn columns(&self, name: &str) -> Result<Vec<Column>> {
        let state = self.state()?;
        let table =
            state.tables.get(name).ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        let bytes =
            table.data.get(COLUMNS_KEY)?.ok_or_else(|| Error::NoColumns(name.to_string()))?;
        deserialize(&bytes)
    }
}

impl Drop for PersistentBackend {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
