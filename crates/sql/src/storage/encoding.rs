//! Encoding helpers for the persistent backend's keys and values

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes a value with bincode.
pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decodes a bincode-encoded value.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

/// The key the n'th row of a table is stored under: 8 bytes, big endian,
/// so the keys sort in insertion order.
pub fn encode_row_key(row: u64) -> [u8; 8] {
    row.to_be_bytes()
}

/// Decodes a row key; returns `None` for keys of any other length (the
/// `columns` and `seq` keys share the partition).
pub fn decode_row_key(bytes: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}
