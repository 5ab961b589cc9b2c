//! Table schema metadata

use super::data_type::DataType;
use serde::{Deserialize, Serialize};

/// A column definition: its name and declared type. Backends persist the
/// ordered column list per table; INSERT validates values against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Column { name: name.into(), datatype }
    }
}
