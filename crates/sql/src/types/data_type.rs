//! Column data types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The data types a column can be declared with. The lexer folds the
/// accepted surface spellings (`TEXT`, `VARCHAR`, `DOUBLE`, `INT`, `BOOL`,
/// …) onto these four canonical types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    String,
    Boolean,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::String => write!(f, "STRING"),
            DataType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}
