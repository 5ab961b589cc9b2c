//! Error types for the query engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// All failures the engine can surface. The display strings are the
/// user-facing messages; callers prefix them with `ERROR: ` when printing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors, accumulated by the parser as plain messages
    #[error("{0}")]
    ParseError(String),

    // Backend errors
    #[error("table \"{0}\" already exists")]
    DuplicateTable(String),

    #[error("relation \"{0}\" does not exist")]
    TableNotFound(String),

    #[error("no columns found for table \"{0}\"")]
    NoColumns(String),

    // Identifier resolution errors
    #[error("column \"{0}\" does not exist")]
    ColumnNotFound(String),

    #[error("column reference \"{0}\" is ambiguous")]
    AmbiguousColumn(String),

    #[error("missing FROM-clause entry for table \"{0}\"")]
    MissingFromEntry(String),

    #[error(
        "invalid reference to FROM-clause entry for table \"{0}\". \
         Perhaps you meant to reference the table alias \"{1}\""
    )]
    AliasedTableReference(String, String),

    #[error("table name \"{0}\" specified more than once")]
    DuplicateTableReference(String),

    // Evaluation errors with bespoke message formats (operator and type
    // failures, INSERT validation)
    #[error("{0}")]
    ExecutionError(String),

    // I/O, keyspace, and encoding failures from the persistent backend
    #[error("storage: {0}")]
    Storage(String),
}

impl From<fjall::Error> for Error {
    fn from(err: fjall::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
