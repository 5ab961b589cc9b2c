//! A small relational query engine.
//!
//! The engine is a three-stage pipeline: a [`parsing::Lexer`] turns text
//! into tokens, a [`parsing::Parser`] builds the AST, and an
//! [`execution::Evaluator`] walks it against a pluggable
//! [`storage::Backend`]. Three statement kinds are supported: CREATE
//! TABLE, INSERT, and single-pass SELECT with projection, joins, WHERE,
//! ORDER BY, and LIMIT/OFFSET.
//!
//! ```
//! use tabular_sql::{Evaluator, MemoryBackend, StatementResult, parsing};
//!
//! let mut evaluator = Evaluator::new(MemoryBackend::new());
//! let (program, errors) = parsing::parse(
//!     "create table foo (a text); \
//!      insert into foo values ('hello'); \
//!      select a from foo",
//! );
//! assert!(errors.is_empty());
//! let result = evaluator.execute_program(program).unwrap();
//! let StatementResult::Query(result) = result else { panic!() };
//! assert_eq!(result.columns, vec!["a"]);
//! ```

pub mod error;
pub mod execution;
pub mod parsing;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use execution::Evaluator;
pub use storage::{Backend, MemoryBackend, PersistentBackend};
pub use types::{Cell, Column, DataType, ResultSet, Row, StatementResult, Value};
