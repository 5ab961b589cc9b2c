//! Core data types: runtime values, rows, schema metadata, and results

pub mod data_type;
pub mod result;
pub mod row;
pub mod schema;
pub mod value;

pub use data_type::DataType;
pub use result::{ResultSet, StatementResult};
pub use row::{Cell, Row};
pub use schema::Column;
pub use value::Value;
