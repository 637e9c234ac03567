//! SQL script front end backed by `sqlparser`.

mod dialect;
mod parser;

pub use dialect::Dialect;
pub use parser::{parse_sql, SqlParseError};
