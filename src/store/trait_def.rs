//! Store trait definition.
//!
//! The ETL core only ever talks to the warehouse through this trait: it picks a
//! statement kind and supplies positional parameters in that statement's fixed
//! order. Statement text lives with the store implementation.

use super::{SqlValue, Statement};
use anyhow::Result;

/// Statement execution plus transaction control over a warehouse connection.
///
/// Writes issued after the last `commit` belong to one open transaction, which
/// `commit` persists and `rollback` discards.
pub trait Store {
    /// Executes a write statement, returning the number of affected rows.
    fn execute(&mut self, statement: Statement, params: &[SqlValue]) -> Result<usize>;

    /// Runs a lookup statement and returns its first row, if any.
    fn query_one(
        &mut self,
        statement: Statement,
        params: &[SqlValue],
    ) -> Result<Option<Vec<SqlValue>>>;

    /// Persists everything written since the previous commit.
    fn commit(&mut self) -> Result<()>;

    /// Discards everything written since the previous commit.
    fn rollback(&mut self) -> Result<()>;
}
