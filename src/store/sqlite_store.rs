//! SQLite-backed warehouse store.

use super::{SqlValue, Statement, Store};
use crate::warehouse::{latest_schema, table_names};
use anyhow::{bail, Context, Result};
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Single-writer connection to a provisioned warehouse database.
///
/// A transaction is opened lazily by the first statement after a commit or
/// rollback. Dropping the store without `close` still releases the
/// connection; SQLite discards any transaction left open at that point.
pub struct SqliteStore {
    conn: Connection,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens an existing warehouse database and checks that its schema matches
    /// the current table definitions.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if !db_path.exists() {
            bail!(
                "Database {} does not exist, run create-tables first",
                db_path.display()
            );
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

        let store = Self::from_connection(conn, db_path.to_path_buf())?;
        info!("Opened warehouse database at {}", db_path.display());
        Ok(store)
    }

    /// Wraps an already-open connection, e.g. an in-memory database that was
    /// provisioned by the caller.
    pub fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        latest_schema().validate(&conn).with_context(|| {
            format!(
                "Database {} does not match the warehouse schema, run create-tables first",
                db_path.display()
            )
        })?;
        Ok(Self { conn, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Row count of every warehouse table, in creation order.
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        table_names()
            .map(|table| {
                let count: i64 = self
                    .conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
                    .with_context(|| format!("Failed to count rows of {}", table))?;
                Ok((table, count))
            })
            .collect()
    }

    /// Discards any uncommitted work and closes the connection.
    pub fn close(mut self) -> Result<()> {
        if !self.conn.is_autocommit() {
            warn!("Closing store with an open transaction, rolling it back");
            self.rollback()?;
        }
        let db_path = self.db_path;
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .with_context(|| format!("Failed to close database {}", db_path.display()))?;
        debug!("Closed warehouse database at {}", db_path.display());
        Ok(())
    }

    fn ensure_transaction(&self) -> Result<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN IMMEDIATE")?;
        }
        Ok(())
    }
}

impl Store for SqliteStore {
    fn execute(&mut self, statement: Statement, params: &[SqlValue]) -> Result<usize> {
        self.ensure_transaction()?;
        let mut stmt = self.conn.prepare_cached(statement.sql())?;
        stmt.execute(params_from_iter(params.iter()))
            .with_context(|| format!("Failed to execute {:?}", statement))
    }

    fn query_one(
        &mut self,
        statement: Statement,
        params: &[SqlValue],
    ) -> Result<Option<Vec<SqlValue>>> {
        self.ensure_transaction()?;
        let mut stmt = self.conn.prepare_cached(statement.sql())?;
        let column_count = stmt.column_count();
        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .with_context(|| format!("Failed to query {:?}", statement))?;
        match rows.next()? {
            Some(row) => {
                let values = (0..column_count)
                    .map(|i| row.get::<_, SqlValue>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(Some(values))
            }
            None => Ok(None),
        }
    }

    fn commit(&mut self) -> Result<()> {
        if !self.conn.is_autocommit() {
            self.conn
                .execute_batch("COMMIT")
                .context("Failed to commit transaction")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if !self.conn.is_autocommit() {
            self.conn
                .execute_batch("ROLLBACK")
                .context("Failed to roll back transaction")?;
        }
        Ok(())
    }
}
