//! Administrative setup of the warehouse database.

use super::schema::latest_schema;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

/// Recreates the database file at `db_path` from scratch and returns a
/// connection to it. Any existing database (and its WAL side files) is removed.
pub fn create_database(db_path: &Path) -> Result<Connection> {
    for suffix in ["", "-wal", "-shm"] {
        let mut file_name = db_path.as_os_str().to_owned();
        file_name.push(suffix);
        let path = Path::new(&file_name);
        if path.exists() {
            info!("Removing existing database file {}", path.display());
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to create database {}", db_path.display()))?;
    info!("Created database {}", db_path.display());
    Ok(conn)
}

pub fn drop_tables(conn: &Connection) -> Result<()> {
    latest_schema().drop(conn)?;
    info!("Dropped {} tables", latest_schema().tables.len());
    Ok(())
}

pub fn create_tables(conn: &Connection) -> Result<()> {
    let schema = latest_schema();
    schema.create(conn)?;
    info!(
        "Created {} tables at schema version {}",
        schema.tables.len(),
        schema.version
    );
    Ok(())
}

/// Full provisioning run: fresh database, then drop and create every table.
pub fn provision(db_path: &Path) -> Result<()> {
    let conn = create_database(db_path)?;
    drop_tables(&conn)?;
    create_tables(&conn)?;
    conn.close()
        .map_err(|(_, e)| e)
        .context("Failed to close database after provisioning")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_provision_creates_valid_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("warehouse.db");

        provision(&db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        latest_schema().validate(&conn).unwrap();
    }

    #[test]
    fn test_provision_replaces_existing_database() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("warehouse.db");
        provision(&db_path).unwrap();

        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute(
                "INSERT INTO users (user_id, first_name, last_name, gender, level) VALUES (1, 'A', 'B', 'F', 'paid')",
                [],
            )
            .unwrap();
        }

        provision(&db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap();
        assert_eq!(users, 0);
    }

    #[test]
    fn test_create_database_makes_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dir").join("warehouse.db");

        create_database(&db_path).unwrap();
        assert!(db_path.exists());
    }
}
