#![forbid(unsafe_code)]

mod error;
mod posts;
mod requests;
mod rows;
mod schema;
mod views;

pub use error::StoreError;
pub use requests::*;

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub const DB_FILE_NAME: &str = "board.db";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) `board.db` under `storage_dir` and installs the schema.
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        schema::install_schema(&conn)?;

        Ok(Self { conn })
    }
}
