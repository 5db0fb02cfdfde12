#![forbid(unsafe_code)]

mod sql;

use super::StoreError;
use bb_core::board::Board;
use rusqlite::{Connection, params};

const SCHEMA_VERSION: &str = "v1";

pub(super) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(&sql::full_schema_sql())?;

    for board in Board::ALL {
        conn.execute(
            "INSERT OR IGNORE INTO boards(code, name) VALUES (?1, ?2)",
            params![board.code(), board.default_name()],
        )?;
    }

    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;

    Ok(())
}
