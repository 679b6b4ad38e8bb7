//! Journal schema migrations, tracked with `PRAGMA user_version`.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::Connection;

/// Ordered schema steps; index + 1 is the resulting `user_version`.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "create_log_table",
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    ),
    (
        "index_log_operation",
        r#"
        CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation);
        "#,
    ),
];

pub fn schema_version(conn: &Connection) -> AppResult<u32> {
    let v: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Apply every migration newer than the database's `user_version`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)? as usize;
    if current > MIGRATIONS.len() {
        return Err(AppError::Migration(format!(
            "journal schema version {current} is newer than this build supports"
        )));
    }

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate().skip(current) {
        conn.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", (index + 1) as u32)?;
        tracing::debug!(migration = name, "journal migration applied");
    }

    if current < MIGRATIONS.len() {
        success(format!(
            "Journal schema upgraded to version {}",
            MIGRATIONS.len()
        ));
    }

    Ok(())
}
