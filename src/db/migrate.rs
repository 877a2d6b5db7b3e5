use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Schema version this build writes. Stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

fn user_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// v1: the key/value settings table the ledger lives in.
fn migrate_v1_settings_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        BEGIN;
        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
        PRAGMA user_version = 1;
        COMMIT;
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() every time a store is opened.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = user_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "database schema v{} is newer than this build (v{})",
            current, SCHEMA_VERSION
        )));
    }

    if current < 1 {
        migrate_v1_settings_table(conn)?;
        tracing::info!(version = 1, "migration applied: settings table");
    }

    Ok(())
}
