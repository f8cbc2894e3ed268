/// Database migrations and schema management.
use anyhow::Result;
use rusqlite::Connection;

use crate::color::DEFAULT_TYPES;

const SCHEMA_VERSION: i32 = 1;

/// Creates the schema if it doesn't exist yet and seeds the default event
/// types exactly once per database.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS event_types (
            name        TEXT    PRIMARY KEY,
            color       TEXT    NOT NULL,
            position    INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY,
            date        TEXT    NOT NULL,
            title       TEXT    NOT NULL,
            type_name   TEXT    NOT NULL,
            week        INTEGER NOT NULL,
            position    INTEGER NOT NULL
        );
        ",
    )?;
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version < 1 {
        seed_default_types(conn)?;
    }
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    Ok(())
}

fn seed_default_types(conn: &Connection) -> Result<()> {
    for (position, (name, color)) in DEFAULT_TYPES.iter().enumerate() {
        conn.execute(
            "INSERT OR IGNORE INTO event_types (name, color, position) VALUES (?1, ?2, ?3)",
            (name, color, position as i64),
        )?;
    }
    Ok(())
}
