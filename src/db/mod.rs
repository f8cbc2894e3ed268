/// SQLite persistence for the event store.
mod event;
mod event_type;
mod migrations;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::store::EventStore;

pub use event::{query_events, replace_events};
pub use event_type::{query_event_types, replace_event_types};

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open database {db_path}"))?;
    migrations::run_migrations(&conn)?;
    info!(path = db_path, "database ready");
    Ok(conn)
}

/// A database that lives only as long as the connection.
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Returns the default database path inside the user's data directory.
/// Falls back to `./lifeweeks.db` when no data dir is found.
pub fn default_db_path() -> String {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join("lifeweeks");
        std::fs::create_dir_all(&app_dir).ok();
        app_dir.join("lifeweeks.db").to_string_lossy().into_owned()
    } else {
        "lifeweeks.db".to_string()
    }
}

pub fn load_store(conn: &Connection) -> Result<EventStore> {
    let types = query_event_types(conn)?;
    let events = query_events(conn)?;
    info!(types = types.len(), events = events.len(), "store loaded");
    Ok(EventStore::from_parts(types, events))
}

/// Writes the whole store in one transaction.
pub fn save_store(store: &EventStore, conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    replace_event_types(store.event_types(), &tx)?;
    replace_events(store.events(), &tx)?;
    tx.commit()?;
    debug!(
        types = store.event_types().len(),
        events = store.events().len(),
        "store saved"
    );
    Ok(())
}
