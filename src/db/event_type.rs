/// Event type queries.
use anyhow::Result;
use rusqlite::Connection;

use crate::types::EventType;

pub fn query_event_types(conn: &Connection) -> Result<Vec<EventType>> {
    let mut stmt = conn.prepare("SELECT name, color FROM event_types ORDER BY position")?;
    let rows = stmt.query_map([], |row| {
        Ok(EventType {
            name: row.get(0)?,
            color: row.get(1)?,
        })
    })?;
    let mut types = Vec::new();
    for row in rows {
        types.push(row?);
    }
    Ok(types)
}

/// Replaces every stored type with `types`, keeping their order.
pub fn replace_event_types(types: &[EventType], conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM event_types", [])?;
    let mut stmt =
        conn.prepare("INSERT INTO event_types (name, color, position) VALUES (?1, ?2, ?3)")?;
    for (position, event_type) in types.iter().enumerate() {
        stmt.execute((&event_type.name, &event_type.color, position as i64))?;
    }
    Ok(())
}
