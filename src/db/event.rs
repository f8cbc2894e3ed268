/// Life event queries.
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::config::DATE_FORMAT;
use crate::types::{Event, EventId, WeekIndex};

pub fn query_events(conn: &Connection) -> Result<Vec<Event>> {
    let mut stmt =
        conn.prepare("SELECT id, date, title, type_name, week FROM events ORDER BY position")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, EventId>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, WeekIndex>(4)?,
        ))
    })?;
    let mut events = Vec::new();
    for row in rows {
        let (id, date, title, type_name, week) = row?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .with_context(|| format!("event {id} has an invalid date '{date}'"))?;
        events.push(Event {
            id,
            date,
            title,
            type_name,
            week,
        });
    }
    Ok(events)
}

/// Replaces every stored event with `events`, keeping insertion order.
pub fn replace_events(events: &[Event], conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM events", [])?;
    let mut stmt = conn.prepare(
        "INSERT INTO events (id, date, title, type_name, week, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for (position, event) in events.iter().enumerate() {
        stmt.execute((
            event.id,
            event.date.format(DATE_FORMAT).to_string(),
            &event.title,
            &event.type_name,
            event.week,
            position as i64,
        ))?;
    }
    Ok(())
}
