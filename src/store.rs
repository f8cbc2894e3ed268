//! In-memory owner of life events and their types.
//!
//! Event types are referenced by name only. Deleting a type leaves events that
//! still name it in place; they render with the fallback colors from
//! [`crate::color`] instead.

use chrono::NaiveDate;
use tracing::debug;

use crate::clock;
use crate::color::{
    DEFAULT_TYPE_COLOR, DEFAULT_TYPES, FUTURE_COLOR, GRID_FALLBACK_COLOR, LEGEND_FALLBACK_COLOR,
    LIVED_COLOR,
};
use crate::types::{Event, EventId, EventType, GridCell, LegendEntry, LifeSnapshot, WeekIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddTypeOutcome {
    Added,
    Duplicate,
    Empty,
}

#[derive(Clone, Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    types: Vec<EventType>,
    next_id: EventId,
}

impl EventStore {
    /// An empty store with no declared types.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the default Birthday/Personal/International types.
    pub fn with_default_types() -> Self {
        let types = DEFAULT_TYPES
            .iter()
            .map(|(name, color)| EventType {
                name: (*name).to_string(),
                color: (*color).to_string(),
            })
            .collect();
        Self::from_parts(types, Vec::new())
    }

    /// Rebuilds a store from persisted rows. Later duplicates of a type name
    /// are dropped so names stay unique.
    pub fn from_parts(types: Vec<EventType>, events: Vec<Event>) -> Self {
        let mut unique: Vec<EventType> = Vec::with_capacity(types.len());
        for event_type in types {
            if !unique.iter().any(|t| t.name == event_type.name) {
                unique.push(event_type);
            }
        }
        let next_id = events.iter().map(|e| e.id).max().map_or(0, |id| id + 1);
        Self {
            events,
            types: unique,
            next_id,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.types
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name == name)
    }

    pub fn type_color(&self, name: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.color.as_str())
    }

    pub fn add_event_type(&mut self, name: &str) -> AddTypeOutcome {
        let name = name.trim();
        if name.is_empty() {
            return AddTypeOutcome::Empty;
        }
        if self.has_type(name) {
            debug!(name, "event type already declared");
            return AddTypeOutcome::Duplicate;
        }
        self.types.push(EventType {
            name: name.to_string(),
            color: DEFAULT_TYPE_COLOR.to_string(),
        });
        debug!(name, "event type added");
        AddTypeOutcome::Added
    }

    /// Removes the type and its color together. Events are left untouched.
    pub fn delete_event_type(&mut self, name: &str) -> bool {
        let before = self.types.len();
        self.types.retain(|t| t.name != name);
        let removed = self.types.len() != before;
        if removed {
            let orphaned = self.events.iter().filter(|e| e.type_name == name).count();
            debug!(name, orphaned, "event type deleted");
        }
        removed
    }

    pub fn set_color(&mut self, name: &str, color: &str) -> bool {
        match self.types.iter_mut().find(|t| t.name == name) {
            Some(event_type) => {
                event_type.color = color.to_string();
                debug!(name, color, "event type color changed");
                true
            }
            None => false,
        }
    }

    pub fn add_event(
        &mut self,
        dob: NaiveDate,
        date: NaiveDate,
        title: &str,
        type_name: &str,
    ) -> &Event {
        let id = self.next_id;
        self.next_id += 1;
        let week = clock::week_index(dob, date);
        debug!(id, %date, week, type_name, "event added");
        self.events.push(Event {
            id,
            date,
            title: title.to_string(),
            type_name: type_name.to_string(),
            week,
        });
        &self.events[self.events.len() - 1]
    }

    /// Case-insensitive title filter, in insertion order.
    pub fn search_events(&self, query: &str) -> Vec<&Event> {
        let needle = query.to_lowercase();
        self.events
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Updates the title, and rewrites the week to `new_age_years * 52` only
    /// when the age differs from the one the week currently implies. The date
    /// is never touched.
    pub fn edit_event(&mut self, id: EventId, new_title: &str, new_age_years: i64) -> bool {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let mut changed = false;
        if event.title != new_title {
            event.title = new_title.to_string();
            changed = true;
        }
        if event.age_years() != new_age_years {
            event.week = new_age_years * clock::WEEKS_PER_YEAR;
            changed = true;
        }
        if changed {
            debug!(id, week = event.week, "event edited");
        }
        changed
    }

    /// Removes the first event equal to `event`.
    pub fn delete_event(&mut self, event: &Event) -> bool {
        match self.events.iter().position(|e| e == event) {
            Some(index) => {
                self.events.remove(index);
                debug!(id = event.id, "event deleted");
                true
            }
            None => false,
        }
    }

    pub fn delete_event_by_id(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        debug!(id, "event deleted");
        Some(self.events.remove(index))
    }

    fn first_event_at(&self, week: WeekIndex) -> Option<&Event> {
        self.events.iter().find(|e| e.week == week)
    }

    /// Color of the first event on `week`, else the lived or future color.
    pub fn color_for_week(&self, week: WeekIndex, weeks_lived: WeekIndex) -> &str {
        self.cell_color(self.first_event_at(week), week, weeks_lived)
    }

    fn cell_color(&self, event: Option<&Event>, week: WeekIndex, weeks_lived: WeekIndex) -> &str {
        match event {
            Some(event) => self
                .type_color(&event.type_name)
                .unwrap_or(GRID_FALLBACK_COLOR),
            None if week < weeks_lived => LIVED_COLOR,
            None => FUTURE_COLOR,
        }
    }

    pub fn label_for_week(&self, week: WeekIndex) -> &str {
        self.first_event_at(week)
            .map(|e| e.title.as_str())
            .unwrap_or("")
    }

    pub fn grid(&self, snapshot: &LifeSnapshot) -> Vec<GridCell<'_>> {
        (0..snapshot.display_weeks())
            .map(|week| {
                let event = self.first_event_at(week);
                GridCell {
                    week,
                    color: self.cell_color(event, week, snapshot.weeks_lived),
                    label: event.map(|e| e.title.as_str()).unwrap_or(""),
                    event_id: event.map(|e| e.id),
                }
            })
            .collect()
    }

    pub fn legend(&self) -> Vec<LegendEntry<'_>> {
        self.events
            .iter()
            .map(|e| LegendEntry {
                color: self
                    .type_color(&e.type_name)
                    .unwrap_or(LEGEND_FALLBACK_COLOR),
                title: e.title.as_str(),
                type_name: e.type_name.as_str(),
                date: e.date,
                week: e.week,
            })
            .collect()
    }
}
