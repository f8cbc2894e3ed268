use chrono::NaiveDate;

pub type EventId = u32;
pub type WeekIndex = i64;

/// A single life event pinned to one week of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub date: NaiveDate,
    pub title: String,
    /// Name of the event type. Not checked against the declared types.
    pub type_name: String,
    pub week: WeekIndex,
}

impl Event {
    /// Age in completed years implied by the stored week index.
    pub fn age_years(&self) -> i64 {
        self.week.div_euclid(crate::clock::WEEKS_PER_YEAR)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventType {
    pub name: String,
    pub color: String,
}

/// Who the grid is drawn for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub date_of_birth: NaiveDate,
    pub lifespan_years: u32,
    pub buffer_years: u32,
}

/// Derived statistics for one render cycle. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifeSnapshot {
    pub current_age_years: i32,
    pub weeks_lived: WeekIndex,
    pub total_weeks: WeekIndex,
    pub weeks_left: WeekIndex,
    pub percent_lived: f64,
    pub display_years: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub week: WeekIndex,
    pub color: &'a str,
    pub label: &'a str,
    pub event_id: Option<EventId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry<'a> {
    pub color: &'a str,
    pub title: &'a str,
    pub type_name: &'a str,
    pub date: NaiveDate,
    pub week: WeekIndex,
}
