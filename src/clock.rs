/// Date arithmetic behind the life grid. Everything here is pure.
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::types::{LifeSnapshot, Profile, WeekIndex};

pub const WEEKS_PER_YEAR: i64 = 52;
pub const LIFESPAN_RANGE: RangeInclusive<u32> = 50..=100;
pub const BUFFER_RANGE: RangeInclusive<u32> = 0..=10;

pub const DEFAULT_LIFESPAN_YEARS: u32 = 90;
pub const DEFAULT_BUFFER_YEARS: u32 = 2;

pub fn default_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(2007, 8, 1).unwrap_or_default()
}

/// Completed years of age on `today`.
pub fn compute_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let birthday_pending = (today.month(), today.day()) < (dob.month(), dob.day());
    today.year() - dob.year() - i32::from(birthday_pending)
}

/// Zero-based count of complete weeks from `dob` to `target`.
///
/// Floors toward negative infinity, so a date one day before birth is week -1.
pub fn week_index(dob: NaiveDate, target: NaiveDate) -> WeekIndex {
    target.signed_duration_since(dob).num_days().div_euclid(7)
}

pub fn summary(
    dob: NaiveDate,
    today: NaiveDate,
    lifespan_years: u32,
    buffer_years: u32,
) -> LifeSnapshot {
    let current_age_years = compute_age(dob, today);
    let weeks_lived = week_index(dob, today);
    let total_weeks = i64::from(lifespan_years) * WEEKS_PER_YEAR;
    let percent_lived = if total_weeks == 0 {
        0.0
    } else {
        weeks_lived as f64 / total_weeks as f64 * 100.0
    };
    LifeSnapshot {
        current_age_years,
        weeks_lived,
        total_weeks,
        weeks_left: total_weeks - weeks_lived,
        percent_lived,
        display_years: i64::from(current_age_years) + i64::from(buffer_years),
    }
}

impl Profile {
    pub fn snapshot(&self, today: NaiveDate) -> LifeSnapshot {
        summary(
            self.date_of_birth,
            today,
            self.lifespan_years,
            self.buffer_years,
        )
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            date_of_birth: default_date_of_birth(),
            lifespan_years: DEFAULT_LIFESPAN_YEARS,
            buffer_years: DEFAULT_BUFFER_YEARS,
        }
    }
}

impl LifeSnapshot {
    /// Number of cells the grid renders, never negative.
    pub fn display_weeks(&self) -> WeekIndex {
        self.display_years.max(0) * WEEKS_PER_YEAR
    }

    pub fn format_percent(&self) -> String {
        format!("{:.2}%", self.percent_lived)
    }
}
