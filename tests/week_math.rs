use chrono::{Datelike, Duration, NaiveDate};
use lifeweeks::clock;
use proptest::prelude::*;

fn date_from_offset(days: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + Duration::days(days)
}

proptest! {
    #[test]
    fn weeks_lived_matches_week_index(dob_days in 0i64..30_000, span in 0i64..40_000) {
        let dob = date_from_offset(dob_days);
        let today = dob + Duration::days(span);
        let snapshot = clock::summary(dob, today, 90, 2);
        prop_assert_eq!(snapshot.weeks_lived, clock::week_index(dob, today));
        prop_assert_eq!(snapshot.weeks_lived + snapshot.weeks_left, snapshot.total_weeks);
    }

    #[test]
    fn week_index_never_decreases(dob_days in 0i64..30_000, a in -5_000i64..40_000, step in 0i64..1_000) {
        let dob = date_from_offset(dob_days);
        let earlier = clock::week_index(dob, dob + Duration::days(a));
        let later = clock::week_index(dob, dob + Duration::days(a + step));
        prop_assert!(earlier <= later);
    }

    #[test]
    fn week_index_is_floor_of_days(dob_days in 0i64..30_000, offset in -5_000i64..40_000) {
        let dob = date_from_offset(dob_days);
        let week = clock::week_index(dob, dob + Duration::days(offset));
        prop_assert!(week * 7 <= offset);
        prop_assert!(offset < (week + 1) * 7);
    }

    #[test]
    fn age_is_consistent_with_birthdays(dob_days in 0i64..30_000, years in 0i32..100) {
        let dob = date_from_offset(dob_days);
        if let Some(birthday) = dob.with_year(dob.year() + years) {
            prop_assert_eq!(clock::compute_age(dob, birthday), years);
            prop_assert_eq!(clock::compute_age(dob, birthday - Duration::days(1)), years - 1);
        }
    }
}
