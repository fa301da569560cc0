//! Property-based tests for duration rounding.

use proptest::prelude::*;

use super::error::EntryError;
use super::types::EntryDuration;
use super::validation::round_minutes;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rounding lands on a 15-minute slot no further than 7 minutes away.
    #[test]
    fn prop_round_minutes_nearest_slot(minutes in 0i32..=59) {
        let rounded = round_minutes(minutes);
        prop_assert_eq!(rounded % 15, 0);
        prop_assert!((rounded - minutes).abs() <= 7);
    }

    /// Rounding an already rounded value changes nothing.
    #[test]
    fn prop_round_minutes_idempotent(minutes in 0i32..=59) {
        let once = round_minutes(minutes);
        prop_assert_eq!(round_minutes(once), once);
    }

    /// Every accepted duration is persisted on a slot, within a day.
    #[test]
    fn prop_duration_normalized(hours in 0i32..=24, minutes in 0i32..=59) {
        match EntryDuration::new(hours, minutes) {
            Ok(duration) => {
                prop_assert!((0..=59).contains(&duration.minutes));
                prop_assert_eq!(duration.minutes % 15, 0);
                prop_assert!(duration.hours <= 24);
                // Re-validating a normalized duration is a no-op.
                prop_assert_eq!(EntryDuration::new(duration.hours, duration.minutes), Ok(duration));
                // Total differs from raw input by at most the rounding step.
                let raw = i64::from(hours) * 60 + i64::from(minutes);
                prop_assert!((duration.total_minutes() - raw).abs() <= 7);
            }
            Err(err) => {
                prop_assert_eq!(err, EntryError::DurationTooLong);
                prop_assert_eq!(hours, 24);
                prop_assert!(minutes >= 53);
            }
        }
    }
}
