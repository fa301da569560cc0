//! Hour values with decimal precision.
//!
//! Durations are stored and summed as whole minutes. Hours only appear at the
//! edges (API responses, budgets), and always as `Decimal`, never as floats.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minutes in one hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Converts a whole-minute amount to hours (`minutes / 60`).
#[must_use]
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

/// Converts hours to whole minutes, rounding half away from zero.
///
/// Returns `None` when the value does not fit in an `i64`.
#[must_use]
pub fn hours_to_minutes(hours: Decimal) -> Option<i64> {
    use rust_decimal::prelude::ToPrimitive;

    (hours * Decimal::from(MINUTES_PER_HOUR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Formats hours with a fixed number of decimal places for display (`7.5` -> `"7.50"`).
#[must_use]
pub fn format_hours(hours: Decimal, decimal_places: u32) -> String {
    let rounded = hours.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = decimal_places as usize)
}
