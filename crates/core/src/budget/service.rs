//! Budget view calculations.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tempo_shared::types::minutes_to_hours;

use super::types::{BudgetView, StatusBand};

/// Percentage at which a budget turns yellow.
pub const YELLOW_THRESHOLD: i64 = 80;

/// Percentage at which a budget turns red.
pub const RED_THRESHOLD: i64 = 100;

/// Service for deriving budget views.
pub struct BudgetService;

impl BudgetService {
    /// Derives the budget view for a project.
    ///
    /// An unbudgeted project (`total_hours == 0`) reports 0 %, green and
    /// nothing remaining, however much has been logged against it.
    #[must_use]
    pub fn derive(total_hours: Decimal, used_minutes: i64) -> BudgetView {
        let used_hours = minutes_to_hours(used_minutes);
        let remaining_hours = (total_hours - used_hours).max(Decimal::ZERO);
        let percentage_used = Self::percentage(total_hours, used_hours);

        BudgetView {
            total_hours,
            used_hours,
            remaining_hours,
            percentage_used,
            status: Self::band(percentage_used),
        }
    }

    /// `round_half_up(used / total * 100)`, or 0 when there is no budget.
    #[must_use]
    pub fn percentage(total_hours: Decimal, used_hours: Decimal) -> i64 {
        if total_hours <= Decimal::ZERO {
            return 0;
        }

        (used_hours / total_hours * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// Maps a percentage to its status band.
    #[must_use]
    pub const fn band(percentage_used: i64) -> StatusBand {
        if percentage_used >= RED_THRESHOLD {
            StatusBand::Red
        } else if percentage_used >= YELLOW_THRESHOLD {
            StatusBand::Yellow
        } else {
            StatusBand::Green
        }
    }
}
