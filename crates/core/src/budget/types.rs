//! Budget view types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Traffic-light status of a project budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    /// Below 80 % used.
    Green,
    /// 80 % to 99 % used.
    Yellow,
    /// 100 % or more used.
    Red,
}

/// Budget figures derived from a project's total and used hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetView {
    /// Budgeted hours; zero means unbudgeted.
    pub total_hours: Decimal,
    /// Hours consumed so far.
    pub used_hours: Decimal,
    /// `max(0, total - used)`.
    pub remaining_hours: Decimal,
    /// Used share of the budget, rounded half up to a whole percent.
    pub percentage_used: i64,
    /// Status band for the percentage.
    pub status: StatusBand,
}
