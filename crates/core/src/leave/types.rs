//! Leave data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tempo_shared::types::{LeaveDayId, UserId};

/// Kind of leave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveType {
    /// Annual leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Public holiday.
    Holiday,
    /// Anything else.
    #[default]
    Other,
}

impl LeaveType {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "ANNUAL",
            Self::Sick => "SICK",
            Self::Holiday => "HOLIDAY",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANNUAL" => Ok(Self::Annual),
            "SICK" => Ok(Self::Sick),
            "HOLIDAY" => Ok(Self::Holiday),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("unknown leave type: {other}")),
        }
    }
}

/// A day a user is on leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDay {
    /// Marker ID.
    pub id: LeaveDayId,
    /// User on leave.
    pub user_id: UserId,
    /// The day.
    pub date: NaiveDate,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for marking a leave day.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkLeaveInput {
    /// User; defaults to the caller. Only admins may set someone else.
    pub user_id: Option<UserId>,
    /// The day.
    pub date: NaiveDate,
    /// Kind of leave; defaults to `OTHER`.
    #[serde(default, rename = "type")]
    pub leave_type: Option<LeaveType>,
}

/// Leave lookup filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveQuery {
    /// Only this user's leave.
    pub user_id: Option<UserId>,
    /// First day (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive).
    pub end_date: Option<NaiveDate>,
}

/// A user on leave on a given day, with display name.
#[derive(Debug, Clone, Serialize)]
pub struct UserOnLeave {
    /// User.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
}
