//! Leave calendar lookups and ownership rules.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tempo_shared::Actor;
use tempo_shared::types::UserId;

use super::error::LeaveError;
use super::types::{LeaveDay, LeaveQuery, LeaveType, UserOnLeave};

/// Service for leave ownership rules.
pub struct LeaveService;

impl LeaveService {
    /// Resolves whose leave an operation targets.
    ///
    /// Users manage their own leave; admins may name any user.
    pub fn resolve_owner(actor: &Actor, requested: Option<UserId>) -> Result<UserId, LeaveError> {
        let owner = requested.unwrap_or(actor.user_id);
        if actor.can_act_for(owner) {
            Ok(owner)
        } else {
            Err(LeaveError::Forbidden)
        }
    }

    /// Narrows a listing query to what `actor` may see.
    pub fn scope_query(actor: &Actor, mut query: LeaveQuery) -> Result<LeaveQuery, LeaveError> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date)
            && start > end
        {
            return Err(LeaveError::InvalidRange { start, end });
        }
        if !actor.is_admin() {
            query.user_id = Some(actor.user_id);
        }
        Ok(query)
    }
}

/// In-memory view over a set of leave days.
#[derive(Debug, Clone, Default)]
pub struct LeaveCalendar {
    days: HashMap<(UserId, NaiveDate), LeaveType>,
}

impl LeaveCalendar {
    /// Builds a calendar from leave markers.
    #[must_use]
    pub fn new(days: &[LeaveDay]) -> Self {
        Self {
            days: days
                .iter()
                .map(|d| ((d.user_id, d.date), d.leave_type))
                .collect(),
        }
    }

    /// Returns true if `user_id` is on leave on `date`.
    #[must_use]
    pub fn is_on_leave(&self, user_id: UserId, date: NaiveDate) -> bool {
        self.days.contains_key(&(user_id, date))
    }

    /// Users on leave on `date`, named via `names`, sorted by name.
    #[must_use]
    pub fn users_on(&self, date: NaiveDate, names: &HashMap<UserId, String>) -> Vec<UserOnLeave> {
        let mut users: Vec<UserOnLeave> = self
            .days
            .iter()
            .filter(|((_, day), _)| *day == date)
            .map(|((user_id, _), leave_type)| UserOnLeave {
                user_id: *user_id,
                name: names
                    .get(user_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                leave_type: *leave_type,
            })
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }

    /// Leave days of one user, by date.
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> BTreeMap<NaiveDate, LeaveType> {
        self.days
            .iter()
            .filter(|((user, _), _)| *user == user_id)
            .map(|((_, date), leave_type)| (*date, *leave_type))
            .collect()
    }
}
