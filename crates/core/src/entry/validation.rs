//! Entry input validation rules.

use chrono::{Days, NaiveDate};
use tempo_shared::types::{CategoryId, ProjectId};

use super::error::EntryError;
use super::types::EntryTarget;

/// Maximum length of entry notes, in characters.
pub const MAX_NOTES_LEN: usize = 500;

/// Rounds minutes to the nearest multiple of 15, halves rounding up.
///
/// `7 -> 0`, `8 -> 15`, `22 -> 15`, `23 -> 30`, `53 -> 60`.
#[must_use]
pub const fn round_minutes(minutes: i32) -> i32 {
    (minutes + 7) / 15 * 15
}

/// Picks the entry target from the optional project and category inputs.
pub fn resolve_target(
    project_id: Option<ProjectId>,
    category_id: Option<CategoryId>,
) -> Result<EntryTarget, EntryError> {
    match (project_id, category_id) {
        (Some(project), None) => Ok(EntryTarget::Project(project)),
        (None, Some(category)) => Ok(EntryTarget::Category(category)),
        (Some(_), Some(_)) => Err(EntryError::AmbiguousTarget),
        (None, None) => Err(EntryError::MissingTarget),
    }
}

/// Trims notes, turning blank notes into `None`.
pub fn normalize_notes(notes: Option<String>) -> Result<Option<String>, EntryError> {
    let Some(notes) = notes else {
        return Ok(None);
    };

    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_NOTES_LEN {
        return Err(EntryError::NotesTooLong { max: MAX_NOTES_LEN });
    }
    Ok(Some(trimmed.to_string()))
}

/// Checks `date` against the backdate window ending at `today`.
///
/// `today - limit_days` itself is allowed. A window reaching past the
/// calendar's lower bound admits every past date. Future dates pass unless
/// `reject_future` is set.
pub fn check_entry_date(
    date: NaiveDate,
    today: NaiveDate,
    limit_days: i64,
    reject_future: bool,
) -> Result<(), EntryError> {
    let window = Days::new(limit_days.max(0).unsigned_abs());
    if let Some(earliest) = today.checked_sub_days(window)
        && date < earliest
    {
        return Err(EntryError::TooFarInPast { limit_days });
    }
    if reject_future && date > today {
        return Err(EntryError::FutureDate(date));
    }
    Ok(())
}
