//! CSV export of report rows.

use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};
use tempo_shared::types::format_hours;

use super::error::ReportError;
use super::types::ReportRow;

/// Column headers of the CSV export.
pub const CSV_HEADER: [&str; 7] = [
    "Date",
    "User",
    "Project/Category",
    "Hours",
    "Minutes",
    "Total Hours",
    "Notes",
];

/// Renders report rows as CSV.
///
/// Fields containing commas, quotes or newlines are quoted, with embedded
/// quotes doubled. Total hours always carry two decimals.
pub fn render_csv(rows: &[ReportRow]) -> Result<String, ReportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ReportError::Export(e.to_string()))?;

    for row in rows {
        writer
            .write_record([
                row.date.format("%Y-%m-%d").to_string(),
                row.user_name.clone(),
                row.target_name.clone(),
                row.hours.to_string(),
                row.minutes.to_string(),
                format_hours(row.total_hours, 2),
                row.notes.clone().unwrap_or_default(),
            ])
            .map_err(|e| ReportError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Export(e.to_string()))
}

/// Attachment filename for an export generated on `today`.
#[must_use]
pub fn export_filename(today: NaiveDate) -> String {
    format!("timesheet-report-{}.csv", today.format("%Y-%m-%d"))
}
