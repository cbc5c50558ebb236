use chrono::NaiveDate;

use super::types::AllocationError;

/// Generates `days` consecutive calendar dates starting at `start`
/// (inclusive), formatted as YYYY-MM-DD strings in ascending order.
///
/// Rejects non-positive day counts up front rather than returning an empty
/// window.
pub fn date_window(start: NaiveDate, days: i64) -> Result<Vec<String>, AllocationError> {
    if days < 1 {
        return Err(AllocationError::InvalidDayCount(days));
    }

    let mut dates = Vec::with_capacity(days as usize);
    let mut current = start;
    for i in 0..days {
        dates.push(current.format("%Y-%m-%d").to_string());
        if i + 1 < days {
            current = current.succ_opt().ok_or(AllocationError::DateOutOfRange)?;
        }
    }

    Ok(dates)
}
