use std::collections::HashMap;

use chrono::NaiveDate;

use super::dates::date_window;
use super::strategy::{FirstAvailable, SelectionStrategy};
use super::types::{
    Allocation, AllocationEntry, AllocationError, PreferenceRecord, Worker, UNASSIGNED,
};

/// Assigns one worker to each day of the allocation window.
///
/// The preference list doubles as the priority order: for every date the
/// records are scanned in their given order and the first one not marked
/// unavailable gets the shift. A record whose email matches no worker is
/// labelled with the raw email; a date with no available record is labelled
/// "Unassigned". Workers without a preference record are never scanned.
///
/// Pure function of its inputs: identical arguments always produce an
/// identical allocation.
pub fn allocate(
    workers: &[Worker],
    preferences: &[PreferenceRecord],
    days: i64,
    start_date: NaiveDate,
) -> Result<Allocation, AllocationError> {
    allocate_with(workers, preferences, days, start_date, &mut FirstAvailable)
}

/// Same contract as [`allocate`], with a caller-chosen selection strategy
/// deciding the per-date pick from the available pool.
pub fn allocate_with(
    workers: &[Worker],
    preferences: &[PreferenceRecord],
    days: i64,
    start_date: NaiveDate,
    strategy: &mut dyn SelectionStrategy,
) -> Result<Allocation, AllocationError> {
    let dates = date_window(start_date, days)?;

    // Map email to display name (first match wins on duplicate emails)
    let mut names: HashMap<&str, &str> = HashMap::new();
    for worker in workers {
        names
            .entry(worker.email.as_str())
            .or_insert(worker.name.as_str());
    }

    let mut entries = Vec::with_capacity(dates.len());
    for date in dates {
        let candidates: Vec<&PreferenceRecord> = preferences
            .iter()
            .filter(|record| !record.unavailable.contains(date.as_str()))
            .collect();

        let worker = match strategy.select(&date, &candidates) {
            Some(record) => match names.get(record.email.as_str()) {
                Some(name) => (*name).to_string(),
                None => record.email.clone(),
            },
            None => UNASSIGNED.to_string(),
        };

        entries.push(AllocationEntry { date, worker });
    }

    Ok(Allocation { entries })
}
