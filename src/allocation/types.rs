use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder assignee for a date with no eligible worker.
pub const UNASSIGNED: &str = "Unassigned";

/// A worker known to the roster. Email is the identity key used to match
/// preference records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Declared unavailability for one worker. The position of a record in the
/// preference list is its assignment priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub email: String,
    pub unavailable: HashSet<String>,
}

/// One day of the allocation window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub date: String,
    pub worker: String,
}

/// Day-by-day assignment for the requested window, one entry per day in
/// ascending date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub entries: Vec<AllocationEntry>,
}

impl Allocation {
    /// Number of days that ended up without an assignee.
    pub fn unassigned_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.worker == UNASSIGNED)
            .count()
    }
}

/// Errors rejected before any allocation work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("day count must be at least 1, got {0}")]
    InvalidDayCount(i64),
    #[error("allocation window extends past the supported calendar range")]
    DateOutOfRange,
}
