use std::collections::HashMap;

use super::types::PreferenceRecord;

/// Picks an assignee for a single date.
///
/// `candidates` holds the preference records not marked unavailable on
/// `date`, in priority order (their position in the preference list).
/// Returning `None` leaves the date unassigned.
pub trait SelectionStrategy {
    fn select<'a>(
        &mut self,
        date: &str,
        candidates: &[&'a PreferenceRecord],
    ) -> Option<&'a PreferenceRecord>;
}

/// Greedy baseline: always the earliest-listed available record.
///
/// Ties between available workers resolve to the earlier record, so the
/// same worker can cover every day of the window if they are never
/// unavailable.
pub struct FirstAvailable;

impl SelectionStrategy for FirstAvailable {
    fn select<'a>(
        &mut self,
        _date: &str,
        candidates: &[&'a PreferenceRecord],
    ) -> Option<&'a PreferenceRecord> {
        candidates.first().copied()
    }
}

/// Fairness-aware alternative: picks the candidate with the fewest
/// assignments handed out so far, ties broken by priority order.
#[derive(Default)]
pub struct LeastLoaded {
    assigned: HashMap<String, u32>,
}

impl LeastLoaded {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStrategy for LeastLoaded {
    fn select<'a>(
        &mut self,
        _date: &str,
        candidates: &[&'a PreferenceRecord],
    ) -> Option<&'a PreferenceRecord> {
        // min_by_key keeps the first minimum, so priority order breaks ties
        let pick = candidates
            .iter()
            .copied()
            .min_by_key(|record| self.assigned.get(&record.email).copied().unwrap_or(0))?;
        *self.assigned.entry(pick.email.clone()).or_insert(0) += 1;
        Some(pick)
    }
}
