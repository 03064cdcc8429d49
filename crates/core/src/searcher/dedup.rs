//! Deduplication of search results by vacancy id.

use std::collections::HashSet;

use crate::vacancy::VacancySummary;

/// Drop summaries whose id was already seen, keeping the first occurrence
/// and the original ordering.
///
/// Result pages can overlap when the listing index shifts between page
/// requests; fetching details twice for the same id would waste network
/// calls and break the one-record-per-id invariant downstream.
///
/// Returns the deduplicated summaries and the number of duplicates dropped.
pub fn dedup_by_id(summaries: Vec<VacancySummary>) -> (Vec<VacancySummary>, usize) {
    let before = summaries.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    let kept: Vec<VacancySummary> = summaries
        .into_iter()
        .filter(|summary| seen.insert(summary.id.clone()))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
