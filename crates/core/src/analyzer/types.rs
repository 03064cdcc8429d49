//! Types for the analysis stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vacancy::VacancyRecord;

/// Aggregate statistics over salaries that were actually advertised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStats {
    /// How many records carried a salary.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Read-only snapshot derived from one batch of records.
///
/// Created once per run by the analyzer, consumed by the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Total records analysed, salary present or not.
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_stats: Option<SalaryStats>,
    /// Vacancies per company.
    pub grouped_counts: BTreeMap<String, u64>,
    /// Vacancies per work schedule.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schedule_counts: BTreeMap<String, u64>,
    /// Mentions per advertised key skill.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skill_counts: BTreeMap<String, u64>,
    /// Records whose description mentions each configured keyword.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keyword_counts: BTreeMap<String, u64>,
}

impl AnalysisResult {
    /// Result for an empty batch: zero count, no salary stats, empty maps.
    pub fn empty() -> Self {
        Self {
            count: 0,
            salary_stats: None,
            grouped_counts: BTreeMap::new(),
            schedule_counts: BTreeMap::new(),
            skill_counts: BTreeMap::new(),
            keyword_counts: BTreeMap::new(),
        }
    }
}

/// Trait for aggregate statistics over a batch of records.
///
/// Analysis never fails: an empty batch produces `AnalysisResult::empty()`.
pub trait Analyzer: Send + Sync {
    /// Implementation name for logging.
    fn name(&self) -> &str;

    /// Compute statistics over the batch.
    fn analyze(&self, records: &[VacancyRecord]) -> AnalysisResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_shape() {
        let result = AnalysisResult::empty();
        assert_eq!(result.count, 0);
        assert!(result.salary_stats.is_none());
        assert!(result.grouped_counts.is_empty());
        assert!(result.schedule_counts.is_empty());
        assert!(result.keyword_counts.is_empty());
    }

    #[test]
    fn test_serialization_skips_empty_sections() {
        let result = AnalysisResult::empty();
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("salary_stats"));
        assert!(!json.contains("schedule_counts"));
        // grouped_counts always serializes, empty or not.
        assert!(json.contains("grouped_counts"));
    }
}
