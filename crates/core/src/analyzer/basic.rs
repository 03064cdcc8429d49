//! Default analyzer implementation.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::vacancy::VacancyRecord;

use super::types::{AnalysisResult, Analyzer, SalaryStats};

const UNKNOWN_COMPANY: &str = "unknown";
const UNSPECIFIED_SCHEDULE: &str = "unspecified";

/// Computes counts, salary statistics and groupings over a record batch.
///
/// Salary statistics only consider records that advertise a salary; records
/// without one still count toward totals and groupings.
pub struct VacancyAnalyzer {
    keywords: Vec<String>,
}

impl VacancyAnalyzer {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Technology keywords matched against descriptions when none are
    /// configured.
    pub fn default_keywords() -> Vec<String> {
        [
            "Python", "Java", "JavaScript", "TypeScript", "Go", "Rust", "C++", "C#",
            "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "ClickHouse",
            "Docker", "Kubernetes", "CI/CD", "AWS", "Azure", "Linux",
            "REST API", "GraphQL", "gRPC", "Microservices", "Git",
            "React", "Vue", "Angular", "Node.js",
            "Kafka", "RabbitMQ",
            "Machine Learning", "Data Science", "TensorFlow", "PyTorch",
            "Agile", "Scrum", "English",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl Default for VacancyAnalyzer {
    fn default() -> Self {
        Self::new(Self::default_keywords())
    }
}

impl Analyzer for VacancyAnalyzer {
    fn name(&self) -> &str {
        "basic"
    }

    fn analyze(&self, records: &[VacancyRecord]) -> AnalysisResult {
        if records.is_empty() {
            return AnalysisResult::empty();
        }

        let mut grouped_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut schedule_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut skill_counts: BTreeMap<String, u64> = BTreeMap::new();

        for record in records {
            let company = if record.company.is_empty() {
                UNKNOWN_COMPANY.to_string()
            } else {
                record.company.clone()
            };
            *grouped_counts.entry(company).or_insert(0) += 1;

            let schedule = record
                .schedule
                .clone()
                .unwrap_or_else(|| UNSPECIFIED_SCHEDULE.to_string());
            *schedule_counts.entry(schedule).or_insert(0) += 1;

            for skill in &record.key_skills {
                *skill_counts.entry(skill.clone()).or_insert(0) += 1;
            }
        }

        let salary_stats = salary_stats(records);
        let keyword_counts = self.keyword_counts(records);

        debug!(
            records = records.len(),
            companies = grouped_counts.len(),
            with_salary = salary_stats.as_ref().map(|s| s.count).unwrap_or(0),
            "Analysis complete"
        );

        AnalysisResult {
            count: records.len(),
            salary_stats,
            grouped_counts,
            schedule_counts,
            skill_counts,
            keyword_counts,
        }
    }
}

impl VacancyAnalyzer {
    fn keyword_counts(&self, records: &[VacancyRecord]) -> BTreeMap<String, u64> {
        let descriptions: Vec<String> = records
            .iter()
            .map(|r| r.description.to_lowercase())
            .collect();

        let mut counts = BTreeMap::new();
        for keyword in &self.keywords {
            let needle = keyword.to_lowercase();
            let hits = descriptions.iter().filter(|d| d.contains(&needle)).count();
            if hits > 0 {
                counts.insert(keyword.clone(), hits as u64);
            }
        }
        counts
    }
}

/// Statistics over the subset of records that advertise a salary.
fn salary_stats(records: &[VacancyRecord]) -> Option<SalaryStats> {
    let mut values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.salary.as_ref().and_then(|s| s.representative()))
        .collect();

    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let count = values.len();
    let min = values[0];
    let max = values[count - 1];
    let mean = values.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 0 {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    } else {
        values[count / 2]
    };

    Some(SalaryStats {
        count,
        min,
        max,
        mean,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_empty_batch_never_fails() {
        let analyzer = VacancyAnalyzer::default();
        let result = analyzer.analyze(&[]);
        assert_eq!(result, AnalysisResult::empty());
    }

    #[test]
    fn test_salary_stats_only_over_present_salaries() {
        let analyzer = VacancyAnalyzer::default();
        let records = vec![
            fixtures::record("1", "a", "Acme", Some(100.0)),
            fixtures::record("2", "b", "Acme", None),
            fixtures::record("3", "c", "Globex", Some(300.0)),
            fixtures::record("4", "d", "Globex", None),
        ];

        let result = analyzer.analyze(&records);
        assert_eq!(result.count, 4);

        let stats = result.salary_stats.unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 300.0);
        assert_eq!(stats.mean, 200.0);
        assert_eq!(stats.median, 200.0);
    }

    #[test]
    fn test_no_salaries_means_no_stats() {
        let analyzer = VacancyAnalyzer::default();
        let records = vec![fixtures::record("1", "a", "Acme", None)];
        let result = analyzer.analyze(&records);
        assert_eq!(result.count, 1);
        assert!(result.salary_stats.is_none());
    }

    #[test]
    fn test_odd_median() {
        let analyzer = VacancyAnalyzer::default();
        let records = vec![
            fixtures::record("1", "a", "Acme", Some(100.0)),
            fixtures::record("2", "b", "Acme", Some(900.0)),
            fixtures::record("3", "c", "Acme", Some(200.0)),
        ];
        let stats = analyzer.analyze(&records).salary_stats.unwrap();
        assert_eq!(stats.median, 200.0);
        assert_eq!(stats.mean, 400.0);
    }

    #[test]
    fn test_grouping_by_company() {
        let analyzer = VacancyAnalyzer::default();
        let records = vec![
            fixtures::record("1", "a", "Acme", None),
            fixtures::record("2", "b", "Acme", None),
            fixtures::record("3", "c", "", None),
        ];

        let result = analyzer.analyze(&records);
        assert_eq!(result.grouped_counts.get("Acme"), Some(&2));
        assert_eq!(result.grouped_counts.get("unknown"), Some(&1));
    }

    #[test]
    fn test_schedule_and_skills() {
        let analyzer = VacancyAnalyzer::default();
        let mut remote = fixtures::record("1", "a", "Acme", None);
        remote.schedule = Some("remote".to_string());
        remote.key_skills = vec!["Rust".to_string(), "SQL".to_string()];
        let mut office = fixtures::record("2", "b", "Acme", None);
        office.key_skills = vec!["Rust".to_string()];

        let result = analyzer.analyze(&[remote, office]);
        assert_eq!(result.schedule_counts.get("remote"), Some(&1));
        assert_eq!(result.schedule_counts.get("unspecified"), Some(&1));
        assert_eq!(result.skill_counts.get("Rust"), Some(&2));
        assert_eq!(result.skill_counts.get("SQL"), Some(&1));
    }

    #[test]
    fn test_keyword_matching_case_insensitive() {
        let analyzer = VacancyAnalyzer::new(vec!["Rust".to_string(), "Kafka".to_string()]);
        let mut record = fixtures::record("1", "a", "Acme", None);
        record.description = "We build services in rust and deploy them daily".to_string();

        let result = analyzer.analyze(&[record]);
        assert_eq!(result.keyword_counts.get("Rust"), Some(&1));
        assert!(!result.keyword_counts.contains_key("Kafka"));
    }
}
