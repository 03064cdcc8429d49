//! SVG chart backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use svg::node::element::{Rectangle, Text};
use svg::Document;
use tracing::debug;

use crate::analyzer::AnalysisResult;

use super::types::{VisualizationError, Visualizer};

const CHART_WIDTH: usize = 960;
const LABEL_WIDTH: usize = 280;
const ROW_HEIGHT: usize = 26;
const TITLE_HEIGHT: usize = 48;
const BOTTOM_MARGIN: usize = 16;
const VALUE_GUTTER: usize = 90;
const BAR_FILL: &str = "#4878a8";
const MAX_LABEL_CHARS: usize = 38;

/// Renders horizontal bar charts as standalone SVG files.
pub struct SvgVisualizer {
    top_n: usize,
}

impl SvgVisualizer {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n: top_n.max(1),
        }
    }
}

impl Default for SvgVisualizer {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Visualizer for SvgVisualizer {
    fn name(&self) -> &str {
        "svg"
    }

    fn render(
        &self,
        analysis: &AnalysisResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, VisualizationError> {
        std::fs::create_dir_all(output_dir).map_err(|e| VisualizationError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let mut written = Vec::new();

        let charts: [(&str, &str, &BTreeMap<String, u64>); 4] = [
            ("companies.svg", "Vacancies by company", &analysis.grouped_counts),
            ("schedules.svg", "Vacancies by schedule", &analysis.schedule_counts),
            ("skills.svg", "Most requested skills", &analysis.skill_counts),
            ("keywords.svg", "Keyword mentions in descriptions", &analysis.keyword_counts),
        ];

        for (file_name, title, counts) in charts {
            if counts.is_empty() {
                continue;
            }
            let entries = top_entries(counts, self.top_n);
            let path = output_dir.join(file_name);
            bar_chart(title, &entries, &path)?;
            written.push(path);
        }

        if let Some(stats) = &analysis.salary_stats {
            let entries = vec![
                ("min".to_string(), stats.min),
                ("median".to_string(), stats.median),
                ("mean".to_string(), stats.mean),
                ("max".to_string(), stats.max),
            ];
            let path = output_dir.join("salary.svg");
            bar_chart(
                &format!("Salary overview ({} vacancies with salary)", stats.count),
                &entries,
                &path,
            )?;
            written.push(path);
        }

        debug!(charts = written.len(), dir = %output_dir.display(), "Charts rendered");
        Ok(written)
    }
}

/// Highest-count entries first, capped at `n`.
fn top_entries(counts: &BTreeMap<String, u64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = counts
        .iter()
        .map(|(key, value)| (key.clone(), *value as f64))
        .collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let mut truncated: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        truncated.push('…');
        truncated
    }
}

/// Write one horizontal bar chart.
fn bar_chart(
    title: &str,
    entries: &[(String, f64)],
    path: &Path,
) -> Result<(), VisualizationError> {
    let height = TITLE_HEIGHT + entries.len() * ROW_HEIGHT + BOTTOM_MARGIN;
    let max_value = entries
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1.0);
    let bar_span = (CHART_WIDTH - LABEL_WIDTH - VALUE_GUTTER) as f64;

    let mut document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", CHART_WIDTH.to_string())
        .set("height", height.to_string())
        .set("viewBox", format!("0 0 {CHART_WIDTH} {height}"))
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "#ffffff"),
        )
        .add(
            Text::new(title)
                .set("x", "16")
                .set("y", "28")
                .set("font-family", "sans-serif")
                .set("font-size", "18")
                .set("font-weight", "bold")
                .set("fill", "#222222"),
        );

    for (index, (label, value)) in entries.iter().enumerate() {
        let row_top = TITLE_HEIGHT + index * ROW_HEIGHT;
        let bar_width = ((value / max_value) * bar_span).max(1.0);

        document = document
            .add(
                Text::new(truncate_label(label))
                    .set("x", "16")
                    .set("y", (row_top + 17).to_string())
                    .set("font-family", "sans-serif")
                    .set("font-size", "13")
                    .set("fill", "#333333"),
            )
            .add(
                Rectangle::new()
                    .set("x", LABEL_WIDTH.to_string())
                    .set("y", (row_top + 5).to_string())
                    .set("width", format!("{bar_width:.1}"))
                    .set("height", (ROW_HEIGHT - 10).to_string())
                    .set("fill", BAR_FILL),
            )
            .add(
                Text::new(format_value(*value))
                    .set("x", format!("{:.1}", LABEL_WIDTH as f64 + bar_width + 8.0))
                    .set("y", (row_top + 17).to_string())
                    .set("font-family", "sans-serif")
                    .set("font-size", "12")
                    .set("fill", "#555555"),
            );
    }

    svg::save(path, &document).map_err(|e| VisualizationError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::SalaryStats;

    fn analysis() -> AnalysisResult {
        let mut grouped = BTreeMap::new();
        grouped.insert("Acme".to_string(), 5);
        grouped.insert("Globex".to_string(), 3);

        let mut schedules = BTreeMap::new();
        schedules.insert("remote".to_string(), 4);

        AnalysisResult {
            count: 8,
            salary_stats: Some(SalaryStats {
                count: 6,
                min: 90_000.0,
                max: 250_000.0,
                mean: 150_000.0,
                median: 140_000.0,
            }),
            grouped_counts: grouped,
            schedule_counts: schedules,
            skill_counts: BTreeMap::new(),
            keyword_counts: BTreeMap::new(),
        }
    }

    #[test]
    fn test_renders_expected_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let visualizer = SvgVisualizer::default();

        let written = visualizer.render(&analysis(), dir.path()).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["companies.svg", "schedules.svg", "salary.svg"]);
        for path in &written {
            let contents = std::fs::read_to_string(path).unwrap();
            assert!(contents.contains("<svg"));
        }
    }

    #[test]
    fn test_empty_analysis_renders_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let visualizer = SvgVisualizer::default();
        let written = visualizer.render(&AnalysisResult::empty(), dir.path()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_top_n_cap() {
        let mut counts = BTreeMap::new();
        for i in 0..30 {
            counts.insert(format!("company-{i}"), i as u64);
        }
        let entries = top_entries(&counts, 10);
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].1, 29.0);
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(123456.0), "123456");
        assert_eq!(format_value(1.25), "1.2");
    }
}
