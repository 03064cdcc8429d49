//! Aggregate statistics over collected vacancy records.

mod basic;
mod types;

pub use basic::VacancyAnalyzer;
pub use types::{AnalysisResult, Analyzer, SalaryStats};
