//! Command-line surface for the vacancy aggregation pipeline.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vacanza_core::{
    analyzer::VacancyAnalyzer,
    load_config, saver, validate_config, Analyzer, Config, ConcurrentSearcher, DetailsFetcher,
    HttpDetailsFetcher, HttpListingClient, ListingClient, PipelineParts, RunReport, SearchMode,
    SearchQuery, Searcher, SequentialSearcher, SvgVisualizer, VacancyPipeline, Visualizer,
};

const EXIT_FAILED: u8 = 1;
const EXIT_DONE_WITH_WARNING: u8 = 2;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl FormatArg {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vacanza",
    version,
    about = "Collect, analyse and chart job vacancies from a listing service"
)]
struct Cli {
    /// Search query, e.g. "rust developer"
    query: String,

    /// Output file for collected vacancies (.json or .csv)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Storage format; otherwise derived from the output file extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Maximum concurrent detail fetches
    #[arg(long)]
    concurrency: Option<usize>,

    /// Fetch search result pages in parallel instead of one by one
    #[arg(long)]
    concurrent_search: bool,

    /// Maximum number of result pages to walk
    #[arg(long)]
    max_pages: Option<u32>,

    /// Region code understood by the listing service
    #[arg(long)]
    area: Option<u32>,

    /// Cap on collected vacancies
    #[arg(long)]
    limit: Option<usize>,

    /// Directory for rendered charts (default: `charts` next to the output)
    #[arg(long)]
    charts_dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// File-name-safe slug for default output paths.
fn slug(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut last_dash = true;
    for c in query.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "query".to_string()
    } else {
        trimmed.to_string()
    }
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.concurrent_search {
        config.search.mode = SearchMode::Concurrent;
    }
    if let Some(max_pages) = cli.max_pages {
        config.search.max_pages = max_pages;
    }
    if let Some(area) = cli.area {
        config.search.area = area;
    }
    if let Some(limit) = cli.limit {
        config.search.max_results = Some(limit);
    }
    if let Some(concurrency) = cli.concurrency {
        config.pipeline.max_concurrent_fetches = concurrency;
    }
    if let Some(charts_dir) = &cli.charts_dir {
        config.pipeline.charts_dir = Some(charts_dir.clone());
    }

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn print_summary(report: &RunReport) {
    println!(
        "Collected {} vacancies for \"{}\" ({} found, {} duplicates dropped)",
        report.records_processed, report.query, report.summaries_found, report.duplicates_removed
    );
    if let Some(stats) = &report.analysis.salary_stats {
        println!(
            "Salary over {} vacancies: min {:.0}, median {:.0}, mean {:.0}, max {:.0}",
            stats.count, stats.min, stats.median, stats.mean, stats.max
        );
    }
    println!(
        "Saved {} records ({} bytes) to {}",
        report.saved.records,
        report.saved.bytes,
        report.saved.path.display()
    );
    for chart in &report.charts {
        println!("Chart: {}", chart.display());
    }
    if !report.fetch_failures.is_empty() {
        println!("{} vacancies could not be fetched:", report.fetch_failures.len());
        for failure in report.fetch_failures.iter().take(10) {
            println!("  {} ({}): {}", failure.id, failure.title, failure.reason);
        }
        if report.fetch_failures.len() > 10 {
            println!("  ... and {} more", report.fetch_failures.len() - 10);
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = build_config(&cli)?;

    let extension = cli.format.map(|f| f.as_str()).unwrap_or("json");
    let destination = cli
        .out
        .clone()
        .unwrap_or_else(|| config.output.dir.join(format!("{}.{extension}", slug(&cli.query))));

    let saver = match cli.format {
        Some(format) => saver::for_format(format.as_str()),
        None => saver::for_destination(&destination),
    }
    .context("Unsupported output format")?;

    info!(
        query = %cli.query,
        destination = %destination.display(),
        mode = ?config.search.mode,
        "Starting vacancy run"
    );

    let client: Arc<dyn ListingClient> = Arc::new(HttpListingClient::new(config.listing.clone()));

    let searcher: Arc<dyn Searcher> = match config.search.mode {
        SearchMode::Sequential => Arc::new(
            SequentialSearcher::new(Arc::clone(&client))
                .with_page_delay(Duration::from_millis(config.search.page_delay_ms)),
        ),
        SearchMode::Concurrent => Arc::new(ConcurrentSearcher::new(
            Arc::clone(&client),
            config.search.max_concurrent_pages,
        )),
    };

    let fetcher: Arc<dyn DetailsFetcher> = Arc::new(HttpDetailsFetcher::new(Arc::clone(&client)));

    let keywords = if config.analysis.keywords.is_empty() {
        VacancyAnalyzer::default_keywords()
    } else {
        config.analysis.keywords.clone()
    };
    let analyzer: Arc<dyn Analyzer> = Arc::new(VacancyAnalyzer::new(keywords));
    let visualizer: Arc<dyn Visualizer> = Arc::new(SvgVisualizer::new(config.analysis.top_n));

    let pipeline = VacancyPipeline::new(
        config.pipeline.clone(),
        PipelineParts {
            searcher,
            fetcher,
            saver,
            analyzer,
            visualizer,
        },
    );

    // First Ctrl-C cancels cooperatively: in-flight fetches finish, the run
    // ends as failed with a cancellation cause.
    let cancel = pipeline.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after in-flight work settles");
            cancel.cancel();
        }
    });

    let mut query = SearchQuery::new(cli.query.clone());
    query.area = config.search.area;
    query.per_page = config.search.per_page;
    query.max_pages = config.search.max_pages;
    query.max_results = config.search.max_results;

    match pipeline.run(&query, &destination).await {
        Ok(report) => {
            print_summary(&report);
            if let Some(warning) = &report.visualization_warning {
                warn!(warning = %warning, "Run finished with a visualization warning");
                Ok(ExitCode::from(EXIT_DONE_WITH_WARNING))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Err(e) => {
            error!(stage = %e.stage(), error = %e, "Run failed");
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {e:#}");
            ExitCode::from(EXIT_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Rust developer"), "rust-developer");
        assert_eq!(slug("C++ / embedded"), "c-embedded");
        assert_eq!(slug("  "), "query");
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "vacanza",
            "rust developer",
            "--out",
            "/tmp/records.csv",
            "--format",
            "csv",
            "--concurrency",
            "4",
            "--concurrent-search",
            "--max-pages",
            "3",
        ]);
        assert_eq!(cli.query, "rust developer");
        assert_eq!(cli.out, Some(PathBuf::from("/tmp/records.csv")));
        assert!(matches!(cli.format, Some(FormatArg::Csv)));
        assert_eq!(cli.concurrency, Some(4));
        assert!(cli.concurrent_search);
        assert_eq!(cli.max_pages, Some(3));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "vacanza",
            "rust",
            "--concurrency",
            "2",
            "--limit",
            "50",
            "--concurrent-search",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.pipeline.max_concurrent_fetches, 2);
        assert_eq!(config.search.max_results, Some(50));
        assert_eq!(config.search.mode, SearchMode::Concurrent);
    }
}
