//! Breakout CLI — analyze a ticker for volume/price breakouts.
//!
//! Commands:
//! - `analyze` — load a daily series, find breakout days, measure holding
//!   returns, print the table and write CSV/JSON/Markdown reports
//! - `fetch` — download a daily series from Yahoo Finance into a CSV file
//!   that `analyze --csv` can read offline

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use breakout_core::data::{write_csv, CircuitBreaker, CsvProvider, DataProvider, YahooProvider};
use breakout_runner::{run_analysis, save_report, AnalysisConfig, AnalysisReport};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "breakout",
    about = "Breakout analyzer — volume/price breakout days and their holding-period returns"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find breakout days and measure their forward returns.
    Analyze(AnalyzeArgs),
    /// Download a daily series from Yahoo Finance to CSV.
    Fetch {
        /// Ticker symbol (e.g., AAPL).
        ticker: String,

        /// Start date (YYYY-MM-DD). Defaults to one year ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Output CSV path. Defaults to ./{TICKER}.csv.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Ticker symbol. Required unless given in --config.
    ticker: Option<String>,

    /// Path to a TOML config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start date (YYYY-MM-DD). Defaults to one year ago.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Volume breakout threshold, percent of the 20-day average volume.
    #[arg(long)]
    volume_threshold: Option<f64>,

    /// Daily price change threshold, percent.
    #[arg(long, allow_hyphen_values = true)]
    price_threshold: Option<f64>,

    /// Holding period in trading days.
    #[arg(long)]
    holding_period: Option<usize>,

    /// Read the series from this CSV file (date,close,volume) before trying Yahoo.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Offline mode: never contact Yahoo Finance.
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Use synthetic data when no provider succeeds.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Directory for report files.
    #[arg(long, default_value = "reports")]
    output_dir: PathBuf,

    /// Print results only; write no report files.
    #[arg(long, default_value_t = false)]
    no_export: bool,
}

/// `RUST_LOG` directives when set and valid, otherwise info for the breakout crates.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

const DEFAULT_LOG_FILTER: &str = "breakout_core=info,breakout_runner=info";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Fetch {
            ticker,
            start,
            end,
            output,
        } => run_fetch(ticker, start, end, output),
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = build_config(&args)?;

    let csv_provider = args.csv.as_ref().map(CsvProvider::new);
    let yahoo_provider = if args.offline {
        None
    } else {
        Some(YahooProvider::new(Arc::new(CircuitBreaker::default_provider()))?)
    };

    let mut providers: Vec<&dyn DataProvider> = Vec::new();
    if let Some(p) = &csv_provider {
        providers.push(p);
    }
    if let Some(p) = &yahoo_provider {
        providers.push(p);
    }

    let report = match run_analysis(&config, &providers, args.synthetic) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("No analysis performed: {e}");
            std::process::exit(1);
        }
    };

    print_report(&report);

    if !args.no_export {
        let paths = save_report(&report, &args.output_dir)?;
        println!("Report saved as {}", paths.csv.display());
        info!(json = %paths.json.display(), markdown = %paths.markdown.display(), "report artifacts written");
    }

    Ok(())
}

fn build_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => {
            let Some(ticker) = args.ticker.as_deref() else {
                bail!("a ticker is required (positional argument or --config)");
            };
            let (start, end) = resolve_range(args.start.as_deref(), args.end.as_deref())?;
            AnalysisConfig::new(ticker.to_uppercase(), start, end)
        }
    };

    let a = &mut config.analysis;
    if args.config.is_some() {
        if let Some(ticker) = &args.ticker {
            a.ticker = ticker.to_uppercase();
        }
        if let Some(start) = args.start.as_deref() {
            a.start_date = parse_date(start)?;
        }
        if let Some(end) = args.end.as_deref() {
            a.end_date = parse_date(end)?;
        }
    }
    if let Some(v) = args.volume_threshold {
        a.volume_threshold_pct = v;
    }
    if let Some(p) = args.price_threshold {
        a.price_change_threshold_pct = p;
    }
    if let Some(h) = args.holding_period {
        a.holding_period = h;
    }

    config.validate()?;
    Ok(config)
}

fn run_fetch(
    ticker: String,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let ticker = ticker.to_uppercase();
    let (start, end) = resolve_range(start.as_deref(), end.as_deref())?;
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{ticker}.csv")));

    let provider = YahooProvider::new(Arc::new(CircuitBreaker::default_provider()))?;
    let fetched = provider
        .fetch(&ticker, start, end)
        .with_context(|| format!("failed to fetch {ticker}"))?;

    write_csv(&fetched.series, &output)?;
    println!(
        "Saved {} observations for {ticker} to {}",
        fetched.series.len(),
        output.display()
    );
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let end_date = end
        .map(parse_date)
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let start_date = start
        .map(parse_date)
        .transpose()?
        .unwrap_or_else(|| end_date - chrono::Duration::days(365));
    Ok((start_date, end_date))
}

fn print_report(report: &AnalysisReport) {
    println!();
    println!("=== Breakout Analysis ===");
    println!("Ticker:          {}", report.ticker);
    println!("Period:          {} to {}", report.start_date, report.end_date);
    println!("Observations:    {}", report.observation_count);
    println!(
        "Thresholds:      volume > {}% of 20d avg, change > {}%",
        report.params.volume_threshold_pct, report.params.price_change_threshold_pct
    );
    println!("Holding Period:  {} days", report.params.holding_period);
    if report.is_synthetic() {
        println!("WARNING: Results based on SYNTHETIC data");
    }
    println!();

    if report.has_no_breakouts() {
        println!("No breakout signals identified based on the given parameters.");
        println!();
        return;
    }

    println!(
        "{:<12} {:>12} {:>14} {:>18} {:>12} {:>15}",
        "Date", "Close", "Volume", "20d Avg Volume", "Daily %", "Holding Ret %"
    );
    println!("{}", "-".repeat(88));
    for r in &report.records {
        println!(
            "{:<12} {:>12.2} {:>14} {:>18} {:>12} {:>15}",
            r.date().to_string(),
            r.close(),
            r.volume(),
            fmt_opt(r.observation.rolling_avg_volume, 0),
            fmt_opt(r.observation.daily_pct_change, 2),
            fmt_opt(r.holding_return, 2),
        );
    }

    let s = &report.stats;
    println!();
    println!("--- Breakout Statistics ---");
    println!("Breakouts:       {}", s.breakout_count);
    println!(
        "Measured:        {} ({} beyond series end)",
        s.measured_count, s.unmeasured_count
    );
    println!("Mean Return:     {}", fmt_pct(s.mean_return));
    println!("Median Return:   {}", fmt_pct(s.median_return));
    println!("Best / Worst:    {} / {}", fmt_pct(s.best_return), fmt_pct(s.worst_return));
    println!("Win Rate:        {}", fmt_pct(s.win_rate.map(|w| w * 100.0)));
    println!();
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "n/a".into())
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}%"))
        .unwrap_or_else(|| "n/a".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_analyze(argv: &[&str]) -> AnalyzeArgs {
        let mut full = vec!["breakout", "analyze"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Analyze(args) => args,
            Commands::Fetch { .. } => unreachable!("parsed analyze"),
        }
    }

    #[test]
    fn rust_log_overrides_default_filter() {
        let filter = log_filter(Some("breakout_core=debug")).to_string();
        assert!(filter.contains("breakout_core=debug"), "{filter}");
        assert!(!filter.contains("breakout_core=info"), "{filter}");
    }

    #[test]
    fn default_filter_when_rust_log_unset() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("breakout_core=info"), "{filter}");
        assert!(filter.contains("breakout_runner=info"), "{filter}");
    }

    #[test]
    fn flags_build_config_with_defaults() {
        let args = parse_analyze(&["aapl", "--start", "2023-01-01", "--end", "2023-12-31"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.ticker(), "AAPL");
        assert_eq!(config.analysis.volume_threshold_pct, 200.0);
        assert_eq!(config.analysis.price_change_threshold_pct, 2.0);
        assert_eq!(config.analysis.holding_period, 10);
    }

    #[test]
    fn flags_override_parameters() {
        let args = parse_analyze(&[
            "MSFT",
            "--start",
            "2023-01-01",
            "--end",
            "2023-12-31",
            "--volume-threshold",
            "300",
            "--price-threshold",
            "-1.5",
            "--holding-period",
            "3",
        ]);
        let params = build_config(&args).unwrap().params();
        assert_eq!(params.volume_threshold_pct, 300.0);
        assert_eq!(params.price_change_threshold_pct, -1.5);
        assert_eq!(params.holding_period, 3);
    }

    #[test]
    fn missing_ticker_is_an_error() {
        let args = parse_analyze(&["--start", "2023-01-01"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn zero_holding_period_is_rejected() {
        let args = parse_analyze(&["SPY", "--holding-period", "0"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn default_range_is_one_year_ending_today() {
        let (start, end) = resolve_range(None, None).unwrap();
        assert_eq!(end - start, chrono::Duration::days(365));
        assert!(resolve_range(Some("2023-13-01"), None).is_err());
    }
}
