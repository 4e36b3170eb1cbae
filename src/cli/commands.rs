//! Command execution for the streamflow grapher CLI
//!
//! Orchestrates the full batch run: logging setup, configuration assembly,
//! loading and clipping the discharge series, loading the metrics tables,
//! rendering the six charts behind a progress bar, and the final report.

use std::path::PathBuf;
use std::time::Instant;

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::app::models::{DailySeries, Gauge, MetricsTable};
use crate::app::services::chart_renderer::ChartRenderer;
use crate::app::services::{discharge_reader, metrics_reader};
use crate::cli::args::{Args, ReportFormat};
use crate::config::{Config, MetricsKind};
use crate::constants::{CHART_COUNT, columns, titles};
use crate::{Error, Result};

/// Per-gauge loading statistics
#[derive(Debug, Clone, Default)]
pub struct GaugeStats {
    /// Records loaded from the discharge file
    pub records_loaded: usize,
    /// Missing values in the full record
    pub missing_full: usize,
    /// Records remaining after clipping to the analysis window
    pub records_clipped: usize,
    /// Missing values inside the analysis window
    pub missing_clipped: usize,
}

/// Statistics for a complete run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Loading statistics per gauge, in plotting order
    pub gauges: Vec<(Gauge, GaugeStats)>,
    /// Rows loaded from the annual metrics table
    pub annual_rows: usize,
    /// Rows loaded from the monthly metrics table
    pub monthly_rows: usize,
    /// Rendered chart files with their sizes in bytes
    pub charts: Vec<(String, u64)>,
    /// Total processing time
    pub elapsed: std::time::Duration,
}

impl RunStats {
    /// Total size of all rendered charts in bytes
    pub fn total_chart_size(&self) -> u64 {
        self.charts.iter().map(|(_, size)| size).sum()
    }

    /// Format a byte count in human-readable units
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} {}", bytes, UNITS[unit])
        } else {
            format!("{:.2} {}", size, UNITS[unit])
        }
    }
}

/// Main command runner
///
/// 1. Set up logging from the verbosity flags
/// 2. Assemble the configuration and validate it, window flags included
/// 3. Load and clip both discharge series, load both metrics tables
/// 4. Render the six charts with progress reporting
/// 5. Emit the final report
pub fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args);

    info!("Starting streamflow grapher");
    debug!("Command line arguments: {:?}", args);

    let config = build_config(&args);
    config.validate()?;
    config.ensure_output_directory()?;

    let stats = execute(&config, args.show_progress())?;
    report(&args, &stats)?;
    Ok(stats)
}

/// Run the pipeline against a validated configuration
pub fn execute(config: &Config, show_progress: bool) -> Result<RunStats> {
    let start_time = Instant::now();
    let mut stats = RunStats::default();

    // Load and clip the discharge record of each river
    let mut clipped: Vec<(Gauge, DailySeries)> = Vec::new();
    for gauge in Gauge::all() {
        let path = config.discharge_path(gauge);
        let (series, missing_full) = discharge_reader::read_discharge(&path)?;

        let (window, missing_clipped) = series.clip(config.window.start, config.window.end);
        info!(
            "{}: {} records, {} missing; window {}..{} keeps {} records, {} missing",
            gauge.river_name(),
            series.len(),
            missing_full,
            config.window.start,
            config.window.end,
            window.len(),
            missing_clipped
        );

        stats.gauges.push((
            gauge,
            GaugeStats {
                records_loaded: series.len(),
                missing_full,
                records_clipped: window.len(),
                missing_clipped,
            },
        ));
        clipped.push((gauge, window));
    }

    // Load the pre-computed metrics tables
    let annual = metrics_reader::read_metrics(&config.metrics_path(MetricsKind::Annual))?;
    let monthly = metrics_reader::read_metrics(&config.metrics_path(MetricsKind::Monthly))?;
    stats.annual_rows = annual.len();
    stats.monthly_rows = monthly.len();

    // Render all six charts
    let progress = if show_progress {
        let bar = ProgressBar::new(CHART_COUNT as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let renderer = ChartRenderer::new(&config.output_dir, config.chart_width, config.chart_height);
    let mut rendered: Vec<PathBuf> = Vec::new();

    for (i, (name, render)) in chart_jobs(&renderer, &clipped, &annual, &monthly)
        .into_iter()
        .enumerate()
    {
        if let Some(bar) = &progress {
            bar.set_position(i as u64);
            bar.set_message(format!("Rendering {}", name));
        }
        let path = render()?;
        info!("Rendered {}", path.display());
        rendered.push(path);
    }

    if let Some(bar) = &progress {
        bar.finish_with_message("Rendering complete");
    }

    for path in rendered {
        let size = std::fs::metadata(&path)
            .map_err(|e| Error::io(format!("Failed to stat '{}'", path.display()), e))?
            .len();
        stats
            .charts
            .push((path.file_name().unwrap_or_default().to_string_lossy().into_owned(), size));
    }

    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// The six chart jobs of a run, in rendering order
#[allow(clippy::type_complexity)]
fn chart_jobs<'a>(
    renderer: &'a ChartRenderer,
    clipped: &'a [(Gauge, DailySeries)],
    annual: &'a MetricsTable,
    monthly: &'a MetricsTable,
) -> Vec<(&'static str, Box<dyn FnOnce() -> Result<PathBuf> + 'a>)> {
    vec![
        (
            "daily flow",
            Box::new(move || renderer.daily_flow(clipped)),
        ),
        (
            "coefficient of variation",
            Box::new(move || {
                renderer.annual_metric(
                    annual,
                    columns::COEFF_VAR,
                    titles::COEFF_VAR,
                    "Coefficient of Variation",
                    crate::constants::charts::COEFF_VAR,
                )
            }),
        ),
        (
            "TQmean",
            Box::new(move || {
                renderer.annual_metric(
                    annual,
                    columns::TQMEAN,
                    titles::TQMEAN,
                    "TQmean",
                    crate::constants::charts::TQMEAN,
                )
            }),
        ),
        (
            "R-B index",
            Box::new(move || {
                renderer.annual_metric(
                    annual,
                    columns::RB_INDEX,
                    titles::RB_INDEX,
                    "R-B Index",
                    crate::constants::charts::RB_INDEX,
                )
            }),
        ),
        (
            "average annual monthly flow",
            Box::new(move || renderer.monthly_means(monthly)),
        ),
        (
            "return period",
            Box::new(move || renderer.return_period(annual)),
        ),
    ]
}

/// Assemble the configuration from CLI arguments
fn build_config(args: &Args) -> Config {
    let mut config = Config::default();

    if let Some(input) = &args.input_dir {
        config.input_dir = input.clone();
    }
    if let Some(output) = &args.output_dir {
        config.output_dir = output.clone();
    }
    if let Some(path) = &args.wildcat_file {
        config.wildcat_file = path.clone();
    }
    if let Some(path) = &args.tippecanoe_file {
        config.tippecanoe_file = path.clone();
    }
    if let Some(path) = &args.annual_metrics {
        config.annual_metrics_file = path.clone();
    }
    if let Some(path) = &args.monthly_metrics {
        config.monthly_metrics_file = path.clone();
    }
    if let Some(start) = args.start_date {
        config.window.start = start;
    }
    if let Some(end) = args.end_date {
        config.window.end = end;
    }

    config
}

/// Set up structured logging based on the verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("streamflow_grapher={}", args.log_level())));

    // try_init so repeated calls inside one process stay harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

/// Emit the final run report in the requested format
fn report(args: &Args, stats: &RunStats) -> Result<()> {
    match args.report_format {
        ReportFormat::Human => human_report(stats),
        ReportFormat::Json => json_report(stats),
    }
    Ok(())
}

/// Human-readable summary on stdout
fn human_report(stats: &RunStats) {
    println!();
    println!("{}", "Streamflow charts rendered".bold().green());
    for (gauge, gauge_stats) in &stats.gauges {
        println!(
            "  {}: {} records ({} missing), {} in window ({} missing)",
            gauge.river_name().bold(),
            gauge_stats.records_loaded,
            gauge_stats.missing_full,
            gauge_stats.records_clipped,
            gauge_stats.missing_clipped
        );
    }
    println!(
        "  Metrics rows: {} annual, {} monthly",
        stats.annual_rows, stats.monthly_rows
    );
    println!();
    for (name, size) in &stats.charts {
        println!("  {} ({})", name, RunStats::format_size(*size));
    }
    println!(
        "\n  {} charts, {} total, finished in {}",
        stats.charts.len(),
        RunStats::format_size(stats.total_chart_size()),
        HumanDuration(stats.elapsed)
    );
}

/// Machine-readable summary on stdout
fn json_report(stats: &RunStats) {
    let json = serde_json::json!({
        "gauges": stats.gauges.iter().map(|(gauge, s)| {
            serde_json::json!({
                "station": gauge.key(),
                "river": gauge.river_name(),
                "records_loaded": s.records_loaded,
                "missing_full": s.missing_full,
                "records_clipped": s.records_clipped,
                "missing_clipped": s.missing_clipped,
            })
        }).collect::<Vec<_>>(),
        "annual_rows": stats.annual_rows,
        "monthly_rows": stats.monthly_rows,
        "charts": stats.charts.iter().map(|(name, size)| {
            serde_json::json!({ "file": name, "size_bytes": size })
        }).collect::<Vec<_>>(),
        "elapsed_seconds": stats.elapsed.as_secs_f64(),
    });

    println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::charts;
    use clap::Parser;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(RunStats::format_size(0), "0 B");
        assert_eq!(RunStats::format_size(512), "512 B");
        assert_eq!(RunStats::format_size(1024), "1.00 KB");
        assert_eq!(RunStats::format_size(1536), "1.50 KB");
        assert_eq!(RunStats::format_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let args = Args::try_parse_from([
            "streamflow-grapher",
            "--input",
            "/data",
            "--output",
            "/charts",
            "--start-date",
            "2010-10-01",
            "--end-date",
            "2015-09-30",
            "--wildcat-file",
            "w.txt",
        ])
        .unwrap();

        let config = build_config(&args);
        assert_eq!(config.input_dir, PathBuf::from("/data"));
        assert_eq!(config.output_dir, PathBuf::from("/charts"));
        assert_eq!(config.wildcat_file, PathBuf::from("w.txt"));
        assert_eq!(
            config.window.start,
            chrono::NaiveDate::from_ymd_opt(2010, 10, 1).unwrap()
        );
        assert_eq!(
            config.window.end,
            chrono::NaiveDate::from_ymd_opt(2015, 9, 30).unwrap()
        );
    }

    /// An inverted window given on the command line is rejected by the
    /// assembled configuration before any file checks run
    #[test]
    fn test_inverted_window_flags_rejected() {
        let args = Args::try_parse_from([
            "streamflow-grapher",
            "--start-date",
            "2019-09-30",
            "--end-date",
            "2014-10-01",
        ])
        .unwrap();

        let config = build_config(&args);
        assert!(matches!(
            config.validate(),
            Err(crate::Error::Configuration { .. })
        ));
    }

    /// Write a minimal but complete input directory and run the pipeline
    #[test]
    fn test_execute_full_pipeline() {
        let dir = TempDir::new().unwrap();

        let preamble = "# comment\nagency_cd\tsite_no\tdatetime\tdischarge\tquality\n5s\t15s\t10d\t14n\t10s\n";
        let mut wildcat =
            std::fs::File::create(dir.path().join("wildcat.txt")).unwrap();
        write!(wildcat, "{}", preamble).unwrap();
        writeln!(wildcat, "USGS\t03335000\t2014-10-01\t15.2\tA").unwrap();
        writeln!(wildcat, "USGS\t03335000\t2014-10-02\tEqp\tA").unwrap();
        writeln!(wildcat, "USGS\t03335000\t2014-10-03\t16.4\tA").unwrap();

        let mut tippe = std::fs::File::create(dir.path().join("tippe.txt")).unwrap();
        write!(tippe, "{}", preamble).unwrap();
        writeln!(tippe, "USGS\t03331500\t2014-10-01\t810.0\tA").unwrap();
        writeln!(tippe, "USGS\t03331500\t2014-10-02\t805.0\tA").unwrap();

        let mut annual = std::fs::File::create(dir.path().join("annual.csv")).unwrap();
        writeln!(annual, "Date,Station,Coeff Var,Tqmean,R-B Index,Peak Flow").unwrap();
        writeln!(annual, "2015-09-30,Wildcat,1.4,0.33,0.28,4500").unwrap();
        writeln!(annual, "2015-09-30,Tippe,0.9,0.41,0.07,6200").unwrap();
        writeln!(annual, "2016-09-30,Wildcat,1.5,0.31,0.30,5100").unwrap();
        writeln!(annual, "2016-09-30,Tippe,0.8,0.44,0.08,5900").unwrap();

        let mut monthly = std::fs::File::create(dir.path().join("monthly.csv")).unwrap();
        writeln!(monthly, "Date,Station,Mean Flow").unwrap();
        for gauge in ["Wildcat", "Tippe"] {
            for (year, month) in [(2014, 10), (2014, 11), (2014, 12), (2015, 1)] {
                writeln!(monthly, "{}-{:02}-01,{},{}", year, month, gauge, 100.0).unwrap();
            }
        }

        let config = Config::new(dir.path(), dir.path().join("charts"))
            .with_discharge_file(Gauge::Wildcat, "wildcat.txt")
            .with_discharge_file(Gauge::Tippecanoe, "tippe.txt")
            .with_metrics_file(MetricsKind::Annual, "annual.csv")
            .with_metrics_file(MetricsKind::Monthly, "monthly.csv");

        config.validate().unwrap();
        config.ensure_output_directory().unwrap();

        let stats = execute(&config, false).unwrap();

        assert_eq!(stats.charts.len(), CHART_COUNT);
        for name in charts::ALL {
            assert!(
                config.output_dir.join(name).exists(),
                "missing chart {}",
                name
            );
        }

        let wildcat_stats = &stats.gauges[0].1;
        assert_eq!(wildcat_stats.records_loaded, 3);
        assert_eq!(wildcat_stats.missing_full, 1);
        assert_eq!(wildcat_stats.records_clipped, 3);
        assert_eq!(wildcat_stats.missing_clipped, 1);
    }
}
