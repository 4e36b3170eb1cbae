//! Command-line argument definitions for the streamflow grapher
//!
//! Defines the complete CLI surface using the clap derive API. The tool is a
//! single-purpose batch run, so there are no subcommands; every flag refines
//! the default file layout or the reporting behavior.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// CLI arguments for the streamflow grapher
///
/// Reads two USGS daily discharge files and two pre-computed metrics tables,
/// clips the discharge records to the last five water years, and renders six
/// SVG charts.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "streamflow-grapher",
    version,
    about = "Render streamflow presentation graphics from USGS discharge records",
    long_about = "Reads daily discharge records for Wildcat Creek and the Tippecanoe River \
                  together with pre-computed annual and monthly metrics tables, clips the \
                  discharge series to the last five complete water years, and renders six \
                  charts: daily flow, coefficient of variation, TQmean, R-B index, average \
                  annual monthly flow, and the return period of annual peak flow events."
)]
pub struct Args {
    /// Directory holding the discharge and metrics files
    ///
    /// Defaults to the current directory. Individual file flags override the
    /// default file names inside this directory.
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory the charts are written into
    ///
    /// Created if it does not exist. Defaults to ./output
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Daily discharge file for Wildcat Creek
    #[arg(long, value_name = "FILE")]
    pub wildcat_file: Option<PathBuf>,

    /// Daily discharge file for the Tippecanoe River
    #[arg(long, value_name = "FILE")]
    pub tippecanoe_file: Option<PathBuf>,

    /// Annual metrics table
    #[arg(long, value_name = "FILE")]
    pub annual_metrics: Option<PathBuf>,

    /// Monthly metrics table
    #[arg(long, value_name = "FILE")]
    pub monthly_metrics: Option<PathBuf>,

    /// Start of the analysis window (YYYY-MM-DD)
    ///
    /// Defaults to 2014-10-01, the start of the last five complete water
    /// years of record.
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// End of the analysis window (YYYY-MM-DD), inclusive
    ///
    /// Defaults to 2019-09-30.
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and log only warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Format of the final run report
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub report_format: ReportFormat,
}

/// Output format for the final run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary on stdout
    Human,
    /// Machine-readable JSON on stdout
    Json,
}

impl Args {
    /// Log level derived from the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Whether to draw the progress bar during rendering
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
