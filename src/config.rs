//! Configuration management and validation
//!
//! Provides the run configuration: where the discharge and metrics files
//! live, where charts are written, the analysis window, and chart dimensions.
//! Relative file paths resolve against the input directory so a run can point
//! at a data folder with one flag.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::models::Gauge;
use crate::constants::{
    ANNUAL_METRICS_FILE, CLIP_WINDOW_END, CLIP_WINDOW_START, DEFAULT_CHART_HEIGHT,
    DEFAULT_CHART_WIDTH, DEFAULT_OUTPUT_DIR, MONTHLY_METRICS_FILE, TIPPECANOE_DISCHARGE_FILE,
    WILDCAT_DISCHARGE_FILE,
};
use crate::{Error, Result};

/// Which pre-computed metrics table a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricsKind {
    /// One row per station per water year
    Annual,
    /// One row per station per month
    Monthly,
}

impl std::fmt::Display for MetricsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsKind::Annual => write!(f, "Annual"),
            MetricsKind::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Inclusive analysis window applied to the discharge series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for ClipWindow {
    fn default() -> Self {
        let (sy, sm, sd) = CLIP_WINDOW_START;
        let (ey, em, ed) = CLIP_WINDOW_END;
        Self {
            start: NaiveDate::from_ymd_opt(sy, sm, sd).expect("valid window start"),
            end: NaiveDate::from_ymd_opt(ey, em, ed).expect("valid window end"),
        }
    }
}

/// Global configuration for a charting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the input files
    pub input_dir: PathBuf,

    /// Directory charts are written into
    pub output_dir: PathBuf,

    /// Daily discharge file for Wildcat Creek
    pub wildcat_file: PathBuf,

    /// Daily discharge file for the Tippecanoe River
    pub tippecanoe_file: PathBuf,

    /// Annual metrics table
    pub annual_metrics_file: PathBuf,

    /// Monthly metrics table
    pub monthly_metrics_file: PathBuf,

    /// Analysis window applied to the discharge series
    pub window: ClipWindow,

    /// Chart width in pixels
    pub chart_width: u32,

    /// Chart height in pixels
    pub chart_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            wildcat_file: PathBuf::from(WILDCAT_DISCHARGE_FILE),
            tippecanoe_file: PathBuf::from(TIPPECANOE_DISCHARGE_FILE),
            annual_metrics_file: PathBuf::from(ANNUAL_METRICS_FILE),
            monthly_metrics_file: PathBuf::from(MONTHLY_METRICS_FILE),
            window: ClipWindow::default(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl Config {
    /// Create a configuration for the given input and output directories
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Override the discharge file for one gauge
    pub fn with_discharge_file(mut self, gauge: Gauge, path: impl Into<PathBuf>) -> Self {
        match gauge {
            Gauge::Wildcat => self.wildcat_file = path.into(),
            Gauge::Tippecanoe => self.tippecanoe_file = path.into(),
        }
        self
    }

    /// Override one of the metrics tables
    pub fn with_metrics_file(mut self, kind: MetricsKind, path: impl Into<PathBuf>) -> Self {
        match kind {
            MetricsKind::Annual => self.annual_metrics_file = path.into(),
            MetricsKind::Monthly => self.monthly_metrics_file = path.into(),
        }
        self
    }

    /// Override the analysis window
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window = ClipWindow { start, end };
        self
    }

    /// Override the chart dimensions
    pub fn with_chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }

    /// Resolved path of the discharge file for one gauge
    pub fn discharge_path(&self, gauge: Gauge) -> PathBuf {
        match gauge {
            Gauge::Wildcat => self.resolve(&self.wildcat_file),
            Gauge::Tippecanoe => self.resolve(&self.tippecanoe_file),
        }
    }

    /// Resolved path of one metrics table
    pub fn metrics_path(&self, kind: MetricsKind) -> PathBuf {
        match kind {
            MetricsKind::Annual => self.resolve(&self.annual_metrics_file),
            MetricsKind::Monthly => self.resolve(&self.monthly_metrics_file),
        }
    }

    /// Join a relative path onto the input directory; absolute paths win
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.input_dir.join(path)
        }
    }

    /// Validate the configuration for a run
    ///
    /// Checks window ordering, chart dimensions, and that every input file
    /// exists; the output directory is created later, not validated here.
    pub fn validate(&self) -> Result<()> {
        if self.window.start > self.window.end {
            return Err(Error::configuration(format!(
                "Window start {} is after window end {}",
                self.window.start, self.window.end
            )));
        }

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(Error::configuration(format!(
                "Chart dimensions must be positive, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }

        for gauge in Gauge::all() {
            let path = self.discharge_path(gauge);
            if !path.exists() {
                return Err(Error::file_not_found(path.display().to_string()));
            }
        }
        for kind in [MetricsKind::Annual, MetricsKind::Monthly] {
            let path = self.metrics_path(kind);
            if !path.exists() {
                return Err(Error::file_not_found(path.display().to_string()));
            }
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }

    /// Create the output directory if it does not exist
    pub fn ensure_output_directory(&self) -> Result<()> {
        if !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir).map_err(|e| {
                Error::configuration(format!(
                    "Failed to create output directory '{}': {}",
                    self.output_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
