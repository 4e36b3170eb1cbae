//! Streamflow Grapher Library
//!
//! A Rust library for turning USGS daily streamflow records and pre-computed
//! hydrologic metrics tables into presentation graphics.
//!
//! This library provides tools for:
//! - Parsing whitespace-delimited USGS daily discharge files with proper
//!   comment/header handling and missing-value coercion
//! - Clipping discharge series to a date window while tracking missing values
//! - Loading annual and monthly metrics tables (TQmean, R-B index, peak flow, ...)
//! - Water-year monthly averaging and Weibull plotting-position estimation
//! - Rendering six static SVG charts with the plotters backend

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod analysis;
        pub mod chart_renderer;
        pub mod discharge_reader;
        pub mod metrics_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DailySeries, DischargeRecord, Gauge, MetricsRow, MetricsTable};
pub use config::Config;

/// Result type alias for streamflow processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for streamflow loading, aggregation, and rendering
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Discharge file format error
    #[error("Discharge format error in file '{file}': {message}")]
    DischargeFormat { file: String, message: String },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Station name not recognized
    #[error("Unknown station: '{name}'")]
    UnknownStation { name: String },

    /// Required column missing from a metrics file
    #[error("Missing column '{column}' in file '{file}'")]
    MissingColumn { file: String, column: String },

    /// Chart rendering error
    #[error("Chart rendering error: {message}")]
    ChartRendering { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a discharge format error
    pub fn discharge_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DischargeFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown station error
    pub fn unknown_station(name: impl Into<String>) -> Self {
        Self::UnknownStation { name: name.into() }
    }

    /// Create a missing column error
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Create a chart rendering error
    pub fn chart_rendering(message: impl Into<String>) -> Self {
        Self::ChartRendering {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}
