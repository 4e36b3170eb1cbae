//! Application constants for the streamflow grapher
//!
//! This module contains file-name defaults, column-name mappings, the analysis
//! window, and chart configuration used throughout the application.

// =============================================================================
// Input Files and Stations
// =============================================================================

/// Default daily discharge file for Wildcat Creek (USGS 03335000)
pub const WILDCAT_DISCHARGE_FILE: &str = "WildcatCreek_Discharge_03335000_19540601-20200315.txt";

/// Default daily discharge file for the Tippecanoe River (USGS 03331500)
pub const TIPPECANOE_DISCHARGE_FILE: &str =
    "TippecanoeRiver_Discharge_03331500_19431001-20200315.txt";

/// Default annual metrics table
pub const ANNUAL_METRICS_FILE: &str = "Annual_Metrics.csv";

/// Default monthly metrics table
pub const MONTHLY_METRICS_FILE: &str = "Monthly_Metrics.csv";

/// USGS site numbers
pub const WILDCAT_SITE_NO: &str = "03335000";
pub const TIPPECANOE_SITE_NO: &str = "03331500";

/// Sentinels used by the USGS in the discharge column when no measurement is
/// available (equipment malfunction, ice cover, seasonal shutdown)
pub const MISSING_SENTINELS: &[&str] = &["Eqp", "Ice", "Ssn"];

/// Date format used in discharge files and metrics tables
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Analysis Window and Water-Year Handling
// =============================================================================

/// Analysis window: the last five complete water years of record,
/// 2014-10-01 through 2019-09-30 inclusive
pub const CLIP_WINDOW_START: (i32, u32, u32) = (2014, 10, 1);
pub const CLIP_WINDOW_END: (i32, u32, u32) = (2019, 9, 30);

/// First calendar month of a water year
pub const WATER_YEAR_START_MONTH: u32 = 10;

/// Positional offsets that map months 1..=12 (January..December) onto a
/// monthly series whose first row is an October water-year start. Slot i
/// averages positions OFFSET[i], OFFSET[i]+12, OFFSET[i]+24, ...
pub const WATER_YEAR_PICK_OFFSETS: [usize; 12] = [3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 1, 2];

// =============================================================================
// Metrics Table Columns
// =============================================================================

/// Column names in the annual and monthly metrics tables
pub mod columns {
    /// Period end date, the table index
    pub const DATE: &str = "Date";

    /// Station key ("Wildcat" or "Tippe")
    pub const STATION: &str = "Station";

    /// USGS site number (numeric in the table, unused by the charts)
    pub const SITE_NO: &str = "site_no";

    /// Mean daily flow over the period
    pub const MEAN_FLOW: &str = "Mean Flow";

    /// Fraction of the period with flow above the period mean
    pub const TQMEAN: &str = "Tqmean";

    /// Median daily flow over the period
    pub const MEDIAN_FLOW: &str = "Median Flow";

    /// Coefficient of variation of daily flow
    pub const COEFF_VAR: &str = "Coeff Var";

    /// Skew of daily flow
    pub const SKEW: &str = "Skew";

    /// Richards-Baker flashiness index
    pub const RB_INDEX: &str = "R-B Index";

    /// Seven-day low flow
    pub const SEVEN_Q: &str = "7Q";

    /// Count of days above three times the median flow
    pub const THREE_X_MEDIAN: &str = "3xMedian";

    /// Annual peak daily flow
    pub const PEAK_FLOW: &str = "Peak Flow";
}

// =============================================================================
// Chart Output
// =============================================================================

/// Fixed output file names, one per chart
pub mod charts {
    pub const DAILY_FLOW: &str = "daily_flow.svg";
    pub const COEFF_VAR: &str = "coeff_var.svg";
    pub const TQMEAN: &str = "tqmean.svg";
    pub const RB_INDEX: &str = "r-b_index.svg";
    pub const MONTHLY_FLOW: &str = "annual_monthly_flow.svg";
    pub const RETURN_PERIOD: &str = "return_period.svg";

    /// All chart file names in rendering order
    pub const ALL: &[&str] = &[
        DAILY_FLOW,
        COEFF_VAR,
        TQMEAN,
        RB_INDEX,
        MONTHLY_FLOW,
        RETURN_PERIOD,
    ];
}

/// Number of charts produced by a full run
pub const CHART_COUNT: usize = 6;

/// Default chart dimensions in pixels
pub const DEFAULT_CHART_WIDTH: u32 = 960;
pub const DEFAULT_CHART_HEIGHT: u32 = 640;

/// Default output directory for rendered charts
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Chart titles
pub mod titles {
    pub const DAILY_FLOW: &str = "Daily Flow for the Last 5 Years of Record";
    pub const COEFF_VAR: &str = "Coefficient of Variation for the Last 5 Years of Record";
    pub const TQMEAN: &str = "TQmean for the Last 5 Years of Record";
    pub const RB_INDEX: &str = "R-B Index for the Last 5 Years of Record";
    pub const MONTHLY_FLOW: &str = "Average Annual Monthly Flow";
    pub const RETURN_PERIOD: &str = "Return Period of Annual Peak Flow Events";
}
