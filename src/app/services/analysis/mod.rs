//! Derived statistics over the metrics tables
//!
//! Two small computations feed the charts directly: water-year monthly
//! averaging of mean flow, and Weibull plotting-position estimation for
//! annual peak flow events. Annual metric columns need no derivation and are
//! plotted straight from [`MetricsTable::series`](crate::MetricsTable::series).

pub mod monthly;
pub mod return_period;

pub use monthly::water_year_monthly_means;
pub use return_period::{ReturnPeriodPoint, weibull_points};
