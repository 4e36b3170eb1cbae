//! Chart rendering over the plotters SVG backend
//!
//! Consumes clipped discharge series and metrics tables and writes the six
//! charts of a full run: daily flow, three annual metric scatters, average
//! annual monthly flow, and the peak-flow return-period plot. Rendering is
//! synchronous and file-per-chart; each method returns the path it wrote.

mod style;

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use tracing::{debug, warn};

use crate::app::models::{DailySeries, Gauge, MetricsTable};
use crate::app::services::analysis::{water_year_monthly_means, weibull_points};
use crate::constants::{CLIP_WINDOW_END, CLIP_WINDOW_START, charts, columns, titles};
use crate::{Error, Result};
use style::{MARKER_SIZE, caption_font, gauge_color};

/// Renderer for the fixed chart set
///
/// Holds the output directory and chart dimensions; all chart methods write
/// one SVG file with a fixed name into that directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
}

impl ChartRenderer {
    /// Create a renderer writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: (width, height),
        }
    }

    /// Output directory charts are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the daily flow line chart for the clipped series of both rivers
    ///
    /// Missing days break the line: each contiguous run of present values is
    /// drawn as its own segment so gaps stay visible.
    pub fn daily_flow(&self, series: &[(Gauge, DailySeries)]) -> Result<PathBuf> {
        let path = self.output_dir.join(charts::DAILY_FLOW);
        debug!("Rendering daily flow chart to {}", path.display());

        let (x_start, x_end) = date_span(
            series
                .iter()
                .flat_map(|(_, s)| s.present_values().map(|(d, _)| d)),
        );
        let y_max = padded_max(series.iter().flat_map(|(_, s)| s.present_values().map(|(_, v)| v)));

        // The backend borrows `path` until the drawing area drops, so the
        // whole render lives in its own scope
        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| render_error(charts::DAILY_FLOW, e))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(titles::DAILY_FLOW, caption_font())
                .margin(12)
                .x_label_area_size(44)
                .y_label_area_size(64)
                .build_cartesian_2d(x_start..x_end, 0.0..y_max)
                .map_err(|e| render_error(charts::DAILY_FLOW, e))?;

            chart
                .configure_mesh()
                .x_desc("Time")
                .y_desc("Discharge (cfs)")
                .draw()
                .map_err(|e| render_error(charts::DAILY_FLOW, e))?;

            for (gauge, daily) in series {
                if daily.is_empty() {
                    warn!("No records to plot for {}", gauge.river_name());
                    continue;
                }
                let color = gauge_color(*gauge);
                let mut labeled = false;

                for segment in present_segments(daily) {
                    let drawn = chart
                        .draw_series(LineSeries::new(segment, color.stroke_width(1)))
                        .map_err(|e| render_error(charts::DAILY_FLOW, e))?;
                    if !labeled {
                        drawn.label(gauge.river_name()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 18, y)], color)
                        });
                        labeled = true;
                    }
                }
            }

            finish_with_legend(&mut chart, charts::DAILY_FLOW)?;
            root.present()
                .map_err(|e| render_error(charts::DAILY_FLOW, e))?;
        }
        Ok(path)
    }

    /// Render a per-station scatter of one annual metric column over time
    ///
    /// Used for the coefficient of variation, TQmean, and R-B index charts.
    pub fn annual_metric(
        &self,
        table: &MetricsTable,
        column: &str,
        title: &str,
        y_desc: &str,
        file_name: &str,
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        debug!("Rendering {} chart to {}", column, path.display());

        let station_points: Vec<(Gauge, Vec<(NaiveDate, f64)>)> = table
            .stations()
            .into_iter()
            .map(|g| (g, table.series(g, column)))
            .collect();

        let (x_start, x_end) = date_span(
            station_points
                .iter()
                .flat_map(|(_, pts)| pts.iter().map(|(d, _)| *d)),
        );
        let y_max = padded_max(
            station_points
                .iter()
                .flat_map(|(_, pts)| pts.iter().map(|(_, v)| *v)),
        );

        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(|e| render_error(file_name, e))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, caption_font())
                .margin(12)
                .x_label_area_size(44)
                .y_label_area_size(64)
                .build_cartesian_2d(x_start..x_end, 0.0..y_max)
                .map_err(|e| render_error(file_name, e))?;

            chart
                .configure_mesh()
                .x_desc("Time")
                .y_desc(y_desc)
                .draw()
                .map_err(|e| render_error(file_name, e))?;

            for (gauge, points) in &station_points {
                let color = gauge_color(*gauge);
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(d, v)| Circle::new((d, v), MARKER_SIZE, color.filled())),
                    )
                    .map_err(|e| render_error(file_name, e))?
                    .label(gauge.river_name())
                    .legend(move |(x, y)| Circle::new((x + 9, y), MARKER_SIZE, color.filled()));
            }

            finish_with_legend(&mut chart, file_name)?;
            root.present().map_err(|e| render_error(file_name, e))?;
        }
        Ok(path)
    }

    /// Render the average annual monthly flow chart
    ///
    /// Collapses each station's monthly mean-flow series into twelve
    /// calendar-month means and draws them as one line per river.
    pub fn monthly_means(&self, table: &MetricsTable) -> Result<PathBuf> {
        let path = self.output_dir.join(charts::MONTHLY_FLOW);
        debug!("Rendering monthly means chart to {}", path.display());

        let station_means: Vec<(Gauge, [f64; 12])> = table
            .stations()
            .into_iter()
            .map(|g| {
                let values = table.column_values(g, columns::MEAN_FLOW);
                (g, water_year_monthly_means(&values))
            })
            .collect();

        let y_max = padded_max(
            station_means
                .iter()
                .flat_map(|(_, means)| means.iter().copied())
                .filter(|v| !v.is_nan()),
        );

        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| render_error(charts::MONTHLY_FLOW, e))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(titles::MONTHLY_FLOW, caption_font())
                .margin(12)
                .x_label_area_size(44)
                .y_label_area_size(64)
                .build_cartesian_2d(0i32..13i32, 0.0..y_max)
                .map_err(|e| render_error(charts::MONTHLY_FLOW, e))?;

            chart
                .configure_mesh()
                .x_desc("Month")
                .y_desc("Discharge (cfs)")
                .draw()
                .map_err(|e| render_error(charts::MONTHLY_FLOW, e))?;

            for (gauge, means) in &station_means {
                let color = gauge_color(*gauge);
                let points: Vec<(i32, f64)> = means
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_nan())
                    .map(|(i, &v)| (i as i32 + 1, v))
                    .collect();

                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(|e| render_error(charts::MONTHLY_FLOW, e))?
                    .label(gauge.river_name())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
            }

            finish_with_legend(&mut chart, charts::MONTHLY_FLOW)?;
            root.present()
                .map_err(|e| render_error(charts::MONTHLY_FLOW, e))?;
        }
        Ok(path)
    }

    /// Render the return-period scatter of annual peak flow events
    pub fn return_period(&self, table: &MetricsTable) -> Result<PathBuf> {
        let path = self.output_dir.join(charts::RETURN_PERIOD);
        debug!("Rendering return period chart to {}", path.display());

        let station_points: Vec<(Gauge, Vec<(f64, f64)>)> = table
            .stations()
            .into_iter()
            .map(|g| {
                let peaks: Vec<f64> = table
                    .series(g, columns::PEAK_FLOW)
                    .into_iter()
                    .map(|(_, v)| v)
                    .collect();
                let points = weibull_points(&peaks)
                    .into_iter()
                    .map(|p| (p.exceedance_probability, p.peak_flow))
                    .collect();
                (g, points)
            })
            .collect();

        let y_max = padded_max(
            station_points
                .iter()
                .flat_map(|(_, pts)| pts.iter().map(|(_, v)| *v)),
        );

        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| render_error(charts::RETURN_PERIOD, e))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(titles::RETURN_PERIOD, caption_font())
                .margin(12)
                .x_label_area_size(44)
                .y_label_area_size(64)
                .build_cartesian_2d(0.0..100.0, 0.0..y_max)
                .map_err(|e| render_error(charts::RETURN_PERIOD, e))?;

            chart
                .configure_mesh()
                .x_desc("Exceedance Probability (%)")
                .y_desc("Peak Discharge (cfs)")
                .draw()
                .map_err(|e| render_error(charts::RETURN_PERIOD, e))?;

            for (gauge, points) in &station_points {
                let color = gauge_color(*gauge);
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(p, v)| Circle::new((p, v), MARKER_SIZE, color.filled())),
                    )
                    .map_err(|e| render_error(charts::RETURN_PERIOD, e))?
                    .label(gauge.river_name())
                    .legend(move |(x, y)| Circle::new((x + 9, y), MARKER_SIZE, color.filled()));
            }

            finish_with_legend(&mut chart, charts::RETURN_PERIOD)?;
            root.present()
                .map_err(|e| render_error(charts::RETURN_PERIOD, e))?;
        }
        Ok(path)
    }
}

/// Contiguous runs of present (date, value) pairs, split at missing days
fn present_segments(series: &DailySeries) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for record in series.records() {
        match record.discharge {
            Some(value) => current.push((record.date, value)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Upper y-axis bound with headroom; 1.0 when no values are present
fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(f64::MIN, f64::max);
    if max == f64::MIN || max <= 0.0 {
        1.0
    } else {
        max * 1.05
    }
}

/// Inclusive x-axis date span with a fallback to the analysis window
fn date_span(dates: impl Iterator<Item = NaiveDate>) -> (NaiveDate, NaiveDate) {
    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;
    for date in dates {
        start = Some(start.map_or(date, |s| s.min(date)));
        end = Some(end.map_or(date, |e| e.max(date)));
    }

    match (start, end) {
        (Some(s), Some(e)) if s < e => (s, e),
        // A single date cannot span an axis; widen it by half a year each way
        (Some(s), Some(_)) => (s - Duration::days(182), s + Duration::days(182)),
        _ => {
            let (sy, sm, sd) = CLIP_WINDOW_START;
            let (ey, em, ed) = CLIP_WINDOW_END;
            (
                NaiveDate::from_ymd_opt(sy, sm, sd).expect("valid window start"),
                NaiveDate::from_ymd_opt(ey, em, ed).expect("valid window end"),
            )
        }
    }
}

/// Draw the series legend box shared by every chart
fn finish_with_legend<'a, DB, CT>(chart: &mut ChartContext<'a, DB, CT>, file_name: &str) -> Result<()>
where
    DB: DrawingBackend + 'a,
    CT: plotters::coord::CoordTranslate,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| render_error(file_name, e))
}

/// Wrap a plotters error for one chart file
fn render_error(file_name: &str, error: impl std::fmt::Display) -> Error {
    Error::chart_rendering(format!("{}: {}", file_name, error))
}
