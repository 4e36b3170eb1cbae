//! Shared chart styling
//!
//! Fixed river colors and font choices so every chart in a run looks like
//! part of the same set.

use plotters::style::RGBColor;

use crate::app::models::Gauge;

/// Wildcat Creek plots in blue
pub const WILDCAT_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Tippecanoe River plots in red
pub const TIPPECANOE_COLOR: RGBColor = RGBColor(214, 39, 40);

/// Series color for a gauge
pub fn gauge_color(gauge: Gauge) -> RGBColor {
    match gauge {
        Gauge::Wildcat => WILDCAT_COLOR,
        Gauge::Tippecanoe => TIPPECANOE_COLOR,
    }
}

/// Caption font for chart titles
pub fn caption_font() -> (&'static str, u32) {
    ("sans-serif", 24)
}

/// Radius of scatter markers in pixels
pub const MARKER_SIZE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauges_have_distinct_colors() {
        assert_ne!(gauge_color(Gauge::Wildcat), gauge_color(Gauge::Tippecanoe));
    }
}
