use serde::Serialize;

use crate::symbology::ColorScale;

pub const LEGEND_CAPTION: &str = "Minutes from Origin";

/// Continuous legend for the contour color scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub caption: &'static str,
    pub min: f64,
    pub max: f64,
    /// Stop colors, low to high, evenly spaced between `min` and `max`.
    pub colors: Vec<String>,
    /// Values to label under the color bar.
    pub ticks: Vec<f64>,
}

impl Legend {
    pub fn new(scale: &ColorScale, ticks: Vec<f64>) -> Self {
        Self {
            caption: LEGEND_CAPTION,
            min: scale.vmin(),
            max: scale.vmax(),
            colors: scale.stop_colors(),
            ticks,
        }
    }
}
