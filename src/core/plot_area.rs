use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{GraphError, GraphResult};

/// Pixel rectangle enclosing the plotted data (excludes titles, axis titles
/// and legend).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl PlotArea {
    #[must_use]
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    pub fn validate(self) -> GraphResult<Self> {
        let finite = [self.top, self.bottom, self.left, self.right]
            .iter()
            .all(|value| value.is_finite());
        if !finite || self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(GraphError::InvalidData(format!(
                "plot area must be finite with positive size: {self:?}"
            )));
        }
        Ok(self)
    }
}

/// Outer padding around the chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPadding {
    #[serde(default)]
    pub top: f64,
    #[serde(default = "default_side_padding")]
    pub right: f64,
    #[serde(default = "default_side_padding")]
    pub bottom: f64,
    #[serde(default = "default_side_padding")]
    pub left: f64,
}

fn default_side_padding() -> f64 {
    50.0
}

impl Default for ChartPadding {
    fn default() -> Self {
        Self {
            top: 0.0,
            right: default_side_padding(),
            bottom: default_side_padding(),
            left: default_side_padding(),
        }
    }
}

/// Bands reserved inside the padded box before the plot area starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBands {
    pub title: f64,
    pub x_axis_title: f64,
    pub y_axis_title: f64,
    pub legend: f64,
}

pub const TITLE_BAND_PX: f64 = 40.0;
pub const AXIS_TITLE_BAND_PX: f64 = 22.0;
pub const LEGEND_BAND_PX: f64 = 140.0;

/// Resolves the plot rectangle for a viewport after padding and bands.
pub fn resolve_plot_area(
    viewport: Viewport,
    padding: ChartPadding,
    bands: LayoutBands,
) -> GraphResult<PlotArea> {
    if !viewport.is_valid() {
        return Err(GraphError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    PlotArea::new(
        padding.top + bands.title,
        height - padding.bottom - bands.x_axis_title,
        padding.left + bands.y_axis_title,
        width - padding.right - bands.legend,
    )
    .validate()
}

#[cfg(test)]
mod tests {
    use super::{ChartPadding, LayoutBands, PlotArea, resolve_plot_area};
    use crate::core::Viewport;

    #[test]
    fn default_padding_shrinks_plot_area() {
        let area = resolve_plot_area(
            Viewport::new(600, 400),
            ChartPadding::default(),
            LayoutBands::default(),
        )
        .expect("plot area");
        assert_eq!(area, PlotArea::new(0.0, 350.0, 50.0, 550.0));
    }

    #[test]
    fn oversized_bands_are_rejected() {
        let bands = LayoutBands {
            legend: 600.0,
            ..LayoutBands::default()
        };
        let resolved = resolve_plot_area(Viewport::new(600, 400), ChartPadding::default(), bands);
        assert!(resolved.is_err());
    }
}
