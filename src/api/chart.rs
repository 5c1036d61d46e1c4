//! Minimal chart surface: ticks, plot rectangle and base scene.
//!
//! A [`Chart`] owns its configuration and the series last passed to
//! [`Chart::update`]. Ticks are recomputed on every update and whenever
//! linked-axis overrides change; overlays are mapped through
//! [`Chart::mapper`] and appended to the frame from [`Chart::build_frame`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis::{
    AXIS_MAX_TICKS, AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX, axis_tick_target_count,
};
use crate::core::dataset::extent;
use crate::core::plot_area::{AXIS_TITLE_BAND_PX, LEGEND_BAND_PX, TITLE_BAND_PX};
use crate::core::{
    AxisBounds, AxisOptions, AxisTicks, ChartPadding, CoordinateMapper, CurveDataset, DataPoint,
    LayoutBands, PixelPoint, PlotArea, TickSource, Viewport, category_ticks, linear_ticks,
    resolve_plot_area,
};
use crate::error::{GraphError, GraphResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

pub const CURVE_LINE_WIDTH: f64 = 2.0;
pub const AXIS_LINE_WIDTH: f64 = 1.0;
pub const TITLE_FONT_SIZE_PX: f64 = 20.0;
pub const LABEL_FONT_SIZE_PX: f64 = 12.0;
pub const TICK_FONT_SIZE_PX: f64 = 11.0;
const TICK_MARK_PX: f64 = 5.0;
const LEGEND_SWATCH_PX: f64 = 12.0;
const LEGEND_ROW_PX: f64 = 22.0;
const LEGEND_INSET_PX: f64 = 16.0;

const AXIS_COLOR: Color = Color::from_rgb8(0x66, 0x66, 0x66);
const TEXT_COLOR: Color = Color::from_rgb8(0x33, 0x33, 0x33);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Category x axis over fixed sample labels.
    Line,
    /// Linear x and y axes.
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// Ignored for the category x axis of line charts.
    #[serde(default)]
    pub x_axis: AxisOptions,
    #[serde(default)]
    pub y_axis: AxisOptions,
    #[serde(default)]
    pub padding: ChartPadding,
    #[serde(default)]
    pub show_legend: bool,
    /// Category labels of a line chart, in sample order.
    #[serde(default)]
    pub category_labels: Vec<f64>,
}

impl ChartConfig {
    #[must_use]
    pub fn line(title: impl Into<String>, category_labels: Vec<f64>) -> Self {
        Self::new(ChartKind::Line, title, category_labels)
    }

    #[must_use]
    pub fn scatter(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Scatter, title, Vec::new())
    }

    fn new(kind: ChartKind, title: impl Into<String>, category_labels: Vec<f64>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_axis_title: String::new(),
            y_axis_title: String::new(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            padding: ChartPadding::default(),
            show_legend: false,
            category_labels,
        }
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_title = x.into();
        self.y_axis_title = y.into();
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, options: AxisOptions) -> Self {
        self.x_axis = options;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, options: AxisOptions) -> Self {
        self.y_axis = options;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: ChartPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    fn validate(&self) -> GraphResult<()> {
        if self.kind == ChartKind::Line {
            if self.category_labels.len() < 2 {
                return Err(GraphError::InvalidData(format!(
                    "line chart `{}` needs at least two category labels",
                    self.title
                )));
            }
            if self.category_labels.iter().any(|label| !label.is_finite()) {
                return Err(GraphError::InvalidData(format!(
                    "line chart `{}` has non-finite category labels",
                    self.title
                )));
            }
        }
        Ok(())
    }

    fn layout_bands(&self) -> LayoutBands {
        let band = |present: bool, size: f64| if present { size } else { 0.0 };
        LayoutBands {
            title: band(!self.title.is_empty(), TITLE_BAND_PX),
            x_axis_title: band(!self.x_axis_title.is_empty(), AXIS_TITLE_BAND_PX),
            y_axis_title: band(!self.y_axis_title.is_empty(), AXIS_TITLE_BAND_PX),
            legend: band(self.show_legend, LEGEND_BAND_PX),
        }
    }
}

/// One dataset plus the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dataset: CurveDataset,
    pub color: Color,
}

impl ChartSeries {
    #[must_use]
    pub fn new(dataset: CurveDataset, color: Color) -> Self {
        Self { dataset, color }
    }
}

/// Limits imposed on a chart by a linked chart. They take precedence over
/// the chart's own configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisOverrides {
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl AxisOverrides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_max.is_none() && self.y_min.is_none() && self.y_max.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    config: ChartConfig,
    viewport: Viewport,
    plot_area: PlotArea,
    series: Vec<ChartSeries>,
    overrides: AxisOverrides,
    x_ticks: AxisTicks,
    y_ticks: AxisTicks,
    natural_x: AxisBounds,
    natural_y: AxisBounds,
}

impl Chart {
    pub fn new(config: ChartConfig, viewport: Viewport) -> GraphResult<Self> {
        config.validate()?;
        let plot_area = resolve_plot_area(viewport, config.padding, config.layout_bands())?;
        let empty = AxisTicks::ascending(category_ticks(&[0.0, 1.0]));
        let placeholder = AxisBounds::new(0.0, 1.0)?;

        let mut chart = Self {
            config,
            viewport,
            plot_area,
            series: Vec::new(),
            overrides: AxisOverrides::default(),
            x_ticks: empty.clone(),
            y_ticks: empty,
            natural_x: placeholder,
            natural_y: placeholder,
        };
        chart.recompute_ticks()?;
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    #[must_use]
    pub fn overrides(&self) -> AxisOverrides {
        self.overrides
    }

    /// Replaces every series and recomputes ticks.
    pub fn update(&mut self, series: Vec<ChartSeries>) -> GraphResult<()> {
        self.series = series;
        self.recompute_ticks()
    }

    /// Installs linked-axis limits and recomputes ticks.
    pub fn set_overrides(&mut self, overrides: AxisOverrides) -> GraphResult<()> {
        self.overrides = overrides;
        self.recompute_ticks()
    }

    /// X bounds the chart would show without linked-axis overrides.
    #[must_use]
    pub fn natural_x_bounds(&self) -> AxisBounds {
        self.natural_x
    }

    /// Y bounds the chart would show without linked-axis overrides.
    #[must_use]
    pub fn natural_y_bounds(&self) -> AxisBounds {
        self.natural_y
    }

    pub fn mapper(&self) -> GraphResult<CoordinateMapper> {
        CoordinateMapper::from_surface(self)
    }

    fn recompute_ticks(&mut self) -> GraphResult<()> {
        let (x_natural, y_natural) = self.compute_ticks(AxisOverrides::default())?;
        self.natural_x = x_natural.bounds()?;
        self.natural_y = y_natural.bounds()?;

        let (x_ticks, y_ticks) = if self.overrides.is_empty() {
            (x_natural, y_natural)
        } else {
            self.compute_ticks(self.overrides)?
        };
        self.x_ticks = x_ticks;
        self.y_ticks = y_ticks;

        trace!(
            title = %self.config.title,
            x_ticks = self.x_ticks.values.len(),
            y_ticks = self.y_ticks.values.len(),
            "chart ticks recomputed"
        );
        Ok(())
    }

    fn compute_ticks(&self, overrides: AxisOverrides) -> GraphResult<(AxisTicks, AxisTicks)> {
        let points = || self.series.iter().flat_map(|series| series.dataset.finite_points());
        let (x_min, x_max) = extent(points().map(|point| point.x)).unwrap_or((f64::NAN, f64::NAN));
        let (y_min, y_max) = extent(points().map(|point| point.y)).unwrap_or((f64::NAN, f64::NAN));

        let x_ticks = match self.config.kind {
            ChartKind::Line => AxisTicks::ascending(category_ticks(&self.config.category_labels)),
            ChartKind::Scatter => {
                let mut options = self.config.x_axis;
                if overrides.x_max.is_some() {
                    options.max = overrides.x_max;
                }
                let count = axis_tick_target_count(
                    self.plot_area.width(),
                    AXIS_X_TARGET_SPACING_PX,
                    2,
                    AXIS_MAX_TICKS,
                );
                AxisTicks::ascending(linear_ticks(x_min, x_max, options, count))
            }
        };

        let mut options = self.config.y_axis;
        if overrides.y_min.is_some() {
            options.min = overrides.y_min;
        }
        if overrides.y_max.is_some() {
            options.max = overrides.y_max;
        }
        let count = axis_tick_target_count(
            self.plot_area.height(),
            AXIS_Y_TARGET_SPACING_PX,
            2,
            AXIS_MAX_TICKS,
        );
        // Vertical linear axes list their ticks top-down.
        let y_ticks = AxisTicks::ascending(linear_ticks(y_min, y_max, options, count)).descending();

        Ok((x_ticks, y_ticks))
    }

    /// Materializes axes, clipped curves, titles and the legend.
    pub fn build_frame(&self) -> GraphResult<RenderFrame> {
        let area = self.plot_area;
        let mapper = self.mapper()?;
        let mut frame = RenderFrame::new(self.viewport);

        frame.push_line(LinePrimitive::new(
            area.left,
            area.bottom,
            area.right,
            area.bottom,
            AXIS_LINE_WIDTH,
            AXIS_COLOR,
        ));
        frame.push_line(LinePrimitive::new(
            area.left,
            area.top,
            area.left,
            area.bottom,
            AXIS_LINE_WIDTH,
            AXIS_COLOR,
        ));

        let bounds = (mapper.x_bounds(), mapper.y_bounds());
        for &value in &self.x_ticks.values {
            let x = mapper.data_to_pixel(DataPoint::new(value, bounds.1.min))?.x;
            frame.push_line(LinePrimitive::new(
                x,
                area.bottom,
                x,
                area.bottom + TICK_MARK_PX,
                AXIS_LINE_WIDTH,
                AXIS_COLOR,
            ));
            frame.push_text(TextPrimitive::new(
                format_tick(value),
                x,
                area.bottom + TICK_MARK_PX + 2.0,
                TICK_FONT_SIZE_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }
        for &value in &self.y_ticks.values {
            let y = mapper.data_to_pixel(DataPoint::new(bounds.0.min, value))?.y;
            frame.push_line(LinePrimitive::new(
                area.left - TICK_MARK_PX,
                y,
                area.left,
                y,
                AXIS_LINE_WIDTH,
                AXIS_COLOR,
            ));
            frame.push_text(
                TextPrimitive::new(
                    format_tick(value),
                    area.left - TICK_MARK_PX - 3.0,
                    y,
                    TICK_FONT_SIZE_PX,
                    TEXT_COLOR,
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }

        for series in &self.series {
            let pixels = series
                .dataset
                .finite_points()
                .map(|point| mapper.data_to_pixel(point))
                .collect::<GraphResult<Vec<_>>>()?;
            for pair in pixels.windows(2) {
                if let Some((from, to)) = clip_segment(pair[0], pair[1], area) {
                    frame.push_line(LinePrimitive::new(
                        from.x,
                        from.y,
                        to.x,
                        to.y,
                        CURVE_LINE_WIDTH,
                        series.color,
                    ));
                }
            }
        }

        let center_x = (area.left + area.right) / 2.0;
        if !self.config.title.is_empty() {
            frame.push_text(TextPrimitive::new(
                self.config.title.clone(),
                center_x,
                self.config.padding.top + 8.0,
                TITLE_FONT_SIZE_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }
        if !self.config.x_axis_title.is_empty() {
            frame.push_text(TextPrimitive::new(
                self.config.x_axis_title.clone(),
                center_x,
                area.bottom + AXIS_TITLE_BAND_PX,
                LABEL_FONT_SIZE_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }
        if !self.config.y_axis_title.is_empty() {
            frame.push_text(TextPrimitive::new(
                self.config.y_axis_title.clone(),
                area.left,
                (area.top - LABEL_FONT_SIZE_PX - 4.0).max(0.0),
                LABEL_FONT_SIZE_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
        }

        if self.config.show_legend {
            let x = area.right + LEGEND_INSET_PX;
            for (row, series) in self.series.iter().enumerate() {
                let y = area.top + row as f64 * LEGEND_ROW_PX;
                frame.push_rect(RectPrimitive::new(
                    x,
                    y,
                    LEGEND_SWATCH_PX,
                    LEGEND_SWATCH_PX,
                    series.color,
                ));
                if !series.dataset.label.is_empty() {
                    frame.push_text(TextPrimitive::new(
                        series.dataset.label.clone(),
                        x + LEGEND_SWATCH_PX + 6.0,
                        y,
                        LABEL_FONT_SIZE_PX,
                        TEXT_COLOR,
                        TextHAlign::Left,
                    ));
                }
            }
        }

        Ok(frame)
    }
}

impl TickSource for Chart {
    fn x_ticks(&self) -> &AxisTicks {
        &self.x_ticks
    }

    fn y_ticks(&self) -> &AxisTicks {
        &self.y_ticks
    }

    fn plot_area(&self) -> PlotArea {
        self.plot_area
    }
}

/// Tick label with at most two decimals and no trailing zeros.
fn format_tick(value: f64) -> String {
    // `+ 0.0` folds negative zero.
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Liang-Barsky clip of a pixel segment against the plot rectangle.
fn clip_segment(
    from: PixelPoint,
    to: PixelPoint,
    area: PlotArea,
) -> Option<(PixelPoint, PixelPoint)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t_enter: f64 = 0.0;
    let mut t_exit: f64 = 1.0;

    for (p, q) in [
        (-dx, from.x - area.left),
        (dx, area.right - from.x),
        (-dy, from.y - area.top),
        (dy, area.bottom - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return None;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return None;
            }
            t_exit = t_exit.min(t);
        }
    }

    Some((
        PixelPoint::new(from.x + t_enter * dx, from.y + t_enter * dy),
        PixelPoint::new(from.x + t_exit * dx, from.y + t_exit * dy),
    ))
}
