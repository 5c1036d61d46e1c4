use crate::core::{AxisBounds, AxisTicks, DataPoint, LinearScale, PixelPoint, PlotArea};
use crate::error::GraphResult;

/// Read-only view of a rendering surface: current ticks and plot rectangle.
pub trait TickSource {
    fn x_ticks(&self) -> &AxisTicks;
    fn y_ticks(&self) -> &AxisTicks;
    fn plot_area(&self) -> PlotArea;

    fn x_bounds(&self) -> GraphResult<AxisBounds> {
        self.x_ticks().bounds()
    }

    fn y_bounds(&self) -> GraphResult<AxisBounds> {
        self.y_ticks().bounds()
    }
}

/// Converts data-space points into canvas pixels for overlay drawing.
///
/// Built from normalized bounds, so callers never care whether the surface
/// listed its ticks ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    x_bounds: AxisBounds,
    y_bounds: AxisBounds,
    plot_area: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl CoordinateMapper {
    pub fn new(
        x_bounds: AxisBounds,
        y_bounds: AxisBounds,
        plot_area: PlotArea,
    ) -> GraphResult<Self> {
        let plot_area = plot_area.validate()?;
        let x_scale =
            LinearScale::new(x_bounds.min, x_bounds.max, plot_area.left, plot_area.right)?;
        // Data max sits at the top edge.
        let y_scale =
            LinearScale::new(y_bounds.max, y_bounds.min, plot_area.top, plot_area.bottom)?;

        Ok(Self {
            x_bounds,
            y_bounds,
            plot_area,
            x_scale,
            y_scale,
        })
    }

    pub fn from_surface(surface: &impl TickSource) -> GraphResult<Self> {
        Self::new(surface.x_bounds()?, surface.y_bounds()?, surface.plot_area())
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn x_bounds(&self) -> AxisBounds {
        self.x_bounds
    }

    #[must_use]
    pub fn y_bounds(&self) -> AxisBounds {
        self.y_bounds
    }

    pub fn data_to_pixel(&self, point: DataPoint) -> GraphResult<PixelPoint> {
        Ok(PixelPoint::new(
            self.x_scale.domain_to_pixel(point.x)?,
            self.y_scale.domain_to_pixel(point.y)?,
        ))
    }

    pub fn pixel_to_data(&self, pixel: PixelPoint) -> GraphResult<DataPoint> {
        Ok(DataPoint::new(
            self.x_scale.pixel_to_domain(pixel.x)?,
            self.y_scale.pixel_to_domain(pixel.y)?,
        ))
    }
}
