pub mod axis;
pub mod dataset;
pub mod mapper;
pub mod plot_area;
pub mod scale;
pub mod types;

pub use axis::{
    AxisBounds, AxisOptions, AxisTicks, TickOrder, TickValues, category_ticks, linear_ticks,
};
pub use dataset::{CurveDataset, SampleDomain, SampleMode};
pub use mapper::{CoordinateMapper, TickSource};
pub use plot_area::{ChartPadding, LayoutBands, PlotArea, resolve_plot_area};
pub use scale::LinearScale;
pub use types::{DataPoint, PixelPoint, Viewport};
