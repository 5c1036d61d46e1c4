mod adas_screen;
mod axis_sync;
mod chart;
mod config;
mod cumulative_screen;
mod json_contract;
mod overlay;
mod si_screen;
mod slider;
mod solow_screen;

pub use adas_screen::{ADAS_SAMPLES, AdasScreen, AdasSnapshot};
pub use axis_sync::{sync_chain, sync_world_to_domestic};
pub use chart::{
    AxisOverrides, CURVE_LINE_WIDTH, Chart, ChartConfig, ChartKind, ChartSeries,
    LABEL_FONT_SIZE_PX, TICK_FONT_SIZE_PX, TITLE_FONT_SIZE_PX,
};
pub use config::GrapherConfig;
pub use cumulative_screen::{CHAIN_SAMPLES, CumulativeScreen, CumulativeSnapshot, StageSnapshot};
pub use json_contract::{
    SCREEN_SNAPSHOT_JSON_SCHEMA_V1, ScreenSnapshotJsonContractV1, SnapshotContract,
};
pub use si_screen::{SI_SAMPLES, SiScreen, SiSnapshot};
pub use slider::{Slider, SliderOutcome, SliderPanel};
pub use solow_screen::{SOLOW_SAMPLES, SolowScreen, SolowSnapshot};

use crate::error::GraphResult;
use crate::render::{RenderFrame, Renderer};

/// One interactive model screen.
///
/// Every mutation runs the full pipeline synchronously: new parameters,
/// regenerated datasets, chart update, axis sync, classification. The
/// snapshot always reflects the current parameters.
pub trait Screen {
    type Snapshot: SnapshotContract;

    fn name(&self) -> &'static str {
        <Self::Snapshot as SnapshotContract>::SCREEN
    }

    fn sliders(&self) -> &SliderPanel;

    /// Clamps `value` into the slider's bounds, applies it and recomputes.
    fn set_slider(&mut self, key: &str, value: f64) -> GraphResult<SliderOutcome>;

    /// Restores default parameters and recomputes.
    fn reset(&mut self) -> GraphResult<()>;

    fn snapshot(&self) -> &Self::Snapshot;

    fn charts(&self) -> &[Chart];

    /// Base scene plus annotations for every visible chart.
    fn render_frames(&self) -> GraphResult<Vec<RenderFrame>>;

    /// Renders every frame; returns how many were drawn.
    fn render_with<R: Renderer>(&self, renderer: &mut R) -> GraphResult<usize>
    where
        Self: Sized,
    {
        let frames = self.render_frames()?;
        for frame in &frames {
            renderer.render(frame)?;
        }
        Ok(frames.len())
    }
}
