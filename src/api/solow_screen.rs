use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::chart::{Chart, ChartConfig, ChartSeries};
use crate::api::json_contract::SnapshotContract;
use crate::api::overlay::{LABEL_BELOW_PX, LABEL_LEFT_PX, annotator, clamp_to_area, value_label};
use crate::api::slider::{SliderOutcome, SliderPanel};
use crate::api::{GrapherConfig, Screen};
use crate::core::{
    AxisBounds, AxisOptions, CurveDataset, DataPoint, SampleDomain, SampleMode, TickSource,
};
use crate::error::GraphResult;
use crate::models::solow::{
    KEY_DEPRECIATION, KEY_ELASTICITY, KEY_POPULATION_GROWTH, KEY_PRODUCTIVITY, KEY_SAVING_RATE,
};
use crate::models::{SolowEquilibrium, SolowParams};
use crate::render::{Color, RenderFrame};
use crate::status::{DisplayStatus, SolowStatus, classify_solow};

/// Capital per worker `k = 0, 1, ..., 10`. The last category label gets a
/// sample too, so the curves span the whole x axis.
pub const SOLOW_SAMPLES: SampleDomain = SampleDomain::new(0.0, 1.0, 11);

const OUTPUT_COLOR: Color = Color::from_rgb8(20, 245, 50);
const INVESTMENT_COLOR: Color = Color::from_rgb8(35, 187, 247);
const DEPRECIATION_COLOR: Color = Color::from_rgb8(237, 67, 55);
/// `#ff2626`
const ANNOTATION_COLOR: Color = Color::from_rgb8(0xff, 0x26, 0x26);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolowSnapshot {
    pub params: SolowParams,
    pub series: Vec<ChartSeries>,
    pub equilibrium: Option<SolowEquilibrium>,
    pub status: SolowStatus,
    pub message: String,
    pub x_bounds: AxisBounds,
    pub y_bounds: AxisBounds,
}

impl SnapshotContract for SolowSnapshot {
    const SCREEN: &'static str = "solow";
}

/// Solow growth model: output, investment and break-even depreciation
/// against capital per worker.
#[derive(Debug, Clone)]
pub struct SolowScreen {
    config: GrapherConfig,
    params: SolowParams,
    sliders: SliderPanel,
    chart: Chart,
    snapshot: SolowSnapshot,
}

impl SolowScreen {
    pub fn new(config: GrapherConfig) -> GraphResult<Self> {
        let config = config.validate()?;
        let params = SolowParams::default();
        let sliders = SliderPanel::new()
            .with_slider(KEY_SAVING_RATE, "Saving rate (s)", 0.0, 1.0, params.saving_rate)?
            .with_slider(KEY_PRODUCTIVITY, "Productivity (A)", 0.0001, 3.0, params.productivity)?
            .with_slider(KEY_ELASTICITY, "Capital share (b)", 0.0, 1.0, params.elasticity)?
            .with_slider(
                KEY_DEPRECIATION,
                "Depreciation (\u{03B4})",
                0.0,
                1.0,
                params.depreciation,
            )?
            .with_slider(
                KEY_POPULATION_GROWTH,
                "Population growth (n)",
                0.0,
                1.0,
                params.population_growth,
            )?;

        let labels = SOLOW_SAMPLES.values().collect();
        let chart = Chart::new(
            ChartConfig::line("Solow Model", labels)
                .with_axis_titles("Capital per worker (k)", "Output per worker (y)")
                .with_y_axis(AxisOptions::default().with_min(0.0)),
            config.viewport,
        )?;

        let x_bounds = chart.x_bounds()?;
        let y_bounds = chart.y_bounds()?;
        let mut screen = Self {
            config,
            params,
            sliders,
            chart,
            snapshot: SolowSnapshot {
                params,
                series: Vec::new(),
                equilibrium: None,
                status: SolowStatus::Undefined,
                message: String::new(),
                x_bounds,
                y_bounds,
            },
        };
        screen.recompute()?;
        Ok(screen)
    }

    #[must_use]
    pub fn params(&self) -> SolowParams {
        self.params
    }

    fn recompute(&mut self) -> GraphResult<()> {
        let params = self.params;
        let series = vec![
            ChartSeries::new(
                CurveDataset::sample("Output curve", SOLOW_SAMPLES, SampleMode::Forward, |k| {
                    params.output(k)
                })?,
                OUTPUT_COLOR,
            ),
            ChartSeries::new(
                CurveDataset::sample("Investment curve", SOLOW_SAMPLES, SampleMode::Forward, |k| {
                    params.investment(k)
                })?,
                INVESTMENT_COLOR,
            ),
            ChartSeries::new(
                CurveDataset::sample(
                    "Depreciation curve",
                    SOLOW_SAMPLES,
                    SampleMode::Forward,
                    |k| params.depreciation(k),
                )?,
                DEPRECIATION_COLOR,
            ),
        ];
        self.chart.update(series)?;

        let x_bounds = self.chart.x_bounds()?;
        let y_bounds = self.chart.y_bounds()?;
        let (equilibrium, status) = match params.equilibrium() {
            Ok(equilibrium) => {
                let status = classify_solow(&equilibrium, x_bounds, y_bounds);
                (Some(equilibrium), status)
            }
            Err(err) => {
                warn!(%err, "solow equilibrium undefined");
                (None, SolowStatus::Undefined)
            }
        };
        debug!(?status, ?equilibrium, "solow screen recomputed");

        self.snapshot = SolowSnapshot {
            params,
            series: self.chart.series().to_vec(),
            equilibrium,
            status,
            message: status.message().to_owned(),
            x_bounds,
            y_bounds,
        };
        Ok(())
    }

    fn annotate(&self, frame: &mut RenderFrame) -> GraphResult<()> {
        let Some(equilibrium) = self.snapshot.equilibrium else {
            return Ok(());
        };
        let status = self.snapshot.status;
        if matches!(status, SolowStatus::KOutOfBounds | SolowStatus::Undefined) {
            return Ok(());
        }

        let mapper = self.chart.mapper()?;
        let area = mapper.plot_area();
        let mut annotations = annotator(frame, self.config.annotation_shadow());

        let output = clamp_to_area(
            mapper.data_to_pixel(DataPoint::new(equilibrium.capital, equilibrium.output))?,
            area,
        );
        annotations.draw_line_height_annotation(output.x, area.bottom, output.y);
        annotations.write_annotation(
            value_label("k*", equilibrium.capital),
            output.x,
            area.bottom + LABEL_BELOW_PX,
            ANNOTATION_COLOR,
        );
        if status == SolowStatus::IOutOfBounds {
            return Ok(());
        }

        let investment =
            mapper.data_to_pixel(DataPoint::new(equilibrium.capital, equilibrium.investment))?;
        annotations.draw_line_offset_annotation(investment.y, area.left, investment.x);
        annotations.write_annotation(
            value_label("i*", equilibrium.investment),
            area.left - LABEL_LEFT_PX,
            investment.y,
            ANNOTATION_COLOR,
        );
        if status == SolowStatus::YOutOfBounds {
            return Ok(());
        }

        annotations.draw_line_offset_annotation(output.y, area.left, output.x);
        annotations.write_annotation(
            value_label("y*", equilibrium.output),
            area.left - LABEL_LEFT_PX,
            output.y,
            ANNOTATION_COLOR,
        );
        Ok(())
    }
}

impl Screen for SolowScreen {
    type Snapshot = SolowSnapshot;

    fn sliders(&self) -> &SliderPanel {
        &self.sliders
    }

    fn set_slider(&mut self, key: &str, value: f64) -> GraphResult<SliderOutcome> {
        let (value, clamped) = self.sliders.set(key, value)?;
        self.params = self.params.with_parameter(key, value)?;
        self.recompute()?;
        Ok(SliderOutcome::Applied { value, clamped })
    }

    fn reset(&mut self) -> GraphResult<()> {
        self.params = SolowParams::default();
        self.sliders.reset();
        self.recompute()
    }

    fn snapshot(&self) -> &SolowSnapshot {
        &self.snapshot
    }

    fn charts(&self) -> &[Chart] {
        std::slice::from_ref(&self.chart)
    }

    fn render_frames(&self) -> GraphResult<Vec<RenderFrame>> {
        let mut frame = self.chart.build_frame()?;
        self.annotate(&mut frame)?;
        Ok(vec![frame])
    }
}
