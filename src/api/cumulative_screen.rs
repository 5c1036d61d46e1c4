use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::axis_sync::sync_chain;
use crate::api::chart::{Chart, ChartConfig, ChartSeries};
use crate::api::json_contract::SnapshotContract;
use crate::api::overlay::{
    LABEL_BELOW_PX, LABEL_LEFT_PX, annotator, clamp_to_area, guides_to_point, value_label,
};
use crate::api::slider::{SliderOutcome, SliderPanel};
use crate::api::{GrapherConfig, Screen};
use crate::core::{
    AxisBounds, AxisOptions, ChartPadding, CurveDataset, DataPoint, SampleDomain, SampleMode,
    TickSource,
};
use crate::error::GraphResult;
use crate::models::cumulative::{
    KEY_AUTONOMOUS_RATE, KEY_IS_OFFSET, KEY_LAMBDA, KEY_NATURAL_UNEMPLOYMENT, KEY_POTENTIAL_OUTPUT,
    KEY_RATE,
};
use crate::models::{ChainEquilibrium, CumulativeParams, CumulativeStage};
use crate::render::{Color, RenderFrame};
use crate::status::{CumulativeStatus, DisplayStatus, classify_stage};

/// Every chart in the chain is sampled at 0 and 10.
pub const CHAIN_SAMPLES: SampleDomain = SampleDomain::new(0.0, 10.0, 2);

const CURVE_COLOR: Color = Color::from_rgb8(255, 163, 15);
/// `#e01bda`
const ANNOTATION_COLOR: Color = Color::from_rgb8(0xe0, 0x1b, 0xda);

/// One chart of the chain after a recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub stage: CumulativeStage,
    pub series: Vec<ChartSeries>,
    pub status: CumulativeStatus,
    pub message: String,
    pub x_bounds: AxisBounds,
    pub y_bounds: AxisBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSnapshot {
    pub params: CumulativeParams,
    pub chain: Option<ChainEquilibrium>,
    pub stages: Vec<StageSnapshot>,
}

impl CumulativeSnapshot {
    #[must_use]
    pub fn stage(&self, stage: CumulativeStage) -> Option<&StageSnapshot> {
        self.stages.iter().find(|snapshot| snapshot.stage == stage)
    }
}

impl SnapshotContract for CumulativeSnapshot {
    const SCREEN: &'static str = "cumulative";
}

/// Axis titles and the variable symbols used in annotation labels.
struct StageAxes {
    x_title: &'static str,
    y_title: &'static str,
    x_symbol: &'static str,
    y_symbol: &'static str,
    begin_at_zero: bool,
}

fn stage_axes(stage: CumulativeStage) -> StageAxes {
    const RATE: &str = "Real interest rate (r)";
    const INFLATION: &str = "Inflation rate (\u{03C0})";
    const OUTPUT: &str = "Aggregate output (Y)";
    const UNEMPLOYMENT: &str = "Unemployment rate (U)";

    let (x_title, y_title, x_symbol, y_symbol, begin_at_zero) = match stage {
        CumulativeStage::MonetaryPolicy => (INFLATION, RATE, "\u{03C0}", "r", true),
        CumulativeStage::InvestmentSaving => (OUTPUT, RATE, "Y", "r", true),
        CumulativeStage::AggregateDemand => (OUTPUT, INFLATION, "Y", "\u{03C0}", false),
        CumulativeStage::Phillips => (UNEMPLOYMENT, INFLATION, "U", "\u{03C0}", false),
        CumulativeStage::Okun => (UNEMPLOYMENT, OUTPUT, "U", "Y", false),
    };
    StageAxes {
        x_title,
        y_title,
        x_symbol,
        y_symbol,
        begin_at_zero,
    }
}

/// The `(x, y)` point a stage annotates.
fn stage_point(stage: CumulativeStage, chain: &ChainEquilibrium) -> Option<DataPoint> {
    let point = match stage {
        CumulativeStage::MonetaryPolicy => DataPoint::new(chain.mp_inflation?, chain.rate),
        CumulativeStage::InvestmentSaving => DataPoint::new(chain.output, chain.rate),
        CumulativeStage::AggregateDemand => DataPoint::new(chain.output, chain.inflation),
        CumulativeStage::Phillips => DataPoint::new(chain.unemployment, chain.inflation),
        CumulativeStage::Okun => DataPoint::new(chain.unemployment, chain.okun_output),
    };
    Some(point)
}

fn stage_dataset(stage: CumulativeStage, params: &CumulativeParams) -> GraphResult<CurveDataset> {
    let label = stage.title();
    match stage {
        CumulativeStage::MonetaryPolicy => {
            CurveDataset::sample(label, CHAIN_SAMPLES, SampleMode::Forward, |pi| params.mp_rate(pi))
        }
        CumulativeStage::InvestmentSaving => {
            CurveDataset::sample(label, CHAIN_SAMPLES, SampleMode::Forward, |y| params.is_rate(y))
        }
        // Undefined inverse points are dropped when the chart reads extents.
        CumulativeStage::AggregateDemand => {
            CurveDataset::sample(label, CHAIN_SAMPLES, SampleMode::Swap, |pi| {
                params.ad_output(pi).unwrap_or(f64::NAN)
            })
        }
        CumulativeStage::Phillips => {
            CurveDataset::sample(label, CHAIN_SAMPLES, SampleMode::Forward, |u| {
                params.pc_inflation(u)
            })
        }
        CumulativeStage::Okun => {
            CurveDataset::sample(label, CHAIN_SAMPLES, SampleMode::Forward, |u| {
                params.okun_output(u)
            })
        }
    }
}

/// Cumulative chain MP → IS → AD → Phillips → Okun driven by the policy
/// rate, with linked axes between neighbouring charts.
#[derive(Debug, Clone)]
pub struct CumulativeScreen {
    config: GrapherConfig,
    params: CumulativeParams,
    sliders: SliderPanel,
    charts: Vec<Chart>,
    snapshot: CumulativeSnapshot,
}

impl CumulativeScreen {
    pub fn new(config: GrapherConfig) -> GraphResult<Self> {
        let config = config.validate()?;
        let params = CumulativeParams::default();
        let sliders = SliderPanel::new()
            .with_slider(KEY_RATE, "Real interest rate (r)", 0.0, 10.0, params.rate)?
            .with_slider(KEY_LAMBDA, "MP responsiveness (\u{03BB})", -2.0, 2.0, params.lambda)?
            .with_slider(
                KEY_AUTONOMOUS_RATE,
                "Autonomous rate (r\u{0304})",
                0.0,
                5.0,
                params.autonomous_rate,
            )?
            .with_slider(KEY_IS_OFFSET, "IS shift", -5.0, 5.0, params.is_curve.offset)?
            // Range reaches 20 so the default Y_P of 16 sits inside it.
            .with_slider(
                KEY_POTENTIAL_OUTPUT,
                "Potential output (Y\u{1D3E})",
                0.0,
                20.0,
                params.potential_output,
            )?
            .with_slider(
                KEY_NATURAL_UNEMPLOYMENT,
                "Natural unemployment (U\u{2099})",
                0.0,
                10.0,
                params.natural_unemployment,
            )?;

        let charts = CumulativeStage::ALL
            .iter()
            .map(|&stage| {
                let axes = stage_axes(stage);
                Chart::new(
                    ChartConfig::scatter(stage.title())
                        .with_axis_titles(axes.x_title, axes.y_title)
                        .with_y_axis(AxisOptions::default().with_begin_at_zero(axes.begin_at_zero))
                        .with_padding(ChartPadding {
                            bottom: 20.0,
                            ..ChartPadding::default()
                        }),
                    config.viewport,
                )
            })
            .collect::<GraphResult<Vec<_>>>()?;

        let mut screen = Self {
            config,
            params,
            sliders,
            charts,
            snapshot: CumulativeSnapshot {
                params,
                chain: None,
                stages: Vec::new(),
            },
        };
        screen.recompute()?;
        Ok(screen)
    }

    #[must_use]
    pub fn params(&self) -> CumulativeParams {
        self.params
    }

    /// Chart of one stage.
    #[must_use]
    pub fn chart(&self, stage: CumulativeStage) -> Option<&Chart> {
        let index = CumulativeStage::ALL.iter().position(|&candidate| candidate == stage)?;
        self.charts.get(index)
    }

    fn recompute(&mut self) -> GraphResult<()> {
        let params = self.params;
        for (chart, &stage) in self.charts.iter_mut().zip(CumulativeStage::ALL.iter()) {
            let dataset = stage_dataset(stage, &params)?;
            chart.update(vec![ChartSeries::new(dataset, CURVE_COLOR)])?;
        }
        sync_chain(&mut self.charts)?;

        let chain = match params.solve() {
            Ok(chain) => Some(chain),
            Err(err) => {
                warn!(%err, "cumulative chain undefined");
                None
            }
        };

        let mut stages = Vec::with_capacity(self.charts.len());
        for (chart, &stage) in self.charts.iter().zip(CumulativeStage::ALL.iter()) {
            let x_bounds = chart.x_bounds()?;
            let y_bounds = chart.y_bounds()?;
            let status = chain.as_ref().map_or(CumulativeStatus::Undefined, |chain| {
                classify_stage(stage, chain, x_bounds, y_bounds)
            });
            stages.push(StageSnapshot {
                stage,
                series: chart.series().to_vec(),
                status,
                message: status.message().to_owned(),
                x_bounds,
                y_bounds,
            });
        }
        debug!(
            ?chain,
            statuses = ?stages.iter().map(|stage| stage.status).collect::<Vec<_>>(),
            "cumulative screen recomputed"
        );

        self.snapshot = CumulativeSnapshot {
            params,
            chain,
            stages,
        };
        Ok(())
    }

    fn annotate(
        &self,
        chart: &Chart,
        stage: &StageSnapshot,
        frame: &mut RenderFrame,
    ) -> GraphResult<()> {
        if stage.status != CumulativeStatus::NoError {
            return Ok(());
        }
        let Some(point) = self
            .snapshot
            .chain
            .as_ref()
            .and_then(|chain| stage_point(stage.stage, chain))
        else {
            return Ok(());
        };

        let mapper = chart.mapper()?;
        let area = mapper.plot_area();
        let axes = stage_axes(stage.stage);
        let pixel = clamp_to_area(mapper.data_to_pixel(point)?, area);

        let mut annotations = annotator(frame, self.config.annotation_shadow());
        guides_to_point(&mut annotations, pixel, area);
        annotations.write_annotation(
            value_label(axes.y_symbol, point.y),
            area.left - LABEL_LEFT_PX,
            pixel.y,
            ANNOTATION_COLOR,
        );
        annotations.write_annotation(
            value_label(axes.x_symbol, point.x),
            pixel.x,
            area.bottom + LABEL_BELOW_PX,
            ANNOTATION_COLOR,
        );
        Ok(())
    }
}

impl Screen for CumulativeScreen {
    type Snapshot = CumulativeSnapshot;

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
        self.params = CumulativeParams::default();
        self.sliders.reset();
        self.recompute()
    }

    fn snapshot(&self) -> &CumulativeSnapshot {
        &self.snapshot
    }

    fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// One frame per stage, in chain order.
    fn render_frames(&self) -> GraphResult<Vec<RenderFrame>> {
        self.charts
            .iter()
            .zip(&self.snapshot.stages)
            .map(|(chart, stage)| {
                let mut frame = chart.build_frame()?;
                self.annotate(chart, stage, &mut frame)?;
                Ok(frame)
            })
            .collect()
    }
}
