use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::chart::{Chart, ChartConfig, ChartSeries};
use crate::api::json_contract::SnapshotContract;
use crate::api::overlay::{annotator, clamp_to_area, guides_to_point, value_label};
use crate::api::slider::{SliderOutcome, SliderPanel};
use crate::api::{GrapherConfig, Screen};
use crate::core::{
    AxisBounds, AxisOptions, ChartPadding, CurveDataset, DataPoint, SampleDomain, SampleMode,
    TickSource,
};
use crate::error::{GraphError, GraphResult};
use crate::interaction::{DemoAnimation, DemoProgress};
use crate::models::adas::{
    DEFAULT_POLICY_TARGET, KEY_AD_OFFSET, KEY_LRAS_OFFSET, KEY_POLICY_TARGET, KEY_SRAS_OFFSET,
};
use crate::models::{AdasEquilibrium, AdasParams, EQUILIBRIUM_EPSILON, PolicyResponse};
use crate::render::{Color, RenderFrame};
use crate::status::{AdasStatus, DisplayStatus, classify_adas};

/// Aggregate output `Y ∈ {0, 5}`.
pub const ADAS_SAMPLES: SampleDomain = SampleDomain::new(0.0, 5.0, 2);

const AD_COLOR: Color = Color::from_rgb8(20, 245, 50);
const SRAS_COLOR: Color = Color::from_rgb8(35, 187, 247);
const LRAS_COLOR: Color = Color::from_rgb8(237, 67, 55);
/// `#e01bda`
const EQUILIBRIUM_COLOR: Color = Color::from_rgb8(0xe0, 0x1b, 0xda);
/// `#de9000`
const PREVIOUS_COLOR: Color = Color::from_rgb8(0xde, 0x90, 0x00);

const POTENTIAL_LABEL_BELOW_PX: f64 = 40.0;
const OUTPUT_LABEL_BELOW_PX: f64 = 25.0;
const INFLATION_LABEL_LEFT_PX: f64 = 45.0;
const PREVIOUS_LABEL_LEFT_PX: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdasSnapshot {
    pub params: AdasParams,
    pub policy: Option<PolicyResponse>,
    pub series: Vec<ChartSeries>,
    pub equilibrium: Option<AdasEquilibrium>,
    /// Output at which SRAS meets the inflation target.
    pub target_output: Option<f64>,
    /// Equilibrium recorded when the last demo started.
    pub previous_equilibrium: Option<AdasEquilibrium>,
    pub status: AdasStatus,
    pub message: String,
    pub can_play: bool,
    pub demo_running: bool,
    pub x_bounds: AxisBounds,
    pub y_bounds: AxisBounds,
}

impl SnapshotContract for AdasSnapshot {
    const SCREEN: &'static str = "adas";
}

/// AD/AS model with policy selection and the policy-response demo.
#[derive(Debug, Clone)]
pub struct AdasScreen {
    config: GrapherConfig,
    params: AdasParams,
    policy: Option<PolicyResponse>,
    demo: Option<DemoAnimation>,
    previous_equilibrium: Option<AdasEquilibrium>,
    sliders: SliderPanel,
    chart: Chart,
    snapshot: AdasSnapshot,
}

impl AdasScreen {
    pub fn new(config: GrapherConfig) -> GraphResult<Self> {
        let config = config.validate()?;
        let params = AdasParams::default();
        let sliders = SliderPanel::new()
            .with_slider(KEY_AD_OFFSET, "AD shift", -10.0, 10.0, params.ad_offset)?
            .with_slider(KEY_SRAS_OFFSET, "SRAS shift", -8.0, 8.0, params.sras_offset)?
            .with_slider(KEY_LRAS_OFFSET, "LRAS shift", -5.0, 5.0, params.lras_offset)?
            .with_slider(
                KEY_POLICY_TARGET,
                "Inflation target (\u{03C0}\u{1D40})",
                0.0,
                5.0,
                params.policy_target,
            )?;

        let labels = ADAS_SAMPLES.values().collect();
        let chart = Chart::new(
            ChartConfig::line("AD / AS Model", labels)
                .with_axis_titles(
                    "Aggregate output, Y ($ trillions)",
                    "Inflation rate, \u{03C0} (%)",
                )
                .with_y_axis(AxisOptions::default().with_min(-10.0))
                .with_padding(ChartPadding {
                    left: 65.0,
                    ..ChartPadding::default()
                })
                .with_legend(true),
            config.viewport,
        )?;

        let x_bounds = chart.x_bounds()?;
        let y_bounds = chart.y_bounds()?;
        let mut screen = Self {
            config,
            params,
            policy: None,
            demo: None,
            previous_equilibrium: None,
            sliders,
            chart,
            snapshot: AdasSnapshot {
                params,
                policy: None,
                series: Vec::new(),
                equilibrium: None,
                target_output: None,
                previous_equilibrium: None,
                status: AdasStatus::Undefined,
                message: String::new(),
                can_play: false,
                demo_running: false,
                x_bounds,
                y_bounds,
            },
        };
        screen.recompute()?;
        Ok(screen)
    }

    #[must_use]
    pub fn params(&self) -> AdasParams {
        self.params
    }

    #[must_use]
    pub fn policy(&self) -> Option<PolicyResponse> {
        self.policy
    }

    #[must_use]
    pub fn is_demo_running(&self) -> bool {
        self.demo.is_some()
    }

    /// Toggles `policy`: choosing the active policy again deselects it.
    ///
    /// Any change resets the inflation target and forgets the previous
    /// equilibrium. Returns `false` while a demo is running.
    pub fn select_policy(&mut self, policy: PolicyResponse) -> GraphResult<bool> {
        if self.demo.is_some() {
            warn!(?policy, "policy change ignored while the demo runs");
            return Ok(false);
        }
        self.policy = if self.policy == Some(policy) {
            None
        } else {
            Some(policy)
        };
        self.params.policy_target = DEFAULT_POLICY_TARGET;
        self.sliders.sync_value(KEY_POLICY_TARGET, DEFAULT_POLICY_TARGET);
        self.previous_equilibrium = None;
        self.recompute()?;
        Ok(true)
    }

    /// A demo can start only from a clean, off-potential state with a
    /// policy selected.
    #[must_use]
    pub fn can_play(&self) -> bool {
        let status = self.snapshot.status;
        let blocked = status == AdasStatus::AtEquilibrium
            || self.policy.is_none()
            || status != AdasStatus::NoError;
        !blocked && self.demo.is_none()
    }

    /// Starts the demo for the selected policy and remembers the current
    /// equilibrium for the "previous" guides.
    pub fn play_demo(&mut self) -> GraphResult<()> {
        let policy = match self.policy {
            Some(policy) if self.can_play() => policy,
            _ => {
                return Err(GraphError::InvalidData(format!(
                    "demo cannot start: {:?}",
                    self.snapshot.status
                )));
            }
        };
        self.previous_equilibrium = self.snapshot.equilibrium;
        self.demo = Some(DemoAnimation::start(&self.params, policy, self.config.demo)?);
        self.recompute()
    }

    /// Runs one demo tick. Finishing clears the selected policy.
    pub fn advance_demo(&mut self) -> GraphResult<DemoProgress> {
        let Some(demo) = self.demo.as_mut() else {
            return Err(GraphError::InvalidData("no demo is running".to_owned()));
        };

        match demo.advance(self.params) {
            Ok((params, DemoProgress::Running { tracker, distance })) => {
                self.params = params;
                self.sliders.sync_value(KEY_AD_OFFSET, params.ad_offset);
                self.sliders.sync_value(KEY_SRAS_OFFSET, params.sras_offset);
                self.recompute()?;
                Ok(DemoProgress::Running { tracker, distance })
            }
            Ok((_, finished @ DemoProgress::Finished { .. })) => {
                self.demo = None;
                self.policy = None;
                self.recompute()?;
                Ok(finished)
            }
            Err(err) => {
                warn!(%err, "policy demo aborted");
                self.demo = None;
                self.recompute()?;
                Err(err)
            }
        }
    }

    /// Advances until the demo finishes; returns the ticks it took.
    pub fn run_demo_to_completion(&mut self) -> GraphResult<usize> {
        loop {
            if let DemoProgress::Finished { ticks } = self.advance_demo()? {
                return Ok(ticks);
            }
        }
    }

    fn recompute(&mut self) -> GraphResult<()> {
        let params = self.params;
        let lras = CurveDataset {
            label: "LRAS".to_owned(),
            mode: SampleMode::Forward,
            points: Vec::new(),
        };
        let series = vec![
            ChartSeries::new(
                CurveDataset::sample("AD", ADAS_SAMPLES, SampleMode::Forward, |y| {
                    params.aggregate_demand(y)
                })?,
                AD_COLOR,
            ),
            ChartSeries::new(
                CurveDataset::sample("SRAS", ADAS_SAMPLES, SampleMode::Forward, |y| {
                    params.short_run_supply(y)
                })?,
                SRAS_COLOR,
            ),
            ChartSeries::new(lras, LRAS_COLOR),
        ];
        self.chart.update(series)?;

        let x_bounds = self.chart.x_bounds()?;
        let y_bounds = self.chart.y_bounds()?;
        let status = classify_adas(&params, self.policy, ADAS_SAMPLES, x_bounds, y_bounds);
        let equilibrium = match params.equilibrium() {
            Ok(equilibrium) => Some(equilibrium),
            Err(err) => {
                warn!(%err, "ad/as equilibrium undefined");
                None
            }
        };
        debug!(?status, ?equilibrium, policy = ?self.policy, "ad/as screen recomputed");

        self.snapshot = AdasSnapshot {
            params,
            policy: self.policy,
            series: self.chart.series().to_vec(),
            equilibrium,
            target_output: params.target_output().ok(),
            previous_equilibrium: self.previous_equilibrium,
            status,
            message: status.message().to_owned(),
            can_play: false,
            demo_running: self.demo.is_some(),
            x_bounds,
            y_bounds,
        };
        self.snapshot.can_play = self.can_play();
        Ok(())
    }

    fn annotate(&self, frame: &mut RenderFrame) -> GraphResult<()> {
        let mapper = self.chart.mapper()?;
        let area = mapper.plot_area();
        let x_bounds = self.snapshot.x_bounds;
        let y_bounds = self.snapshot.y_bounds;
        let mut annotations = annotator(frame, self.config.annotation_shadow());

        let potential = self.params.effective_potential_output();
        if x_bounds.contains(potential) {
            let x = mapper.data_to_pixel(DataPoint::new(potential, y_bounds.min))?.x;
            annotations.draw_vertical_line(x, area.top, area.bottom, LRAS_COLOR);
            annotations.write_annotation(
                value_label("Y\u{1D3E}", potential),
                x,
                area.bottom + POTENTIAL_LABEL_BELOW_PX,
                LRAS_COLOR,
            );
        }

        let status = self.snapshot.status;
        let Some(equilibrium) = self.snapshot.equilibrium else {
            return Ok(());
        };
        if matches!(
            status,
            AdasStatus::OutputOutOfBounds | AdasStatus::OutputNegative | AdasStatus::Undefined
        ) {
            return Ok(());
        }

        let point = clamp_to_area(
            mapper.data_to_pixel(DataPoint::new(equilibrium.output, equilibrium.inflation))?,
            area,
        );
        annotations.draw_line_height_annotation(point.x, area.bottom, point.y);
        annotations.write_annotation(
            value_label("Y*", equilibrium.output),
            point.x,
            area.bottom + OUTPUT_LABEL_BELOW_PX,
            EQUILIBRIUM_COLOR,
        );
        if status == AdasStatus::InflationOutOfBounds {
            return Ok(());
        }

        annotations.draw_line_offset_annotation(point.y, area.left, point.x);
        annotations.write_annotation(
            value_label("\u{03C0}*", equilibrium.inflation),
            area.left - INFLATION_LABEL_LEFT_PX,
            point.y,
            EQUILIBRIUM_COLOR,
        );

        let target = self.params.policy_target;
        if self.policy == Some(PolicyResponse::StabilizeInflation)
            && (equilibrium.inflation - target).abs() > EQUILIBRIUM_EPSILON
            && y_bounds.contains(target)
        {
            let y = mapper.data_to_pixel(DataPoint::new(x_bounds.min, target))?.y;
            annotations.draw_line_offset_annotation(y, area.left, area.right);
            annotations.write_annotation(
                value_label("\u{03C0}\u{1D40}", target),
                area.left - INFLATION_LABEL_LEFT_PX,
                y,
                LRAS_COLOR,
            );
        }

        if let Some(previous) = self.previous_equilibrium {
            if x_bounds.contains(previous.output) && y_bounds.contains(previous.inflation) {
                let point =
                    mapper.data_to_pixel(DataPoint::new(previous.output, previous.inflation))?;
                guides_to_point(&mut annotations, point, area);
                annotations.write_annotation(
                    "Y*\u{208B}\u{2081}",
                    point.x,
                    area.bottom + OUTPUT_LABEL_BELOW_PX,
                    PREVIOUS_COLOR,
                );
                annotations.write_annotation(
                    "\u{03C0}*\u{208B}\u{2081}",
                    area.left - PREVIOUS_LABEL_LEFT_PX,
                    point.y,
                    PREVIOUS_COLOR,
                );
            }
        }
        Ok(())
    }
}

impl Screen for AdasScreen {
    type Snapshot = AdasSnapshot;

    fn sliders(&self) -> &SliderPanel {
        &self.sliders
    }

    /// Slider input during a running demo is dropped, unless the demo
    /// config asks for cancel-then-apply.
    fn set_slider(&mut self, key: &str, value: f64) -> GraphResult<SliderOutcome> {
        let cancelled = self.demo.is_some();
        if cancelled && !self.config.demo.cancel_on_input {
            warn!(key, value, "slider input ignored while the demo runs");
            return Ok(SliderOutcome::Ignored);
        }

        let (value, clamped) = self.sliders.set(key, value)?;
        self.demo = None;
        self.params = self.params.with_parameter(key, value)?;
        self.previous_equilibrium = None;
        self.recompute()?;
        Ok(if cancelled {
            SliderOutcome::DemoCancelled { value, clamped }
        } else {
            SliderOutcome::Applied { value, clamped }
        })
    }

    fn reset(&mut self) -> GraphResult<()> {
        self.params = AdasParams::default();
        self.policy = None;
        self.demo = None;
        self.previous_equilibrium = None;
        self.sliders.reset();
        self.recompute()
    }

    fn snapshot(&self) -> &AdasSnapshot {
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
