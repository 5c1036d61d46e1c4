use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::axis_sync::sync_world_to_domestic;
use crate::api::chart::{Chart, ChartConfig, ChartSeries};
use crate::api::json_contract::SnapshotContract;
use crate::api::overlay::{LABEL_BELOW_PX, LABEL_LEFT_PX, annotator, clamp_to_area, value_label};
use crate::api::slider::{SliderOutcome, SliderPanel};
use crate::api::{GrapherConfig, Screen};
use crate::core::{
    AxisBounds, AxisOptions, CoordinateMapper, CurveDataset, DataPoint, SampleDomain, SampleMode,
    TickSource,
};
use crate::error::GraphResult;
use crate::models::saving_investment::{
    DEFAULT_WORLD_RATE, KEY_INVESTMENT_OFFSET, KEY_SAVING_OFFSET, KEY_WORLD_OFFSET, KEY_WORLD_RATE,
};
use crate::models::{
    EconomyType, EconomyVars, NetExports, SavingInvestmentCurves, SiEquilibrium, SiParams,
};
use crate::render::{AnnotationRenderer, Color, RenderFrame};
use crate::status::{DisplayStatus, SiStatus, classify_si};

/// Real interest rate `r ∈ {0, 10}`, sampled on the y axis.
pub const SI_SAMPLES: SampleDomain = SampleDomain::new(0.0, 10.0, 2);

const SAVING_COLOR: Color = Color::from_rgb8(255, 163, 15);
const INVESTMENT_COLOR: Color = Color::from_rgb8(35, 187, 247);
/// `#e01bda`
const EQUILIBRIUM_COLOR: Color = Color::from_rgb8(0xe0, 0x1b, 0xda);
/// `#0eab00`
const SURPLUS_COLOR: Color = Color::from_rgb8(0x0e, 0xab, 0x00);
/// `#f54c4c`
const DEFICIT_COLOR: Color = Color::from_rgb8(0xf5, 0x4c, 0x4c);

/// Half-height of the end caps of the net-export bracket.
const BRACKET_CAP_PX: f64 = 5.0;
const NX_LABEL_GAP_PX: f64 = 20.0;

const DOMESTIC: usize = 0;
const WORLD: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiSnapshot {
    pub params: SiParams,
    pub domestic_series: Vec<ChartSeries>,
    pub world_series: Vec<ChartSeries>,
    pub equilibrium: Option<SiEquilibrium>,
    pub status: SiStatus,
    pub message: String,
    pub x_bounds: AxisBounds,
    pub y_bounds: AxisBounds,
    pub world_x_bounds: AxisBounds,
    pub world_y_bounds: AxisBounds,
}

impl SnapshotContract for SiSnapshot {
    const SCREEN: &'static str = "saving_investment";
}

/// Saving-investment model for closed, small open and large open economies.
///
/// The world chart mirrors the domestic chart's axis maxima and is only
/// drawn for a large open economy.
#[derive(Debug, Clone)]
pub struct SiScreen {
    config: GrapherConfig,
    params: SiParams,
    sliders: SliderPanel,
    charts: [Chart; 2],
    snapshot: SiSnapshot,
}

fn si_chart_config(title: &str) -> ChartConfig {
    ChartConfig::scatter(title)
        .with_axis_titles("Desired saving and investment", "Real interest rate (r)")
        .with_x_axis(AxisOptions::default().with_min(0.0))
        .with_y_axis(AxisOptions::default().with_min(0.0))
}

fn curve_series(vars: &EconomyVars) -> GraphResult<Vec<ChartSeries>> {
    Ok(vec![
        ChartSeries::new(
            CurveDataset::sample("Saving", SI_SAMPLES, SampleMode::Swap, |r| vars.saving(r))?,
            SAVING_COLOR,
        ),
        ChartSeries::new(
            CurveDataset::sample("Investment", SI_SAMPLES, SampleMode::Swap, |r| {
                vars.investment(r)
            })?,
            INVESTMENT_COLOR,
        ),
    ])
}

impl SiScreen {
    pub fn new(config: GrapherConfig) -> GraphResult<Self> {
        let config = config.validate()?;
        let params = SiParams::default();
        let sliders = SliderPanel::new()
            .with_slider(KEY_SAVING_OFFSET, "Saving shift", -5.0, 5.0, 0.0)?
            .with_slider(KEY_INVESTMENT_OFFSET, "Investment shift", -5.0, 5.0, 0.0)?
            .with_slider(
                KEY_WORLD_RATE,
                "World interest rate (r\u{1D42})",
                0.0,
                10.0,
                DEFAULT_WORLD_RATE,
            )?
            .with_slider(KEY_WORLD_OFFSET, "World saving/investment shift", -10.0, 10.0, 0.0)?;

        let domestic = Chart::new(
            si_chart_config("Domestic Saving and Investment"),
            config.viewport,
        )?;
        let world = Chart::new(si_chart_config("World Saving and Investment"), config.viewport)?;

        let bounds = domestic.x_bounds()?;
        let mut screen = Self {
            config,
            params,
            sliders,
            charts: [domestic, world],
            snapshot: SiSnapshot {
                params,
                domestic_series: Vec::new(),
                world_series: Vec::new(),
                equilibrium: None,
                status: SiStatus::Undefined,
                message: String::new(),
                x_bounds: bounds,
                y_bounds: bounds,
                world_x_bounds: bounds,
                world_y_bounds: bounds,
            },
        };
        screen.recompute()?;
        Ok(screen)
    }

    #[must_use]
    pub fn params(&self) -> SiParams {
        self.params
    }

    #[must_use]
    pub fn economy(&self) -> EconomyType {
        self.params.economy
    }

    /// Switches economy type; world sliders return to their defaults.
    pub fn set_economy(&mut self, economy: EconomyType) -> GraphResult<()> {
        self.params = self.params.with_economy(economy);
        self.sliders.sync_value(KEY_WORLD_RATE, self.params.world_rate);
        self.sliders.sync_value(KEY_WORLD_OFFSET, 0.0);
        self.recompute()
    }

    fn recompute(&mut self) -> GraphResult<()> {
        let params = self.params;
        let [domestic, world] = &mut self.charts;
        domestic.update(curve_series(&params.domestic)?)?;
        world.update(curve_series(&params.world)?)?;
        sync_world_to_domestic(domestic, world)?;

        let x_bounds = domestic.x_bounds()?;
        let y_bounds = domestic.y_bounds()?;
        let (equilibrium, status) = match params.equilibrium(self.config.world_rate) {
            Ok(equilibrium) => (Some(equilibrium), classify_si(&equilibrium, x_bounds, y_bounds)),
            Err(err) => {
                warn!(%err, economy = ?params.economy, "saving-investment equilibrium undefined");
                (None, SiStatus::Undefined)
            }
        };
        debug!(
            ?status,
            ?equilibrium,
            economy = ?params.economy,
            "saving-investment screen recomputed"
        );

        self.snapshot = SiSnapshot {
            params,
            domestic_series: domestic.series().to_vec(),
            world_series: world.series().to_vec(),
            equilibrium,
            status,
            message: status.message().to_owned(),
            x_bounds,
            y_bounds,
            world_x_bounds: world.x_bounds()?,
            world_y_bounds: world.y_bounds()?,
        };
        Ok(())
    }

    fn annotate_domestic(&self, frame: &mut RenderFrame) -> GraphResult<()> {
        let Some(equilibrium) = self.snapshot.equilibrium else {
            return Ok(());
        };
        let status = self.snapshot.status;
        if matches!(status, SiStatus::ROutOfBounds | SiStatus::Undefined) {
            return Ok(());
        }

        let mapper = self.charts[DOMESTIC].mapper()?;
        let area = mapper.plot_area();
        let mut annotations = annotator(frame, self.config.annotation_shadow());

        match equilibrium.net_exports {
            None => {
                let point = clamp_to_area(
                    mapper.data_to_pixel(DataPoint::new(
                        equilibrium.saving_investment,
                        equilibrium.rate,
                    ))?,
                    area,
                );
                annotations.draw_line_offset_annotation(point.y, area.left, point.x);
                annotations.write_annotation(
                    value_label("r*", equilibrium.rate),
                    area.left - LABEL_LEFT_PX,
                    point.y,
                    EQUILIBRIUM_COLOR,
                );
                if status != SiStatus::SiOutOfBounds {
                    annotations.draw_line_height_annotation(point.x, area.bottom, point.y);
                    annotations.write_annotation(
                        value_label("S*, I*", equilibrium.saving_investment),
                        point.x,
                        area.bottom + LABEL_BELOW_PX,
                        EQUILIBRIUM_COLOR,
                    );
                }
            }
            Some(net_exports) => {
                if self.snapshot.y_bounds.contains(net_exports.world_rate) {
                    let far = net_exports.saving.max(net_exports.investment);
                    world_rate_guide(&mut annotations, &mapper, net_exports.world_rate, far)?;
                    let x_bounds = self.snapshot.x_bounds;
                    draw_net_exports(&mut annotations, &mapper, net_exports, x_bounds)?;
                }
            }
        }
        Ok(())
    }

    fn annotate_world(&self, frame: &mut RenderFrame) -> GraphResult<()> {
        let Some(net_exports) = self.snapshot.equilibrium.and_then(|eq| eq.net_exports) else {
            return Ok(());
        };
        let rate = net_exports.world_rate;
        if !self.snapshot.world_y_bounds.contains(rate) {
            return Ok(());
        }
        let world = &self.params.world;
        let mapper = self.charts[WORLD].mapper()?;
        let mut annotations = annotator(frame, self.config.annotation_shadow());
        let far = world.saving(rate).max(world.investment(rate));
        world_rate_guide(&mut annotations, &mapper, rate, far)
    }
}

/// Dashed guide at `r_w` from the y axis to the farther curve.
fn world_rate_guide(
    annotations: &mut AnnotationRenderer<'_>,
    mapper: &CoordinateMapper,
    rate: f64,
    far_x: f64,
) -> GraphResult<()> {
    let area = mapper.plot_area();
    let point = clamp_to_area(mapper.data_to_pixel(DataPoint::new(far_x, rate))?, area);
    annotations.draw_line_offset_annotation(point.y, area.left, point.x);
    annotations.write_annotation(
        value_label("r\u{1D42}", rate),
        area.left - LABEL_LEFT_PX,
        point.y,
        EQUILIBRIUM_COLOR,
    );
    Ok(())
}

/// Bracket between saving and investment at `r_w`, labelled surplus or
/// deficit.
fn draw_net_exports(
    annotations: &mut AnnotationRenderer<'_>,
    mapper: &CoordinateMapper,
    net_exports: NetExports,
    x_bounds: AxisBounds,
) -> GraphResult<()> {
    let low = net_exports.saving.min(net_exports.investment);
    let high = net_exports.saving.max(net_exports.investment);
    if net_exports.value().abs() <= f64::EPSILON
        || !x_bounds.contains(low)
        || !x_bounds.contains(high)
    {
        return Ok(());
    }

    let left = mapper.data_to_pixel(DataPoint::new(low, net_exports.world_rate))?;
    let right = mapper.data_to_pixel(DataPoint::new(high, net_exports.world_rate))?;
    let (color, text, label_y) = if net_exports.is_surplus() {
        (SURPLUS_COLOR, "NX: surplus", left.y - NX_LABEL_GAP_PX)
    } else {
        (DEFICIT_COLOR, "NX: deficit", left.y + NX_LABEL_GAP_PX)
    };

    annotations.draw_horizontal_line(left.y, left.x, right.x, color);
    for end in [left, right] {
        annotations.draw_vertical_line(
            end.x,
            end.y - BRACKET_CAP_PX,
            end.y + BRACKET_CAP_PX,
            color,
        );
    }
    annotations.write_annotation(text, (left.x + right.x) / 2.0, label_y, color);
    Ok(())
}

impl Screen for SiScreen {
    type Snapshot = SiSnapshot;

    fn sliders(&self) -> &SliderPanel {
        &self.sliders
    }

    /// The world rate is additionally capped at the domestic chart's top
    /// tick.
    fn set_slider(&mut self, key: &str, value: f64) -> GraphResult<SliderOutcome> {
        let requested = if key == KEY_WORLD_RATE && value.is_finite() {
            value.min(self.snapshot.y_bounds.max)
        } else {
            value
        };
        let (applied, clamped) = self.sliders.set(key, requested)?;
        self.params = self.params.with_parameter(key, applied)?;
        self.recompute()?;
        Ok(SliderOutcome::Applied {
            value: applied,
            clamped: clamped || requested != value,
        })
    }

    fn reset(&mut self) -> GraphResult<()> {
        self.params = SiParams::default();
        self.sliders.reset();
        self.recompute()
    }

    fn snapshot(&self) -> &SiSnapshot {
        &self.snapshot
    }

    fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Domestic frame, plus the world frame for a large open economy.
    fn render_frames(&self) -> GraphResult<Vec<RenderFrame>> {
        let mut domestic = self.charts[DOMESTIC].build_frame()?;
        self.annotate_domestic(&mut domestic)?;
        let mut frames = vec![domestic];

        if self.params.economy == EconomyType::LargeOpen {
            let mut world = self.charts[WORLD].build_frame()?;
            self.annotate_world(&mut world)?;
            frames.push(world);
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::SiScreen;
    use crate::api::{GrapherConfig, Screen};
    use crate::core::TickSource;
    use crate::models::EconomyType;

    #[test]
    fn world_chart_follows_domestic_maxima() {
        let mut screen = SiScreen::new(GrapherConfig::default()).expect("screen");
        screen.set_economy(EconomyType::LargeOpen).expect("economy");
        screen.set_slider("world_offset", 8.0).expect("slider");
        let [domestic, world] = &screen.charts;
        assert_eq!(
            world.x_bounds().expect("world x").max,
            domestic.x_bounds().expect("domestic x").max
        );
        assert_eq!(
            world.y_bounds().expect("world y").max,
            domestic.y_bounds().expect("domestic y").max
        );
    }
}
