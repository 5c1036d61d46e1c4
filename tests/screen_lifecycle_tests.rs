use macro_charts::GraphError;
use macro_charts::api::{
    AdasScreen, CumulativeScreen, GrapherConfig, Screen, SiScreen, SliderOutcome, SliderPanel,
    SolowScreen,
};
use macro_charts::models::{EconomyType, PolicyResponse};
use macro_charts::render::NullRenderer;
use macro_charts::status::SiStatus;

fn assert_reset_restores_defaults<S: Screen>(mut screen: S, key: &str, value: f64)
where
    S::Snapshot: PartialEq + std::fmt::Debug,
{
    let pristine = screen.snapshot().clone();
    let sliders = screen.sliders().clone();

    screen.set_slider(key, value).expect("slider");
    assert_ne!(screen.snapshot(), &pristine);

    screen.reset().expect("reset");
    assert_eq!(screen.snapshot(), &pristine);
    assert_eq!(screen.sliders(), &sliders);
}

#[test]
fn reset_restores_every_screen() {
    let config = GrapherConfig::default();
    assert_reset_restores_defaults(SolowScreen::new(config).expect("solow"), "s", 0.8);
    assert_reset_restores_defaults(AdasScreen::new(config).expect("adas"), "ad_offset", 2.0);
    assert_reset_restores_defaults(SiScreen::new(config).expect("si"), "saving_offset", 1.5);
    assert_reset_restores_defaults(CumulativeScreen::new(config).expect("cumulative"), "r", 3.0);
}

#[test]
fn out_of_range_values_are_clamped() {
    let mut screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let outcome = screen.set_slider("s", 4.0).expect("slider");
    assert_eq!(
        outcome,
        SliderOutcome::Applied {
            value: 1.0,
            clamped: true
        }
    );
    assert_eq!(screen.params().saving_rate, 1.0);
    assert_eq!(outcome.applied_value(), Some(1.0));
}

#[test]
fn unknown_and_non_finite_inputs_are_rejected_without_side_effects() {
    let mut screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let before = screen.snapshot().clone();

    let err = screen.set_slider("gamma", 1.0).expect_err("unknown key");
    assert!(matches!(err, GraphError::UnknownParameter(key) if key == "gamma"));

    let err = screen.set_slider("s", f64::NAN).expect_err("nan");
    assert!(matches!(err, GraphError::InvalidData(_)));
    assert_eq!(screen.snapshot(), &before);
}

#[test]
fn sliders_keep_insertion_order() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let keys: Vec<&str> = screen.sliders().iter().map(|slider| slider.key.as_str()).collect();
    assert_eq!(keys, ["s", "A", "b", "delta", "n"]);
}

#[test]
fn panel_rejects_defaults_outside_bounds() {
    assert!(SliderPanel::new().with_slider("x", "x", 0.0, 1.0, 2.0).is_err());
    assert!(SliderPanel::new().with_slider("x", "x", 1.0, 0.0, 0.5).is_err());
}

#[test]
fn small_open_economy_reports_net_exports() {
    let mut screen = SiScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_economy(EconomyType::SmallOpen).expect("economy");
    screen.set_slider("world_rate", 6.0).expect("world rate");

    let snapshot = screen.snapshot();
    let nx = snapshot
        .equilibrium
        .and_then(|eq| eq.net_exports)
        .expect("net exports");
    assert_eq!(nx.world_rate, 6.0);
    assert!((nx.value() - 3.0).abs() < 1e-12);
    assert_eq!(snapshot.status, SiStatus::NoError);
    assert_eq!(screen.render_frames().expect("frames").len(), 1);
}

#[test]
fn world_rate_slider_is_capped_at_the_domestic_axis() {
    let mut screen = SiScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_economy(EconomyType::SmallOpen).expect("economy");
    let y_max = screen.snapshot().y_bounds.max;

    let outcome = screen.set_slider("world_rate", 1_000.0).expect("world rate");
    let applied = outcome.applied_value().expect("applied");
    assert!(applied <= y_max);
    assert!(matches!(outcome, SliderOutcome::Applied { clamped: true, .. }));
}

#[test]
fn switching_economy_restores_world_defaults() {
    let mut screen = SiScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_economy(EconomyType::LargeOpen).expect("large");
    screen.set_slider("world_offset", 3.0).expect("world shock");

    screen.set_economy(EconomyType::SmallOpen).expect("small");
    assert_eq!(screen.economy(), EconomyType::SmallOpen);
    assert_eq!(screen.params().world.investment_offset, 0.0);
    assert_eq!(screen.params().world_rate, 2.0);
    assert_eq!(screen.sliders().value("world_offset").expect("slider"), 0.0);
}

#[test]
fn render_with_validates_every_frame() {
    let config = GrapherConfig::default();
    let mut renderer = NullRenderer::default();

    let drawn = CumulativeScreen::new(config)
        .expect("cumulative")
        .render_with(&mut renderer)
        .expect("render");
    assert_eq!(drawn, 5);

    let mut adas = AdasScreen::new(config).expect("adas");
    adas.set_slider("ad_offset", 2.0).expect("shock");
    adas.select_policy(PolicyResponse::StabilizeInflation)
        .expect("policy");
    assert_eq!(adas.render_with(&mut renderer).expect("render"), 1);
    assert_eq!(renderer.frames_rendered, 6);
    assert!(renderer.last_dashed_line_count > 0);
}

#[test]
fn disabling_shadows_strips_them_from_annotations() {
    let config = GrapherConfig::default().with_shadow_enabled(false);
    let screen = SolowScreen::new(config).expect("screen");
    let frame = screen.render_frames().expect("frames").remove(0);
    assert!(frame.lines.iter().all(|line| line.shadow.is_none()));

    let shadowed = SolowScreen::new(GrapherConfig::default())
        .expect("screen")
        .render_frames()
        .expect("frames")
        .remove(0);
    assert!(shadowed.lines.iter().any(|line| line.shadow.is_some()));
}
