use approx::assert_abs_diff_eq;
use macro_charts::GraphError;
use macro_charts::api::{GrapherConfig, Screen, SiScreen};
use macro_charts::models::{
    EconomyType, EconomyVars, SavingInvestmentCurves, WorldRateSettings, gap_difference,
    solve_world_rate, solve_world_rate_from,
};
use macro_charts::status::SiStatus;
use proptest::prelude::*;

/// Schedules with a slope other than the default, to exercise the solver
/// through the trait rather than `EconomyVars`.
struct SteepCurves {
    saving_slope: f64,
    investment_slope: f64,
    shift: f64,
}

impl SavingInvestmentCurves for SteepCurves {
    fn saving(&self, rate: f64) -> f64 {
        self.saving_slope * rate + self.shift
    }

    fn investment(&self, rate: f64) -> f64 {
        10.0 - self.investment_slope * rate
    }
}

#[test]
fn identical_economies_need_no_steps() {
    let vars = EconomyVars::default();
    let solution = solve_world_rate(&vars, &vars, WorldRateSettings::default()).expect("solve");
    assert_eq!(solution.iterations, 0);
    assert_eq!(solution.rate, vars.equilibrium_rate());
    assert_eq!(solution.residual, 0.0);
}

#[test]
fn custom_schedules_converge_within_tolerance() {
    let domestic = SteepCurves {
        saving_slope: 2.0,
        investment_slope: 1.0,
        shift: 1.0,
    };
    let world = SteepCurves {
        saving_slope: 2.0,
        investment_slope: 1.0,
        shift: -2.0,
    };
    // Closed rates: domestic 3, world 4.
    let settings = WorldRateSettings::default();
    let solution =
        solve_world_rate_from(&domestic, &world, 3.0, 4.0, settings).expect("converges");
    assert!(solution.residual <= settings.tolerance);
    assert!(solution.rate > 3.0 && solution.rate < 4.0);
    assert_abs_diff_eq!(solution.rate, 3.5, epsilon = 0.01);
}

#[test]
fn steep_schedules_converge_after_overshooting() {
    let domestic = SteepCurves {
        saving_slope: 10.0,
        investment_slope: 10.0,
        shift: 0.0,
    };
    let world = SteepCurves {
        saving_slope: 10.0,
        investment_slope: 10.0,
        shift: 3.0,
    };
    // Closed rates: domestic 0.5, world 0.35. The gap difference moves 0.1
    // per `min_step` near the root, so only damped steps can reach tolerance.
    let settings = WorldRateSettings {
        step_divisor: 25.0,
        ..WorldRateSettings::default()
    };
    let solution =
        solve_world_rate_from(&domestic, &world, 0.5, 0.35, settings).expect("converges");
    assert!(solution.residual <= settings.tolerance);
    assert!(solution.iterations < 100);
    assert_abs_diff_eq!(solution.rate, 0.425, epsilon = 0.001);
}

#[test]
fn non_finite_start_is_rejected() {
    let vars = EconomyVars::default();
    let err = solve_world_rate_from(&vars, &vars, f64::NAN, 1.0, WorldRateSettings::default())
        .expect_err("nan start");
    assert!(matches!(err, GraphError::InvalidData(_)));
}

#[test]
fn large_open_screen_exposes_the_solver_trace() {
    let mut screen = SiScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_economy(EconomyType::LargeOpen).expect("economy");
    screen.set_slider("world_offset", 2.0).expect("world shock");

    let snapshot = screen.snapshot();
    let eq = snapshot.equilibrium.expect("equilibrium");
    let solution = eq.world_solution.expect("large open economy runs the solver");
    assert!(solution.residual <= WorldRateSettings::default().tolerance);
    assert_abs_diff_eq!(solution.rate, 5.5, epsilon = 0.01);

    let nx = eq.net_exports.expect("open economy");
    assert_eq!(nx.world_rate, solution.rate);
    assert!(nx.is_surplus());
    assert_eq!(snapshot.status, SiStatus::NoError);
    assert_eq!(screen.render_frames().expect("frames").len(), 2);
}

#[test]
fn iteration_ceiling_from_config_surfaces_as_undefined() {
    let config = GrapherConfig {
        world_rate: WorldRateSettings {
            max_iterations: 1,
            ..WorldRateSettings::default()
        },
        ..GrapherConfig::default()
    };
    let mut screen = SiScreen::new(config).expect("screen");
    screen.set_economy(EconomyType::LargeOpen).expect("economy");
    screen.set_slider("world_offset", 8.0).expect("world shock");

    let snapshot = screen.snapshot();
    assert!(snapshot.equilibrium.is_none());
    assert_eq!(snapshot.status, SiStatus::Undefined);
}

proptest! {
    #[test]
    fn symmetric_world_shocks_converge_to_the_midpoint(shock in -5.0f64..5.0) {
        let domestic = EconomyVars::default();
        let world = EconomyVars {
            investment_offset: shock,
            saving_offset: -shock,
            ..EconomyVars::default()
        };
        let settings = WorldRateSettings::default();
        let solution = solve_world_rate(&domestic, &world, settings).expect("converges");

        prop_assert!(solution.residual <= settings.tolerance);
        prop_assert!(gap_difference(&domestic, &world, solution.rate) <= settings.tolerance);
        let midpoint = (domestic.equilibrium_rate() + world.equilibrium_rate()) / 2.0;
        prop_assert!((solution.rate - midpoint).abs() <= 0.01);
    }
}
