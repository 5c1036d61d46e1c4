use approx::assert_relative_eq;
use macro_charts::api::{GrapherConfig, Screen, SolowScreen};
use macro_charts::models::SolowParams;
use macro_charts::status::{DisplayStatus, SolowStatus};
use proptest::prelude::*;

#[test]
fn default_screen_shows_the_steady_state() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let snapshot = screen.snapshot();

    let eq = snapshot.equilibrium.expect("defined equilibrium");
    assert_relative_eq!(eq.capital, 1.5625, epsilon = 1e-12);
    assert_relative_eq!(eq.output, 1.875, epsilon = 1e-12);
    assert_relative_eq!(eq.investment, 0.9375, epsilon = 1e-12);
    assert_eq!(snapshot.status, SolowStatus::NoError);
    assert!(snapshot.message.is_empty());
    assert_eq!(snapshot.series.len(), 3);
    assert_eq!(snapshot.x_bounds.min, 0.0);
    assert_eq!(snapshot.x_bounds.max, 10.0);
    assert_eq!(snapshot.y_bounds.min, 0.0);
}

#[test]
fn curves_are_sampled_on_integer_capital() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let output = &screen.snapshot().series[0].dataset;
    assert_eq!(output.points.len(), 11);
    assert_eq!(output.points[0].x, 0.0);
    assert_eq!(output.points[10].x, 10.0);
    assert_relative_eq!(output.points[4].y, 1.5 * 2.0, epsilon = 1e-12);
}

#[test]
fn unit_capital_share_is_reported_as_undefined() {
    let mut screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_slider("b", 1.0).expect("slider");

    let snapshot = screen.snapshot();
    assert!(snapshot.equilibrium.is_none());
    assert_eq!(snapshot.status, SolowStatus::Undefined);
    assert_eq!(snapshot.message, SolowStatus::Undefined.message());
}

#[test]
fn low_dilution_pushes_capital_off_the_chart() {
    let mut screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_slider("s", 1.0).expect("saving rate");
    screen.set_slider("A", 3.0).expect("productivity");
    screen.set_slider("delta", 0.05).expect("depreciation");
    screen.set_slider("n", 0.05).expect("population growth");

    // k* = (3 / 0.1)^2 = 900
    let snapshot = screen.snapshot();
    assert_relative_eq!(
        snapshot.equilibrium.expect("defined").capital,
        900.0,
        epsilon = 1e-9
    );
    assert_eq!(snapshot.status, SolowStatus::KOutOfBounds);
}

#[test]
fn undefined_state_still_renders_curves() {
    let mut screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    screen.set_slider("delta", 0.0).expect("depreciation");
    screen.set_slider("n", 0.0).expect("population growth");
    assert_eq!(screen.snapshot().status, SolowStatus::Undefined);

    let frames = screen.render_frames().expect("frames");
    assert_eq!(frames.len(), 1);
    assert!(frames[0].lines.len() > 2);
}

proptest! {
    #[test]
    fn steady_state_balances_investment_and_dilution(
        saving_rate in 0.05f64..1.0,
        productivity in 0.1f64..3.0,
        elasticity in 0.05f64..0.9,
        depreciation in 0.01f64..1.0,
        population_growth in 0.0f64..1.0
    ) {
        let params = SolowParams {
            saving_rate,
            productivity,
            elasticity,
            depreciation,
            population_growth,
        };
        let eq = params.equilibrium().expect("defined for b < 1 and δ + n > 0");
        let dilution = params.depreciation(eq.capital);
        prop_assert!((eq.investment - dilution).abs() <= 1e-9 * dilution.abs().max(1.0));
        prop_assert!(eq.capital >= 0.0);
    }
}
