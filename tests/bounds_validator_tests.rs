use macro_charts::core::{AxisBounds, SampleDomain};
use macro_charts::models::{
    AdasParams, ChainEquilibrium, CumulativeStage, PolicyResponse, SiEquilibrium,
    SolowEquilibrium,
};
use macro_charts::status::{
    AdasStatus, CumulativeStatus, DisplayStatus, ERROR_COLOR, SiStatus, SolowStatus,
    StatusSeverity, classify_adas, classify_si, classify_solow, classify_stage,
};

const ADAS_DOMAIN: SampleDomain = SampleDomain::new(0.0, 5.0, 2);

fn bounds(min: f64, max: f64) -> AxisBounds {
    AxisBounds::new(min, max).expect("bounds")
}

#[test]
fn solow_checks_investment_before_output() {
    let eq = SolowEquilibrium {
        capital: 2.0,
        output: 9.0,
        investment: 7.0,
    };
    let status = classify_solow(&eq, bounds(0.0, 10.0), bounds(0.0, 5.0));
    assert_eq!(status, SolowStatus::IOutOfBounds);

    let eq = SolowEquilibrium {
        investment: 1.0,
        ..eq
    };
    let status = classify_solow(&eq, bounds(0.0, 10.0), bounds(0.0, 5.0));
    assert_eq!(status, SolowStatus::YOutOfBounds);
    assert_eq!(status.color(), Some(ERROR_COLOR));
}

#[test]
fn non_finite_values_are_never_in_range() {
    let eq = SolowEquilibrium {
        capital: f64::NAN,
        output: 1.0,
        investment: 1.0,
    };
    assert_eq!(
        classify_solow(&eq, bounds(0.0, 10.0), bounds(0.0, 10.0)),
        SolowStatus::KOutOfBounds
    );
    assert!(!bounds(0.0, 1.0).contains(f64::INFINITY));
}

#[test]
fn bounds_are_inclusive() {
    let eq = SolowEquilibrium {
        capital: 10.0,
        output: 5.0,
        investment: 0.0,
    };
    assert_eq!(
        classify_solow(&eq, bounds(0.0, 10.0), bounds(0.0, 5.0)),
        SolowStatus::NoError
    );
}

#[test]
fn adas_output_above_range_wins_over_inflation() {
    let params = AdasParams {
        ad_offset: 20.0,
        ..AdasParams::default()
    };
    let status = classify_adas(
        &params,
        None,
        ADAS_DOMAIN,
        bounds(0.0, 5.0),
        bounds(-1.0, 1.0),
    );
    assert_eq!(status, AdasStatus::OutputOutOfBounds);
}

#[test]
fn adas_output_below_range_is_negative() {
    let params = AdasParams {
        ad_offset: -15.0,
        ..AdasParams::default()
    };
    let status = classify_adas(
        &params,
        None,
        ADAS_DOMAIN,
        bounds(0.0, 5.0),
        bounds(-10.0, 10.0),
    );
    assert_eq!(status, AdasStatus::OutputNegative);
}

#[test]
fn unreachable_target_only_matters_for_the_inflation_policy() {
    let params = AdasParams {
        ad_offset: 2.0,
        policy_target: 9.0,
        ..AdasParams::default()
    };
    let x = bounds(0.0, 5.0);
    let y = bounds(-10.0, 10.0);

    assert_eq!(
        classify_adas(&params, Some(PolicyResponse::StabilizeInflation), ADAS_DOMAIN, x, y),
        AdasStatus::InflationTargetOutOfBounds
    );
    assert_eq!(
        classify_adas(&params, Some(PolicyResponse::StabilizeOutput), ADAS_DOMAIN, x, y),
        AdasStatus::NoError
    );
}

#[test]
fn parallel_adas_curves_are_undefined() {
    let params = AdasParams {
        gamma: -2.0,
        ..AdasParams::default()
    };
    let status = classify_adas(
        &params,
        None,
        ADAS_DOMAIN,
        bounds(0.0, 5.0),
        bounds(-10.0, 10.0),
    );
    assert_eq!(status, AdasStatus::Undefined);
    assert_eq!(status.severity(), StatusSeverity::Error);
}

#[test]
fn si_checks_quantity_before_rate() {
    let eq = SiEquilibrium {
        rate: 40.0,
        saving_investment: 40.0,
        net_exports: None,
        world_solution: None,
    };
    assert_eq!(
        classify_si(&eq, bounds(0.0, 12.0), bounds(0.0, 10.0)),
        SiStatus::SiOutOfBounds
    );

    let eq = SiEquilibrium {
        saving_investment: 5.0,
        ..eq
    };
    assert_eq!(
        classify_si(&eq, bounds(0.0, 12.0), bounds(0.0, 10.0)),
        SiStatus::ROutOfBounds
    );
}

#[test]
fn cumulative_stages_check_y_before_x() {
    let chain = ChainEquilibrium {
        rate: 2.0,
        mp_inflation: Some(0.0),
        output: 30.0,
        inflation: 30.0,
        unemployment: 4.0,
        okun_output: 10.0,
    };
    let x = bounds(0.0, 10.0);
    let y = bounds(0.0, 10.0);

    assert_eq!(
        classify_stage(CumulativeStage::InvestmentSaving, &chain, x, y),
        CumulativeStatus::OutputOutOfBounds
    );
    assert_eq!(
        classify_stage(CumulativeStage::AggregateDemand, &chain, x, y),
        CumulativeStatus::InflationOutOfBounds
    );
    assert_eq!(
        classify_stage(CumulativeStage::Okun, &chain, x, y),
        CumulativeStatus::NoError
    );
}

#[test]
fn mp_stage_reports_rate_before_missing_inflation() {
    let chain = ChainEquilibrium {
        rate: 20.0,
        mp_inflation: None,
        output: 1.0,
        inflation: 1.0,
        unemployment: 1.0,
        okun_output: 1.0,
    };
    let x = bounds(0.0, 10.0);
    let y = bounds(0.0, 10.0);
    assert_eq!(
        classify_stage(CumulativeStage::MonetaryPolicy, &chain, x, y),
        CumulativeStatus::ROutOfBounds
    );

    let chain = ChainEquilibrium { rate: 5.0, ..chain };
    assert_eq!(
        classify_stage(CumulativeStage::MonetaryPolicy, &chain, x, y),
        CumulativeStatus::Undefined
    );
}
