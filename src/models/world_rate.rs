//! Large-open-economy world interest rate search.
//!
//! The world rate is the `r` at which the domestic saving-investment gap and
//! the rest-of-world gap have equal size. Both schedules carry independent
//! offsets, so the rate is found by a damped, direction-reversing walk
//! starting from the domestic closed-economy rate.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::models::saving_investment::SavingInvestmentCurves;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldRateSettings {
    /// Stop once the gap difference is at or below this value.
    pub tolerance: f64,
    /// Floor for the step before damping. Once an overshoot has halved the
    /// damping factor, steps go below this floor; a fixed floor can bounce
    /// around a steep root without ever landing inside `tolerance`.
    pub min_step: f64,
    /// Step is `difference / step_divisor`, floored at `min_step`.
    pub step_divisor: f64,
    pub max_iterations: usize,
}

impl Default for WorldRateSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.005,
            min_step: 0.0025,
            step_divisor: 10.0,
            max_iterations: 10_000,
        }
    }
}

impl WorldRateSettings {
    pub fn validate(self) -> GraphResult<Self> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(GraphError::InvalidData(
                "world rate tolerance must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_step.is_finite() || self.min_step <= 0.0 {
            return Err(GraphError::InvalidData(
                "world rate min step must be finite and > 0".to_owned(),
            ));
        }
        if !self.step_divisor.is_finite() || self.step_divisor < 1.0 {
            return Err(GraphError::InvalidData(
                "world rate step divisor must be finite and >= 1".to_owned(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(GraphError::InvalidData(
                "world rate max iterations must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRateSolution {
    pub rate: f64,
    /// Final `| |S_d − I_d| − |S_w − I_w| |`.
    pub residual: f64,
    pub iterations: usize,
}

/// Difference in size between the domestic and world saving gaps at `rate`.
pub fn gap_difference(
    domestic: &impl SavingInvestmentCurves,
    world: &impl SavingInvestmentCurves,
    rate: f64,
) -> f64 {
    (domestic.saving_gap(rate).abs() - world.saving_gap(rate).abs()).abs()
}

/// Walks from `domestic_rate` towards `world_closed_rate` until the two
/// saving gaps match within tolerance.
///
/// Each step is `max(min_step, difference / step_divisor)`, scaled by a
/// shrink factor that halves whenever a step overshoots and the direction
/// reverses. Exhausting `max_iterations` yields
/// [`GraphError::NonConvergence`].
pub fn solve_world_rate_from(
    domestic: &impl SavingInvestmentCurves,
    world: &impl SavingInvestmentCurves,
    domestic_rate: f64,
    world_closed_rate: f64,
    settings: WorldRateSettings,
) -> GraphResult<WorldRateSolution> {
    let settings = settings.validate()?;
    if !domestic_rate.is_finite() || !world_closed_rate.is_finite() {
        return Err(GraphError::InvalidData(
            "world rate search needs finite starting rates".to_owned(),
        ));
    }

    let mut rate = domestic_rate;
    let mut residual = gap_difference(domestic, world, rate);
    let mut sign = if world_closed_rate < domestic_rate { -1.0 } else { 1.0 };
    let mut shrink = 1.0;
    let mut iterations = 0usize;

    while residual > settings.tolerance {
        if iterations >= settings.max_iterations || !residual.is_finite() {
            return Err(GraphError::NonConvergence {
                iterations,
                residual,
                last_value: rate,
            });
        }

        let step = (residual / settings.step_divisor).max(settings.min_step) * shrink;
        let next_rate = rate + sign * step;
        let next_residual = gap_difference(domestic, world, next_rate);
        if next_residual > residual {
            sign = -sign;
            shrink *= 0.5;
        }

        rate = next_rate;
        residual = next_residual;
        iterations += 1;
        trace!(iterations, rate, residual, "world rate step");
    }

    debug!(rate, residual, iterations, "world rate converged");
    Ok(WorldRateSolution {
        rate,
        residual,
        iterations,
    })
}

/// Convenience wrapper for the linear schedules of [`EconomyVars`].
///
/// [`EconomyVars`]: crate::models::saving_investment::EconomyVars
pub fn solve_world_rate(
    domestic: &crate::models::saving_investment::EconomyVars,
    world: &crate::models::saving_investment::EconomyVars,
    settings: WorldRateSettings,
) -> GraphResult<WorldRateSolution> {
    solve_world_rate_from(
        domestic,
        world,
        domestic.equilibrium_rate(),
        world.equilibrium_rate(),
        settings,
    )
}
