//! Closed-form and iterative equilibrium formulas for every model.
//!
//! Parameter structs are `Copy` values: a slider change produces a new value
//! through `with_parameter`, never an in-place edit shared with a chart.

pub mod adas;
pub mod cumulative;
pub mod saving_investment;
pub mod solow;
pub mod world_rate;

pub use adas::{AdasEquilibrium, AdasParams, EQUILIBRIUM_EPSILON, PolicyResponse};
pub use cumulative::{ChainEquilibrium, CumulativeParams, CumulativeStage, LinearRelation};
pub use saving_investment::{
    EconomyType, EconomyVars, NetExports, SavingInvestmentCurves, SiEquilibrium, SiParams,
};
pub use solow::{SolowEquilibrium, SolowParams};
pub use world_rate::{
    WorldRateSettings, WorldRateSolution, gap_difference, solve_world_rate, solve_world_rate_from,
};
