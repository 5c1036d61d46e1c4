//! Desired saving and investment as functions of the real interest rate.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::models::world_rate::{WorldRateSettings, WorldRateSolution, solve_world_rate};

pub const KEY_SAVING_OFFSET: &str = "saving_offset";
pub const KEY_INVESTMENT_OFFSET: &str = "investment_offset";
pub const KEY_WORLD_RATE: &str = "world_rate";
pub const KEY_WORLD_OFFSET: &str = "world_offset";

pub const DEFAULT_WORLD_RATE: f64 = 2.0;

/// Saving and investment schedules of one economy.
pub trait SavingInvestmentCurves {
    fn saving(&self, rate: f64) -> f64;
    fn investment(&self, rate: f64) -> f64;

    /// Signed excess of saving over investment at `rate`.
    fn saving_gap(&self, rate: f64) -> f64 {
        self.saving(rate) - self.investment(rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomyVars {
    /// Aggregate output `Y`.
    pub output: f64,
    pub autonomous_consumption: f64,
    pub government_spending: f64,
    /// Net taxes `T`.
    pub taxes: f64,
    pub autonomous_investment: f64,
    pub saving_offset: f64,
    pub investment_offset: f64,
}

impl Default for EconomyVars {
    fn default() -> Self {
        Self {
            output: 9.0,
            autonomous_consumption: 8.0,
            government_spending: 6.0,
            taxes: 3.0,
            autonomous_investment: 10.0,
            saving_offset: 0.0,
            investment_offset: 0.0,
        }
    }
}

impl SavingInvestmentCurves for EconomyVars {
    /// `S = (Y − C) + (Y − T) + r − G + savingOffset`
    fn saving(&self, rate: f64) -> f64 {
        (self.output - self.autonomous_consumption) + (self.output - self.taxes) + rate
            - self.government_spending
            + self.saving_offset
    }

    /// `I = I_auto − r + investmentOffset`
    fn investment(&self, rate: f64) -> f64 {
        self.autonomous_investment - rate + self.investment_offset
    }
}

impl EconomyVars {
    /// Closed-economy rate where saving equals investment.
    #[must_use]
    pub fn equilibrium_rate(&self) -> f64 {
        (self.autonomous_investment + self.government_spending - 2.0 * self.output
            + self.autonomous_consumption
            + self.taxes
            + self.investment_offset
            - self.saving_offset)
            / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EconomyType {
    #[default]
    Closed,
    SmallOpen,
    LargeOpen,
}

impl EconomyType {
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiParams {
    pub domestic: EconomyVars,
    pub world: EconomyVars,
    /// World real interest rate `r_w`; an input for small open economies.
    pub world_rate: f64,
    pub economy: EconomyType,
}

impl Default for SiParams {
    fn default() -> Self {
        Self {
            domestic: EconomyVars::default(),
            world: EconomyVars::default(),
            world_rate: DEFAULT_WORLD_RATE,
            economy: EconomyType::Closed,
        }
    }
}

/// Position of the economy relative to the world rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetExports {
    pub world_rate: f64,
    pub saving: f64,
    pub investment: f64,
}

impl NetExports {
    /// `NX = S(r_w) − I(r_w)`
    #[must_use]
    pub fn value(&self) -> f64 {
        self.saving - self.investment
    }

    #[must_use]
    pub fn is_surplus(&self) -> bool {
        self.value() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiEquilibrium {
    /// Domestic closed-economy rate `r*`.
    pub rate: f64,
    /// `S* = I*` at `r*`.
    pub saving_investment: f64,
    /// Present for open economies.
    pub net_exports: Option<NetExports>,
    /// Solver trace for the large open economy.
    pub world_solution: Option<WorldRateSolution>,
}

impl SiParams {
    pub fn with_parameter(self, key: &str, value: f64) -> GraphResult<Self> {
        let mut next = self;
        match key {
            KEY_SAVING_OFFSET => next.domestic.saving_offset = value,
            KEY_INVESTMENT_OFFSET => next.domestic.investment_offset = value,
            KEY_WORLD_RATE => next.world_rate = value,
            KEY_WORLD_OFFSET => {
                next.world.investment_offset = value;
                next.world.saving_offset = -value;
            }
            other => return Err(GraphError::UnknownParameter(other.to_owned())),
        }
        Ok(next)
    }

    /// Switches economy type, restoring the default world rate and world shock.
    #[must_use]
    pub fn with_economy(self, economy: EconomyType) -> Self {
        Self {
            economy,
            world_rate: DEFAULT_WORLD_RATE,
            world: EconomyVars {
                saving_offset: 0.0,
                investment_offset: 0.0,
                ..self.world
            },
            ..self
        }
    }

    /// Resolves `r*`, `S* = I*` and, for open economies, the world rate and
    /// net exports. The large-open-economy rate is solved iteratively.
    pub fn equilibrium(&self, settings: WorldRateSettings) -> GraphResult<SiEquilibrium> {
        let rate = self.domestic.equilibrium_rate();
        let saving_investment = self.domestic.investment(rate);

        let world_solution = match self.economy {
            EconomyType::LargeOpen => {
                Some(solve_world_rate(&self.domestic, &self.world, settings)?)
            }
            EconomyType::Closed | EconomyType::SmallOpen => None,
        };
        let world_rate = world_solution.map_or(self.world_rate, |solution| solution.rate);

        let net_exports = self.economy.is_open().then(|| NetExports {
            world_rate,
            saving: self.domestic.saving(world_rate),
            investment: self.domestic.investment(world_rate),
        });

        Ok(SiEquilibrium {
            rate,
            saving_investment,
            net_exports,
            world_solution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{EconomyType, EconomyVars, SavingInvestmentCurves, SiParams};
    use crate::models::world_rate::WorldRateSettings;

    #[test]
    fn default_closed_economy_clears_at_four_and_a_half() {
        let vars = EconomyVars::default();
        let rate = vars.equilibrium_rate();
        assert!((rate - 4.5).abs() < 1e-12);
        assert!((vars.saving(rate) - vars.investment(rate)).abs() < 1e-12);
        assert!((vars.investment(rate) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn world_offset_moves_both_world_curves() {
        let params = SiParams::default()
            .with_parameter(super::KEY_WORLD_OFFSET, 2.0)
            .expect("world offset");
        assert_eq!(params.world.investment_offset, 2.0);
        assert_eq!(params.world.saving_offset, -2.0);
        assert!((params.world.equilibrium_rate() - 6.5).abs() < 1e-12);
    }

    #[test]
    fn small_open_economy_runs_surplus_above_domestic_rate() {
        let params = SiParams {
            world_rate: 6.0,
            ..SiParams::default().with_economy(EconomyType::SmallOpen)
        };
        let eq = params.equilibrium(WorldRateSettings::default()).expect("equilibrium");
        let nx = eq.net_exports.expect("open economy has net exports");
        assert!(nx.is_surplus());
        assert!((nx.value() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn closed_economy_has_no_net_exports() {
        let eq = SiParams::default()
            .equilibrium(WorldRateSettings::default())
            .expect("equilibrium");
        assert!(eq.net_exports.is_none());
        assert!(eq.world_solution.is_none());
    }
}
