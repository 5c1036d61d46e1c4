//! Solow growth model in per-worker terms.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

const MODEL: &str = "solow";

pub const KEY_SAVING_RATE: &str = "s";
pub const KEY_PRODUCTIVITY: &str = "A";
pub const KEY_ELASTICITY: &str = "b";
pub const KEY_DEPRECIATION: &str = "delta";
pub const KEY_POPULATION_GROWTH: &str = "n";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolowParams {
    /// Saving rate `s`.
    pub saving_rate: f64,
    /// Total factor productivity `A`.
    pub productivity: f64,
    /// Output elasticity of capital `b`.
    pub elasticity: f64,
    /// Depreciation rate `δ`.
    pub depreciation: f64,
    /// Population growth rate `n`.
    pub population_growth: f64,
}

impl Default for SolowParams {
    fn default() -> Self {
        Self {
            saving_rate: 0.5,
            productivity: 1.5,
            elasticity: 0.5,
            depreciation: 0.3,
            population_growth: 0.3,
        }
    }
}

/// Steady state `(k*, y*, i*)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolowEquilibrium {
    pub capital: f64,
    pub output: f64,
    pub investment: f64,
}

impl SolowParams {
    pub fn with_parameter(self, key: &str, value: f64) -> GraphResult<Self> {
        let mut next = self;
        match key {
            KEY_SAVING_RATE => next.saving_rate = value,
            KEY_PRODUCTIVITY => next.productivity = value,
            KEY_ELASTICITY => next.elasticity = value,
            KEY_DEPRECIATION => next.depreciation = value,
            KEY_POPULATION_GROWTH => next.population_growth = value,
            other => return Err(GraphError::UnknownParameter(other.to_owned())),
        }
        Ok(next)
    }

    /// `y = A·k^b`
    #[must_use]
    pub fn output(&self, capital: f64) -> f64 {
        self.productivity * capital.powf(self.elasticity)
    }

    /// `i = s·A·k^b`
    #[must_use]
    pub fn investment(&self, capital: f64) -> f64 {
        self.saving_rate * self.output(capital)
    }

    /// `(δ + n)·k`
    #[must_use]
    pub fn depreciation(&self, capital: f64) -> f64 {
        (self.depreciation + self.population_growth) * capital
    }

    /// Steady-state capital `k* = (sA/(δ+n))^(1/(1-b))`.
    ///
    /// Fails when `b >= 1` (no finite exponent) or `δ + n <= 0`.
    pub fn equilibrium_capital(&self) -> GraphResult<f64> {
        let inputs = [
            self.saving_rate,
            self.productivity,
            self.elasticity,
            self.depreciation,
            self.population_growth,
        ];
        if inputs.iter().any(|value| !value.is_finite()) {
            return Err(GraphError::domain(MODEL, "parameters must be finite"));
        }
        if self.elasticity >= 1.0 {
            return Err(GraphError::domain(
                MODEL,
                format!("capital elasticity b={} must be < 1", self.elasticity),
            ));
        }
        let dilution = self.depreciation + self.population_growth;
        if dilution <= 0.0 {
            return Err(GraphError::domain(
                MODEL,
                format!("depreciation plus population growth ({dilution}) must be > 0"),
            ));
        }

        let base = self.saving_rate * self.productivity / dilution;
        if base < 0.0 {
            return Err(GraphError::domain(
                MODEL,
                "saving rate and productivity must be non-negative",
            ));
        }
        Ok(base.powf(1.0 / (1.0 - self.elasticity)))
    }

    pub fn equilibrium(&self) -> GraphResult<SolowEquilibrium> {
        let capital = self.equilibrium_capital()?;
        Ok(SolowEquilibrium {
            capital,
            output: self.output(capital),
            investment: self.investment(capital),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SolowParams;
    use crate::error::GraphError;

    #[test]
    fn default_steady_state_matches_closed_form() {
        let eq = SolowParams::default().equilibrium().expect("equilibrium");
        assert!((eq.capital - 1.5625).abs() < 1e-12);
        assert!((eq.output - 1.875).abs() < 1e-12);
        assert!((eq.investment - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn unit_elasticity_is_a_domain_error() {
        let params = SolowParams {
            elasticity: 1.0,
            ..SolowParams::default()
        };
        assert!(matches!(params.equilibrium(), Err(GraphError::Domain { .. })));
    }

    #[test]
    fn zero_dilution_is_a_domain_error() {
        let params = SolowParams {
            depreciation: 0.0,
            population_growth: 0.0,
            ..SolowParams::default()
        };
        assert!(matches!(params.equilibrium(), Err(GraphError::Domain { .. })));
    }

    #[test]
    fn zero_saving_rate_collapses_to_origin() {
        let params = SolowParams {
            saving_rate: 0.0,
            ..SolowParams::default()
        };
        let eq = params.equilibrium().expect("equilibrium");
        assert_eq!(eq.capital, 0.0);
        assert_eq!(eq.output, 0.0);
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let err = SolowParams::default()
            .with_parameter("gamma", 1.0)
            .expect_err("unknown key");
        assert!(matches!(err, GraphError::UnknownParameter(_)));
    }
}
