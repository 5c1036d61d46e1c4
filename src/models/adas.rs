//! Aggregate demand / aggregate supply model.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

const MODEL: &str = "ad/as";

pub const KEY_AD_OFFSET: &str = "ad_offset";
pub const KEY_SRAS_OFFSET: &str = "sras_offset";
pub const KEY_LRAS_OFFSET: &str = "lras_offset";
pub const KEY_POLICY_TARGET: &str = "policy_target";

/// Tolerance used for "output is at potential" checks.
pub const EQUILIBRIUM_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdasParams {
    /// Sensitivity of inflation to the output gap `γ`.
    pub gamma: f64,
    pub expected_inflation: f64,
    /// Potential output `Y_P`.
    pub potential_output: f64,
    /// Price shock `ρ`.
    pub price_shock: f64,
    pub ad_intercept: f64,
    pub ad_slope: f64,
    pub ad_offset: f64,
    pub sras_offset: f64,
    pub lras_offset: f64,
    /// Inflation target `π_T` used by the inflation-stabilizing policy.
    pub policy_target: f64,
}

pub const DEFAULT_POLICY_TARGET: f64 = 2.0;

impl Default for AdasParams {
    fn default() -> Self {
        Self {
            gamma: 1.5,
            expected_inflation: 2.0,
            potential_output: 2.5,
            price_shock: 0.0,
            ad_intercept: 7.0,
            ad_slope: 2.0,
            ad_offset: 0.0,
            sras_offset: 0.0,
            lras_offset: 0.0,
            policy_target: DEFAULT_POLICY_TARGET,
        }
    }
}

/// Policy response played out by the AD/AS demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyResponse {
    /// Let SRAS drift back until output returns to potential.
    NoPolicy,
    /// Shift AD until `π*` reaches the target.
    StabilizeInflation,
    /// Shift AD until `Y*` reaches potential.
    StabilizeOutput,
}

impl PolicyResponse {
    pub const ALL: [Self; 3] = [Self::NoPolicy, Self::StabilizeInflation, Self::StabilizeOutput];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoPolicy => "No policy",
            Self::StabilizeInflation => "Stabilize inflation",
            Self::StabilizeOutput => "Stabilize output",
        }
    }
}

/// Short-run equilibrium `(Y*, π*)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdasEquilibrium {
    pub output: f64,
    pub inflation: f64,
}

impl AdasParams {
    pub fn with_parameter(self, key: &str, value: f64) -> GraphResult<Self> {
        let mut next = self;
        match key {
            KEY_AD_OFFSET => next.ad_offset = value,
            KEY_SRAS_OFFSET => next.sras_offset = value,
            KEY_LRAS_OFFSET => next.lras_offset = value,
            KEY_POLICY_TARGET => next.policy_target = value,
            other => return Err(GraphError::UnknownParameter(other.to_owned())),
        }
        Ok(next)
    }

    /// `π = ad_1 − ad_2·Y + adOffset`
    #[must_use]
    pub fn aggregate_demand(&self, output: f64) -> f64 {
        self.ad_intercept - self.ad_slope * output + self.ad_offset
    }

    /// `π = πᵉ + γ(Y − Y_P) + ρ + srasOffset`
    #[must_use]
    pub fn short_run_supply(&self, output: f64) -> f64 {
        self.expected_inflation
            + self.gamma * (output - self.potential_output)
            + self.price_shock
            + self.sras_offset
    }

    /// Long-run potential output including the LRAS shift.
    #[must_use]
    pub fn effective_potential_output(&self) -> f64 {
        self.potential_output + self.lras_offset
    }

    pub fn equilibrium_output(&self) -> GraphResult<f64> {
        let denominator = self.ad_slope + self.gamma;
        if !denominator.is_finite() || denominator == 0.0 {
            return Err(GraphError::domain(
                MODEL,
                "AD and SRAS slopes are parallel (ad_2 + gamma = 0)",
            ));
        }
        Ok((self.ad_intercept + self.ad_offset + self.gamma * self.potential_output
            - self.price_shock
            - self.sras_offset
            - self.expected_inflation)
            / denominator)
    }

    pub fn equilibrium(&self) -> GraphResult<AdasEquilibrium> {
        let output = self.equilibrium_output()?;
        Ok(AdasEquilibrium {
            output,
            inflation: self.aggregate_demand(output),
        })
    }

    /// Output at which SRAS delivers the inflation target.
    pub fn target_output(&self) -> GraphResult<f64> {
        if !self.gamma.is_finite() || self.gamma == 0.0 {
            return Err(GraphError::domain(
                MODEL,
                "target output needs a non-zero inflation sensitivity gamma",
            ));
        }
        Ok((self.policy_target + self.gamma * self.potential_output
            - self.price_shock
            - self.sras_offset
            - self.expected_inflation)
            / self.gamma)
    }

    #[must_use]
    pub fn is_at_potential(&self, equilibrium_output: f64) -> bool {
        (equilibrium_output - self.effective_potential_output()).abs() <= EQUILIBRIUM_EPSILON
    }
}
