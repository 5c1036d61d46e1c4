//! Chained short-run models: monetary policy rule → IS → AD → Phillips
//! curve → Okun's law.
//!
//! Each stage is a linear relation with a forward form and an inverse; the
//! chain feeds the policy rate through IS to output, through AD to
//! inflation, through the Phillips curve to unemployment and through Okun's
//! law back to output.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

const MODEL: &str = "cumulative";

pub const KEY_RATE: &str = "r";
pub const KEY_LAMBDA: &str = "lambda";
pub const KEY_AUTONOMOUS_RATE: &str = "r_auto";
pub const KEY_IS_OFFSET: &str = "is_offset";
pub const KEY_POTENTIAL_OUTPUT: &str = "potential_output";
pub const KEY_NATURAL_UNEMPLOYMENT: &str = "natural_unemployment";

/// One chart of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CumulativeStage {
    MonetaryPolicy,
    InvestmentSaving,
    AggregateDemand,
    Phillips,
    Okun,
}

impl CumulativeStage {
    pub const ALL: [Self; 5] = [
        Self::MonetaryPolicy,
        Self::InvestmentSaving,
        Self::AggregateDemand,
        Self::Phillips,
        Self::Okun,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::MonetaryPolicy => "MP Curve",
            Self::InvestmentSaving => "IS Curve",
            Self::AggregateDemand => "AD Curve",
            Self::Phillips => "Phillips Curve",
            Self::Okun => "Okun's Law",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRelation {
    pub slope: f64,
    pub constant: f64,
    pub offset: f64,
}

impl LinearRelation {
    #[must_use]
    pub const fn new(slope: f64, constant: f64) -> Self {
        Self {
            slope,
            constant,
            offset: 0.0,
        }
    }

    #[must_use]
    pub fn evaluate(&self, input: f64) -> f64 {
        self.constant + self.slope * input + self.offset
    }

    pub fn invert(&self, value: f64, relation: &'static str) -> GraphResult<f64> {
        if !self.slope.is_finite() || self.slope == 0.0 {
            return Err(GraphError::domain(
                MODEL,
                format!("{relation} slope is zero, inverse is undefined"),
            ));
        }
        Ok((value - self.constant - self.offset) / self.slope)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeParams {
    /// Policy real interest rate `r`, the chain's input.
    pub rate: f64,
    /// MP responsiveness of `r` to inflation `λ`.
    pub lambda: f64,
    /// Autonomous component of the real rate `r̄`.
    pub autonomous_rate: f64,
    pub is_curve: LinearRelation,
    pub ad_curve: LinearRelation,
    /// Phillips-curve expected inflation `πᵉ`.
    pub expected_inflation: f64,
    /// Natural rate of unemployment `U_n`.
    pub natural_unemployment: f64,
    /// Sensitivity of inflation to the unemployment gap `ω`.
    pub omega: f64,
    /// Price shock `ρ`.
    pub price_shock: f64,
    /// Potential output `Y_P`.
    pub potential_output: f64,
    /// Output lost per point of unemployment above `U_n`.
    pub okun_coefficient: f64,
}

impl Default for CumulativeParams {
    fn default() -> Self {
        Self {
            rate: 2.0,
            lambda: 1.1,
            autonomous_rate: 2.0,
            is_curve: LinearRelation::new(-1.0, 10.0),
            ad_curve: LinearRelation::new(1.0, 0.0),
            expected_inflation: 10.0,
            natural_unemployment: 2.0,
            omega: 0.7,
            price_shock: 0.0,
            potential_output: 16.0,
            okun_coefficient: 2.0,
        }
    }
}

/// Values flowing through the chain for the current policy rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainEquilibrium {
    pub rate: f64,
    /// Inflation implied by the MP rule at `rate`; `None` when `λ = 0`.
    pub mp_inflation: Option<f64>,
    pub output: f64,
    pub inflation: f64,
    pub unemployment: f64,
    /// Output implied by Okun's law at `unemployment`.
    pub okun_output: f64,
}

impl CumulativeParams {
    pub fn with_parameter(self, key: &str, value: f64) -> GraphResult<Self> {
        let mut next = self;
        match key {
            KEY_RATE => next.rate = value,
            KEY_LAMBDA => next.lambda = value,
            KEY_AUTONOMOUS_RATE => next.autonomous_rate = value,
            KEY_IS_OFFSET => next.is_curve.offset = value,
            KEY_POTENTIAL_OUTPUT => next.potential_output = value,
            KEY_NATURAL_UNEMPLOYMENT => next.natural_unemployment = value,
            other => return Err(GraphError::UnknownParameter(other.to_owned())),
        }
        Ok(next)
    }

    /// MP rule `r = r̄ + λπ`.
    #[must_use]
    pub fn mp_rate(&self, inflation: f64) -> f64 {
        self.autonomous_rate + self.lambda * inflation
    }

    /// Inverse MP rule `π = (r − r̄)/λ`.
    pub fn mp_inflation(&self, rate: f64) -> GraphResult<f64> {
        if !self.lambda.is_finite() || self.lambda == 0.0 {
            return Err(GraphError::domain(
                MODEL,
                "MP responsiveness lambda is zero, inflation is undefined",
            ));
        }
        Ok((rate - self.autonomous_rate) / self.lambda)
    }

    #[must_use]
    pub fn is_rate(&self, output: f64) -> f64 {
        self.is_curve.evaluate(output)
    }

    pub fn is_output(&self, rate: f64) -> GraphResult<f64> {
        self.is_curve.invert(rate, "IS")
    }

    #[must_use]
    pub fn ad_inflation(&self, output: f64) -> f64 {
        self.ad_curve.evaluate(output)
    }

    pub fn ad_output(&self, inflation: f64) -> GraphResult<f64> {
        self.ad_curve.invert(inflation, "AD")
    }

    /// Phillips curve `π = πᵉ − ω(U − U_n) + ρ`.
    #[must_use]
    pub fn pc_inflation(&self, unemployment: f64) -> f64 {
        self.expected_inflation - self.omega * (unemployment - self.natural_unemployment)
            + self.price_shock
    }

    /// Inverse Phillips curve `U = U_n + (ρ + πᵉ − π)/ω`.
    pub fn pc_unemployment(&self, inflation: f64) -> GraphResult<f64> {
        if !self.omega.is_finite() || self.omega == 0.0 {
            return Err(GraphError::domain(
                MODEL,
                "Phillips curve sensitivity omega is zero, unemployment is undefined",
            ));
        }
        Ok(self.natural_unemployment
            + (self.price_shock + self.expected_inflation - inflation) / self.omega)
    }

    /// Okun's law `Y = c(U_n − U) + Y_P`.
    #[must_use]
    pub fn okun_output(&self, unemployment: f64) -> f64 {
        self.okun_coefficient * (self.natural_unemployment - unemployment) + self.potential_output
    }

    /// Inverse Okun's law `U = −(Y − Y_P)/c + U_n`.
    pub fn okun_unemployment(&self, output: f64) -> GraphResult<f64> {
        if !self.okun_coefficient.is_finite() || self.okun_coefficient == 0.0 {
            return Err(GraphError::domain(MODEL, "Okun coefficient is zero"));
        }
        Ok(-(output - self.potential_output) / self.okun_coefficient + self.natural_unemployment)
    }

    /// Propagates the policy rate through every stage.
    pub fn solve(&self) -> GraphResult<ChainEquilibrium> {
        let output = self.is_output(self.rate)?;
        let inflation = self.ad_inflation(output);
        let unemployment = self.pc_unemployment(inflation)?;
        Ok(ChainEquilibrium {
            rate: self.rate,
            mp_inflation: self.mp_inflation(self.rate).ok(),
            output,
            inflation,
            unemployment,
            okun_output: self.okun_output(unemployment),
        })
    }
}
