//! Deterministic stepping for the AD/AS policy-response demo.
//!
//! The host drives [`DemoAnimation::advance`] on a fixed cadence
//! ([`DemoConfig::tick_interval_ms`]); each call moves exactly one curve
//! offset and reports whether the economy reached its target.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::models::{AdasParams, EQUILIBRIUM_EPSILON, PolicyResponse};

/// Tuning for demo stepping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Cadence the host should call `advance` at.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Smallest offset change per tick.
    #[serde(default = "default_min_step")]
    pub min_step: f64,
    /// Offset change is `distance / step_divisor`, floored at `min_step`.
    #[serde(default = "default_step_divisor")]
    pub step_divisor: f64,
    /// Demo ends once `|tracker - target|` is at or below this value.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,
    /// Slider input during a running demo cancels it instead of being ignored.
    #[serde(default)]
    pub cancel_on_input: bool,
}

fn default_tick_interval_ms() -> u64 {
    20
}

fn default_min_step() -> f64 {
    0.0005
}

fn default_step_divisor() -> f64 {
    10.0
}

fn default_epsilon() -> f64 {
    EQUILIBRIUM_EPSILON
}

fn default_max_ticks() -> usize {
    5_000
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            min_step: default_min_step(),
            step_divisor: default_step_divisor(),
            epsilon: default_epsilon(),
            max_ticks: default_max_ticks(),
            cancel_on_input: false,
        }
    }
}

impl DemoConfig {
    pub fn validate(self) -> GraphResult<Self> {
        if self.tick_interval_ms == 0 {
            return Err(GraphError::InvalidData(
                "demo tick interval must be > 0 ms".to_owned(),
            ));
        }
        if !self.min_step.is_finite() || self.min_step <= 0.0 {
            return Err(GraphError::InvalidData(
                "demo min step must be finite and > 0".to_owned(),
            ));
        }
        if !self.step_divisor.is_finite() || self.step_divisor < 1.0 {
            return Err(GraphError::InvalidData(
                "demo step divisor must be finite and >= 1".to_owned(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(GraphError::InvalidData(
                "demo epsilon must be finite and > 0".to_owned(),
            ));
        }
        if self.max_ticks == 0 {
            return Err(GraphError::InvalidData(
                "demo max ticks must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Outcome of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DemoProgress {
    /// One offset moved; `distance` is measured after the move.
    Running { tracker: f64, distance: f64 },
    /// Target reached before this tick; parameters were left untouched.
    Finished { ticks: usize },
}

/// A running policy-response demo.
///
/// The direction is fixed when the demo starts: with no policy, SRAS drifts
/// against the output gap; with a policy, AD is shifted towards the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoAnimation {
    config: DemoConfig,
    policy: PolicyResponse,
    target: f64,
    sign: f64,
    ticks: usize,
}

impl DemoAnimation {
    pub fn start(
        params: &AdasParams,
        policy: PolicyResponse,
        config: DemoConfig,
    ) -> GraphResult<Self> {
        let config = config.validate()?;
        let tracker = Self::tracker_for(policy, params)?;
        let target = Self::target_for(policy, params);

        let mut sign = if tracker > target { 1.0 } else { -1.0 };
        if policy != PolicyResponse::NoPolicy {
            sign = -sign;
        }

        debug!(?policy, tracker, target, sign, "policy demo started");
        Ok(Self {
            config,
            policy,
            target,
            sign,
            ticks: 0,
        })
    }

    /// Value the demo drives towards its target: `π*` for the inflation
    /// policy, `Y*` otherwise.
    fn tracker_for(policy: PolicyResponse, params: &AdasParams) -> GraphResult<f64> {
        let equilibrium = params.equilibrium()?;
        Ok(match policy {
            PolicyResponse::StabilizeInflation => equilibrium.inflation,
            PolicyResponse::NoPolicy | PolicyResponse::StabilizeOutput => equilibrium.output,
        })
    }

    fn target_for(policy: PolicyResponse, params: &AdasParams) -> f64 {
        match policy {
            PolicyResponse::StabilizeInflation => params.policy_target,
            PolicyResponse::NoPolicy | PolicyResponse::StabilizeOutput => {
                params.effective_potential_output()
            }
        }
    }

    /// Runs one tick. Termination is checked before stepping, so a demo
    /// started at its target finishes without moving anything.
    pub fn advance(&mut self, params: AdasParams) -> GraphResult<(AdasParams, DemoProgress)> {
        let tracker = Self::tracker_for(self.policy, &params)?;
        let distance = (tracker - self.target).abs();
        if distance <= self.config.epsilon {
            debug!(ticks = self.ticks, tracker, "policy demo finished");
            return Ok((params, DemoProgress::Finished { ticks: self.ticks }));
        }
        if self.ticks >= self.config.max_ticks || !distance.is_finite() {
            return Err(GraphError::NonConvergence {
                iterations: self.ticks,
                residual: distance,
                last_value: tracker,
            });
        }

        let step = (distance / self.config.step_divisor).max(self.config.min_step);
        let mut next = params;
        match self.policy {
            PolicyResponse::NoPolicy => next.sras_offset += self.sign * step,
            PolicyResponse::StabilizeInflation | PolicyResponse::StabilizeOutput => {
                next.ad_offset += self.sign * step;
            }
        }
        self.ticks += 1;

        let tracker = Self::tracker_for(self.policy, &next)?;
        let distance = (tracker - self.target).abs();
        trace!(ticks = self.ticks, step, tracker, distance, "policy demo tick");
        Ok((next, DemoProgress::Running { tracker, distance }))
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoAnimation, DemoConfig, DemoProgress};
    use crate::models::{AdasParams, PolicyResponse};

    #[test]
    fn demo_at_target_finishes_immediately() {
        let params = AdasParams::default();
        let mut demo =
            DemoAnimation::start(&params, PolicyResponse::StabilizeOutput, DemoConfig::default())
                .expect("start");
        let (next, progress) = demo.advance(params).expect("advance");
        assert_eq!(next, params);
        assert_eq!(progress, DemoProgress::Finished { ticks: 0 });
    }

    #[test]
    fn no_policy_moves_only_sras() {
        let params = AdasParams {
            ad_offset: 2.0,
            ..AdasParams::default()
        };
        let mut demo =
            DemoAnimation::start(&params, PolicyResponse::NoPolicy, DemoConfig::default())
                .expect("start");
        let (next, _) = demo.advance(params).expect("advance");
        assert_eq!(next.ad_offset, 2.0);
        assert!(next.sras_offset > 0.0);
    }

    #[test]
    fn zero_tick_cap_is_rejected() {
        let config = DemoConfig {
            max_ticks: 0,
            ..DemoConfig::default()
        };
        let start = DemoAnimation::start(&AdasParams::default(), PolicyResponse::NoPolicy, config);
        assert!(start.is_err());
    }
}
