//! Classification of equilibria against the visible chart bounds.
//!
//! Every classifier is first-match-wins: checks run in a fixed priority
//! order and only the first failing one is reported. Non-finite values are
//! always out of range.

use serde::{Deserialize, Serialize};

use crate::core::{AxisBounds, SampleDomain};
use crate::models::{
    AdasParams, ChainEquilibrium, CumulativeStage, PolicyResponse, SiEquilibrium, SolowEquilibrium,
};
use crate::render::Color;

/// `#fa4848`
pub const ERROR_COLOR: Color = Color::from_rgb8(0xfa, 0x48, 0x48);
/// `#23db29`
pub const SUCCESS_COLOR: Color = Color::from_rgb8(0x23, 0xdb, 0x29);
/// `#ffd630`
pub const NOTICE_COLOR: Color = Color::from_rgb8(0xff, 0xd6, 0x30);

const UNDEFINED_MESSAGE: &str = "The equilibrium is undefined for these parameters";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusSeverity {
    /// Nothing to show.
    Clear,
    Error,
    Success,
    Notice,
}

impl StatusSeverity {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Clear => None,
            Self::Error => Some(ERROR_COLOR),
            Self::Success => Some(SUCCESS_COLOR),
            Self::Notice => Some(NOTICE_COLOR),
        }
    }
}

/// User-facing diagnostic attached to a chart.
pub trait DisplayStatus: Copy {
    fn message(self) -> &'static str;
    fn severity(self) -> StatusSeverity;

    fn color(self) -> Option<Color> {
        self.severity().color()
    }

    /// `true` when every annotation may be drawn.
    fn is_clear(self) -> bool {
        self.severity() == StatusSeverity::Clear
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolowStatus {
    NoError,
    KOutOfBounds,
    IOutOfBounds,
    YOutOfBounds,
    Undefined,
}

impl DisplayStatus for SolowStatus {
    fn message(self) -> &'static str {
        match self {
            Self::NoError => "",
            Self::KOutOfBounds => "k* is out of range for the graph",
            Self::IOutOfBounds => "i* is out of range for the graph",
            Self::YOutOfBounds => "y* is out of range for the graph",
            Self::Undefined => UNDEFINED_MESSAGE,
        }
    }

    fn severity(self) -> StatusSeverity {
        match self {
            Self::NoError => StatusSeverity::Clear,
            _ => StatusSeverity::Error,
        }
    }
}

/// k* on x, then i* and y* on y.
#[must_use]
pub fn classify_solow(equilibrium: &SolowEquilibrium, x: AxisBounds, y: AxisBounds) -> SolowStatus {
    if !x.contains(equilibrium.capital) {
        SolowStatus::KOutOfBounds
    } else if !y.contains(equilibrium.investment) {
        SolowStatus::IOutOfBounds
    } else if !y.contains(equilibrium.output) {
        SolowStatus::YOutOfBounds
    } else {
        SolowStatus::NoError
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdasStatus {
    NoError,
    OutputOutOfBounds,
    OutputNegative,
    InflationOutOfBounds,
    InflationTargetOutOfBounds,
    AtEquilibrium,
    NoPolicySelected,
    Undefined,
}

impl DisplayStatus for AdasStatus {
    fn message(self) -> &'static str {
        match self {
            Self::NoError => "",
            Self::OutputOutOfBounds => "Y* is out of range for the graph",
            Self::OutputNegative => "Y* is negative",
            Self::InflationOutOfBounds => "\u{03C0}* is out of range for the graph",
            Self::InflationTargetOutOfBounds => "\u{03C0}\u{1D40} is out of range for the graph",
            Self::AtEquilibrium => "The economy is at its long-run equilibrium",
            Self::NoPolicySelected => "Select a policy to continue",
            Self::Undefined => UNDEFINED_MESSAGE,
        }
    }

    fn severity(self) -> StatusSeverity {
        match self {
            Self::NoError => StatusSeverity::Clear,
            Self::AtEquilibrium => StatusSeverity::Success,
            Self::NoPolicySelected => StatusSeverity::Notice,
            _ => StatusSeverity::Error,
        }
    }
}

/// AD/AS classification in priority order: output above the x range,
/// output below it, inflation outside y, unreachable inflation target (only
/// with the inflation policy active), at potential output, no policy chosen.
///
/// `samples` is the output domain the SRAS curve is sampled over; the target
/// must lie between SRAS at its first and last sample.
#[must_use]
pub fn classify_adas(
    params: &AdasParams,
    policy: Option<PolicyResponse>,
    samples: SampleDomain,
    x: AxisBounds,
    y: AxisBounds,
) -> AdasStatus {
    let Ok(equilibrium) = params.equilibrium() else {
        return AdasStatus::Undefined;
    };

    if equilibrium.output.is_nan() || equilibrium.output > x.max {
        return AdasStatus::OutputOutOfBounds;
    }
    if equilibrium.output < x.min {
        return AdasStatus::OutputNegative;
    }
    if !y.contains(equilibrium.inflation) {
        return AdasStatus::InflationOutOfBounds;
    }

    if policy == Some(PolicyResponse::StabilizeInflation) {
        let target = params.policy_target;
        let reachable = params.target_output().is_ok_and(|output| x.contains(output))
            && target >= params.short_run_supply(samples.first())
            && target <= params.short_run_supply(samples.last());
        if !reachable {
            return AdasStatus::InflationTargetOutOfBounds;
        }
    }

    if params.is_at_potential(equilibrium.output) {
        AdasStatus::AtEquilibrium
    } else if policy.is_none() {
        AdasStatus::NoPolicySelected
    } else {
        AdasStatus::NoError
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiStatus {
    NoError,
    SiOutOfBounds,
    ROutOfBounds,
    Undefined,
}

impl DisplayStatus for SiStatus {
    fn message(self) -> &'static str {
        match self {
            Self::NoError => "",
            Self::SiOutOfBounds => "S*, I* is out of range for the graph",
            Self::ROutOfBounds => "r* is out of range for the graph",
            Self::Undefined => UNDEFINED_MESSAGE,
        }
    }

    fn severity(self) -> StatusSeverity {
        match self {
            Self::NoError => StatusSeverity::Clear,
            _ => StatusSeverity::Error,
        }
    }
}

/// `S* = I*` on x, then `r*` on y.
#[must_use]
pub fn classify_si(equilibrium: &SiEquilibrium, x: AxisBounds, y: AxisBounds) -> SiStatus {
    if !x.contains(equilibrium.saving_investment) {
        SiStatus::SiOutOfBounds
    } else if !y.contains(equilibrium.rate) {
        SiStatus::ROutOfBounds
    } else {
        SiStatus::NoError
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CumulativeStatus {
    NoError,
    ROutOfBounds,
    InflationOutOfBounds,
    OutputOutOfBounds,
    UnemploymentOutOfBounds,
    Undefined,
}

impl DisplayStatus for CumulativeStatus {
    fn message(self) -> &'static str {
        match self {
            Self::NoError => "",
            Self::ROutOfBounds => "r is out of range for the graph",
            Self::InflationOutOfBounds => "\u{03C0} is out of range for the graph",
            Self::OutputOutOfBounds => "Y is out of range for the graph",
            Self::UnemploymentOutOfBounds => "U is out of range for the graph",
            Self::Undefined => UNDEFINED_MESSAGE,
        }
    }

    fn severity(self) -> StatusSeverity {
        match self {
            Self::NoError => StatusSeverity::Clear,
            _ => StatusSeverity::Error,
        }
    }
}

/// Classifies one chart of the chain, checking its y value before its x value.
#[must_use]
pub fn classify_stage(
    stage: CumulativeStage,
    chain: &ChainEquilibrium,
    x: AxisBounds,
    y: AxisBounds,
) -> CumulativeStatus {
    use CumulativeStatus::{
        InflationOutOfBounds, NoError, OutputOutOfBounds, ROutOfBounds, Undefined,
        UnemploymentOutOfBounds,
    };

    let (y_value, y_status, x_value, x_status) = match stage {
        CumulativeStage::MonetaryPolicy => {
            if !y.contains(chain.rate) {
                return ROutOfBounds;
            }
            let Some(inflation) = chain.mp_inflation else {
                return Undefined;
            };
            (chain.rate, ROutOfBounds, inflation, InflationOutOfBounds)
        }
        CumulativeStage::InvestmentSaving => {
            (chain.rate, ROutOfBounds, chain.output, OutputOutOfBounds)
        }
        CumulativeStage::AggregateDemand => {
            (chain.inflation, InflationOutOfBounds, chain.output, OutputOutOfBounds)
        }
        CumulativeStage::Phillips => (
            chain.inflation,
            InflationOutOfBounds,
            chain.unemployment,
            UnemploymentOutOfBounds,
        ),
        CumulativeStage::Okun => (
            chain.okun_output,
            OutputOutOfBounds,
            chain.unemployment,
            UnemploymentOutOfBounds,
        ),
    };

    if !y.contains(y_value) {
        y_status
    } else if !x.contains(x_value) {
        x_status
    } else {
        NoError
    }
}
