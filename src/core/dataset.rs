use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{GraphError, GraphResult};

/// Which axis the sample domain runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SampleMode {
    /// Sample x, evaluate `y = f(x)`.
    #[default]
    Forward,
    /// Sample y, evaluate `x = f(y)` (`f` is the curve's inverse).
    Swap,
}

/// Evenly spaced sample positions `start + i * step` for `i in 0..count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleDomain {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl SampleDomain {
    #[must_use]
    pub const fn new(start: f64, step: f64, count: usize) -> Self {
        Self { start, step, count }
    }

    pub fn validate(self) -> GraphResult<Self> {
        if !self.start.is_finite() || !self.step.is_finite() || self.step <= 0.0 {
            return Err(GraphError::InvalidData(
                "sample domain start/step must be finite and step > 0".to_owned(),
            ));
        }
        if self.count < 2 {
            return Err(GraphError::InvalidData(
                "sample domain needs at least two samples".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn values(self) -> impl Iterator<Item = f64> {
        (0..self.count).map(move |index| self.start + index as f64 * self.step)
    }

    #[must_use]
    pub fn first(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn last(self) -> f64 {
        self.start + (self.count.saturating_sub(1)) as f64 * self.step
    }
}

/// Ordered samples of one model curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDataset {
    pub label: String,
    pub mode: SampleMode,
    pub points: Vec<DataPoint>,
}

impl CurveDataset {
    /// Evaluates `curve` over every position of `domain`.
    pub fn sample(
        label: impl Into<String>,
        domain: SampleDomain,
        mode: SampleMode,
        curve: impl Fn(f64) -> f64,
    ) -> GraphResult<Self> {
        let domain = domain.validate()?;
        let points = domain
            .values()
            .map(|value| {
                let evaluated = curve(value);
                match mode {
                    SampleMode::Forward => DataPoint::new(value, evaluated),
                    SampleMode::Swap => DataPoint::new(evaluated, value),
                }
            })
            .collect();

        Ok(Self {
            label: label.into(),
            mode,
            points,
        })
    }

    #[must_use]
    pub fn finite_points(&self) -> impl Iterator<Item = DataPoint> + '_ {
        self.points.iter().copied().filter(|point| point.is_finite())
    }
}

pub(crate) fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

#[cfg(test)]
mod tests {
    use super::{CurveDataset, SampleDomain, SampleMode, extent};
    use crate::core::DataPoint;

    #[test]
    fn forward_mode_samples_x() {
        let domain = SampleDomain::new(0.0, 5.0, 2);
        let set = CurveDataset::sample("double", domain, SampleMode::Forward, |x| 2.0 * x)
            .expect("sample");
        assert_eq!(set.points, vec![DataPoint::new(0.0, 0.0), DataPoint::new(5.0, 10.0)]);
    }

    #[test]
    fn swap_mode_samples_y() {
        let domain = SampleDomain::new(0.0, 10.0, 2);
        let set = CurveDataset::sample("inverse", domain, SampleMode::Swap, |y| y + 1.0)
            .expect("sample");
        assert_eq!(set.points, vec![DataPoint::new(1.0, 0.0), DataPoint::new(11.0, 10.0)]);
    }

    #[test]
    fn extents_skip_non_finite_points() {
        let domain = SampleDomain::new(0.0, 1.0, 3);
        let set = CurveDataset::sample("pole", domain, SampleMode::Forward, |x| 1.0 / x)
            .expect("sample");
        assert_eq!(set.finite_points().count(), 2);
        assert_eq!(extent(set.finite_points().map(|point| point.y)), Some((0.5, 1.0)));
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        let flat = SampleDomain::new(0.0, 0.0, 2);
        let single = SampleDomain::new(0.0, 1.0, 1);
        assert!(CurveDataset::sample("bad", flat, SampleMode::Forward, |x| x).is_err());
        assert!(CurveDataset::sample("bad", single, SampleMode::Forward, |x| x).is_err());
    }
}
