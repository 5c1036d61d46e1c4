use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{GraphError, GraphResult};

pub const AXIS_MAX_TICKS: usize = 11;
pub const AXIS_X_TARGET_SPACING_PX: f64 = 40.0;
pub const AXIS_Y_TARGET_SPACING_PX: f64 = 18.0;

/// Tick values in the order a surface lists them.
pub type TickValues = SmallVec<[f64; 12]>;

/// Order in which a surface reports its tick values.
///
/// Line-chart y axes and scatter axes list ticks differently; consumers only
/// ever see the normalized [`AxisBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickOrder {
    #[default]
    Ascending,
    Descending,
}

/// Normalized visible range of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn new(a: f64, b: f64) -> GraphResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(GraphError::InvalidData(
                "axis bounds must be finite".to_owned(),
            ));
        }
        Ok(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    /// Builds bounds from the first and last tick, whatever their order.
    pub fn from_ticks(ticks: &[f64]) -> GraphResult<Self> {
        match (ticks.first(), ticks.last()) {
            (Some(first), Some(last)) => Self::new(*first, *last),
            _ => Err(GraphError::InvalidData(
                "axis has no ticks to derive bounds from".to_owned(),
            )),
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Inclusive containment; non-finite values are never inside.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Tick sequence produced by a chart surface for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTicks {
    pub values: TickValues,
    pub order: TickOrder,
}

impl AxisTicks {
    #[must_use]
    pub fn ascending(values: TickValues) -> Self {
        Self {
            values,
            order: TickOrder::Ascending,
        }
    }

    /// Returns the same ticks listed from largest to smallest.
    #[must_use]
    pub fn descending(mut self) -> Self {
        if self.order == TickOrder::Ascending {
            self.values.reverse();
            self.order = TickOrder::Descending;
        }
        self
    }

    pub fn bounds(&self) -> GraphResult<AxisBounds> {
        AxisBounds::from_ticks(&self.values)
    }
}

/// User-configurable limits of one linear axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default = "default_begin_at_zero")]
    pub begin_at_zero: bool,
}

fn default_begin_at_zero() -> bool {
    true
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            begin_at_zero: default_begin_at_zero(),
        }
    }
}

impl AxisOptions {
    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.begin_at_zero = begin_at_zero;
        self
    }
}

pub(crate) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).ceil() as usize;
    raw.clamp(min_ticks, max_ticks)
}

/// Rounds `range` to 1, 2, 5 or 10 times a power of ten.
pub(crate) fn nice_num(range: f64, round: bool) -> f64 {
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }

    let exponent = range.log10().floor();
    let fraction = range / 10f64.powf(exponent);
    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10f64.powf(exponent)
}

fn almost_whole(value: f64, epsilon: f64) -> bool {
    let rounded = value.round();
    rounded - epsilon <= value && rounded + epsilon >= value
}

fn decimal_places(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let mut factor = 1.0;
    let mut places = 0;
    while (value * factor).round() / factor != value && places < 12 {
        factor *= 10.0;
        places += 1;
    }
    places
}

/// Resolves the raw data range after `begin_at_zero` and overrides.
fn resolve_range(data_min: f64, data_max: f64, options: AxisOptions) -> (f64, f64) {
    let (mut min, mut max) = if data_min.is_finite() && data_max.is_finite() {
        (data_min.min(data_max), data_min.max(data_max))
    } else {
        (0.0, 1.0)
    };

    if options.begin_at_zero {
        if min > 0.0 && max > 0.0 {
            min = 0.0;
        } else if min < 0.0 && max < 0.0 {
            max = 0.0;
        }
    }

    if let Some(override_min) = options.min.filter(|value| value.is_finite()) {
        min = override_min;
    }
    if let Some(override_max) = options.max.filter(|value| value.is_finite()) {
        max = override_max;
    }

    if min == max {
        max += 1.0;
        if !options.begin_at_zero {
            min -= 1.0;
        }
    } else if min > max {
        // An override crossed the data range; keep a usable axis.
        std::mem::swap(&mut min, &mut max);
    }

    (min, max)
}

/// Generates evenly spaced "nice" ticks covering the data range.
///
/// The first and last tick honour explicit `min`/`max` overrides; all
/// interior ticks sit on multiples of the chosen spacing.
#[must_use]
pub fn linear_ticks(
    data_min: f64,
    data_max: f64,
    options: AxisOptions,
    max_ticks: usize,
) -> TickValues {
    let (min, max) = resolve_range(data_min, data_max, options);
    let max_ticks = max_ticks.max(2);

    let spacing = nice_num(nice_num(max - min, false) / ((max_ticks - 1) as f64), true);
    if spacing <= f64::EPSILON {
        return SmallVec::from_slice(&[min, max]);
    }

    let nice_min = (min / spacing).floor() * spacing;
    let nice_max = (max / spacing).ceil() * spacing;
    let raw_spaces = (nice_max - nice_min) / spacing;
    let spaces = if almost_whole(raw_spaces, spacing / 1000.0) {
        raw_spaces.round()
    } else {
        raw_spaces.ceil()
    } as usize;

    let factor = 10f64.powi(decimal_places(spacing));
    let first = options.min.filter(|value| value.is_finite()).unwrap_or(nice_min);
    let last = options.max.filter(|value| value.is_finite()).unwrap_or(nice_max);

    let mut ticks = TickValues::new();
    ticks.push(first);
    for index in 1..spaces {
        let value = ((nice_min + index as f64 * spacing) * factor).round() / factor;
        if value > first && value < last {
            ticks.push(value);
        }
    }
    ticks.push(last);
    ticks
}

/// Category ticks: one per sample label, in sample order.
#[must_use]
pub fn category_ticks(labels: &[f64]) -> TickValues {
    labels.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::{AxisBounds, AxisOptions, AxisTicks, linear_ticks, nice_num};
    use smallvec::smallvec;

    #[test]
    fn nice_num_snaps_to_one_two_five_ten() {
        assert_eq!(nice_num(0.9, true), 1.0);
        assert_eq!(nice_num(2.4, true), 2.0);
        assert_eq!(nice_num(42.0, true), 50.0);
        assert_eq!(nice_num(11.0, false), 20.0);
    }

    #[test]
    fn linear_ticks_cover_data_and_start_at_zero() {
        let ticks = linear_ticks(0.0, 11.0, AxisOptions::default(), 11);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert!(ticks.last().copied().expect("last") >= 11.0);
        for pair in ticks.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn linear_ticks_honour_min_override() {
        let options = AxisOptions::default().with_min(-10.0);
        let ticks = linear_ticks(-3.0, 7.0, options, 11);
        assert_eq!(ticks.first().copied(), Some(-10.0));
        assert!(ticks.last().copied().expect("last") >= 7.0);
    }

    #[test]
    fn flat_data_still_produces_a_range() {
        let ticks = linear_ticks(4.0, 4.0, AxisOptions::default().with_begin_at_zero(false), 11);
        let bounds = AxisBounds::from_ticks(&ticks).expect("bounds");
        assert!(bounds.min < 4.0 && bounds.max > 4.0);
    }

    #[test]
    fn descending_ticks_normalize_to_same_bounds() {
        let ascending = AxisTicks::ascending(smallvec![0.0, 5.0, 10.0]);
        let descending = ascending.clone().descending();
        assert_eq!(descending.values.as_slice(), &[10.0, 5.0, 0.0]);
        assert_eq!(
            ascending.bounds().expect("asc"),
            descending.bounds().expect("desc")
        );
    }

    #[test]
    fn non_finite_values_are_never_contained() {
        let bounds = AxisBounds::new(0.0, 10.0).expect("bounds");
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(f64::NAN));
        assert!(!bounds.contains(f64::INFINITY));
    }
}
