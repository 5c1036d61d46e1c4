use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// One labelled parameter control with inclusive bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub key: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub default: f64,
}

impl Slider {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        min: f64,
        max: f64,
        default: f64,
    ) -> GraphResult<Self> {
        let key = key.into();
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(GraphError::InvalidData(format!(
                "slider `{key}` bounds must be finite with min <= max"
            )));
        }
        if !default.is_finite() || !(min..=max).contains(&default) {
            return Err(GraphError::InvalidData(format!(
                "slider `{key}` default {default} is outside [{min}, {max}]"
            )));
        }
        Ok(Self {
            key,
            label: label.into(),
            min,
            max,
            value: default,
            default,
        })
    }

    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Result of feeding one value into a screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderOutcome {
    /// The value (after clamping) was applied and the screen recomputed.
    Applied { value: f64, clamped: bool },
    /// A running demo owns the parameters; the input was dropped.
    Ignored,
    /// A running demo was cancelled, then the value was applied.
    DemoCancelled { value: f64, clamped: bool },
}

impl SliderOutcome {
    #[must_use]
    pub fn applied_value(self) -> Option<f64> {
        match self {
            Self::Applied { value, .. } | Self::DemoCancelled { value, .. } => Some(value),
            Self::Ignored => None,
        }
    }
}

/// Ordered set of sliders keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SliderPanel {
    sliders: IndexMap<String, Slider>,
}

impl SliderPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slider(
        mut self,
        key: &str,
        label: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> GraphResult<Self> {
        let slider = Slider::new(key, label, min, max, default)?;
        self.sliders.insert(slider.key.clone(), slider);
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Slider> {
        self.sliders.get(key)
    }

    pub fn value(&self, key: &str) -> GraphResult<f64> {
        self.sliders
            .get(key)
            .map(|slider| slider.value)
            .ok_or_else(|| GraphError::UnknownParameter(key.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slider> {
        self.sliders.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    /// Clamps `value` into the slider's bounds and stores it.
    ///
    /// Returns the stored value and whether clamping changed it.
    pub fn set(&mut self, key: &str, value: f64) -> GraphResult<(f64, bool)> {
        let slider = self
            .sliders
            .get_mut(key)
            .ok_or_else(|| GraphError::UnknownParameter(key.to_owned()))?;
        if !value.is_finite() {
            return Err(GraphError::InvalidData(format!(
                "slider `{key}` value must be finite"
            )));
        }
        let clamped = slider.clamp(value);
        slider.value = clamped;
        Ok((clamped, clamped != value))
    }

    /// Stores a value computed by the screen itself, bypassing bounds.
    pub(crate) fn sync_value(&mut self, key: &str, value: f64) {
        if let Some(slider) = self.sliders.get_mut(key) {
            slider.value = value;
        }
    }

    pub fn reset(&mut self) {
        for slider in self.sliders.values_mut() {
            slider.value = slider.default;
        }
    }
}
