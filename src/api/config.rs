use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{GraphError, GraphResult};
use crate::interaction::DemoConfig;
use crate::models::WorldRateSettings;
use crate::render::Shadow;

/// Host-level configuration shared by every screen.
///
/// Serializable so hosts can persist a setup; every field has a default, so
/// `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrapherConfig {
    #[serde(default)]
    pub viewport: Viewport,
    /// Draws annotation strokes with a drop shadow.
    #[serde(default = "default_shadow_enabled")]
    pub shadow_enabled: bool,
    #[serde(default)]
    pub shadow: Shadow,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub world_rate: WorldRateSettings,
}

fn default_shadow_enabled() -> bool {
    true
}

impl Default for GrapherConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            shadow_enabled: default_shadow_enabled(),
            shadow: Shadow::default(),
            demo: DemoConfig::default(),
            world_rate: WorldRateSettings::default(),
        }
    }
}

impl GrapherConfig {
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_shadow_enabled(mut self, enabled: bool) -> Self {
        self.shadow_enabled = enabled;
        self
    }

    /// Shadow applied to annotations, if enabled.
    #[must_use]
    pub fn annotation_shadow(&self) -> Option<Shadow> {
        self.shadow_enabled.then_some(self.shadow)
    }

    pub fn validate(self) -> GraphResult<Self> {
        if !self.viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.shadow.validate()?;
        self.demo.validate()?;
        self.world_rate.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> GraphResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| GraphError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}
