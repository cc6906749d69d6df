//! Host-supplied configuration for mounting diagrams.
//!
//! The page passes JSON; missing handle overrides fall back to the variant's
//! defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::controller::DiagramState;
use crate::error::DiagramError;
use crate::variant::Variant;

/// One diagram: which container it mounts into and how it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Id of an existing element in the host document.
    pub container: String,
    #[serde(default)]
    pub variant: Variant,
    /// Initial handle angle in degrees.
    #[serde(default)]
    pub start_angle: Option<f64>,
    /// Initial handle distance from the center.
    #[serde(default)]
    pub distance: Option<f64>,
}

impl WidgetConfig {
    #[must_use]
    pub fn new(container: impl Into<String>, variant: Variant) -> Self {
        Self {
            container: container.into(),
            variant,
            start_angle: None,
            distance: None,
        }
    }

    /// Handle state before the first layout.
    #[must_use]
    pub fn initial_state(&self) -> DiagramState {
        DiagramState::new(
            self.start_angle.unwrap_or_else(|| self.variant.default_start_angle()),
            self.distance.unwrap_or_else(|| self.variant.default_distance()),
        )
    }
}

/// Every diagram on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageConfig {
    pub widgets: Vec<WidgetConfig>,
}

impl Default for PageConfig {
    /// The lesson page: one diagram per part.
    fn default() -> Self {
        Self {
            widgets: vec![
                WidgetConfig::new("part-1", Variant::Reflection),
                WidgetConfig::new("part-2", Variant::Apple),
                WidgetConfig::new("part-3", Variant::AppleCovered),
            ],
        }
    }
}

impl PageConfig {
    /// Parse a JSON array of widget configs.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, DiagramError> {
        Ok(serde_json::from_str(json)?)
    }
}
