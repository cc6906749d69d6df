//! Diagram variants and the capabilities that distinguish them.
//!
//! All three widgets share one controller; a variant only decides whether an
//! occluder is laid out and whether hitting the target highlights the
//! container, plus the handle's starting position.

#[cfg(test)]
#[path = "variant_test.rs"]
mod variant_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiagramError;

/// Feature switches for a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Lay out the paper occluder, its target guide, and the target circle.
    pub occluder: bool,
    /// Toggle the container highlight when the reflected ray hits the target.
    pub target_highlight: bool,
}

/// Which lesson diagram to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Plain reflection off the mirror.
    #[default]
    Reflection,
    /// Paper blocks the ray; hitting the apple highlights the diagram.
    Apple,
    /// Same scene with the apple hidden behind the paper; never highlights.
    AppleCovered,
}

impl Variant {
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Reflection => Capabilities { occluder: false, target_highlight: false },
            Self::Apple => Capabilities { occluder: true, target_highlight: true },
            Self::AppleCovered => Capabilities { occluder: true, target_highlight: false },
        }
    }

    /// Initial handle angle in degrees.
    #[must_use]
    pub fn default_start_angle(self) -> f64 {
        match self {
            Self::Reflection => 235.0,
            Self::Apple | Self::AppleCovered => -121.0,
        }
    }

    /// Initial handle distance from the center.
    #[must_use]
    pub fn default_distance(self) -> f64 {
        match self {
            Self::Reflection => 200.0,
            Self::Apple | Self::AppleCovered => 144.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reflection => "reflection",
            Self::Apple => "apple",
            Self::AppleCovered => "apple-covered",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflection" => Ok(Self::Reflection),
            "apple" => Ok(Self::Apple),
            "apple-covered" => Ok(Self::AppleCovered),
            other => Err(DiagramError::UnknownVariant(other.to_owned())),
        }
    }
}
