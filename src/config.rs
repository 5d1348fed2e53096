//! Configuration for box construction and multi-entry indexing.
//!
//! This module also re-exports the box and value types from the `tbox-types`
//! crate for convenience.
use serde::de::Error;
use serde::{Deserialize, Serialize};

pub use tbox_types::bbox::{BoundingBox, BoxKind};
pub use tbox_types::dims::{Dim, Dimensions};
pub use tbox_types::point::GeoPoint;
pub use tbox_types::predicates::{BoxOp, BoxPredicates};
pub use tbox_types::span::Span;
pub use tbox_types::stbox::STBox;
pub use tbox_types::tbox::TBox;
pub use tbox_types::value::{Number, SpanValue, Timestamp};

/// Upper bound accepted for `max_boxes_per_value`.
pub const MAX_BOXES_PER_VALUE: usize = 65_536;

/// How much checking temporal value constructors perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Check timestamp ordering, value domains and sequence overlap.
    #[default]
    Strict,
    /// Skip the linear-time checks for data that was validated when first built.
    Trusted,
}

/// Box and index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cap on the number of boxes a value is decomposed into when indexed;
    /// 0 means one box per segment
    #[serde(default = "Config::default_max_boxes_per_value")]
    pub max_boxes_per_value: usize,

    #[serde(default)]
    pub validation: ValidationMode,
}

impl Config {
    const fn default_max_boxes_per_value() -> usize {
        8
    }

    pub fn with_max_boxes_per_value(mut self, max_boxes: usize) -> Self {
        if max_boxes > 1_024 {
            log::warn!(
                "Decomposing values into up to {} boxes produces as many index entries per value",
                max_boxes
            );
        }
        self.max_boxes_per_value = max_boxes;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_boxes_per_value > MAX_BOXES_PER_VALUE {
            return Err(format!(
                "max_boxes_per_value must be at most {}, got {}",
                MAX_BOXES_PER_VALUE, self.max_boxes_per_value
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_boxes_per_value: Self::default_max_boxes_per_value(),
            validation: ValidationMode::default(),
        }
    }
}
