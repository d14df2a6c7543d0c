//! Conversion configuration
//!
//! One immutable value passed into the grouper, the staff converter and the
//! MEI emitter. Loadable from YAML or JSON; every field has a default so a
//! partial file (or `{}`) is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ConversionError, InvalidThresholdError, Result};

/// MEI version written to `mei/@meiversion`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MeiVersion {
    #[default]
    #[serde(rename = "4.0.0")]
    V4,
    #[serde(rename = "5.0")]
    V5,
}

impl MeiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            MeiVersion::V4 => "4.0.0",
            MeiVersion::V5 => "5.0",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConversionConfig {
    /// Distance threshold for syllable grouping, as a fraction of the mean glyph width on the staff
    pub max_pixel_gap_fraction: f64,

    /// Largest number of glyphs a distance merge may produce
    pub max_group_size: usize,

    pub target_format_version: MeiVersion,

    /// Rotate the diatonic cycle to start at the staff's clef letter
    pub clef_relative_scale: bool,

    /// Abort a staff on the first unreadable glyph name instead of skipping it
    pub strict: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_pixel_gap_fraction: 0.5,
            max_group_size: 8,
            target_format_version: MeiVersion::V4,
            clef_relative_scale: false,
            strict: false,
        }
    }
}

impl ConversionConfig {
    /// Check threshold ranges
    pub fn validate(&self) -> std::result::Result<(), InvalidThresholdError> {
        if self.max_group_size < 1 {
            return Err(InvalidThresholdError::MaxGroupSize(self.max_group_size));
        }
        if !self.max_pixel_gap_fraction.is_finite() || self.max_pixel_gap_fraction < 0.0 {
            return Err(InvalidThresholdError::PixelGapFraction(self.max_pixel_gap_fraction));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ConversionConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConversionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ConversionConfig =
            serde_json::from_str(json).map_err(|e| ConversionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or YAML for any other extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConversionError::Config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }
}
