//! Palette generation parameters.
//!
//! Everything that shapes the output (frames per tile, stride, cell size,
//! playback speed) lives here instead of being compiled in, so the
//! divisibility and chunk rules can be checked against whatever a caller
//! supplies. Configs are JSON documents; every field is optional and falls
//! back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::PaletteError;
use crate::validation::{validate_non_negative, validate_positive, validate_range};

/// Default number of frames per animated tile.
pub const DEFAULT_ANIMATION_COUNT: u32 = 3;
/// Default stride between frames of the same tile.
pub const DEFAULT_STRIDE: u32 = 4;
/// Default cell size in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 24;
/// Default playback speed, where 1.0 is one second per frame and 2.0 is half a second.
pub const DEFAULT_SPEED: f32 = 2.0;
/// Default pixels per world unit used to size palette cells.
pub const DEFAULT_PIXELS_PER_UNIT: u32 = 100;

/// Parameters for one palette generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteConfig {
    /// Frames per animated tile.
    #[serde(default = "default_animation_count")]
    pub animation_count: u32,

    /// Distance, in sprites, between consecutive frames of one tile.
    #[serde(default = "default_stride")]
    pub stride: u32,

    /// Square cell size in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// Lower playback speed bound.
    #[serde(default = "default_speed")]
    pub min_speed: f32,

    /// Upper playback speed bound. Falls back to `min_speed` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,

    /// Pixels per world unit for the palette cell size.
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: u32,

    /// Keep fully transparent cells when slicing a sheet by grid.
    #[serde(default = "default_keep_empty")]
    pub keep_empty: bool,
}

fn default_animation_count() -> u32 {
    DEFAULT_ANIMATION_COUNT
}

fn default_stride() -> u32 {
    DEFAULT_STRIDE
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

fn default_pixels_per_unit() -> u32 {
    DEFAULT_PIXELS_PER_UNIT
}

fn default_keep_empty() -> bool {
    true
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            animation_count: default_animation_count(),
            stride: default_stride(),
            cell_size: default_cell_size(),
            min_speed: default_speed(),
            max_speed: None,
            pixels_per_unit: default_pixels_per_unit(),
            keep_empty: default_keep_empty(),
        }
    }
}

impl PaletteConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Upper playback speed bound after applying the `min_speed` fallback.
    pub fn max_speed(&self) -> f32 {
        self.max_speed.unwrap_or(self.min_speed)
    }

    /// Frames per tile as an index type.
    pub fn frames_per_tile(&self) -> usize {
        self.animation_count as usize
    }

    /// Stride as an index type.
    pub fn stride_len(&self) -> usize {
        self.stride as usize
    }

    /// Palette cell size in world units on every axis.
    pub fn world_cell_size(&self) -> [f32; 3] {
        let size = self.cell_size as f32 / self.pixels_per_unit as f32;
        [size, size, size]
    }

    /// Checks every field, reporting the first out-of-range value.
    pub fn validate(&self) -> Result<(), PaletteError> {
        let invalid = |e: crate::validation::CommonValidationError| {
            PaletteError::InvalidConfig(e.message)
        };

        validate_positive("animation_count", self.animation_count).map_err(invalid)?;
        validate_positive("stride", self.stride).map_err(invalid)?;
        validate_positive("cell_size", self.cell_size).map_err(invalid)?;
        validate_positive("pixels_per_unit", self.pixels_per_unit).map_err(invalid)?;
        validate_non_negative("min_speed", self.min_speed).map_err(invalid)?;
        validate_non_negative("max_speed", self.max_speed()).map_err(invalid)?;
        validate_range("min_speed", self.min_speed, "max_speed", self.max_speed())
            .map_err(invalid)?;
        Ok(())
    }

    /// Returns a copy with every `Some` override applied.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();
        if let Some(v) = overrides.animation_count {
            config.animation_count = v;
        }
        if let Some(v) = overrides.stride {
            config.stride = v;
        }
        if let Some(v) = overrides.cell_size {
            config.cell_size = v;
        }
        if let Some(v) = overrides.min_speed {
            config.min_speed = v;
        }
        if let Some(v) = overrides.max_speed {
            config.max_speed = Some(v);
        }
        if let Some(v) = overrides.pixels_per_unit {
            config.pixels_per_unit = v;
        }
        if overrides.skip_empty {
            config.keep_empty = false;
        }
        config
    }
}

/// Command-line overrides layered on top of a loaded config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub animation_count: Option<u32>,
    pub stride: Option<u32>,
    pub cell_size: Option<u32>,
    pub min_speed: Option<f32>,
    pub max_speed: Option<f32>,
    pub pixels_per_unit: Option<u32>,
    pub skip_empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PaletteConfig::default();
        assert_eq!(config.animation_count, 3);
        assert_eq!(config.stride, 4);
        assert_eq!(config.cell_size, 24);
        assert_eq!(config.min_speed, 2.0);
        assert_eq!(config.max_speed(), 2.0);
        assert!(config.keep_empty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = PaletteConfig::from_json("{}").unwrap();
        assert_eq!(config, PaletteConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = PaletteConfig::from_json(
            r#"{ "animation_count": 4, "stride": 4, "cell_size": 16, "max_speed": 3.5 }"#,
        )
        .unwrap();
        assert_eq!(config.animation_count, 4);
        assert_eq!(config.cell_size, 16);
        assert_eq!(config.min_speed, 2.0);
        assert_eq!(config.max_speed(), 3.5);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(PaletteConfig::from_json(r#"{ "strides": 3 }"#).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        for json in [
            r#"{ "animation_count": 0 }"#,
            r#"{ "stride": 0 }"#,
            r#"{ "cell_size": 0 }"#,
            r#"{ "pixels_per_unit": 0 }"#,
        ] {
            let config = PaletteConfig::from_json(json).unwrap();
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, PaletteError::InvalidConfig(_)),
                "{} gave {:?}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_validate_rejects_inverted_speeds() {
        let config = PaletteConfig {
            min_speed: 3.0,
            max_speed: Some(1.0),
            ..PaletteConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_speed"));
    }

    #[test]
    fn test_overrides() {
        let overrides = ConfigOverrides {
            stride: Some(3),
            min_speed: Some(1.0),
            skip_empty: true,
            ..ConfigOverrides::default()
        };
        let config = PaletteConfig::default().with_overrides(&overrides);
        assert_eq!(config.stride, 3);
        assert_eq!(config.animation_count, 3);
        assert_eq!(config.min_speed, 1.0);
        assert_eq!(config.max_speed(), 1.0);
        assert!(!config.keep_empty);
    }

    #[test]
    fn test_world_cell_size() {
        let config = PaletteConfig::default();
        assert_eq!(config.world_cell_size(), [0.24, 0.24, 0.24]);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PaletteConfig {
            max_speed: Some(4.0),
            ..PaletteConfig::default()
        };
        let json = config.to_json_pretty().unwrap();
        assert_eq!(PaletteConfig::from_json(&json).unwrap(), config);
    }
}
