//! Config loading.
//!
//! Built-in defaults, then an optional JSON config file, then command-line
//! overrides.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tilepal_spec::{ConfigOverrides, PaletteConfig};

/// Loads a config file, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<PaletteConfig> {
    let Some(path) = path else {
        return Ok(PaletteConfig::default());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    PaletteConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Loads a config file and applies command-line overrides.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PaletteConfig> {
    Ok(load_config(path)?.with_overrides(overrides))
}
