//! JSON output types for machine-readable CLI output.
//!
//! Every command that takes `--json` prints exactly one of these documents
//! to stdout and nothing else.

use serde::{Deserialize, Serialize};
use tilepal_backend_sheet::{GenerateError, PalettePlan};
use tilepal_spec::{GenerationReport, PaletteConfig};

/// Error codes for CLI operations.
///
/// Palette input failures pass through their own codes (`E001`..`E005`).
pub mod error_codes {
    /// Config file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Config file is not valid JSON
    pub const JSON_PARSE: &str = "CLI_002";
    /// Store failure while reading a sheet or writing assets
    pub const STORE_ERROR: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Maps a generation failure onto its stable code.
    pub fn from_generate_error(error: &GenerateError) -> Self {
        match error {
            GenerateError::Palette(e) => Self::new(e.code().code(), e.to_string()),
            GenerateError::Store(e) => Self::new(error_codes::STORE_ERROR, e.to_string()),
        }
    }
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    /// Reports of every palette created, in input order
    pub reports: Vec<GenerationReport>,
    /// The failure that stopped the batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl GenerateOutput {
    pub fn success(reports: Vec<GenerationReport>) -> Self {
        Self {
            success: true,
            reports,
            error: None,
        }
    }

    pub fn failure(reports: Vec<GenerationReport>, error: JsonError) -> Self {
        Self {
            success: false,
            reports,
            error: Some(error),
        }
    }
}

/// One tile of an inspected plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileSummary {
    pub index: usize,
    pub position: [i32; 2],
    /// Sprite names in frame order
    pub frames: Vec<String>,
}

/// A computed plan, without anything written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanSummary {
    pub source: String,
    pub sheet_width: u32,
    pub sprite_count: usize,
    pub chunk: u32,
    pub rows: usize,
    pub tiles: Vec<TileSummary>,
}

impl PlanSummary {
    pub fn from_plan(plan: &PalettePlan) -> Self {
        let tiles = plan
            .grid
            .tiles
            .iter()
            .enumerate()
            .map(|(index, placed)| TileSummary {
                index,
                position: placed.coord.to_array(),
                frames: placed
                    .tile
                    .frames
                    .iter()
                    .map(|frame| frame.as_ref().map(|s| s.name.clone()).unwrap_or_default())
                    .collect(),
            })
            .collect();

        Self {
            source: plan.source.display().to_string(),
            sheet_width: plan.sheet_width,
            sprite_count: plan.sprite_count,
            chunk: plan.grid.chunk,
            rows: plan.grid.rows(),
            tiles,
        }
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl InspectOutput {
    pub fn success(plan: PlanSummary) -> Self {
        Self {
            success: true,
            plan: Some(plan),
            error: None,
        }
    }

    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            plan: None,
            error: Some(error),
        }
    }
}

/// JSON output for the `config` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOutput {
    pub success: bool,
    /// The effective configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PaletteConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tilepal_spec::PaletteError;

    #[test]
    fn test_error_skips_missing_file() {
        let json = serde_json::to_string(&JsonError::new("CLI_001", "nope")).unwrap();
        assert_eq!(json, r#"{"code":"CLI_001","message":"nope"}"#);

        let with_file = JsonError::new("E001", "bad").with_file("a.txt");
        assert_eq!(with_file.file.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_palette_errors_keep_their_codes() {
        let error = GenerateError::Palette(PaletteError::InvalidSpriteCount {
            sprites: 8,
            animation_count: 3,
        });
        let json = JsonError::from_generate_error(&error);
        assert_eq!(json.code, "E002");
        assert!(json.message.contains("8"));
    }

    #[test]
    fn test_generate_output_failure_shape() {
        let output = GenerateOutput::failure(Vec::new(), JsonError::new("E001", "not an image"));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "E001");
        assert!(value["reports"].as_array().unwrap().is_empty());
    }
}
