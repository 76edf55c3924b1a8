//! Command implementations for the tilepal CLI.

pub mod config;
pub mod generate;
pub mod inspect;
pub mod json_output;

use json_output::{error_codes, JsonError};

/// Maps a config loading failure onto a JSON error.
pub(crate) fn config_json_error(err: &anyhow::Error, config_path: Option<&str>) -> JsonError {
    let code = if err.chain().any(|cause| cause.is::<serde_json::Error>()) {
        error_codes::JSON_PARSE
    } else {
        error_codes::FILE_READ
    };
    let error = JsonError::new(code, format!("{:#}", err));
    match config_path {
        Some(path) => error.with_file(path),
        None => error,
    }
}
