//! Config command implementation
//!
//! Prints the effective configuration after defaults, the config file, and
//! command-line overrides are applied.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tilepal_spec::ConfigOverrides;

use super::json_output::{error_codes, ConfigOutput, JsonError};
use crate::input::resolve_config;

/// Run the config command
///
/// With `validate`, exits with 1 when the effective config is out of range.
pub fn run(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    validate: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return run_json(config_path, overrides, validate);
    }

    let config = resolve_config(config_path.map(Path::new), overrides)?;
    if let Some(path) = config_path {
        println!("{} {}", "Config:".cyan().bold(), path);
    } else {
        println!("{} {}", "Config:".cyan().bold(), "built-in defaults".dimmed());
    }
    println!("{}", config.to_json_pretty()?);

    if !validate {
        return Ok(ExitCode::SUCCESS);
    }

    match config.validate() {
        Ok(()) => {
            println!("\n{} config is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n{} [{}] {}", "FAILED".red().bold(), e.code(), e);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(config_path: Option<&str>, overrides: &ConfigOverrides, validate: bool) -> Result<ExitCode> {
    let output = match resolve_config(config_path.map(Path::new), overrides) {
        Err(e) => ConfigOutput {
            success: false,
            config: None,
            errors: vec![super::config_json_error(&e, config_path)],
        },
        Ok(config) => {
            let errors = match config.validate() {
                Err(e) if validate => vec![JsonError::new(e.code().code(), e.to_string())],
                _ => Vec::new(),
            };
            ConfigOutput {
                success: errors.is_empty(),
                config: Some(config),
                errors,
            }
        }
    };

    let json = serde_json::to_string_pretty(&output)
        .with_context(|| format!("{}: failed to serialize output", error_codes::JSON_SERIALIZE))?;
    println!("{}", json);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let code = run(None, &ConfigOverrides::default(), true, false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_validate_rejects_zero_stride() {
        let overrides = ConfigOverrides {
            stride: Some(0),
            ..ConfigOverrides::default()
        };
        assert_eq!(run(None, &overrides, true, false).unwrap(), ExitCode::from(1));
        assert_eq!(run(None, &overrides, true, true).unwrap(), ExitCode::from(1));
        // Without --validate the config is only printed.
        assert_eq!(run(None, &overrides, false, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_unknown_field_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tilepal.json");
        fs::write(&path, r#"{ "strides": 2 }"#).unwrap();
        let path = path.display().to_string();

        assert!(run(Some(&path), &ConfigOverrides::default(), false, false).is_err());
        let code = run(Some(&path), &ConfigOverrides::default(), false, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
