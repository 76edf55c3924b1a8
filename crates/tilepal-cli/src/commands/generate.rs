//! Generate command implementation
//!
//! Creates a tile palette and its animated tiles for each input sheet.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tilepal_backend_sheet::generate_palettes;
use tilepal_spec::{ConfigOverrides, GenerationReport};

use super::json_output::{error_codes, GenerateOutput, JsonError};
use crate::console::ConsoleStore;
use crate::input::resolve_config;

/// Run the generate command
///
/// # Arguments
/// * `inputs` - Sprite sheets to process, in order
/// * `config_path` - Optional JSON config file
/// * `overrides` - Values given on the command line
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 when every sheet produced a palette, 1 otherwise
pub fn run(
    inputs: &[String],
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(inputs, config_path, overrides)
    } else {
        run_human(inputs, config_path, overrides)
    }
}

fn run_human(
    inputs: &[String],
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<ExitCode> {
    let config = resolve_config(config_path.map(Path::new), overrides)?;

    println!(
        "{} {} sheet(s), {} frames per tile, stride {}, {}px cells",
        "Generating:".cyan().bold(),
        inputs.len(),
        config.animation_count,
        config.stride,
        config.cell_size
    );

    let mut store = ConsoleStore::new(false);
    match generate_palettes(&mut store, inputs, &config) {
        Ok(reports) => {
            for report in &reports {
                print_report(report);
            }
            println!("\n{} {} palette(s) created", "SUCCESS".green().bold(), reports.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            for report in &err.completed {
                print_report(report);
            }
            // The store already printed the failure itself.
            println!(
                "\n{} stopped at {} ({} of {} sheet(s) completed)",
                "FAILED".red().bold(),
                err.source_path.display(),
                err.completed.len(),
                inputs.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

fn print_report(report: &GenerationReport) {
    println!("\n{} {}", "Source:".dimmed(), report.source);
    println!("  {} {}", "Palette:".dimmed(), report.palette);
    println!("  {} {}", "Tiles:".dimmed(), report.tiles_dir);
    println!(
        "  {} {} sprites -> {} tiles, {} per row, {} row(s)",
        "Layout:".dimmed(),
        report.sprite_count,
        report.tile_count(),
        report.chunk,
        report.rows
    );
}

fn run_json(
    inputs: &[String],
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<ExitCode> {
    let config = match resolve_config(config_path.map(Path::new), overrides) {
        Ok(config) => config,
        Err(e) => {
            let error = super::config_json_error(&e, config_path);
            return print_output(&GenerateOutput::failure(Vec::new(), error), false);
        }
    };

    let mut store = ConsoleStore::new(true);
    let output = match generate_palettes(&mut store, inputs, &config) {
        Ok(reports) => GenerateOutput::success(reports),
        Err(err) => {
            let error = JsonError::from_generate_error(&err.error)
                .with_file(err.source_path.display().to_string());
            GenerateOutput::failure(err.completed, error)
        }
    };
    let success = output.success;
    print_output(&output, success)
}

fn print_output(output: &GenerateOutput, success: bool) -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(output)
        .with_context(|| format!("{}: failed to serialize output", error_codes::JSON_SERIALIZE))?;
    println!("{}", json);
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
