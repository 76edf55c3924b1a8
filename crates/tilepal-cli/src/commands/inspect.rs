//! Inspect command implementation
//!
//! Plans a palette for one sheet and prints the layout without creating
//! anything.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tilepal_backend_sheet::plan_palette;
use tilepal_spec::ConfigOverrides;

use super::json_output::{error_codes, InspectOutput, JsonError, PlanSummary};
use crate::console::ConsoleStore;
use crate::input::resolve_config;

/// Run the inspect command
pub fn run(
    input: &str,
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return run_json(input, config_path, overrides);
    }

    let config = resolve_config(config_path.map(Path::new), overrides)?;
    println!("{} {}", "Inspecting:".cyan().bold(), input);

    let mut store = ConsoleStore::new(false);
    let plan = match plan_palette(&mut store, Path::new(input), &config) {
        Ok(plan) => plan,
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };

    let summary = PlanSummary::from_plan(&plan);
    println!(
        "  {} {}px wide, {} sprites",
        "Sheet:".dimmed(),
        summary.sheet_width,
        summary.sprite_count
    );
    println!(
        "  {} {} tiles, {} per row, {} row(s)",
        "Grid:".dimmed(),
        summary.tiles.len(),
        summary.chunk,
        summary.rows
    );
    println!(
        "  {} {}  {}  {}",
        "Names:".dimmed(),
        plan.palette_name(),
        plan.folder_name(),
        plan.tile_name(0)
    );

    println!();
    for tile in &summary.tiles {
        println!(
            "  [{:>3},{:>4}] {} {}",
            tile.position[0],
            tile.position[1],
            plan.tile_name(tile.index).bold(),
            tile.frames.join(", ")
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str, config_path: Option<&str>, overrides: &ConfigOverrides) -> Result<ExitCode> {
    let output = match resolve_config(config_path.map(Path::new), overrides) {
        Err(e) => InspectOutput::failure(super::config_json_error(&e, config_path)),
        Ok(config) => {
            let mut store = ConsoleStore::new(true);
            match plan_palette(&mut store, Path::new(input), &config) {
                Ok(plan) => InspectOutput::success(PlanSummary::from_plan(&plan)),
                Err(e) => InspectOutput::failure(JsonError::from_generate_error(&e).with_file(input)),
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
