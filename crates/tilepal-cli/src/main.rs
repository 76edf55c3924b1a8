//! tilepal CLI - Command-line interface for animated tile palette generation
//!
//! This binary slices sprite sheets and writes tile palettes whose tiles
//! animate through stride-interleaved frames.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use tilepal_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            inputs,
            config,
            json,
        } => commands::generate::run(&inputs, config.config.as_deref(), &config.overrides(), json),
        Commands::Inspect {
            input,
            config,
            json,
        } => commands::inspect::run(&input, config.config.as_deref(), &config.overrides(), json),
        Commands::Config {
            config,
            validate,
            json,
        } => commands::config::run(config.config.as_deref(), &config.overrides(), validate, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
