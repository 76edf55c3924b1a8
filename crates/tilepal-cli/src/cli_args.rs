//! CLI argument definitions for the tilepal command-line interface.

use clap::{Args, Parser, Subcommand};
use tilepal_spec::ConfigOverrides;

/// tilepal - Animated tile palettes from sprite sheets
#[derive(Parser)]
#[command(name = "tilepal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Generation parameters shared by every command.
#[derive(Args, Debug, Default, PartialEq)]
pub(crate) struct ConfigArgs {
    /// JSON config file (flags below take precedence)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Frames per animated tile
    #[arg(short = 'a', long)]
    pub animation_count: Option<u32>,

    /// Number of consecutive sprites that go to consecutive tiles
    #[arg(short, long)]
    pub stride: Option<u32>,

    /// Sprite cell size in pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Minimum animation speed of each tile
    #[arg(long)]
    pub min_speed: Option<f32>,

    /// Maximum animation speed of each tile (default: min speed)
    #[arg(long)]
    pub max_speed: Option<f32>,

    /// Pixels per world unit, used for the palette cell size
    #[arg(long)]
    pub pixels_per_unit: Option<u32>,

    /// Drop fully transparent grid cells when slicing
    #[arg(long)]
    pub skip_empty: bool,
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            animation_count: self.animation_count,
            stride: self.stride,
            cell_size: self.cell_size,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            pixels_per_unit: self.pixels_per_unit,
            skip_empty: self.skip_empty,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a tile palette and animated tiles from sprite sheets
    Generate {
        /// Sprite sheets to process, in order
        #[arg(required = true)]
        inputs: Vec<String>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the tile layout for a sheet without creating anything
    Inspect {
        /// Sprite sheet to inspect
        input: String,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        #[command(flatten)]
        config: ConfigArgs,

        /// Exit with an error when the configuration is out of range
        #[arg(long)]
        validate: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
