//! Command-line interface for the playbook utility.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use playbook_core::Orientation;

/// Playbook - validate, replay and render tactical boards
#[derive(Debug, Parser)]
#[command(name = "playbook")]
#[command(about = "Validate, replay and render tactical boards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a board, drop malformed entries and clamp positions
    Check {
        /// Board JSON file
        board: PathBuf,

        /// Write the sanitized board back to the input file
        #[arg(long)]
        write: bool,
    },

    /// Export a board as SVG
    Render {
        /// Board JSON file
        board: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        surface: SurfaceArgs,
    },

    /// Replay a gesture script against a board
    Replay {
        /// Board JSON file
        board: PathBuf,

        /// Script JSON file: a list of steps
        script: PathBuf,

        /// Output board JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Also export the final frame, including selection and editor, as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        #[command(flatten)]
        surface: SurfaceArgs,
    },
}

/// Surface geometry shared by rendering and replay.
#[derive(Debug, Clone, clap::Args)]
pub struct SurfaceArgs {
    /// Surface width in pixels
    #[arg(long, default_value_t = 1050.0)]
    pub width: f64,

    /// Surface height in pixels
    #[arg(long, default_value_t = 680.0)]
    pub height: f64,

    /// Board orientation
    #[arg(long, value_enum, default_value_t = OrientationChoice::Horizontal)]
    pub orientation: OrientationChoice,

    /// Surface config JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overlay drawing hit areas
    #[arg(long)]
    pub hit_areas: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OrientationChoice {
    #[default]
    Horizontal,
    Vertical,
}

impl From<OrientationChoice> for Orientation {
    fn from(value: OrientationChoice) -> Self {
        match value {
            OrientationChoice::Horizontal => Orientation::Horizontal,
            OrientationChoice::Vertical => Orientation::Vertical,
        }
    }
}
