//! Defines the command-line arguments and subcommands for the bl-ast CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "bl-ast",
    version,
    about = "Validate and inspect BL programs stored as JSON statement trees."
)]
pub struct BlArgs {
    /// When to colour the output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that a program file is well formed and print a summary.
    Check {
        /// The path to the JSON program file.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print the statement tree of a program's body or of one procedure.
    Tree {
        /// The path to the JSON program file.
        #[arg(required = true)]
        file: PathBuf,
        /// Print this procedure instead of the body.
        #[arg(long)]
        procedure: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for termcolor::ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => termcolor::ColorChoice::Auto,
            ColorMode::Always => termcolor::ColorChoice::Always,
            ColorMode::Never => termcolor::ColorChoice::Never,
        }
    }
}
