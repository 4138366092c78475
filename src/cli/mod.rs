//! The bl-ast Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands. Programs are read
//! as JSON (the serde form of [`Program`]); every load failure is reported as a
//! `miette` diagnostic pointing at the offending spot in the file.

use clap::Parser;
use miette::{miette, Diagnostic, IntoDiagnostic, NamedSource, SourceSpan, WrapErr};
use std::fs;
use std::path::Path;
use termcolor::StandardStream;
use thiserror::Error;

use crate::cli::args::{BlArgs, Command};
use crate::program::Program;

pub mod args;
pub mod output;

/// A program file that could not be decoded into a valid [`Program`].
#[derive(Debug, Error, Diagnostic)]
#[error("could not load program from {path}: {reason}")]
#[diagnostic(code(bl::load))]
pub struct LoadError {
    path: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    reason: String,
}

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = BlArgs::parse();
    let mut stdout = StandardStream::stdout(args.color.into());

    match args.command {
        Command::Check { file } => handle_check(&file, &mut stdout),
        Command::Tree { file, procedure } => handle_tree(&file, procedure.as_deref(), &mut stdout),
    }
}

/// Handles the `check` subcommand.
fn handle_check(path: &Path, stdout: &mut StandardStream) -> miette::Result<()> {
    let program = load_program(path)?;
    output::write_summary(stdout, &program).into_diagnostic()
}

/// Handles the `tree` subcommand.
fn handle_tree(
    path: &Path,
    procedure: Option<&str>,
    stdout: &mut StandardStream,
) -> miette::Result<()> {
    let program = load_program(path)?;
    let statement = match procedure {
        Some(name) => program.procedure(name).ok_or_else(|| {
            miette!(
                "program {} has no procedure named '{}'",
                program.name(),
                name
            )
        })?,
        None => program.body(),
    };
    output::write_statement(stdout, statement).into_diagnostic()
}

/// Reads and decodes a program file.
pub fn load_program(path: &Path) -> miette::Result<Program> {
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("could not read {}", path.display()))?;

    #[cfg(debug_assertions)]
    eprintln!("[bl-ast:load_program] read {} bytes from {}", text.len(), path.display());

    match serde_json::from_str::<Program>(&text) {
        Ok(program) => Ok(program),
        Err(e) => {
            let offset = line_column_offset(&text, e.line(), e.column());
            let name = path.display().to_string();
            Err(LoadError {
                path: name.clone(),
                span: (offset, 0).into(),
                reason: e.to_string(),
                src: NamedSource::new(name, text),
            }
            .into())
        }
    }
}

/// Converts serde_json's 1-based line/column into a byte offset in `text`.
fn line_column_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}
