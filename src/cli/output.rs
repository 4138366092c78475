//! Handles all user-facing output for the CLI.
//!
//! Everything is written to a `WriteColor` so the same code drives coloured
//! terminal output and plain buffers in tests.

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::label::{Kind, StatementLabel};
use crate::program::Program;
use crate::statement::Statement;
use crate::tree::Tree;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Writes `statement` as an indented tree, one node per line.
pub fn write_statement(out: &mut dyn WriteColor, statement: &Statement) -> io::Result<()> {
    write_node(out, statement.as_tree(), 0)
}

/// Writes the `check` summary for a program.
pub fn write_summary(out: &mut dyn WriteColor, program: &Program) -> io::Result<()> {
    let procedures = program.context().len();
    let statements: usize = program
        .context()
        .values()
        .chain(std::iter::once(program.body()))
        .map(|s| s.as_tree().size())
        .sum();

    writeln!(out, "program {}", program.name())?;
    writeln!(out, "  procedures: {}", procedures)?;
    for name in program.context().keys() {
        writeln!(out, "    {}", name)?;
    }
    writeln!(out, "  statements: {}", statements)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "ok")?;
    out.reset()?;
    writeln!(out)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_node(
    out: &mut dyn WriteColor,
    tree: &Tree<StatementLabel>,
    depth: usize,
) -> io::Result<()> {
    let Some(label) = tree.label() else {
        return Ok(());
    };
    write!(out, "{:width$}", "", width = depth * 2)?;
    out.set_color(ColorSpec::new().set_fg(Some(kind_color(label.kind()))).set_bold(true))?;
    write!(out, "{}", label.kind())?;
    out.reset()?;
    if let Some(c) = label.condition() {
        write!(out, " {}", c)?;
    }
    if let Some(id) = label.identifier() {
        write!(out, " {}", id)?;
    }
    writeln!(out)?;
    for child in tree.children() {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}

fn kind_color(kind: Kind) -> Color {
    match kind {
        Kind::Block => Color::Blue,
        Kind::If | Kind::IfElse => Color::Yellow,
        Kind::While => Color::Magenta,
        Kind::Call => Color::Green,
    }
}
