//! bl-ast: the statement tree of the BL toy language and its structural-editing
//! kernel.
//!
//! - [`tree`]: a generic ordered tree whose only mutations are `compose` and
//!   `decompose`.
//! - [`statement`]: BL statements on top of that tree, with the
//!   assemble/disassemble pairs and block editing.
//! - [`program`]: the program aggregate (name, procedure context, body).
//! - [`tokenizer`]: identifier and reserved-word predicates.

pub use crate::diagnostics::{BlError, ErrorType};
pub use crate::label::{Condition, Kind, StatementLabel};
pub use crate::program::{Context, Program};
pub use crate::statement::Statement;
pub use crate::tokenizer::Identifier;
pub use crate::tree::Tree;

pub mod cli;
pub mod diagnostics;
pub mod label;
pub mod program;
pub mod statement;
pub mod tokenizer;
pub mod tree;
