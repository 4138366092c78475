//! Error and contract-violation reporting for the BL statement kernel.
//!
//! # Overview
//!
//! There are exactly two failure classes in this crate:
//!
//! - **Contract violations**: a caller broke a documented precondition (wrong
//!   statement kind, position out of range, a non-BLOCK body, ...). These are
//!   bugs in the caller, not bad input, so they panic through [`requires!`]
//!   with a message of the form `Violation of: <condition>`. The check always
//!   runs before the operation touches any state.
//! - **Invalid external input**: text or serialised data that does not describe
//!   a valid identifier, condition, statement or program. These are reported as
//!   [`BlError`], a `miette` diagnostic built through [`err_msg!`].
//!
//! # Error Construction
//!
//! - Use `err_msg!` for every `BlError`:
//!   - `err_msg!(InvalidIdentifier, "'{}' is a keyword", text)`
//! - Use `requires!` for every precondition check in kernel operations:
//!   - `requires!(pos <= len, "pos <= [length of this BLOCK]")`

use miette::Diagnostic;
use thiserror::Error;

/// Type-safe classification of [`BlError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Text that is not a legal BL identifier
    Identifier,
    /// Text that does not name a BL condition
    Condition,
    /// A statement tree whose shape does not match its labels
    Tree,
    /// A program whose name, context or body breaks a program invariant
    Program,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Identifier => "Identifier",
            ErrorType::Condition => "Condition",
            ErrorType::Tree => "Tree",
            ErrorType::Program => "Program",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for invalid input reaching the kernel boundary.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum BlError {
    #[error("Invalid identifier: {message}")]
    #[diagnostic(
        code(bl::identifier),
        help("identifiers start with a letter, continue with letters, digits or '_', and may not be reserved words")
    )]
    InvalidIdentifier { message: String },

    #[error("Unknown condition: {message}")]
    #[diagnostic(
        code(bl::condition),
        help("conditions are next-is-[not-]empty, next-is-[not-]wall, next-is-[not-]friend, next-is-[not-]enemy, random, true")
    )]
    UnknownCondition { message: String },

    #[error("Malformed statement tree: {message}")]
    #[diagnostic(
        code(bl::tree),
        help("IF and WHILE take one BLOCK child, IF_ELSE two, CALL none, and a BLOCK may not directly contain a BLOCK")
    )]
    MalformedTree { message: String },

    #[error("Malformed program: {message}")]
    #[diagnostic(code(bl::program))]
    MalformedProgram { message: String },
}

impl BlError {
    /// Returns the type-safe classification of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            BlError::InvalidIdentifier { .. } => ErrorType::Identifier,
            BlError::UnknownCondition { .. } => ErrorType::Condition,
            BlError::MalformedTree { .. } => ErrorType::Tree,
            BlError::MalformedProgram { .. } => ErrorType::Program,
        }
    }

    /// Returns the bare message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            BlError::InvalidIdentifier { message }
            | BlError::UnknownCondition { message }
            | BlError::MalformedTree { message }
            | BlError::MalformedProgram { message } => message,
        }
    }
}

/// Constructs a [`BlError`] variant with a formatted message.
///
/// ```rust
/// use bl_ast::{err_msg, BlError};
/// let err = err_msg!(MalformedTree, "expected {} children, found {}", 1, 3);
/// assert!(matches!(err, BlError::MalformedTree { .. }));
/// assert_eq!(err.message(), "expected 1 children, found 3");
/// ```
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:literal, $($arg:expr),+ $(,)?) => {
        $crate::BlError::$variant {
            message: format!($msg, $($arg),+),
        }
    };
    ($variant:ident, $msg:expr) => {
        $crate::BlError::$variant {
            message: format!("{}", $msg),
        }
    };
}

/// Halts the current call path when a kernel precondition does not hold.
///
/// The panic message is `Violation of: <what>`, so tests can match it with
/// `#[should_panic(expected = "Violation of: ...")]`.
///
/// ```rust,should_panic
/// bl_ast::requires!(1 + 1 == 3, "arithmetic works");
/// ```
#[macro_export]
macro_rules! requires {
    ($cond:expr, $what:expr) => {
        if !$cond {
            panic!("Violation of: {}", $what);
        }
    };
}
