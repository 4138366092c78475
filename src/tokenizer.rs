//! Lexical predicates for BL identifiers and reserved words.
//!
//! This is not a scanner. It only answers the questions the statement kernel
//! and the program aggregate need answered about a piece of text: is it a
//! keyword, is it a condition, is it a legal identifier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::err_msg;
use crate::BlError;

/// BL keywords, in the order they appear in the grammar.
pub const KEYWORDS: [&str; 10] = [
    "PROGRAM",
    "IS",
    "BEGIN",
    "END",
    "INSTRUCTION",
    "IF",
    "THEN",
    "ELSE",
    "WHILE",
    "DO",
];

/// Source spellings of the BL conditions.
pub const CONDITIONS: [&str; 10] = [
    "next-is-empty",
    "next-is-not-empty",
    "next-is-wall",
    "next-is-not-wall",
    "next-is-friend",
    "next-is-not-friend",
    "next-is-enemy",
    "next-is-not-enemy",
    "random",
    "true",
];

/// Instructions built into the language. They may be called but never defined.
pub const PRIMITIVE_INSTRUCTIONS: [&str; 5] = ["move", "turnleft", "turnright", "infect", "skip"];

static IDENTIFIER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("identifier pattern is valid"));

/// Returns true if `s` is a BL keyword.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns true if `s` is the spelling of a BL condition.
pub fn is_condition(s: &str) -> bool {
    CONDITIONS.contains(&s)
}

/// Returns true if `s` names one of the primitive instructions.
pub fn is_primitive_instruction(s: &str) -> bool {
    PRIMITIVE_INSTRUCTIONS.contains(&s)
}

/// Returns true if `s` is a legal BL identifier.
///
/// # Examples
///
/// ```rust
/// use bl_ast::tokenizer::is_identifier;
/// assert!(is_identifier("turn_around2"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("WHILE"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_SHAPE.is_match(s) && !is_keyword(s) && !is_condition(s)
}

// ============================================================================
// IDENTIFIER
// ============================================================================

/// A string known to satisfy [`is_identifier`].
///
/// # Examples
///
/// ```rust
/// use bl_ast::tokenizer::Identifier;
/// let id: Identifier = "FindObstacle".parse().unwrap();
/// assert_eq!(id.as_str(), "FindObstacle");
/// assert!("IF".parse::<Identifier>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validates `text` and wraps it.
    pub fn new(text: impl Into<String>) -> Result<Self, BlError> {
        let text = text.into();
        if let Some(reason) = rejection_reason(&text) {
            return Err(err_msg!(InvalidIdentifier, "'{}' {}", text, reason));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true if this names a primitive instruction.
    pub fn is_primitive_instruction(&self) -> bool {
        is_primitive_instruction(&self.0)
    }
}

fn rejection_reason(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        Some("is empty")
    } else if !IDENTIFIER_SHAPE.is_match(text) {
        Some("must start with a letter and contain only letters, digits and '_'")
    } else if is_keyword(text) {
        Some("is a keyword")
    } else if is_condition(text) {
        Some("is a condition")
    } else {
        None
    }
}

impl FromStr for Identifier {
    type Err = BlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = BlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = BlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    #[test]
    fn test_identifier_shape() {
        for ok in ["a", "move", "Z9", "find_obstacle", "x_1_y", "Ifx", "whileLoop"] {
            assert!(is_identifier(ok), "{ok} should be an identifier");
        }
        for bad in ["", "1a", "_a", "a-b", "a b", "é", "next-is-wall"] {
            assert!(!is_identifier(bad), "{bad} should not be an identifier");
        }
    }

    #[test]
    fn test_reserved_words_are_not_identifiers() {
        for kw in KEYWORDS {
            assert!(is_keyword(kw));
            assert!(!is_identifier(kw));
        }
        // Keywords are case-sensitive.
        assert!(is_identifier("while"));
        assert!(is_identifier("begin"));
        // Conditions that happen to fit the identifier shape are still reserved.
        assert!(!is_identifier("random"));
        assert!(!is_identifier("true"));
    }

    #[test]
    fn test_primitive_instructions_are_identifiers() {
        for p in PRIMITIVE_INSTRUCTIONS {
            assert!(is_identifier(p));
            assert!(Identifier::new(p).unwrap().is_primitive_instruction());
        }
        assert!(!Identifier::new("walk").unwrap().is_primitive_instruction());
    }

    #[test]
    fn test_rejection_messages() {
        let cases = [
            ("", "'' is empty"),
            ("9lives", "'9lives' must start with a letter"),
            ("END", "'END' is a keyword"),
            ("random", "'random' is a condition"),
        ];
        for (text, expected) in cases {
            let err = Identifier::new(text).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Identifier);
            assert!(
                err.message().starts_with(expected),
                "{:?} should start with {:?}",
                err.message(),
                expected
            );
        }
    }

    #[test]
    fn test_serde_validates() {
        let id: Identifier = serde_json::from_str("\"walk\"").unwrap();
        assert_eq!(id, "walk");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"walk\"");
        assert!(serde_json::from_str::<Identifier>("\"THEN\"").is_err());
    }
}
