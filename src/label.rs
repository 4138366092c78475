//! Statement kinds, conditions and the tagged statement label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::err_msg;
use crate::tokenizer::Identifier;
use crate::BlError;

/// The discriminant of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Block,
    If,
    IfElse,
    While,
    Call,
}

impl Kind {
    /// The kind's spelling in diagnostics and tree dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Block => "BLOCK",
            Kind::If => "IF",
            Kind::IfElse => "IF_ELSE",
            Kind::While => "WHILE",
            Kind::Call => "CALL",
        }
    }

    /// Number of children a statement of this kind must have, or `None` for
    /// BLOCK, which takes any number.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Kind::Block => None,
            Kind::If | Kind::While => Some(1),
            Kind::IfElse => Some(2),
            Kind::Call => Some(0),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONDITION
// ============================================================================

/// A guard usable by IF, IF_ELSE and WHILE.
///
/// # Examples
///
/// ```rust
/// use bl_ast::label::Condition;
/// let c: Condition = "next-is-not-wall".parse().unwrap();
/// assert_eq!(c, Condition::NextIsNotWall);
/// assert_eq!(c.to_string(), "next-is-not-wall");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsWall,
    NextIsNotWall,
    NextIsFriend,
    NextIsNotFriend,
    NextIsEnemy,
    NextIsNotEnemy,
    Random,
    True,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::NextIsEmpty,
        Condition::NextIsNotEmpty,
        Condition::NextIsWall,
        Condition::NextIsNotWall,
        Condition::NextIsFriend,
        Condition::NextIsNotFriend,
        Condition::NextIsEnemy,
        Condition::NextIsNotEnemy,
        Condition::Random,
        Condition::True,
    ];

    /// The condition's spelling in BL source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::NextIsEmpty => "next-is-empty",
            Condition::NextIsNotEmpty => "next-is-not-empty",
            Condition::NextIsWall => "next-is-wall",
            Condition::NextIsNotWall => "next-is-not-wall",
            Condition::NextIsFriend => "next-is-friend",
            Condition::NextIsNotFriend => "next-is-not-friend",
            Condition::NextIsEnemy => "next-is-enemy",
            Condition::NextIsNotEnemy => "next-is-not-enemy",
            Condition::Random => "random",
            Condition::True => "true",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = BlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| err_msg!(UnknownCondition, "'{}'", s))
    }
}

// ============================================================================
// STATEMENT LABEL
// ============================================================================

/// The label carried by every node of a statement tree.
///
/// Each variant carries exactly the payload its kind needs, so a label can
/// never hold both a condition and an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementLabel {
    Block,
    If(Condition),
    IfElse(Condition),
    While(Condition),
    Call(Identifier),
}

impl StatementLabel {
    /// The kind this label tags.
    pub fn kind(&self) -> Kind {
        match self {
            StatementLabel::Block => Kind::Block,
            StatementLabel::If(_) => Kind::If,
            StatementLabel::IfElse(_) => Kind::IfElse,
            StatementLabel::While(_) => Kind::While,
            StatementLabel::Call(_) => Kind::Call,
        }
    }

    /// The guard of an IF, IF_ELSE or WHILE label.
    pub fn condition(&self) -> Option<Condition> {
        match self {
            StatementLabel::If(c) | StatementLabel::IfElse(c) | StatementLabel::While(c) => {
                Some(*c)
            }
            StatementLabel::Block | StatementLabel::Call(_) => None,
        }
    }

    /// The called name of a CALL label.
    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            StatementLabel::Call(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for StatementLabel {
    /// Renders `(KIND,condition,identifier)` with `?` for an absent payload.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let condition = self.condition().map_or("?", |c| c.as_str());
        let identifier = self.identifier().map_or("?", Identifier::as_str);
        write!(f, "({},{},{})", self.kind(), condition, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_spellings_round_trip() {
        for c in Condition::ALL {
            assert_eq!(c.as_str().parse::<Condition>().unwrap(), c);
            assert!(crate::tokenizer::is_condition(c.as_str()));
        }
        let err = "next-is-lava".parse::<Condition>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown condition: 'next-is-lava'");
    }

    #[test]
    fn test_label_display() {
        let id = Identifier::new("turnleft").unwrap();
        assert_eq!(StatementLabel::Block.to_string(), "(BLOCK,?,?)");
        assert_eq!(
            StatementLabel::IfElse(Condition::NextIsWall).to_string(),
            "(IF_ELSE,next-is-wall,?)"
        );
        assert_eq!(StatementLabel::Call(id).to_string(), "(CALL,?,turnleft)");
    }

    #[test]
    fn test_payload_matches_kind() {
        let labels = [
            StatementLabel::Block,
            StatementLabel::If(Condition::Random),
            StatementLabel::IfElse(Condition::True),
            StatementLabel::While(Condition::NextIsEnemy),
            StatementLabel::Call(Identifier::new("go").unwrap()),
        ];
        for label in &labels {
            let has_condition = label.condition().is_some();
            let has_identifier = label.identifier().is_some();
            match label.kind() {
                Kind::Block => assert!(!has_condition && !has_identifier),
                Kind::If | Kind::IfElse | Kind::While => assert!(has_condition && !has_identifier),
                Kind::Call => assert!(!has_condition && has_identifier),
            }
        }
    }

    #[test]
    fn test_serde_representation() {
        let json =
            serde_json::to_string(&StatementLabel::While(Condition::NextIsNotEmpty)).unwrap();
        assert_eq!(json, r#"{"WHILE":"next-is-not-empty"}"#);
        assert_eq!(serde_json::to_string(&StatementLabel::Block).unwrap(), r#""BLOCK""#);

        let call: StatementLabel = serde_json::from_str(r#"{"CALL":"infect"}"#).unwrap();
        assert_eq!(call.identifier().map(Identifier::as_str), Some("infect"));
        assert!(serde_json::from_str::<StatementLabel>(r#"{"CALL":"DO"}"#).is_err());
    }

    #[test]
    fn test_kind_arity() {
        assert_eq!(Kind::Block.arity(), None);
        assert_eq!(Kind::If.arity(), Some(1));
        assert_eq!(Kind::IfElse.arity(), Some(2));
        assert_eq!(Kind::While.arity(), Some(1));
        assert_eq!(Kind::Call.arity(), Some(0));
        assert_eq!(Kind::IfElse.to_string(), "IF_ELSE");
    }
}
