//! The BL statement kernel.
//!
//! A [`Statement`] wraps one [`Tree<StatementLabel>`] whose shape always
//! matches its labels:
//!
//! | Kind      | Payload     | Children                                   |
//! |-----------|-------------|--------------------------------------------|
//! | `BLOCK`   | none        | any number, none of them a BLOCK           |
//! | `IF`      | condition   | exactly one BLOCK (then-branch)            |
//! | `IF_ELSE` | condition   | exactly two BLOCKs (then-branch, else)     |
//! | `WHILE`   | condition   | exactly one BLOCK (loop body)              |
//! | `CALL`    | identifier  | none                                       |
//!
//! Every operation is written in terms of the tree's `compose`/`decompose`, so
//! subtrees are relinked, never copied. Statements passed in by value are
//! consumed; statements handed back are freshly owned. A caller that keeps a
//! named donor uses [`Statement::take`], which leaves the donor as an empty
//! BLOCK.
//!
//! Precondition failures panic with `Violation of: ...` before anything is
//! mutated. See [`crate::diagnostics`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::err_msg;
use crate::label::{Condition, Kind, StatementLabel};
use crate::requires;
use crate::tokenizer::Identifier;
use crate::tree::Tree;
use crate::BlError;

type Rep = Tree<StatementLabel>;

/// A BL statement.
///
/// # Examples
///
/// ```rust
/// use bl_ast::{Condition, Identifier, Kind, Statement};
///
/// let mut body = Statement::new();
/// body.add_to_block(0, Statement::call(Identifier::new("move").unwrap()));
///
/// let mut looped = Statement::new();
/// looped.assemble_while(Condition::NextIsEmpty, body.take());
/// assert_eq!(looped.kind(), Kind::While);
/// assert_eq!(body.length_of_block(), 0);
///
/// let (c, inner) = looped.disassemble_while();
/// assert_eq!(c, Condition::NextIsEmpty);
/// assert_eq!(inner.length_of_block(), 1);
/// assert_eq!(looped.kind(), Kind::Block);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    rep: Rep,
}

fn empty_block() -> Rep {
    let mut rep = Tree::new();
    rep.compose(StatementLabel::Block, Vec::new());
    rep
}

fn node(label: StatementLabel, children: Vec<Rep>) -> Rep {
    let mut rep = Tree::new();
    rep.compose(label, children);
    rep
}

// ============================================================================
// CONSTRUCTION AND OWNERSHIP
// ============================================================================

impl Statement {
    /// Creates an empty BLOCK.
    pub fn new() -> Self {
        Self { rep: empty_block() }
    }

    /// Creates `CALL(name)`.
    pub fn call(name: Identifier) -> Self {
        let mut s = Self::new();
        s.assemble_call(name);
        s
    }

    /// Creates a BLOCK holding `statements` in order.
    ///
    /// Panics if any of them is itself a BLOCK.
    pub fn block(statements: impl IntoIterator<Item = Statement>) -> Self {
        let mut s = Self::new();
        for (pos, child) in statements.into_iter().enumerate() {
            s.add_to_block(pos, child);
        }
        s
    }

    /// Moves this statement's content out, leaving an empty BLOCK behind.
    pub fn take(&mut self) -> Statement {
        std::mem::take(self)
    }

    /// Resets this statement to an empty BLOCK.
    pub fn clear(&mut self) {
        self.rep = empty_block();
    }

    /// Read-only view of the underlying tree.
    pub fn as_tree(&self) -> &Tree<StatementLabel> {
        &self.rep
    }

    /// Consumes this statement, handing back its tree.
    pub fn into_tree(self) -> Tree<StatementLabel> {
        self.rep
    }

    /// Splits the root off, leaving this statement an empty BLOCK.
    fn take_apart(&mut self) -> (StatementLabel, Vec<Rep>) {
        let (label, children) = self.rep.decompose();
        self.rep = empty_block();
        (label, children)
    }

    /// Discards the current content and installs `(label, children)`.
    fn replace(&mut self, label: StatementLabel, children: Vec<Rep>) {
        self.rep = node(label, children);
    }
}

impl Default for Statement {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// KERNEL OPERATIONS
// ============================================================================

impl Statement {
    /// The kind of the root node.
    pub fn kind(&self) -> Kind {
        self.rep.root().kind()
    }

    /// The root node's label, payload included.
    pub fn label(&self) -> &StatementLabel {
        self.rep.root()
    }

    /// Inserts `s` as the child at `pos`, shifting later children right.
    ///
    /// Requires this to be a BLOCK, `pos <= length_of_block()`, and `s` not to
    /// be a BLOCK.
    pub fn add_to_block(&mut self, pos: usize, s: Statement) {
        requires!(self.kind() == Kind::Block, "[this is a BLOCK statement]");
        requires!(pos <= self.length_of_block(), "pos <= [length of this BLOCK]");
        requires!(s.kind() != Kind::Block, "[s is not a BLOCK statement]");

        let (label, mut children) = self.rep.decompose();
        children.insert(pos, s.rep);
        self.rep.compose(label, children);
    }

    /// Detaches and returns the child at `pos`, shifting later children left.
    ///
    /// Requires this to be a BLOCK and `pos < length_of_block()`.
    pub fn remove_from_block(&mut self, pos: usize) -> Statement {
        requires!(self.kind() == Kind::Block, "[this is a BLOCK statement]");
        requires!(pos < self.length_of_block(), "pos < [length of this BLOCK]");

        let (label, mut children) = self.rep.decompose();
        let removed = children.remove(pos);
        self.rep.compose(label, children);
        Statement { rep: removed }
    }

    /// Number of statements in this BLOCK.
    pub fn length_of_block(&self) -> usize {
        requires!(self.kind() == Kind::Block, "[this is a BLOCK statement]");
        self.rep.child_count()
    }

    /// Becomes `IF c THEN s END`. Requires `s` to be a BLOCK.
    pub fn assemble_if(&mut self, c: Condition, s: Statement) {
        requires!(s.kind() == Kind::Block, "[s is a BLOCK statement]");
        self.replace(StatementLabel::If(c), vec![s.rep]);
    }

    /// Takes an IF apart into its condition and then-branch.
    ///
    /// This statement becomes an empty BLOCK.
    pub fn disassemble_if(&mut self) -> (Condition, Statement) {
        requires!(self.kind() == Kind::If, "[this is an IF statement]");
        let (label, children) = self.take_apart();
        let StatementLabel::If(c) = label else {
            unreachable!("IF root carries an IF label")
        };
        let Ok([then_branch]) = <[Rep; 1]>::try_from(children) else {
            unreachable!("IF has exactly one child")
        };
        (c, Statement { rep: then_branch })
    }

    /// Becomes `IF c THEN s1 ELSE s2 END`. Requires both to be BLOCKs.
    pub fn assemble_if_else(&mut self, c: Condition, s1: Statement, s2: Statement) {
        requires!(s1.kind() == Kind::Block, "[s1 is a BLOCK statement]");
        requires!(s2.kind() == Kind::Block, "[s2 is a BLOCK statement]");
        self.replace(StatementLabel::IfElse(c), vec![s1.rep, s2.rep]);
    }

    /// Takes an IF_ELSE apart into its condition, then-branch and else-branch.
    ///
    /// This statement becomes an empty BLOCK.
    pub fn disassemble_if_else(&mut self) -> (Condition, Statement, Statement) {
        requires!(self.kind() == Kind::IfElse, "[this is an IF_ELSE statement]");
        let (label, children) = self.take_apart();
        let StatementLabel::IfElse(c) = label else {
            unreachable!("IF_ELSE root carries an IF_ELSE label")
        };
        let Ok([then_branch, else_branch]) = <[Rep; 2]>::try_from(children) else {
            unreachable!("IF_ELSE has exactly two children")
        };
        (
            c,
            Statement { rep: then_branch },
            Statement { rep: else_branch },
        )
    }

    /// Becomes `WHILE c DO s END`. Requires `s` to be a BLOCK.
    pub fn assemble_while(&mut self, c: Condition, s: Statement) {
        requires!(s.kind() == Kind::Block, "[s is a BLOCK statement]");
        self.replace(StatementLabel::While(c), vec![s.rep]);
    }

    /// Takes a WHILE apart into its condition and body.
    ///
    /// This statement becomes an empty BLOCK.
    pub fn disassemble_while(&mut self) -> (Condition, Statement) {
        requires!(self.kind() == Kind::While, "[this is a WHILE statement]");
        let (label, children) = self.take_apart();
        let StatementLabel::While(c) = label else {
            unreachable!("WHILE root carries a WHILE label")
        };
        let Ok([body]) = <[Rep; 1]>::try_from(children) else {
            unreachable!("WHILE has exactly one child")
        };
        (c, Statement { rep: body })
    }

    /// Becomes `CALL(name)`, discarding any previous content.
    pub fn assemble_call(&mut self, name: Identifier) {
        self.replace(StatementLabel::Call(name), Vec::new());
    }

    /// Returns the called name. This statement becomes an empty BLOCK.
    pub fn disassemble_call(&mut self) -> Identifier {
        requires!(self.kind() == Kind::Call, "[this is a CALL statement]");
        let (label, _) = self.take_apart();
        let StatementLabel::Call(name) = label else {
            unreachable!("CALL root carries a CALL label")
        };
        name
    }
}

// ============================================================================
// WELL-FORMEDNESS
// ============================================================================

impl TryFrom<Tree<StatementLabel>> for Statement {
    type Error = BlError;

    /// Accepts `tree` only if every node's shape matches its label.
    fn try_from(tree: Tree<StatementLabel>) -> Result<Self, Self::Error> {
        check_shape(&tree, "root")?;
        Ok(Statement { rep: tree })
    }
}

fn check_shape(tree: &Rep, path: &str) -> Result<(), BlError> {
    let Some(label) = tree.label() else {
        return Err(err_msg!(MalformedTree, "{}: empty tree", path));
    };
    let kind = label.kind();
    let children = tree.children();

    if let Some(arity) = kind.arity() {
        if children.len() != arity {
            return Err(err_msg!(
                MalformedTree,
                "{}: {} takes {} children, found {}",
                path,
                kind,
                arity,
                children.len()
            ));
        }
    }

    for (i, child) in children.iter().enumerate() {
        let child_path = format!("{path}/{i}");
        let child_kind = child.label().map(StatementLabel::kind);
        match (kind, child_kind) {
            (Kind::Block, Some(Kind::Block)) => {
                return Err(err_msg!(
                    MalformedTree,
                    "{}: a BLOCK may not directly contain a BLOCK",
                    child_path
                ));
            }
            (Kind::If | Kind::IfElse | Kind::While, Some(k)) if k != Kind::Block => {
                return Err(err_msg!(
                    MalformedTree,
                    "{}: body of {} must be a BLOCK, found {}",
                    child_path,
                    kind,
                    k
                ));
            }
            _ => {}
        }
        check_shape(child, &child_path)?;
    }
    Ok(())
}

// ============================================================================
// SERIALIZATION AND DISPLAY
// ============================================================================

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rep.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tree = Rep::deserialize(deserializer)?;
        Statement::try_from(tree).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rep)
    }
}
