//! The BL program aggregate: a name, a context of user-defined procedures and a
//! top-level body.
//!
//! Like the statement kernel, the program never copies its parts. Context and
//! body are exchanged wholesale with [`Program::swap_context`] and
//! [`Program::swap_body`].
//!
//! ## Invariants
//! - The name is a valid identifier.
//! - Every procedure name is a valid identifier that is not a primitive
//!   instruction, and every procedure body is a BLOCK.
//! - The body is a BLOCK.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::err_msg;
use crate::label::Kind;
use crate::requires;
use crate::statement::Statement;
use crate::tokenizer::Identifier;
use crate::BlError;

/// Mapping from procedure name to procedure body.
pub type Context = BTreeMap<Identifier, Statement>;

/// Name given to a freshly created program.
pub const DEFAULT_NAME: &str = "Unnamed";

/// A BL program.
///
/// # Examples
///
/// ```rust
/// use bl_ast::{Identifier, Program, Statement};
///
/// let mut program = Program::new();
/// let mut body = program.new_body();
/// body.add_to_block(0, Statement::call(Identifier::new("move").unwrap()));
/// program.swap_body(&mut body);
///
/// assert_eq!(program.body().length_of_block(), 1);
/// assert_eq!(body.length_of_block(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgram")]
pub struct Program {
    name: Identifier,
    context: Context,
    body: Statement,
}

/// Serialised form before the program invariants are checked.
#[derive(Deserialize)]
struct RawProgram {
    name: Identifier,
    #[serde(default, deserialize_with = "deserialize_unique_context")]
    context: Context,
    body: Statement,
}

/// Decodes a context, rejecting a procedure name that appears twice.
fn deserialize_unique_context<'de, D>(deserializer: D) -> Result<Context, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueContext;

    impl<'de> Visitor<'de> for UniqueContext {
        type Value = Context;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from procedure name to BLOCK statement")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Context, A::Error> {
            let mut context = Context::new();
            while let Some((name, body)) = map.next_entry::<Identifier, Statement>()? {
                if context.contains_key(&name) {
                    return Err(de::Error::custom(err_msg!(
                        MalformedProgram,
                        "procedure '{}' is defined twice",
                        name
                    )));
                }
                context.insert(name, body);
            }
            Ok(context)
        }
    }

    deserializer.deserialize_map(UniqueContext)
}

impl TryFrom<RawProgram> for Program {
    type Error = BlError;

    fn try_from(raw: RawProgram) -> Result<Self, Self::Error> {
        check_context(&raw.context)?;
        if raw.body.kind() != Kind::Block {
            return Err(err_msg!(
                MalformedProgram,
                "body must be a BLOCK, found {}",
                raw.body.kind()
            ));
        }
        Ok(Program {
            name: raw.name,
            context: raw.context,
            body: raw.body,
        })
    }
}

/// Checks the context invariants, reporting the first offending procedure.
pub fn check_context(context: &Context) -> Result<(), BlError> {
    for (name, body) in context {
        if name.is_primitive_instruction() {
            return Err(err_msg!(
                MalformedProgram,
                "procedure '{}' redefines a primitive instruction",
                name
            ));
        }
        if body.kind() != Kind::Block {
            return Err(err_msg!(
                MalformedProgram,
                "procedure '{}' must be a BLOCK, found {}",
                name,
                body.kind()
            ));
        }
    }
    Ok(())
}

impl Program {
    /// Creates a program named `Unnamed` with no procedures and an empty body.
    pub fn new() -> Self {
        Self {
            name: Identifier::new(DEFAULT_NAME).expect("default program name is an identifier"),
            context: Context::new(),
            body: Statement::new(),
        }
    }

    /// The program's name.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Renames the program.
    pub fn set_name(&mut self, name: Identifier) {
        self.name = name;
    }

    /// Returns a fresh, empty context.
    pub fn new_context(&self) -> Context {
        Context::new()
    }

    /// Exchanges this program's context with `c`.
    ///
    /// Requires that no procedure in `c` is named after a primitive instruction
    /// and that every body in `c` is a BLOCK.
    pub fn swap_context(&mut self, c: &mut Context) {
        requires!(
            check_context(c).is_ok(),
            "[names in c are not primitive instructions] and [bodies in c are BLOCK statements]"
        );
        std::mem::swap(&mut self.context, c);
    }

    /// Read-only view of the context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Looks up a procedure body by name.
    pub fn procedure(&self, name: &str) -> Option<&Statement> {
        self.context.get(name)
    }

    /// Returns a fresh, empty BLOCK.
    pub fn new_body(&self) -> Statement {
        Statement::new()
    }

    /// Exchanges this program's body with `b`. Requires `b` to be a BLOCK.
    pub fn swap_body(&mut self, b: &mut Statement) {
        requires!(b.kind() == Kind::Block, "[b is a BLOCK statement]");
        std::mem::swap(&mut self.body, b);
    }

    /// Read-only view of the body.
    pub fn body(&self) -> &Statement {
        &self.body
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Condition;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn test_new_program() {
        let p = Program::new();
        assert_eq!(p.name(), &id("Unnamed"));
        assert!(p.context().is_empty());
        assert_eq!(p.body(), &Statement::new());
        assert_eq!(p, Program::default());
    }

    #[test]
    fn test_set_name() {
        let mut p = Program::new();
        p.set_name(id("Replacement"));
        assert_eq!(p.name().as_str(), "Replacement");
    }

    #[test]
    fn test_swap_context_exchanges_without_copying() {
        let mut p = Program::new();
        let mut c = p.new_context();
        c.insert(id("go"), Statement::block([Statement::call(id("move"))]));
        p.swap_context(&mut c);
        assert!(c.is_empty());
        assert_eq!(p.procedure("go").map(Statement::length_of_block), Some(1));

        let mut empty = p.new_context();
        p.swap_context(&mut empty);
        assert!(p.context().is_empty());
        assert!(empty.contains_key("go"));
    }

    #[test]
    fn test_check_context_messages() {
        let mut c = Context::new();
        c.insert(id("skip"), Statement::new());
        let err = check_context(&c).unwrap_err();
        assert_eq!(err.message(), "procedure 'skip' redefines a primitive instruction");

        let mut c = Context::new();
        let mut w = Statement::new();
        w.assemble_while(Condition::True, Statement::new());
        c.insert(id("spin"), w);
        let err = check_context(&c).unwrap_err();
        assert_eq!(err.message(), "procedure 'spin' must be a BLOCK, found WHILE");
    }

    #[test]
    fn test_decode_rejects_duplicate_procedure() {
        let json = r#"{ "name": "P",
                        "context": { "go": { "label": "BLOCK", "children": [] },
                                     "go": { "label": "BLOCK", "children": [] } },
                        "body": { "label": "BLOCK", "children": [] } }"#;
        let err = serde_json::from_str::<Program>(json).unwrap_err();
        assert!(err.to_string().contains("procedure 'go' is defined twice"));

        let json = r#"{ "name": "P",
                        "context": { "go": { "label": "BLOCK", "children": [] },
                                     "step": { "label": "BLOCK", "children": [] } },
                        "body": { "label": "BLOCK", "children": [] } }"#;
        let p = serde_json::from_str::<Program>(json).unwrap();
        assert_eq!(p.context().len(), 2);
    }

    #[test]
    #[should_panic(expected = "Violation of: [b is a BLOCK statement]")]
    fn test_swap_body_requires_block() {
        let mut p = Program::new();
        let mut b = Statement::call(id("move"));
        p.swap_body(&mut b);
    }

    #[test]
    #[should_panic(expected = "Violation of: [names in c are not primitive instructions]")]
    fn test_swap_context_rejects_primitive_names() {
        let mut p = Program::new();
        let mut c = p.new_context();
        c.insert(id("move"), Statement::new());
        p.swap_context(&mut c);
    }
}
