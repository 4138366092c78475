//! JSON encoding of statements and programs.
//!
//! Decoding is the only path by which untrusted data becomes a `Statement` or
//! `Program`, so every invariant violation must come back as an error rather
//! than a panic.

use bl_ast::{Condition, Identifier, Kind, Program, Statement};

fn id(name: &str) -> Identifier {
    Identifier::new(name).unwrap()
}

fn sample_source() -> String {
    std::fs::read_to_string("tests/fixtures/sample.json").unwrap()
}

#[cfg(test)]
mod statement_encoding_tests {
    use super::*;

    #[test]
    fn test_statement_json_shape() {
        let mut s = Statement::new();
        s.assemble_if(Condition::True, Statement::block([Statement::call(id("skip"))]));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": { "IF": "true" },
                "children": [
                    {
                        "label": "BLOCK",
                        "children": [ { "label": { "CALL": "skip" }, "children": [] } ]
                    }
                ]
            })
        );
        let back: Statement = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_decoding_rejects_wrong_arity() {
        let json = r#"{ "label": { "WHILE": "random" }, "children": [] }"#;
        let err = serde_json::from_str::<Statement>(json).unwrap_err();
        assert!(err.to_string().contains("WHILE takes 1 children, found 0"));
    }

    #[test]
    fn test_decoding_rejects_null_statement() {
        let err = serde_json::from_str::<Statement>("null").unwrap_err();
        assert!(err.to_string().contains("root: empty tree"));
    }

    #[test]
    fn test_decoding_rejects_unknown_condition() {
        let json = r#"{ "label": { "IF": "next-is-lava" }, "children": [] }"#;
        assert!(serde_json::from_str::<Statement>(json).is_err());
    }
}

#[cfg(test)]
mod program_encoding_tests {
    use super::*;

    #[test]
    fn test_sample_fixture_decodes() {
        let p: Program = serde_json::from_str(&sample_source()).unwrap();
        assert_eq!(p.name(), &id("Sample"));
        assert_eq!(p.context().len(), 1);
        assert_eq!(p.body().length_of_block(), 2);

        let mut body = p.body().clone();
        let mut choice = body.remove_from_block(1);
        assert_eq!(choice.kind(), Kind::IfElse);
        let (c, then_branch, else_branch) = choice.disassemble_if_else();
        assert_eq!(c, Condition::NextIsEnemy);
        assert_eq!(then_branch, Statement::block([Statement::call(id("infect"))]));
        assert_eq!(else_branch, Statement::block([Statement::call(id("turnleft"))]));
    }

    #[test]
    fn test_program_round_trip() {
        let p: Program = serde_json::from_str(&sample_source()).unwrap();
        let encoded = serde_json::to_string(&p).unwrap();
        let decoded: Program = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, p);
    }

    #[test]
    fn test_context_defaults_to_empty() {
        let json = r#"{ "name": "Bare", "body": { "label": "BLOCK", "children": [] } }"#;
        let p: Program = serde_json::from_str(json).unwrap();
        assert!(p.context().is_empty());
    }

    #[test]
    fn test_program_invariants_are_checked() {
        let cases = [
            (
                r#"{ "name": "P", "body": { "label": { "CALL": "move" }, "children": [] } }"#,
                "body must be a BLOCK, found CALL",
            ),
            (
                r#"{ "name": "P", "context": { "skip": { "label": "BLOCK", "children": [] } },
                     "body": { "label": "BLOCK", "children": [] } }"#,
                "procedure 'skip' redefines a primitive instruction",
            ),
            (
                r#"{ "name": "IS", "body": { "label": "BLOCK", "children": [] } }"#,
                "'IS' is a keyword",
            ),
            (
                r#"{ "name": "P",
                     "context": {
                         "go": { "label": "BLOCK",
                                 "children": [ { "label": { "CALL": "move" }, "children": [] } ] },
                         "go": { "label": "BLOCK", "children": [] }
                     },
                     "body": { "label": "BLOCK", "children": [] } }"#,
                "procedure 'go' is defined twice",
            ),
        ];
        for (json, expected) in cases {
            let err = serde_json::from_str::<Program>(json).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{:?} should mention {:?}",
                err.to_string(),
                expected
            );
        }
    }
}
