//! The Identity Codec: the creator-list micro-grammar of the
//! `documentCreator` field.
//!
//! Encoding renders each creator as `"Name <email>"` (or just the name),
//! a tool as `"[Using: Name]"`, joined with `", "`. Decoding is NOT a
//! general parser: the wire contract fixes exactly three positions —
//! person, organization, tool — and emails embedded in a token are kept
//! folded into the name. That loss is part of the wire format; do not
//! "fix" it here.

use crate::errors::ConverterError;
use crate::models_spdx::{Creator, Organization, Person, Tool};

const TOOL_PREFIX: &str = "[Using: ";

/// Render the ordered creator list as the single `documentCreator` string.
pub fn encode_creators(creators: &[Creator]) -> String {
    let rendered: Vec<String> = creators
        .iter()
        .map(|creator| match creator {
            Creator::Person(Person { name, email })
            | Creator::Organization(Organization { name, email }) => {
                if email.is_empty() {
                    name.clone()
                } else {
                    format!("{} <{}>", name, email)
                }
            }
            Creator::Tool(Tool { name }) => format!("[Using: {}]", name),
        })
        .collect();
    rendered.join(", ")
}

/// Decode a `documentCreator` string into its three fixed slots.
///
/// Tokens split on `", "`; a token starting with `[` has the tool
/// wrapping stripped. Anything that is not exactly three tokens violates
/// the wire contract and fails the decode.
pub fn decode_creators(encoded: &str) -> Result<(Person, Organization, Tool), ConverterError> {
    let tokens: Vec<&str> = encoded.split(", ").collect();
    if tokens.len() != 3 {
        return Err(ConverterError::CreatorString(tokens.len()));
    }

    let person = Person {
        name: tokens[0].to_string(),
        email: String::new(),
    };
    let organization = Organization {
        name: tokens[1].to_string(),
        email: String::new(),
    };
    let tool = Tool {
        name: unwrap_tool(tokens[2]),
    };
    Ok((person, organization, tool))
}

fn unwrap_tool(token: &str) -> String {
    if token.starts_with('[') {
        token
            .strip_prefix(TOOL_PREFIX)
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(token)
            .to_string()
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_creators() -> Vec<Creator> {
        vec![
            Creator::Person(Person {
                name: "Ann".to_string(),
                email: String::new(),
            }),
            Creator::Organization(Organization {
                name: "Acme".to_string(),
                email: String::new(),
            }),
            Creator::Tool(Tool {
                name: "scanner-1".to_string(),
            }),
        ]
    }

    #[test]
    fn test_encode_exact_wire_string() {
        assert_eq!(
            encode_creators(&sample_creators()),
            "Ann, Acme, [Using: scanner-1]"
        );
    }

    #[test]
    fn test_encode_includes_email_in_angle_brackets() {
        let creators = vec![Creator::Person(Person {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
        })];
        assert_eq!(encode_creators(&creators), "Alice <a@x.com>");
    }

    #[test]
    fn test_decode_positional_slots() {
        let (person, organization, tool) =
            decode_creators("Ann, Acme, [Using: scanner-1]").unwrap();
        assert_eq!(person.name, "Ann");
        assert_eq!(person.email, "");
        assert_eq!(organization.name, "Acme");
        assert_eq!(organization.email, "");
        assert_eq!(tool.name, "scanner-1");
    }

    #[test]
    fn test_decode_keeps_email_folded_into_name() {
        // Documented one-way loss: the email suffix is not parsed back out.
        let (person, _, _) =
            decode_creators("Alice <a@x.com>, Acme, [Using: scanner-1]").unwrap();
        assert_eq!(person.name, "Alice <a@x.com>");
        assert_eq!(person.email, "");
    }

    #[test]
    fn test_decode_rejects_wrong_slot_count() {
        assert!(matches!(
            decode_creators("Ann, Acme").unwrap_err(),
            ConverterError::CreatorString(2)
        ));
        assert!(matches!(
            decode_creators("a, b, c, d").unwrap_err(),
            ConverterError::CreatorString(4)
        ));
    }

    #[test]
    fn test_decode_keeps_malformed_tool_token_verbatim() {
        let (_, _, tool) = decode_creators("Ann, Acme, [scanner-1]").unwrap();
        assert_eq!(tool.name, "[scanner-1]");
    }
}
