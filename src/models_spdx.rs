//! The SPDX-side object model consumed and produced by the codecs.
//!
//! These structs mirror the entities of an SPDX 2.1 tag-value document:
//! one document, one package, its files and snippets, plus reviews,
//! annotations and external package references. Nothing here knows about
//! the gateway wire format; that mapping lives in `crate::codec`.

use crate::errors::ConverterError;
use chrono::NaiveDateTime;

/// A license expression node.
///
/// Either a single named license or a conjunction of two sub-expressions
/// (dual licensing). Conjunctions form a binary tree; in practice the
/// depth is one, but the codec and the expression parser are recursive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum License {
    Leaf {
        identifier: String,
        full_name: Option<String>,
        url: Option<String>,
    },
    Conjunction(Box<License>, Box<License>),
}

impl License {
    /// A leaf license with only an identifier, as produced by parsing a
    /// tag-value license expression (names and URLs are not carried there).
    pub fn leaf(identifier: impl Into<String>) -> Self {
        License::Leaf {
            identifier: identifier.into(),
            full_name: None,
            url: None,
        }
    }

    /// Parse a tag-value license expression such as `MIT`,
    /// `MIT AND Apache-2.0` or `(MIT AND Apache-2.0) AND GPL-2.0`.
    ///
    /// `AND` is left-associative; parentheses group. Only conjunctions are
    /// supported, matching the data model.
    pub fn parse_expression(expr: &str) -> Result<License, ConverterError> {
        let tokens = tokenize(expr);
        if tokens.is_empty() {
            return Err(ConverterError::LicenseExpression(
                "empty license expression".to_string(),
            ));
        }
        let mut pos = 0;
        let license = parse_conjunction(&tokens, &mut pos)?;
        if pos != tokens.len() {
            return Err(ConverterError::LicenseExpression(format!(
                "unexpected token `{}` in `{}`",
                tokens[pos], expr
            )));
        }
        Ok(license)
    }

    /// Render this node back into a tag-value license expression.
    /// Nested conjunctions are parenthesized.
    pub fn to_expression(&self) -> String {
        match self {
            License::Leaf { identifier, .. } => identifier.clone(),
            License::Conjunction(left, right) => format!(
                "{} AND {}",
                expression_operand(left),
                expression_operand(right)
            ),
        }
    }

    /// The identifier(s) of this node, conjunctions joined with ` AND `.
    /// Used for the flat license summary key in the asset metadata.
    pub fn identifier(&self) -> String {
        match self {
            License::Leaf { identifier, .. } => identifier.clone(),
            License::Conjunction(left, right) => {
                format!("{} AND {}", left.identifier(), right.identifier())
            }
        }
    }
}

fn expression_operand(license: &License) -> String {
    match license {
        License::Leaf { identifier, .. } => identifier.clone(),
        conjunction => format!("({})", conjunction.to_expression()),
    }
}

fn tokenize(expr: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in expr.chars() {
        match c {
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_conjunction(tokens: &[String], pos: &mut usize) -> Result<License, ConverterError> {
    let mut left = parse_operand(tokens, pos)?;
    while *pos < tokens.len() && tokens[*pos] == "AND" {
        *pos += 1;
        let right = parse_operand(tokens, pos)?;
        left = License::Conjunction(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn parse_operand(tokens: &[String], pos: &mut usize) -> Result<License, ConverterError> {
    let token = tokens.get(*pos).ok_or_else(|| {
        ConverterError::LicenseExpression("expression ended unexpectedly".to_string())
    })?;
    *pos += 1;
    match token.as_str() {
        "(" => {
            let inner = parse_conjunction(tokens, pos)?;
            match tokens.get(*pos).map(String::as_str) {
                Some(")") => {
                    *pos += 1;
                    Ok(inner)
                }
                _ => Err(ConverterError::LicenseExpression(
                    "missing closing parenthesis".to_string(),
                )),
            }
        }
        ")" | "AND" => Err(ConverterError::LicenseExpression(format!(
            "unexpected token `{}`",
            token
        ))),
        identifier => Ok(License::leaf(identifier)),
    }
}

/// A person, with an optional (possibly empty) email address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub email: String,
}

/// An organization, used for document creators and package supplier/originator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub email: String,
}

/// A tool. Tools carry no email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
}

/// One entry in the document's creator list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creator {
    Person(Person),
    Organization(Organization),
    Tool(Tool),
}

impl Creator {
    pub fn name(&self) -> &str {
        match self {
            Creator::Person(p) => &p.name,
            Creator::Organization(o) => &o.name,
            Creator::Tool(t) => &t.name,
        }
    }
}

/// Document creation metadata: a timestamp plus an ordered creator list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationInfo {
    pub created: NaiveDateTime,
    pub creators: Vec<Creator>,
}

/// A checksum pair. The algorithm travels verbatim (e.g. `SHA1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub algorithm: String,
    pub value: String,
}

/// A review of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub reviewer: Person,
    pub review_date: NaiveDateTime,
    pub comment: Option<String>,
}

/// An annotation attached to an SPDX element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub spdx_id: String,
    pub comment: String,
    pub annotation_type: String,
    pub date: NaiveDateTime,
    pub annotator: Person,
}

/// An external reference attached to the package (e.g. a purl or CPE).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPackageRef {
    pub category: String,
    pub locator: String,
    pub ref_type: String,
    pub comment: Option<String>,
}

/// A file contained in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxFile {
    pub name: String,
    pub file_type: String,
    pub spdx_id: String,
    pub license_comment: String,
    pub license_concluded: License,
    pub licenses_in_file: Vec<License>,
    pub copyright: String,
    pub comment: String,
    pub checksum: Checksum,
}

/// A snippet of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxSnippet {
    pub spdx_id: String,
    pub name: String,
    pub comment: String,
    pub copyright: String,
    pub from_file_id: String,
    pub license_comment: String,
    pub license_concluded: License,
    pub licenses_in_snippet: Vec<License>,
}

/// The single package described by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxPackage {
    pub name: String,
    pub spdx_id: String,
    pub version: String,
    pub download_location: String,
    pub summary: String,
    pub source_info: String,
    pub file_name: String,
    pub supplier: Organization,
    pub originator: Organization,
    pub checksum: Checksum,
    pub verification_code: String,
    pub description: String,
    pub comment: String,
    pub copyright: String,
    pub license_comment: String,
    pub license_declared: License,
    pub license_concluded: License,
    pub licenses_from_files: Vec<License>,
    pub external_refs: Vec<ExternalPackageRef>,
    pub files: Vec<SpdxFile>,
}

/// The top-level SPDX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxDocument {
    pub version: String,
    pub data_license: License,
    pub name: String,
    pub spdx_id: String,
    pub namespace: String,
    pub comment: String,
    pub creation_info: CreationInfo,
    pub reviews: Vec<Review>,
    pub annotations: Vec<Annotation>,
    pub package: SpdxPackage,
    pub snippets: Vec<SpdxSnippet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_license() {
        assert_eq!(
            License::parse_expression("MIT").unwrap(),
            License::leaf("MIT")
        );
    }

    #[test]
    fn test_parse_conjunction_is_left_associative() {
        let parsed = License::parse_expression("MIT AND Apache-2.0 AND GPL-2.0").unwrap();
        assert_eq!(
            parsed,
            License::Conjunction(
                Box::new(License::Conjunction(
                    Box::new(License::leaf("MIT")),
                    Box::new(License::leaf("Apache-2.0")),
                )),
                Box::new(License::leaf("GPL-2.0")),
            )
        );
    }

    #[test]
    fn test_parse_parenthesized_group() {
        let parsed = License::parse_expression("MIT AND (Apache-2.0 AND GPL-2.0)").unwrap();
        assert_eq!(
            parsed,
            License::Conjunction(
                Box::new(License::leaf("MIT")),
                Box::new(License::Conjunction(
                    Box::new(License::leaf("Apache-2.0")),
                    Box::new(License::leaf("GPL-2.0")),
                )),
            )
        );
    }

    #[test]
    fn test_expression_round_trip() {
        for expr in ["MIT", "MIT AND Apache-2.0", "(MIT AND Apache-2.0) AND GPL-2.0"] {
            let parsed = License::parse_expression(expr).unwrap();
            assert_eq!(License::parse_expression(&parsed.to_expression()).unwrap(), parsed);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_expressions() {
        assert!(License::parse_expression("").is_err());
        assert!(License::parse_expression("MIT AND").is_err());
        assert!(License::parse_expression("(MIT").is_err());
        assert!(License::parse_expression("AND MIT").is_err());
        assert!(License::parse_expression("MIT Apache-2.0").is_err());
    }

    #[test]
    fn test_identifier_joins_conjunctions() {
        let conj = License::Conjunction(
            Box::new(License::leaf("MIT")),
            Box::new(License::leaf("Apache-2.0")),
        );
        assert_eq!(conj.identifier(), "MIT AND Apache-2.0");
    }
}
