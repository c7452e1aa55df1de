//! SPDX tag-value boundary: plain-text `Tag: value` parsing and writing.
//!
//! This covers the subset of SPDX 2.1 tag-value that the gateway mapping
//! carries: the document header, creators, reviews, annotations, one
//! package (with external refs, checksum and license tags), its files,
//! and snippets. Multi-line values use `<text>...</text>` folding;
//! license tags hold expressions parsed by
//! [`License::parse_expression`](crate::models_spdx::License).

pub mod parser;
pub mod writer;

pub use parser::parse;
pub use writer::write_document;

/// Shared rendering of a `Person`/`Organization`/`Tool` entity value,
/// e.g. `Person: Jane Doe (jane@example.com)`.
pub(crate) fn render_entity(kind: &str, name: &str, email: &str) -> String {
    if email.is_empty() {
        format!("{}: {}", kind, name)
    } else {
        format!("{}: {} ({})", kind, name, email)
    }
}
