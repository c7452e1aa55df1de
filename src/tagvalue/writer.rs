//! Serializes an `SpdxDocument` back into tag-value text.
//!
//! Free-text fields are wrapped in `<text>...</text>` blocks; empty
//! optional fields are skipped entirely so a written file round-trips
//! through the parser without phantom tags.

use crate::codec::format_created;
use crate::errors::ConverterError;
use crate::models_spdx::{
    Annotation, Review, SpdxDocument, SpdxFile, SpdxPackage, SpdxSnippet,
};
use std::io::Write;

use super::render_entity;

pub fn write_document<W: Write>(
    document: &SpdxDocument,
    out: &mut W,
) -> Result<(), ConverterError> {
    write_header(document, out)?;
    for review in &document.reviews {
        write_review(review, out)?;
    }
    for annotation in &document.annotations {
        write_annotation(annotation, out)?;
    }
    write_package(&document.package, out)?;
    for file in &document.package.files {
        write_file(file, out)?;
    }
    for snippet in &document.snippets {
        write_snippet(snippet, out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_header<W: Write>(document: &SpdxDocument, out: &mut W) -> Result<(), ConverterError> {
    writeln!(out, "SPDXVersion: {}", document.version)?;
    writeln!(out, "DataLicense: {}", document.data_license.to_expression())?;
    writeln!(out, "SPDXID: {}", document.spdx_id)?;
    writeln!(out, "DocumentName: {}", document.name)?;
    tag(out, "DocumentNamespace", &document.namespace)?;
    text_tag(out, "DocumentComment", &document.comment)?;
    for creator in &document.creation_info.creators {
        let value = match creator {
            crate::models_spdx::Creator::Person(p) => render_entity("Person", &p.name, &p.email),
            crate::models_spdx::Creator::Organization(o) => {
                render_entity("Organization", &o.name, &o.email)
            }
            crate::models_spdx::Creator::Tool(t) => format!("Tool: {}", t.name),
        };
        writeln!(out, "Creator: {}", value)?;
    }
    writeln!(
        out,
        "Created: {}",
        format_created(&document.creation_info.created)
    )?;
    writeln!(out)?;
    Ok(())
}

fn write_review<W: Write>(review: &Review, out: &mut W) -> Result<(), ConverterError> {
    writeln!(
        out,
        "Reviewer: {}",
        render_entity("Person", &review.reviewer.name, &review.reviewer.email)
    )?;
    writeln!(out, "ReviewDate: {}", format_created(&review.review_date))?;
    if let Some(comment) = &review.comment {
        text_tag(out, "ReviewComment", comment)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_annotation<W: Write>(annotation: &Annotation, out: &mut W) -> Result<(), ConverterError> {
    writeln!(
        out,
        "Annotator: {}",
        render_entity(
            "Person",
            &annotation.annotator.name,
            &annotation.annotator.email
        )
    )?;
    writeln!(out, "AnnotationDate: {}", format_created(&annotation.date))?;
    tag(out, "AnnotationType", &annotation.annotation_type)?;
    tag(out, "SPDXREF", &annotation.spdx_id)?;
    text_tag(out, "AnnotationComment", &annotation.comment)?;
    writeln!(out)?;
    Ok(())
}

fn write_package<W: Write>(package: &SpdxPackage, out: &mut W) -> Result<(), ConverterError> {
    writeln!(out, "PackageName: {}", package.name)?;
    tag(out, "SPDXID", &package.spdx_id)?;
    tag(out, "PackageVersion", &package.version)?;
    tag(out, "PackageFileName", &package.file_name)?;
    if !package.supplier.name.is_empty() {
        writeln!(
            out,
            "PackageSupplier: {}",
            render_entity("Organization", &package.supplier.name, &package.supplier.email)
        )?;
    }
    if !package.originator.name.is_empty() {
        writeln!(
            out,
            "PackageOriginator: {}",
            render_entity(
                "Organization",
                &package.originator.name,
                &package.originator.email
            )
        )?;
    }
    tag(out, "PackageDownloadLocation", &package.download_location)?;
    tag(out, "PackageVerificationCode", &package.verification_code)?;
    if !package.checksum.value.is_empty() {
        writeln!(
            out,
            "PackageChecksum: {}: {}",
            package.checksum.algorithm, package.checksum.value
        )?;
    }
    text_tag(out, "PackageSummary", &package.summary)?;
    text_tag(out, "PackageSourceInfo", &package.source_info)?;
    text_tag(out, "PackageDescription", &package.description)?;
    writeln!(
        out,
        "PackageLicenseDeclared: {}",
        package.license_declared.to_expression()
    )?;
    writeln!(
        out,
        "PackageLicenseConcluded: {}",
        package.license_concluded.to_expression()
    )?;
    for license in &package.licenses_from_files {
        writeln!(out, "PackageLicenseInfoFromFiles: {}", license.to_expression())?;
    }
    text_tag(out, "PackageLicenseComments", &package.license_comment)?;
    text_tag(out, "PackageCopyrightText", &package.copyright)?;
    text_tag(out, "PackageComment", &package.comment)?;
    for pkgref in &package.external_refs {
        writeln!(
            out,
            "ExternalRef: {} {} {}",
            pkgref.category, pkgref.ref_type, pkgref.locator
        )?;
        if let Some(comment) = &pkgref.comment {
            text_tag(out, "ExternalRefComment", comment)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_file<W: Write>(file: &SpdxFile, out: &mut W) -> Result<(), ConverterError> {
    writeln!(out, "FileName: {}", file.name)?;
    tag(out, "SPDXID", &file.spdx_id)?;
    tag(out, "FileType", &file.file_type)?;
    if !file.checksum.value.is_empty() {
        writeln!(
            out,
            "FileChecksum: {}: {}",
            file.checksum.algorithm, file.checksum.value
        )?;
    }
    writeln!(
        out,
        "LicenseConcluded: {}",
        file.license_concluded.to_expression()
    )?;
    for license in &file.licenses_in_file {
        writeln!(out, "LicenseInfoInFile: {}", license.to_expression())?;
    }
    text_tag(out, "LicenseComments", &file.license_comment)?;
    text_tag(out, "FileCopyrightText", &file.copyright)?;
    text_tag(out, "FileComment", &file.comment)?;
    writeln!(out)?;
    Ok(())
}

fn write_snippet<W: Write>(snippet: &SpdxSnippet, out: &mut W) -> Result<(), ConverterError> {
    writeln!(out, "SnippetSPDXID: {}", snippet.spdx_id)?;
    tag(out, "SnippetName", &snippet.name)?;
    tag(out, "SnippetFromFileSPDXID", &snippet.from_file_id)?;
    writeln!(
        out,
        "SnippetLicenseConcluded: {}",
        snippet.license_concluded.to_expression()
    )?;
    for license in &snippet.licenses_in_snippet {
        writeln!(out, "LicenseInfoInSnippet: {}", license.to_expression())?;
    }
    text_tag(out, "SnippetLicenseComments", &snippet.license_comment)?;
    text_tag(out, "SnippetCopyrightText", &snippet.copyright)?;
    text_tag(out, "SnippetComment", &snippet.comment)?;
    writeln!(out)?;
    Ok(())
}

/// Plain tag, skipped when the value is empty.
fn tag<W: Write>(out: &mut W, name: &str, value: &str) -> Result<(), ConverterError> {
    if !value.is_empty() {
        writeln!(out, "{}: {}", name, value)?;
    }
    Ok(())
}

/// Free-text tag wrapped in `<text>` markers, skipped when empty.
fn text_tag<W: Write>(out: &mut W, name: &str, value: &str) -> Result<(), ConverterError> {
    if !value.is_empty() {
        writeln!(out, "{}: <text>{}</text>", name, value)?;
    }
    Ok(())
}
