//! Parses SPDX tag-value text into an `SpdxDocument`.
//!
//! Two stages: a lexer that folds `<text>...</text>` blocks into single
//! tag/value pairs, and a scoped builder that routes tags to the entity
//! currently being assembled (document header, review, annotation,
//! package, file or snippet). Unknown tags are skipped; the subset
//! understood here is exactly what the gateway mapping carries.

use crate::codec::parse_created;
use crate::errors::ConverterError;
use crate::models_spdx::{
    Annotation, Checksum, CreationInfo, Creator, ExternalPackageRef, License, Organization,
    Person, Review, SpdxDocument, SpdxFile, SpdxPackage, SpdxSnippet, Tool,
};
use chrono::NaiveDateTime;
use log::debug;

/// Parse a complete tag-value document.
pub fn parse(text: &str) -> Result<SpdxDocument, ConverterError> {
    let mut builder = DocumentBuilder::default();
    for tag_line in lex(text)? {
        builder.apply(tag_line)?;
    }
    builder.finish()
}

struct TagLine {
    line: usize,
    tag: String,
    value: String,
}

fn lex(text: &str) -> Result<Vec<TagLine>, ConverterError> {
    let mut out = Vec::new();
    let mut lines = text.lines().enumerate();
    while let Some((idx, raw)) = lines.next() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (tag, rest) = trimmed.split_once(':').ok_or_else(|| ConverterError::TagValue {
            line,
            message: format!("expected `Tag: value`, got `{}`", trimmed),
        })?;
        let mut value = rest.trim().to_string();
        if value.starts_with("<text>") {
            let body = value["<text>".len()..].to_string();
            value = match body.find("</text>") {
                Some(end) => body[..end].to_string(),
                None => fold_text_block(&body, &mut lines).ok_or(ConverterError::TagValue {
                    line,
                    message: "unterminated <text> block".to_string(),
                })?,
            };
        }
        out.push(TagLine {
            line,
            tag: tag.trim().to_string(),
            value,
        });
    }
    Ok(out)
}

fn fold_text_block<'a>(
    first: &str,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Option<String> {
    let mut buf = first.to_string();
    for (_, raw) in lines {
        match raw.find("</text>") {
            Some(end) => {
                buf.push('\n');
                buf.push_str(&raw[..end]);
                return Some(buf);
            }
            None => {
                buf.push('\n');
                buf.push_str(raw);
            }
        }
    }
    None
}

/// Split an entity value such as `Person: Jane Doe (jane@example.com)`
/// into kind, name and email. A missing or empty parenthesized suffix
/// yields an empty email.
fn split_entity(value: &str, line: usize) -> Result<(String, String, String), ConverterError> {
    let (kind, rest) = value.split_once(':').ok_or_else(|| ConverterError::TagValue {
        line,
        message: format!("expected `Kind: name`, got `{}`", value),
    })?;
    let rest = rest.trim();
    let (name, email) = match rest.rfind(" (") {
        Some(pos) if rest.ends_with(')') => (
            rest[..pos].to_string(),
            rest[pos + 2..rest.len() - 1].to_string(),
        ),
        _ => (rest.to_string(), String::new()),
    };
    Ok((kind.trim().to_string(), name, email))
}

fn split_checksum(value: &str, line: usize) -> Result<Checksum, ConverterError> {
    let (algorithm, digest) = value.split_once(':').ok_or_else(|| ConverterError::TagValue {
        line,
        message: format!("expected `ALGORITHM: digest`, got `{}`", value),
    })?;
    Ok(Checksum {
        algorithm: algorithm.trim().to_string(),
        value: digest.trim().to_string(),
    })
}

fn parse_license(value: &str, line: usize) -> Result<License, ConverterError> {
    License::parse_expression(value).map_err(|e| ConverterError::TagValue {
        line,
        message: e.to_string(),
    })
}

fn parse_date(value: &str, line: usize) -> Result<NaiveDateTime, ConverterError> {
    parse_created(value, "Created").map_err(|_| ConverterError::TagValue {
        line,
        message: format!("invalid timestamp `{}`", value),
    })
}

#[derive(Default)]
enum Scope {
    #[default]
    Document,
    Package,
    File,
    Snippet,
}

#[derive(Default)]
struct ReviewBuilder {
    reviewer: Person,
    date: Option<NaiveDateTime>,
    comment: Option<String>,
}

#[derive(Default)]
struct AnnotationBuilder {
    annotator: Person,
    date: Option<NaiveDateTime>,
    annotation_type: String,
    spdx_id: String,
    comment: String,
}

struct PackageBuilder {
    package: SpdxPackage,
    declared: Option<License>,
    concluded: Option<License>,
}

impl Default for PackageBuilder {
    fn default() -> Self {
        PackageBuilder {
            package: SpdxPackage {
                name: String::new(),
                spdx_id: String::new(),
                version: String::new(),
                download_location: String::new(),
                summary: String::new(),
                source_info: String::new(),
                file_name: String::new(),
                supplier: Organization {
                    name: String::new(),
                    email: String::new(),
                },
                originator: Organization {
                    name: String::new(),
                    email: String::new(),
                },
                checksum: Checksum {
                    algorithm: String::new(),
                    value: String::new(),
                },
                verification_code: String::new(),
                description: String::new(),
                comment: String::new(),
                copyright: String::new(),
                license_comment: String::new(),
                license_declared: License::leaf("NOASSERTION"),
                license_concluded: License::leaf("NOASSERTION"),
                licenses_from_files: Vec::new(),
                external_refs: Vec::new(),
                files: Vec::new(),
            },
            declared: None,
            concluded: None,
        }
    }
}

#[derive(Default)]
struct DocumentBuilder {
    version: Option<String>,
    data_license: Option<License>,
    name: Option<String>,
    spdx_id: String,
    namespace: String,
    comment: String,
    created: Option<NaiveDateTime>,
    creators: Vec<Creator>,
    reviews: Vec<ReviewBuilder>,
    annotations: Vec<AnnotationBuilder>,
    package: Option<PackageBuilder>,
    files: Vec<SpdxFile>,
    snippets: Vec<SnippetBuilder>,
    scope: Scope,
}

struct SnippetBuilder {
    snippet: SpdxSnippet,
    concluded: Option<License>,
}

impl DocumentBuilder {
    fn apply(&mut self, tag_line: TagLine) -> Result<(), ConverterError> {
        let TagLine { line, tag, value } = tag_line;
        match tag.as_str() {
            // --- document header ---
            "SPDXVersion" => self.version = Some(value),
            "DataLicense" => self.data_license = Some(parse_license(&value, line)?),
            "DocumentName" => self.name = Some(value),
            "DocumentNamespace" => self.namespace = value,
            "DocumentComment" => self.comment = value,
            "Created" => self.created = Some(parse_date(&value, line)?),
            "Creator" => {
                let (kind, name, email) = split_entity(&value, line)?;
                let creator = match kind.as_str() {
                    "Person" => Creator::Person(Person { name, email }),
                    "Organization" => Creator::Organization(Organization { name, email }),
                    "Tool" => Creator::Tool(Tool { name }),
                    other => {
                        return Err(ConverterError::TagValue {
                            line,
                            message: format!("unknown creator kind `{}`", other),
                        });
                    }
                };
                self.creators.push(creator);
            }

            // --- reviews ---
            "Reviewer" => {
                let (_, name, email) = split_entity(&value, line)?;
                self.reviews.push(ReviewBuilder {
                    reviewer: Person { name, email },
                    ..Default::default()
                });
            }
            "ReviewDate" => {
                let date = parse_date(&value, line)?;
                self.current_review(line, &tag)?.date = Some(date);
            }
            "ReviewComment" => {
                self.current_review(line, &tag)?.comment = Some(value);
            }

            // --- annotations ---
            "Annotator" => {
                let (_, name, email) = split_entity(&value, line)?;
                self.annotations.push(AnnotationBuilder {
                    annotator: Person { name, email },
                    ..Default::default()
                });
            }
            "AnnotationDate" => {
                let date = parse_date(&value, line)?;
                self.current_annotation(line, &tag)?.date = Some(date);
            }
            "AnnotationType" => self.current_annotation(line, &tag)?.annotation_type = value,
            "SPDXREF" => self.current_annotation(line, &tag)?.spdx_id = value,
            "AnnotationComment" => self.current_annotation(line, &tag)?.comment = value,

            // --- scope switches ---
            "PackageName" => {
                if self.package.is_some() {
                    return Err(ConverterError::TagValue {
                        line,
                        message: "only one package per document is supported".to_string(),
                    });
                }
                let mut package = PackageBuilder::default();
                package.package.name = value;
                self.package = Some(package);
                self.scope = Scope::Package;
            }
            "FileName" => {
                self.files.push(SpdxFile {
                    name: value,
                    file_type: String::new(),
                    spdx_id: String::new(),
                    license_comment: String::new(),
                    license_concluded: License::leaf("NOASSERTION"),
                    licenses_in_file: Vec::new(),
                    copyright: String::new(),
                    comment: String::new(),
                    checksum: Checksum {
                        algorithm: String::new(),
                        value: String::new(),
                    },
                });
                self.scope = Scope::File;
            }
            "SnippetSPDXID" => {
                self.snippets.push(SnippetBuilder {
                    snippet: SpdxSnippet {
                        spdx_id: value,
                        name: String::new(),
                        comment: String::new(),
                        copyright: String::new(),
                        from_file_id: String::new(),
                        license_comment: String::new(),
                        license_concluded: License::leaf("NOASSERTION"),
                        licenses_in_snippet: Vec::new(),
                    },
                    concluded: None,
                });
                self.scope = Scope::Snippet;
            }

            // --- scope-dependent id ---
            "SPDXID" => match self.scope {
                Scope::Document => self.spdx_id = value,
                Scope::Package => self.current_package(line, &tag)?.package.spdx_id = value,
                Scope::File => self.current_file(line, &tag)?.spdx_id = value,
                // Snippets carry their id in SnippetSPDXID.
                Scope::Snippet => debug!("Skipping SPDXID inside snippet at line {}", line),
            },

            // --- package fields ---
            "PackageVersion" => self.current_package(line, &tag)?.package.version = value,
            "PackageFileName" => self.current_package(line, &tag)?.package.file_name = value,
            "PackageDownloadLocation" => {
                self.current_package(line, &tag)?.package.download_location = value
            }
            "PackageVerificationCode" => {
                self.current_package(line, &tag)?.package.verification_code = value
            }
            "PackageSummary" => self.current_package(line, &tag)?.package.summary = value,
            "PackageSourceInfo" => self.current_package(line, &tag)?.package.source_info = value,
            "PackageDescription" => self.current_package(line, &tag)?.package.description = value,
            "PackageComment" => self.current_package(line, &tag)?.package.comment = value,
            "PackageCopyrightText" => self.current_package(line, &tag)?.package.copyright = value,
            "PackageSupplier" => {
                let (_, name, email) = split_entity(&value, line)?;
                self.current_package(line, &tag)?.package.supplier = Organization { name, email };
            }
            "PackageOriginator" => {
                let (_, name, email) = split_entity(&value, line)?;
                self.current_package(line, &tag)?.package.originator = Organization { name, email };
            }
            "PackageChecksum" => {
                let checksum = split_checksum(&value, line)?;
                self.current_package(line, &tag)?.package.checksum = checksum;
            }
            "PackageLicenseDeclared" => {
                let license = parse_license(&value, line)?;
                self.current_package(line, &tag)?.declared = Some(license);
            }
            "PackageLicenseConcluded" => {
                let license = parse_license(&value, line)?;
                self.current_package(line, &tag)?.concluded = Some(license);
            }
            "PackageLicenseInfoFromFiles" => {
                let license = parse_license(&value, line)?;
                self.current_package(line, &tag)?
                    .package
                    .licenses_from_files
                    .push(license);
            }
            "PackageLicenseComments" => {
                self.current_package(line, &tag)?.package.license_comment = value
            }
            "ExternalRef" => {
                let mut parts = value.split_whitespace();
                let (category, ref_type, locator) =
                    match (parts.next(), parts.next(), parts.next()) {
                        (Some(c), Some(t), Some(l)) => {
                            (c.to_string(), t.to_string(), l.to_string())
                        }
                        _ => {
                            return Err(ConverterError::TagValue {
                                line,
                                message: format!(
                                    "expected `ExternalRef: <category> <type> <locator>`, got `{}`",
                                    value
                                ),
                            });
                        }
                    };
                self.current_package(line, &tag)?
                    .package
                    .external_refs
                    .push(ExternalPackageRef {
                        category,
                        locator,
                        ref_type,
                        comment: None,
                    });
            }
            "ExternalRefComment" => {
                let package = self.current_package(line, &tag)?;
                let pkgref = package.package.external_refs.last_mut().ok_or_else(|| {
                    ConverterError::TagValue {
                        line,
                        message: "ExternalRefComment before any ExternalRef".to_string(),
                    }
                })?;
                pkgref.comment = Some(value);
            }

            // --- file fields ---
            "FileType" => self.current_file(line, &tag)?.file_type = value,
            "FileChecksum" => {
                let checksum = split_checksum(&value, line)?;
                self.current_file(line, &tag)?.checksum = checksum;
            }
            "LicenseConcluded" => {
                let license = parse_license(&value, line)?;
                self.current_file(line, &tag)?.license_concluded = license;
            }
            "LicenseInfoInFile" => {
                let license = parse_license(&value, line)?;
                self.current_file(line, &tag)?.licenses_in_file.push(license);
            }
            "LicenseComments" => self.current_file(line, &tag)?.license_comment = value,
            "FileCopyrightText" => self.current_file(line, &tag)?.copyright = value,
            "FileComment" => self.current_file(line, &tag)?.comment = value,

            // --- snippet fields ---
            "SnippetName" => self.current_snippet(line, &tag)?.snippet.name = value,
            "SnippetComment" => self.current_snippet(line, &tag)?.snippet.comment = value,
            "SnippetCopyrightText" => self.current_snippet(line, &tag)?.snippet.copyright = value,
            "SnippetFromFileSPDXID" => {
                self.current_snippet(line, &tag)?.snippet.from_file_id = value
            }
            "SnippetLicenseComments" => {
                self.current_snippet(line, &tag)?.snippet.license_comment = value
            }
            "SnippetLicenseConcluded" => {
                let license = parse_license(&value, line)?;
                self.current_snippet(line, &tag)?.concluded = Some(license);
            }
            "LicenseInfoInSnippet" => {
                let license = parse_license(&value, line)?;
                self.current_snippet(line, &tag)?
                    .snippet
                    .licenses_in_snippet
                    .push(license);
            }

            other => debug!("Skipping unsupported tag `{}` at line {}", other, line),
        }
        Ok(())
    }

    fn current_review(
        &mut self,
        line: usize,
        tag: &str,
    ) -> Result<&mut ReviewBuilder, ConverterError> {
        self.reviews.last_mut().ok_or_else(|| ConverterError::TagValue {
            line,
            message: format!("`{}` before any Reviewer", tag),
        })
    }

    fn current_annotation(
        &mut self,
        line: usize,
        tag: &str,
    ) -> Result<&mut AnnotationBuilder, ConverterError> {
        self.annotations
            .last_mut()
            .ok_or_else(|| ConverterError::TagValue {
                line,
                message: format!("`{}` before any Annotator", tag),
            })
    }

    fn current_package(
        &mut self,
        line: usize,
        tag: &str,
    ) -> Result<&mut PackageBuilder, ConverterError> {
        self.package.as_mut().ok_or_else(|| ConverterError::TagValue {
            line,
            message: format!("`{}` before PackageName", tag),
        })
    }

    fn current_file(&mut self, line: usize, tag: &str) -> Result<&mut SpdxFile, ConverterError> {
        self.files.last_mut().ok_or_else(|| ConverterError::TagValue {
            line,
            message: format!("`{}` before any FileName", tag),
        })
    }

    fn current_snippet(
        &mut self,
        line: usize,
        tag: &str,
    ) -> Result<&mut SnippetBuilder, ConverterError> {
        self.snippets
            .last_mut()
            .ok_or_else(|| ConverterError::TagValue {
                line,
                message: format!("`{}` before any SnippetSPDXID", tag),
            })
    }

    fn finish(self) -> Result<SpdxDocument, ConverterError> {
        let missing = |tag: &str| ConverterError::TagValue {
            line: 0,
            message: format!("required tag `{}` not found", tag),
        };

        let version = self.version.ok_or_else(|| missing("SPDXVersion"))?;
        let name = self.name.ok_or_else(|| missing("DocumentName"))?;
        let created = self.created.ok_or_else(|| missing("Created"))?;
        let package_builder = self.package.ok_or_else(|| missing("PackageName"))?;

        let mut package = package_builder.package;
        if let Some(declared) = package_builder.declared {
            package.license_declared = declared;
        }
        if let Some(concluded) = package_builder.concluded {
            package.license_concluded = concluded;
        }
        package.files = self.files;

        let reviews = self
            .reviews
            .into_iter()
            .map(|r| {
                Ok(Review {
                    reviewer: r.reviewer,
                    review_date: r.date.ok_or_else(|| missing("ReviewDate"))?,
                    comment: r.comment,
                })
            })
            .collect::<Result<Vec<_>, ConverterError>>()?;

        let annotations = self
            .annotations
            .into_iter()
            .map(|a| {
                Ok(Annotation {
                    spdx_id: a.spdx_id,
                    comment: a.comment,
                    annotation_type: a.annotation_type,
                    date: a.date.ok_or_else(|| missing("AnnotationDate"))?,
                    annotator: a.annotator,
                })
            })
            .collect::<Result<Vec<_>, ConverterError>>()?;

        let snippets = self
            .snippets
            .into_iter()
            .map(|s| {
                let mut snippet = s.snippet;
                if let Some(concluded) = s.concluded {
                    snippet.license_concluded = concluded;
                }
                snippet
            })
            .collect();

        Ok(SpdxDocument {
            version,
            data_license: self
                .data_license
                .unwrap_or_else(|| License::leaf("NOASSERTION")),
            name,
            spdx_id: self.spdx_id,
            namespace: self.namespace,
            comment: self.comment,
            creation_info: CreationInfo {
                created,
                creators: self.creators,
            },
            reviews,
            annotations,
            package,
            snippets,
        })
    }
}
