//! Integration tests for the spdx-dbom-bridge.
//!
//! These tests write SPDX tag-value files on the fly, stand up a mock
//! gateway with `httpmock`, and run the full binary executable against
//! both to ensure each pipeline works end-to-end.

// The nested asset fixture overflows the default json! expansion depth.
#![recursion_limit = "256"]

use assert_cmd::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs::{self, File};
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

// --- Helper Functions ---

/// Helper to get the binary command for testing.
fn get_cmd() -> Command {
    Command::cargo_bin("spdx-dbom-bridge").unwrap()
}

/// A minimal, valid SPDX 2.1 tag-value document.
fn get_test_tag_file() -> &'static str {
    "\
SPDXVersion: SPDX-2.1
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: left-pad-bom
DocumentNamespace: https://example.com/spdx/left-pad
Creator: Person: Ann
Creator: Organization: Acme
Creator: Tool: scanner-1
Created: 2021-03-01T09:30:00Z

PackageName: left-pad
SPDXID: SPDXRef-Package-left-pad
PackageVersion: 1.3.0
PackageFileName: left-pad-1.3.0.tgz
PackageSupplier: Organization: Acme Supply
PackageOriginator: Organization: Acme
PackageDownloadLocation: https://example.com/left-pad-1.3.0.tgz
PackageVerificationCode: d6a770ba38583ed4bb4525bd96e50461655d2758
PackageChecksum: SHA1: deadbeef
PackageDescription: <text>A padding utility</text>
PackageLicenseDeclared: MIT
PackageLicenseConcluded: MIT
PackageLicenseInfoFromFiles: MIT
PackageCopyrightText: <text>Copyright 2021 Acme</text>

FileName: index.js
SPDXID: SPDXRef-File-index
FileType: SOURCE
FileChecksum: SHA1: cafebabe
LicenseConcluded: MIT
LicenseInfoInFile: MIT
FileCopyrightText: <text>Copyright 2021 Acme</text>
"
}

/// A stored gateway asset matching what the exporter would have written
/// for the document above.
fn get_test_asset() -> serde_json::Value {
    let leaf_mit = json!({ "id": "MIT", "url": null, "name": null });
    json!({
        "documentName": "left-pad-bom",
        "documentCreator": "Ann, Acme, [Using: scanner-1]",
        "documentCreatedDate": "2021-03-01T09:30:00Z",
        "assetType": "SoftwareComponent",
        "assetSubType": "BuildArtifact",
        "assetManufacturer": "Acme [Acme Supply]",
        "assetModelNumber": "1.3.0",
        "assetDescription": "A padding utility",
        "manufactureSignature": "NOT SIGNED (DEMO)",
        "standardVersion": 1,
        "assetMetadata": {
            "reviews": [],
            "license": "MIT",
            "extrefs": [],
            "package": {
                "name": "left-pad",
                "id": "SPDXRef-Package-left-pad",
                "version": "1.3.0",
                "downloadLocation": "https://example.com/left-pad-1.3.0.tgz",
                "summary": "",
                "sourceInfo": "",
                "fileName": "left-pad-1.3.0.tgz",
                "supplierName": "Acme Supply",
                "supplierEmail": "",
                "originatorName": "Acme",
                "originatorEmail": "",
                "checksum": "deadbeef",
                "checksumAlgorithm": "SHA1",
                "verificationCode": "d6a770ba38583ed4bb4525bd96e50461655d2758",
                "description": "A padding utility",
                "comment": "",
                "copyright": "Copyright 2021 Acme",
                "license": {
                    "comment": "",
                    "declared": leaf_mit,
                    "concluded": leaf_mit,
                    "fromFile": [leaf_mit]
                },
                "files": [
                    {
                        "name": "index.js",
                        "type": "SOURCE",
                        "id": "SPDXRef-File-index",
                        "license": {
                            "comment": "",
                            "concluded": leaf_mit,
                            "fromFile": [leaf_mit]
                        },
                        "copyright": "Copyright 2021 Acme",
                        "comment": "",
                        "checksum": "cafebabe",
                        "checksumAlgorithm": "SHA1"
                    }
                ]
            },
            "id": "SPDXRef-DOCUMENT",
            "namespace": "https://example.com/spdx/left-pad",
            "comment": "",
            "dataLicense": { "id": "CC0-1.0", "url": null, "name": null },
            "annotations": [],
            "snippets": []
        }
    })
}

// --- Tests ---

#[test]
fn test_export_posts_asset_to_gateway() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.spdx");

    let mut input_file = File::create(&input_path).unwrap();
    input_file.write_all(get_test_tag_file().as_bytes()).unwrap();
    input_file.flush().unwrap();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/repo/repo1/chan/chan1/asset/SPDXRef-Package-left-pad")
            .header("content-type", "application/json");
        then.status(201).body("{\"success\": true}");
    });

    get_cmd()
        .arg("--gateway")
        .arg(server.base_url())
        .arg("--repo")
        .arg("repo1")
        .arg("--channel")
        .arg("chan1")
        .arg("--file")
        .arg(&input_path)
        .arg("--direction")
        .arg("spdx-to-dbom")
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_export_appends_idextra_to_asset_id() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.spdx");
    fs::write(&input_path, get_test_tag_file()).unwrap();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/repo/repo1/chan/chan1/asset/SPDXRef-Package-left-pad-test7");
        then.status(200).body("ok");
    });

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&input_path)
        .arg("-d")
        .arg("spdx-to-dbom")
        .arg("-i")
        .arg("test7")
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_export_surfaces_gateway_rejection() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.spdx");
    fs::write(&input_path, get_test_tag_file()).unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/repo/repo1/chan/chan1/asset/SPDXRef-Package-left-pad");
        then.status(500).body("channel does not exist");
    });

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&input_path)
        .arg("-d")
        .arg("spdx-to-dbom")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gateway returned HTTP 500"));
}

#[test]
fn test_import_writes_tag_file() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("output.spdx");

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/repo/repo1/chan/chan1/asset/SPDXRef-Package-left-pad");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(get_test_asset());
    });

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&output_path)
        .arg("-d")
        .arg("dbom-to-spdx")
        .arg("-a")
        .arg("SPDXRef-Package-left-pad")
        .assert()
        .success();

    mock.assert();

    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.contains("SPDXVersion: SPDX-2.1"));
    assert!(written.contains("DocumentName: left-pad-bom"));
    assert!(written.contains("Creator: Person: Ann"));
    assert!(written.contains("Creator: Tool: scanner-1"));
    assert!(written.contains("PackageName: left-pad"));
    assert!(written.contains("PackageChecksum: SHA1: deadbeef"));
    assert!(written.contains("FileName: index.js"));
}

#[test]
fn test_import_output_round_trips_through_export() {
    // An imported file must itself be a valid export input.
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("output.spdx");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/repo/repo1/chan/chan1/asset/SPDXRef-Package-left-pad");
        then.status(200).json_body(get_test_asset());
    });
    let post_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/repo/repo1/chan/chan1/asset/SPDXRef-Package-left-pad");
        then.status(201).body("ok");
    });

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&output_path)
        .arg("-d")
        .arg("dbom-to-spdx")
        .arg("-a")
        .arg("SPDXRef-Package-left-pad")
        .assert()
        .success();

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&output_path)
        .arg("-d")
        .arg("spdx-to-dbom")
        .assert()
        .success();

    post_mock.assert();
}

#[test]
fn test_import_without_asset_flag_fails() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("output.spdx");

    get_cmd()
        .arg("-g")
        .arg("http://localhost:1")
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&output_path)
        .arg("-d")
        .arg("dbom-to-spdx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--asset is required"));
}

#[test]
fn test_export_with_missing_input_file_fails() {
    let server = MockServer::start();

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg("/nonexistent/input.spdx")
        .arg("-d")
        .arg("spdx-to-dbom")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_export_with_malformed_tag_file_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("broken.spdx");
    fs::write(&input_path, "SPDXVersion: SPDX-2.1\nnot a tag line\n").unwrap();

    let server = MockServer::start();

    get_cmd()
        .arg("-g")
        .arg(server.base_url())
        .arg("-r")
        .arg("repo1")
        .arg("-c")
        .arg("chan1")
        .arg("-f")
        .arg(&input_path)
        .arg("-d")
        .arg("spdx-to-dbom")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_missing_required_args_fail() {
    get_cmd().assert().failure();
}
