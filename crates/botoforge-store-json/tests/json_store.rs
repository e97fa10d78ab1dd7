// crates/botoforge-store-json/tests/json_store.rs
// ============================================================================
// Module: JSON Store Tests
// Description: Corpus loading, limits, and failure taxonomy coverage.
// Purpose: Ensure the store is fail-closed and reads fresh per load.
// ============================================================================

//! ## Overview
//! Tests for JSON corpus loading:
//! - Catalog decoding and unknown-field tolerance
//! - Fresh-per-load semantics (no caching)
//! - Size, encoding, and shape guards
//! - Constructor path safety checks

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::io::Write;

use botoforge_core::DocumentationStore;
use botoforge_core::StoreError;
use botoforge_store_json::JsonDocumentationStore;
use tempfile::NamedTempFile;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const LIMIT: usize = 64 * 1024;

fn corpus_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp corpus");
    file.write_all(content.as_bytes()).expect("write corpus");
    file
}

fn sample_corpus() -> &'static str {
    r#"{
        "services": {
            "S3": {
                "methods": {
                    "create_bucket": {
                        "description": "Creates a new S3 bucket.",
                        "syntax": "response = client.create_bucket(Bucket='string')",
                        "parameters": {"Bucket": "string"},
                        "returns": "dict",
                        "examples": ["client.create_bucket(Bucket='my-bucket')"]
                    }
                }
            },
            "DynamoDB": {
                "methods": {
                    "create_table": {
                        "description": "Creates a new DynamoDB table."
                    }
                }
            }
        }
    }"#
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies a well-formed corpus decodes into the catalog.
#[test]
fn load_decodes_catalog() {
    let file = corpus_file(sample_corpus());
    let store = JsonDocumentationStore::new(file.path(), LIMIT).expect("store");

    let catalog = store.load().expect("load");
    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains_service(&"S3".into()));
    assert!(catalog.contains_service(&"DynamoDB".into()));
    let methods = catalog.method_names(&"S3".into()).expect("S3 methods");
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].as_str(), "create_bucket");
    let doc = catalog
        .method_doc(&"S3".into(), &"create_bucket".into())
        .expect("create_bucket doc");
    assert_eq!(doc.description, "Creates a new S3 bucket.");
    assert_eq!(doc.examples.len(), 1);
}

/// Verifies unknown fields at every level are ignored.
#[test]
fn load_ignores_unknown_fields() {
    let file = corpus_file(
        r#"{
            "version": 3,
            "services": {
                "S3": {
                    "region_notes": "global",
                    "methods": {
                        "create_bucket": {
                            "description": "Creates a bucket.",
                            "deprecated": false
                        }
                    }
                }
            }
        }"#,
    );
    let store = JsonDocumentationStore::new(file.path(), LIMIT).expect("store");

    let catalog = store.load().expect("load");
    assert_eq!(catalog.len(), 1);
    let doc = catalog
        .method_doc(&"S3".into(), &"create_bucket".into())
        .expect("create_bucket doc");
    assert_eq!(doc.description, "Creates a bucket.");
}

/// Verifies each load re-reads the corpus from disk.
#[test]
fn load_reads_fresh_per_call() {
    let file = corpus_file(r#"{"services": {"S3": {"methods": {}}}}"#);
    let store = JsonDocumentationStore::new(file.path(), LIMIT).expect("store");

    let first = store.load().expect("first load");
    assert_eq!(first.len(), 1);

    fs::write(
        file.path(),
        r#"{"services": {"S3": {"methods": {}}, "EC2": {"methods": {}}}}"#,
    )
    .expect("rewrite corpus");

    let second = store.load().expect("second load");
    assert_eq!(second.len(), 2);
    assert!(second.contains_service(&"EC2".into()));
}

/// Verifies a missing corpus surfaces as an io error.
#[test]
fn load_reports_missing_corpus_as_io() {
    let directory = TempDir::new().expect("temp dir");
    let path = directory.path().join("absent.json");
    let store = JsonDocumentationStore::new(path, LIMIT).expect("store");

    let err = store.load().expect_err("missing corpus");
    assert!(matches!(err, StoreError::Io(_)));
}

/// Verifies the configured size limit is enforced.
#[test]
fn load_rejects_oversized_corpus() {
    let padding = " ".repeat(128);
    let file = corpus_file(&format!(r#"{{"services": {{}}}}{padding}"#));
    let store = JsonDocumentationStore::new(file.path(), 64).expect("store");

    let err = store.load().expect_err("oversized corpus");
    let StoreError::Invalid(message) = err else {
        panic!("expected invalid error");
    };
    assert!(message.contains("exceeds size limit"));
}

/// Verifies non-UTF-8 corpora are rejected.
#[test]
fn load_rejects_non_utf8_corpus() {
    let mut file = NamedTempFile::new().expect("temp corpus");
    file.write_all(&[0xFF, 0xFE, 0xFF]).expect("write bytes");
    let store = JsonDocumentationStore::new(file.path(), LIMIT).expect("store");

    let err = store.load().expect_err("non-utf8 corpus");
    let StoreError::Invalid(message) = err else {
        panic!("expected invalid error");
    };
    assert!(message.contains("utf-8"));
}

/// Verifies malformed JSON surfaces as a corpus error.
#[test]
fn load_rejects_malformed_json() {
    let file = corpus_file(r#"{"services": {"#);
    let store = JsonDocumentationStore::new(file.path(), LIMIT).expect("store");

    let err = store.load().expect_err("malformed corpus");
    assert!(matches!(err, StoreError::Corpus(_)));
}

/// Verifies shape mismatches surface as corpus errors.
#[test]
fn load_rejects_wrong_top_level_shape() {
    let file = corpus_file(r#"["S3", "DynamoDB"]"#);
    let store = JsonDocumentationStore::new(file.path(), LIMIT).expect("store");

    let err = store.load().expect_err("wrong shape");
    assert!(matches!(err, StoreError::Corpus(_)));
}

/// Verifies constructor path and limit guards.
#[test]
fn new_rejects_invalid_paths_and_limits() {
    let err = JsonDocumentationStore::new("", LIMIT).expect_err("empty path");
    assert!(matches!(err, StoreError::Invalid(_)));

    let long_component = "a".repeat(300);
    let err = JsonDocumentationStore::new(&long_component, LIMIT).expect_err("long component");
    assert!(matches!(err, StoreError::Invalid(_)));

    let long_path = "a/".repeat(4096);
    let err = JsonDocumentationStore::new(&long_path, LIMIT).expect_err("long path");
    assert!(matches!(err, StoreError::Invalid(_)));

    let directory = TempDir::new().expect("temp dir");
    let err =
        JsonDocumentationStore::new(directory.path(), LIMIT).expect_err("directory path");
    assert!(matches!(err, StoreError::Invalid(_)));

    let file = corpus_file(r#"{"services": {}}"#);
    let err = JsonDocumentationStore::new(file.path(), 0).expect_err("zero limit");
    assert!(matches!(err, StoreError::Invalid(_)));
}
