// crates/botoforge-server/tests/server_build.rs
// ============================================================================
// Module: Server Build Tests
// Description: End-to-end construction of the server from configuration.
// Purpose: Ensure real store and provider types wire through the server.
// ============================================================================

//! ## Overview
//! Builds a [`BotoForgeServer`] from a default configuration, a JSON corpus
//! on disk, and a scripted completion service, verifying the audit sink
//! selection and router construction paths.

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

use std::io::Write;

use botoforge_config::AuditSinkKind;
use botoforge_config::BotoForgeConfig;
use botoforge_providers::ScriptedCompletionService;
use botoforge_server::BotoForgeServer;
use botoforge_store_json::JsonDocumentationStore;
use tempfile::NamedTempFile;

/// Verifies the server wires real dependencies from configuration.
#[test]
fn server_builds_from_config_with_real_store() {
    let mut corpus = NamedTempFile::new().expect("temp corpus");
    corpus
        .write_all(br#"{"services": {"S3": {"methods": {}}}}"#)
        .expect("write corpus");

    let mut config = BotoForgeConfig::default();
    config.audit.sink = AuditSinkKind::None;
    let store = JsonDocumentationStore::new(corpus.path(), config.store.max_corpus_bytes)
        .expect("store");
    let completion = ScriptedCompletionService::with_texts(&[]);

    let server = BotoForgeServer::new(&config, store, completion).expect("server");
    let _router = server.router();
}

/// Verifies a file audit sink requires its path at construction.
#[test]
fn server_rejects_file_audit_sink_without_path() {
    let mut corpus = NamedTempFile::new().expect("temp corpus");
    corpus.write_all(br#"{"services": {}}"#).expect("write corpus");

    let mut config = BotoForgeConfig::default();
    config.audit.sink = AuditSinkKind::File;
    config.audit.path = None;
    let store = JsonDocumentationStore::new(corpus.path(), config.store.max_corpus_bytes)
        .expect("store");
    let completion = ScriptedCompletionService::with_texts(&[]);

    assert!(BotoForgeServer::new(&config, store, completion).is_err());
}
