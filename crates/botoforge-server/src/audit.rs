// botoforge-server/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: JSON-lines audit events for /generate requests.
// Purpose: Record request outcomes without leaking prompts or keys.
// Dependencies: botoforge-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit sinks receive one event per `/generate` request. Events carry the
//! outcome label and result counts only; queries, prompts, and generated code
//! never enter the audit stream. Sink writes are best effort and must not
//! fail the request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use botoforge_config::AuditConfig;
use botoforge_config::AuditSinkKind;
use serde::Serialize;

use crate::server::ServerError;

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Request audit event payload.
///
/// # Invariants
/// - Optional fields are `None` when the metadata is unavailable.
/// - Payloads never contain queries, prompts, or generated code.
#[derive(Debug, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Outcome label for the request.
    pub outcome: &'static str,
    /// Number of services selected.
    pub services: usize,
    /// Number of methods selected across all services.
    pub methods: usize,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Event time as milliseconds since the Unix epoch.
    pub unix_time_ms: u128,
}

impl RequestAuditEvent {
    /// Builds an event with the current wall-clock time.
    #[must_use]
    pub fn new(
        outcome: &'static str,
        services: usize,
        methods: usize,
        error_kind: Option<&'static str>,
    ) -> Self {
        let unix_time_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis())
            .unwrap_or_default();
        Self {
            event: "generate_request",
            outcome,
            services,
            methods,
            error_kind,
            unix_time_ms,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink for request audit events.
pub trait AuditSink: Send + Sync {
    /// Records a request audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    #[allow(clippy::print_stderr, reason = "Stderr output is this sink's contract.")]
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Append-mode handle to the audit log.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log for appending, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, ServerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| ServerError::Config(format!("audit log open failed: {err}")))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
        }
    }
}

/// No-op audit sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns [`ServerError`] when the file sink cannot be opened or its path
/// is missing.
pub fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    match config.sink {
        AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditSinkKind::File => {
            let Some(path) = &config.path else {
                return Err(ServerError::Config("audit log path required".to_string()));
            };
            Ok(Arc::new(FileAuditSink::new(path)?))
        }
        AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn event_serializes_stable_fields() {
        let event = RequestAuditEvent::new("completed", 2, 3, None);
        let payload = serde_json::to_string(&event).expect("serialize");
        assert!(payload.contains("\"event\":\"generate_request\""));
        assert!(payload.contains("\"outcome\":\"completed\""));
        assert!(payload.contains("\"services\":2"));
        assert!(payload.contains("\"methods\":3"));
        assert!(payload.contains("\"error_kind\":null"));
    }

    #[test]
    fn file_sink_appends_one_line_per_event() {
        let file = tempfile::NamedTempFile::new().expect("temp log");
        let sink = FileAuditSink::new(file.path()).expect("sink");
        sink.record(&RequestAuditEvent::new("completed", 1, 1, None));
        sink.record(&RequestAuditEvent::new("error", 0, 0, Some("store")));

        let contents = std::fs::read_to_string(file.path()).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"outcome\":\"completed\""));
        assert!(lines[1].contains("\"error_kind\":\"store\""));
    }

    #[test]
    fn build_audit_sink_requires_path_for_file_kind() {
        let config = AuditConfig {
            sink: AuditSinkKind::File,
            path: None,
        };
        assert!(build_audit_sink(&config).is_err());
    }
}
