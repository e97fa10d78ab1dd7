// botoforge-server/src/lib.rs
// ============================================================================
// Module: Boto Forge Server
// Description: HTTP surface for the natural-language code generation pipeline.
// Purpose: Expose /generate and /health with request audit logging.
// Dependencies: axum, botoforge-config, botoforge-core, tokio
// ============================================================================

//! ## Overview
//! This crate exposes the narrowing pipeline over HTTP. Request bodies are
//! untrusted and size-capped; client input errors map to 400 responses while
//! pipeline failures map to 500 responses with a stable error shape. Every
//! `/generate` request emits one JSON-lines audit event.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::StderrAuditSink;
pub use audit::build_audit_sink;
pub use server::BotoForgeServer;
pub use server::ServerError;
