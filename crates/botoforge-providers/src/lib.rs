// botoforge-providers/src/lib.rs
// ============================================================================
// Module: Boto Forge Providers
// Description: Completion service implementations for the narrowing pipeline.
// Purpose: Provide the Gemini HTTP client and a scripted fake for tests.
// Dependencies: botoforge-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the [`botoforge_core::CompletionService`] implementations:
//! a blocking Gemini `generateContent` client with strict transport limits,
//! and an in-memory scripted service for deterministic tests. Completion
//! responses are untrusted; both implementations fail closed on missing or
//! malformed data.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod gemini;
pub mod scripted;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use gemini::GeminiCompletionConfig;
pub use gemini::GeminiCompletionService;
pub use scripted::ScriptedCompletionService;
