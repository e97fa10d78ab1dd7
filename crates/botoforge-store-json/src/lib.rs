// botoforge-store-json/src/lib.rs
// ============================================================================
// Module: Boto Forge JSON Store Library
// Description: DocumentationStore backed by a scraped boto3 JSON corpus.
// Purpose: Load the service catalog fresh from disk on every request.
// Dependencies: botoforge-core, serde_json
// ============================================================================

//! ## Overview
//! `botoforge-store-json` implements the [`botoforge_core::DocumentationStore`]
//! interface over a JSON corpus file on disk. The corpus is re-read on every
//! load so edits take effect without a restart. Corpus contents are untrusted;
//! loads fail closed on oversized, non-UTF-8, or malformed data.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::*;
