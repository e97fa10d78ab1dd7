// botoforge-core/src/core/mod.rs
// ============================================================================
// Module: Boto Forge Core Types
// Description: Data model for the documentation corpus and narrowing results.
// Purpose: Provide the shared types consumed by interfaces and the runtime.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe the scraped boto3 documentation corpus and the
//! intermediate results produced while narrowing it. They carry no I/O and no
//! model-provider details; those live behind the crate interfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod identifiers;
pub mod selection;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::MethodDoc;
pub use catalog::ServiceCatalog;
pub use catalog::ServiceEntry;
pub use identifiers::MethodName;
pub use identifiers::ServiceName;
pub use selection::MethodsByService;
pub use selection::SelectionParseError;
pub use selection::SelectionResult;
