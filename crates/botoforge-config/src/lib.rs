// botoforge-config/src/lib.rs
// ============================================================================
// Module: Boto Forge Config Library
// Description: Canonical config model and fail-closed validation.
// Purpose: Single source of truth for botoforge.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `botoforge-config` defines the canonical configuration model for
//! Boto Forge. It provides strict, fail-closed validation: a missing,
//! oversized, or inconsistent configuration file refuses to load rather than
//! degrading to partial defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
