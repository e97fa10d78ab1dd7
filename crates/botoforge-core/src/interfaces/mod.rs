// botoforge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Boto Forge Interfaces
// Description: Backend-agnostic interfaces for documentation and completions.
// Purpose: Define the contract surfaces used by the Boto Forge runtime.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Boto Forge integrates with external systems without
//! embedding backend-specific details. Implementations must be deterministic
//! where the backend allows and fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::catalog::ServiceCatalog;

// ============================================================================
// SECTION: Documentation Store
// ============================================================================

/// Documentation store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("documentation store io error: {0}")]
    Io(String),
    /// Corpus data cannot be decoded.
    #[error("documentation corpus error: {0}")]
    Corpus(String),
    /// Store data is invalid.
    #[error("documentation store invalid data: {0}")]
    Invalid(String),
}

/// Documentation store providing the service catalog.
pub trait DocumentationStore {
    /// Loads the full service catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the corpus cannot be read or decoded.
    fn load(&self) -> Result<ServiceCatalog, StoreError>;
}

impl<T> DocumentationStore for &T
where
    T: DocumentationStore + ?Sized,
{
    fn load(&self) -> Result<ServiceCatalog, StoreError> {
        (**self).load()
    }
}

// ============================================================================
// SECTION: Completion Service
// ============================================================================

/// Completion service errors.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Completion client or transport failure.
    #[error("completion service error: {0}")]
    Service(String),
    /// Upstream endpoint rejected the request or returned no completion.
    #[error("completion upstream error: {0}")]
    Upstream(String),
}

/// Backend-agnostic text completion service.
pub trait CompletionService {
    /// Completes a prompt into response text.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the completion cannot be produced.
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

impl<T> CompletionService for &T
where
    T: CompletionService + ?Sized,
{
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt)
    }
}
