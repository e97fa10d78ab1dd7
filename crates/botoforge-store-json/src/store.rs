// botoforge-store-json/src/store.rs
// ============================================================================
// Module: JSON Documentation Store
// Description: DocumentationStore reading a scraped boto3 corpus from disk.
// Purpose: Provide the service catalog with fail-closed corpus handling.
// Dependencies: botoforge-core, serde_json
// ============================================================================

//! ## Overview
//! This module implements [`DocumentationStore`] over a JSON corpus file with
//! the shape `{"services": {"<name>": {"methods": {...}}}}`. The file is read
//! fresh on every load, so a replaced corpus takes effect without restarting
//! the process. Oversized, non-UTF-8, or malformed corpora fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use botoforge_core::DocumentationStore;
use botoforge_core::ServiceCatalog;
use botoforge_core::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Documentation store backed by a JSON corpus file.
#[derive(Debug, Clone)]
pub struct JsonDocumentationStore {
    /// Path to the corpus file.
    path: PathBuf,
    /// Maximum corpus file size in bytes.
    max_corpus_bytes: usize,
}

impl JsonDocumentationStore {
    /// Creates a store for the given corpus path and size limit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the path or size limit is invalid.
    pub fn new(path: impl Into<PathBuf>, max_corpus_bytes: usize) -> Result<Self, StoreError> {
        let path = path.into();
        validate_corpus_path(&path)?;
        if max_corpus_bytes == 0 {
            return Err(StoreError::Invalid(
                "corpus size limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            path,
            max_corpus_bytes,
        })
    }

    /// Returns the corpus path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configured corpus size limit in bytes.
    #[must_use]
    pub const fn max_corpus_bytes(&self) -> usize {
        self.max_corpus_bytes
    }
}

impl DocumentationStore for JsonDocumentationStore {
    fn load(&self) -> Result<ServiceCatalog, StoreError> {
        let bytes = fs::read(&self.path).map_err(|err| StoreError::Io(err.to_string()))?;
        if bytes.len() > self.max_corpus_bytes {
            return Err(StoreError::Invalid("corpus file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| StoreError::Invalid("corpus file must be utf-8".to_string()))?;
        serde_json::from_str(content).map_err(|err| StoreError::Corpus(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates corpus paths for safety limits.
fn validate_corpus_path(path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::Invalid("corpus path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(StoreError::Invalid("corpus path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(StoreError::Invalid(
                "corpus path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(StoreError::Invalid(
            "corpus path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}
