// botoforge-core/src/core/selection.rs
// ============================================================================
// Module: Boto Forge Selection Types
// Description: Parsed selection responses and the per-service method map.
// Purpose: Enforce the offered-list subset contract and selection ordering.
// Dependencies: serde, serde_json, thiserror, crate::core::identifiers
// ============================================================================

//! ## Overview
//! A selection response is the raw text a completion service returns when
//! asked to pick names from an offered list. Parsing is strict: the trimmed
//! text must be a JSON array of strings, otherwise parsing fails rather than
//! degrading to an empty selection. Accepted names are filtered to byte-exact
//! members of the offered list, preserving response order with first
//! occurrence winning on duplicates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

use crate::core::identifiers::MethodName;
use crate::core::identifiers::ServiceName;

// ============================================================================
// SECTION: Selection Parsing
// ============================================================================

/// Error raised when a selection response is not a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selection response is not a JSON array of strings: {message}")]
pub struct SelectionParseError {
    /// Parser diagnostic for the malformed response.
    pub message: String,
}

/// An ordered selection of names accepted from a completion response.
///
/// Every accepted name is a byte-exact member of the offered list; names the
/// model invented are discarded, and duplicates keep their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    /// Accepted names in response order.
    names: Vec<String>,
}

impl SelectionResult {
    /// Parses a completion response against the offered name list.
    ///
    /// The response is trimmed and must decode as a JSON array of strings.
    /// A malformed response is a parse error, never an empty selection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionParseError`] when the trimmed response is not a
    /// JSON array of strings.
    pub fn parse(response: &str, offered: &[&str]) -> Result<Self, SelectionParseError> {
        let parsed: Vec<String> =
            serde_json::from_str(response.trim()).map_err(|err| SelectionParseError {
                message: err.to_string(),
            })?;
        let offered_set: HashSet<&str> = offered.iter().copied().collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut names = Vec::new();
        for name in &parsed {
            if !offered_set.contains(name.as_str()) {
                continue;
            }
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
        Ok(Self { names })
    }

    /// Returns the accepted names in response order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Consumes the selection and returns the accepted names.
    #[must_use]
    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    /// Returns the number of accepted names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no names were accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// SECTION: Methods By Service
// ============================================================================

/// Selected method names grouped per service, in selection order.
///
/// Services that contributed no methods are never recorded, and iteration
/// follows the order services were selected in, not alphabetical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodsByService {
    /// Per-service method lists in selection order.
    entries: Vec<(ServiceName, Vec<MethodName>)>,
}

impl MethodsByService {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the selected methods for a service.
    ///
    /// Empty method lists are dropped so the map only ever holds services
    /// that contributed at least one method.
    pub fn insert(&mut self, service: ServiceName, methods: Vec<MethodName>) {
        if methods.is_empty() {
            return;
        }
        self.entries.push((service, methods));
    }

    /// Returns the selected methods for a service, if recorded.
    #[must_use]
    pub fn get(&self, service: &ServiceName) -> Option<&[MethodName]> {
        self.entries
            .iter()
            .find(|(name, _)| name == service)
            .map(|(_, methods)| methods.as_slice())
    }

    /// Iterates entries in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceName, &[MethodName])> {
        self.entries
            .iter()
            .map(|(service, methods)| (service, methods.as_slice()))
    }

    /// Returns the number of recorded services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no services were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MethodsByService {
    /// Serializes as a JSON object whose keys follow selection order.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (service, methods) in &self.entries {
            map.serialize_entry(service, methods)?;
        }
        map.end()
    }
}
