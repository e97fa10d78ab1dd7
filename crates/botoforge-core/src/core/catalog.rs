// botoforge-core/src/core/catalog.rs
// ============================================================================
// Module: Boto Forge Service Catalog
// Description: In-memory model of the scraped boto3 documentation corpus.
// Purpose: Provide deterministic lookup of services, methods, and their docs.
// Dependencies: serde, serde_json, crate::core::identifiers
// ============================================================================

//! ## Overview
//! The catalog mirrors the corpus JSON shape: a map of service names to
//! services, each holding a map of method names to method documentation.
//! Maps are ordered so every traversal of the catalog is deterministic.
//! Unknown fields in the corpus (page URLs, titles, raw page text) are
//! ignored during deserialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::MethodName;
use crate::core::identifiers::ServiceName;

// ============================================================================
// SECTION: Method Documentation
// ============================================================================

/// Documentation for a single SDK method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDoc {
    /// Human-readable description of what the method does.
    #[serde(default)]
    pub description: String,
    /// Call syntax as shown in the scraped documentation.
    #[serde(default)]
    pub syntax: String,
    /// Parameter documentation, kept as raw JSON from the corpus.
    #[serde(default)]
    pub parameters: serde_json::Value,
    /// Description of the method's return value.
    #[serde(default)]
    pub returns: String,
    /// Usage examples, possibly empty.
    #[serde(default)]
    pub examples: Vec<String>,
}

// ============================================================================
// SECTION: Service Catalog
// ============================================================================

/// A single service entry holding its documented methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Documented methods keyed by method name.
    #[serde(default)]
    pub methods: BTreeMap<MethodName, MethodDoc>,
}

/// The full documentation corpus keyed by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    /// Services keyed by service name.
    #[serde(default)]
    pub services: BTreeMap<ServiceName, ServiceEntry>,
}

impl ServiceCatalog {
    /// Returns all service names in deterministic (sorted) order.
    #[must_use]
    pub fn service_names(&self) -> Vec<ServiceName> {
        self.services.keys().cloned().collect()
    }

    /// Returns whether the catalog contains the given service.
    #[must_use]
    pub fn contains_service(&self, service: &ServiceName) -> bool {
        self.services.contains_key(service)
    }

    /// Returns the method names for a service in deterministic (sorted)
    /// order, or `None` when the service is absent.
    #[must_use]
    pub fn method_names(&self, service: &ServiceName) -> Option<Vec<MethodName>> {
        self.services
            .get(service)
            .map(|entry| entry.methods.keys().cloned().collect())
    }

    /// Returns the documentation for a method, or `None` when either the
    /// service or the method is absent.
    #[must_use]
    pub fn method_doc(&self, service: &ServiceName, method: &MethodName) -> Option<&MethodDoc> {
        self.services
            .get(service)
            .and_then(|entry| entry.methods.get(method))
    }

    /// Returns the number of services in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns whether the catalog holds no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
