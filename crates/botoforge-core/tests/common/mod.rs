// botoforge-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared test utilities and fixtures for core tests.
// Purpose: Provide a scripted completion service and sample catalogs.
// Dependencies: botoforge-core, serde_json
// ============================================================================

//! ## Overview
//! This module provides shared test fixtures for the core test files: a
//! scripted completion service that records every prompt it receives, and
//! small catalogs mirroring the scraped corpus shape.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::collections::VecDeque;

use botoforge_core::CompletionError;
use botoforge_core::CompletionService;
use botoforge_core::DocumentationStore;
use botoforge_core::MethodDoc;
use botoforge_core::ServiceCatalog;
use botoforge_core::StoreError;
use serde_json::json;

// ============================================================================
// SECTION: Scripted Completion Service
// ============================================================================

/// A single scripted reply.
pub enum ScriptedReply {
    /// Return the given text.
    Text(String),
    /// Fail with the given message.
    Failure(String),
}

/// Completion service replaying scripted replies and recording prompts.
pub struct ScriptedCompletion {
    /// Replies consumed in call order.
    replies: RefCell<VecDeque<ScriptedReply>>,
    /// Prompts recorded in call order.
    prompts: RefCell<Vec<String>>,
}

impl ScriptedCompletion {
    /// Creates a scripted service from explicit replies.
    #[must_use]
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Creates a scripted service that returns the given texts in order.
    #[must_use]
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|text| ScriptedReply::Text((*text).to_string()))
                .collect(),
        )
    }

    /// Returns the prompts recorded so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl CompletionService for ScriptedCompletion {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(message)) => Err(CompletionError::Service(message)),
            None => Err(CompletionError::Service("script exhausted".to_string())),
        }
    }
}

// ============================================================================
// SECTION: Documentation Stores
// ============================================================================

/// In-memory store returning a fixed catalog on every load.
pub struct FixedStore {
    /// Catalog returned on every load.
    pub catalog: ServiceCatalog,
}

impl DocumentationStore for FixedStore {
    fn load(&self) -> Result<ServiceCatalog, StoreError> {
        Ok(self.catalog.clone())
    }
}

/// Store failing every load with an I/O error.
pub struct FailingStore;

impl DocumentationStore for FailingStore {
    fn load(&self) -> Result<ServiceCatalog, StoreError> {
        Err(StoreError::Io("corpus missing".to_string()))
    }
}

// ============================================================================
// SECTION: Sample Catalogs
// ============================================================================

/// Creates a method doc with the given description and example set.
#[must_use]
pub fn sample_doc(description: &str, examples: &[&str]) -> MethodDoc {
    MethodDoc {
        description: description.to_string(),
        syntax: "client.call(**kwargs)".to_string(),
        parameters: json!({"Bucket": {"type": "string", "required": true}}),
        returns: "dict".to_string(),
        examples: examples.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Creates a two-service catalog mirroring the corpus shape.
#[must_use]
pub fn sample_catalog() -> ServiceCatalog {
    let corpus = json!({
        "services": {
            "S3": {
                "methods": {
                    "create_bucket": {
                        "description": "Creates a new S3 bucket.",
                        "syntax": "response = client.create_bucket(Bucket='string')",
                        "parameters": {"Bucket": {"type": "string", "required": true}},
                        "returns": "dict",
                        "examples": ["client.create_bucket(Bucket='my-bucket')"]
                    },
                    "put_object": {
                        "description": "Adds an object to a bucket.",
                        "syntax": "response = client.put_object(Bucket='string', Key='string')",
                        "parameters": {"Bucket": {"type": "string"}, "Key": {"type": "string"}},
                        "returns": "dict",
                        "examples": []
                    }
                }
            },
            "DynamoDB": {
                "methods": {
                    "create_table": {
                        "description": "Creates a new DynamoDB table.",
                        "syntax": "response = client.create_table(TableName='string')",
                        "parameters": {"TableName": {"type": "string", "required": true}},
                        "returns": "dict",
                        "examples": []
                    }
                }
            }
        }
    });
    serde_json::from_value(corpus).expect("sample catalog decodes")
}
