// botoforge-providers/src/scripted.rs
// ============================================================================
// Module: Scripted Completion Service
// Description: In-memory completion fake with prompt recording.
// Purpose: Deterministic completion behavior for tests and dry runs.
// Dependencies: botoforge-core
// ============================================================================

//! ## Overview
//! The scripted service replays a fixed queue of canned completions and
//! records every prompt it receives. An exhausted script surfaces as an
//! upstream error, mirroring a provider that stops answering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Mutex;

use botoforge_core::CompletionError;
use botoforge_core::CompletionService;

// ============================================================================
// SECTION: Service Implementation
// ============================================================================

/// Completion service replaying canned responses in order.
#[derive(Debug, Default)]
pub struct ScriptedCompletionService {
    /// Remaining canned completions, consumed front to back.
    replies: Mutex<VecDeque<String>>,
    /// Prompts received so far, in call order.
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletionService {
    /// Creates a service that replays the given completions in order.
    #[must_use]
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Creates a service from string literals.
    #[must_use]
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|text| (*text).to_string()).collect())
    }

    /// Returns the prompts received so far.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the internal lock is poisoned.
    pub fn prompts(&self) -> Result<Vec<String>, CompletionError> {
        let prompts = self
            .prompts
            .lock()
            .map_err(|_| CompletionError::Service("scripted prompt lock poisoned".to_string()))?;
        Ok(prompts.clone())
    }
}

impl CompletionService for ScriptedCompletionService {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let mut prompts = self
            .prompts
            .lock()
            .map_err(|_| CompletionError::Service("scripted prompt lock poisoned".to_string()))?;
        prompts.push(prompt.to_string());
        drop(prompts);
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| CompletionError::Service("scripted reply lock poisoned".to_string()))?;
        replies
            .pop_front()
            .ok_or_else(|| CompletionError::Upstream("completion script exhausted".to_string()))
    }
}
