// botoforge-core/src/runtime/pipeline.rs
// ============================================================================
// Module: Boto Forge Pipeline
// Description: Orchestrates the staged narrowing pipeline end to end.
// Purpose: Turn a user query into generated code or a negative outcome.
// Dependencies: serde, thiserror, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The pipeline owns the injected documentation store and completion service
//! and runs the stages in a fixed order: load the catalog, select services,
//! select methods per service sequentially, assemble documentation, and
//! synthesize code. An empty service selection is a distinct negative
//! outcome rather than an error; every stage failure carries a typed error
//! so transports can map it to their own surface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::ServiceName;
use crate::core::selection::MethodsByService;
use crate::interfaces::CompletionService;
use crate::interfaces::DocumentationStore;
use crate::runtime::assembler::DocumentationAssembler;
use crate::runtime::selector::MethodSelector;
use crate::runtime::selector::SelectionError;
use crate::runtime::selector::ServiceSelector;
use crate::runtime::synthesizer::CodeSynthesizer;

// ============================================================================
// SECTION: Pipeline Errors
// ============================================================================

/// Errors raised while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The query was missing or blank.
    #[error("query is required")]
    Input,
    /// The documentation store failed.
    #[error("documentation store failed: {0}")]
    Store(String),
    /// A selection response could not be parsed.
    #[error("selection failed: {0}")]
    Selection(String),
    /// The completion service failed.
    #[error("completion failed: {0}")]
    Completion(String),
}

// ============================================================================
// SECTION: Pipeline Results
// ============================================================================

/// Successful pipeline run, serialized in the public response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// The trimmed user query the pipeline ran against.
    pub query: String,
    /// Services the service-selection stage picked, in selection order.
    pub services_used: Vec<ServiceName>,
    /// Methods picked per service; services without methods are omitted.
    pub methods_used: MethodsByService,
    /// Generated code with surrounding fences stripped.
    pub code: String,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Code generation completed.
    Completed(PipelineResult),
    /// No relevant services matched the query.
    NoServices,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Narrowing pipeline over an injected store and completion service.
pub struct Pipeline<S, C> {
    /// Documentation store backing the catalog.
    store: S,
    /// Completion service shared by every model-facing stage.
    completion: C,
}

impl<S, C> Pipeline<S, C>
where
    S: DocumentationStore,
    C: CompletionService,
{
    /// Creates a pipeline over the given store and completion service.
    #[must_use]
    pub fn new(store: S, completion: C) -> Self {
        Self { store, completion }
    }

    /// Runs the full narrowing pipeline for a query.
    ///
    /// The query is trimmed before the emptiness check, so whitespace-only
    /// input is rejected without reaching the completion service. Services
    /// selected but absent from the catalog are skipped without a method
    /// round-trip; `services_used` still reports the full selection.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when input validation, the store, a
    /// selection stage, or the completion service fails.
    pub fn run(&self, query: &str) -> Result<PipelineOutcome, PipelineError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PipelineError::Input);
        }

        let catalog = self
            .store
            .load()
            .map_err(|err| PipelineError::Store(err.to_string()))?;

        let service_selector = ServiceSelector::new(&self.completion);
        let services = service_selector
            .select(query, &catalog)
            .map_err(selection_error)?;
        if services.is_empty() {
            return Ok(PipelineOutcome::NoServices);
        }

        let method_selector = MethodSelector::new(&self.completion);
        let mut methods_used = MethodsByService::new();
        for service in &services {
            let Some(offered) = catalog.method_names(service) else {
                continue;
            };
            let selected = method_selector
                .select(query, service, &offered)
                .map_err(selection_error)?;
            methods_used.insert(service.clone(), selected);
        }

        let context = DocumentationAssembler::new().assemble(&catalog, &methods_used);
        let code = CodeSynthesizer::new(&self.completion)
            .synthesize(query, &context)
            .map_err(|err| PipelineError::Completion(err.to_string()))?;

        Ok(PipelineOutcome::Completed(PipelineResult {
            query: query.to_string(),
            services_used: services,
            methods_used,
            code,
        }))
    }
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Maps a selection-stage error onto the pipeline error taxonomy.
fn selection_error(err: SelectionError) -> PipelineError {
    match err {
        SelectionError::Completion(message) => PipelineError::Completion(message),
        SelectionError::Parse(message) => PipelineError::Selection(message),
    }
}
