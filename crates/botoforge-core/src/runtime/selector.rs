// botoforge-core/src/runtime/selector.rs
// ============================================================================
// Module: Boto Forge Selectors
// Description: Service and method selection stages of the narrowing pipeline.
// Purpose: Ask the completion service to pick names from an offered list.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! Selectors build a constrained prompt that offers the model a closed list
//! of names and demand a JSON array in response. The response is parsed
//! strictly; accepted names are always a byte-exact subset of the offered
//! list. A response that is not a JSON array of strings is a parse error,
//! never silently coerced into an empty selection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::catalog::ServiceCatalog;
use crate::core::identifiers::MethodName;
use crate::core::identifiers::ServiceName;
use crate::core::selection::SelectionResult;
use crate::interfaces::CompletionService;

// ============================================================================
// SECTION: Selection Errors
// ============================================================================

/// Errors raised by the selection stages.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The completion service failed to produce a response.
    #[error("selection completion failed: {0}")]
    Completion(String),
    /// The completion response could not be parsed as a selection.
    #[error("selection response parse failed: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Service Selector
// ============================================================================

/// First narrowing stage: picks relevant services from the full catalog.
pub struct ServiceSelector<'a, C> {
    /// Completion service used to rank services.
    completion: &'a C,
}

impl<'a, C> ServiceSelector<'a, C>
where
    C: CompletionService,
{
    /// Creates a service selector over the given completion service.
    #[must_use]
    pub fn new(completion: &'a C) -> Self {
        Self { completion }
    }

    /// Selects the services relevant to the query.
    ///
    /// The returned list preserves response order and is always a subset of
    /// the catalog's service names. An empty list is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the completion fails or the response
    /// cannot be parsed.
    pub fn select(
        &self,
        query: &str,
        catalog: &ServiceCatalog,
    ) -> Result<Vec<ServiceName>, SelectionError> {
        let offered = catalog.service_names();
        let prompt = service_prompt(query, &offered);
        let response = self
            .completion
            .complete(&prompt)
            .map_err(|err| SelectionError::Completion(err.to_string()))?;
        let offered_strs: Vec<&str> = offered.iter().map(ServiceName::as_str).collect();
        let selection = SelectionResult::parse(&response, &offered_strs)
            .map_err(|err| SelectionError::Parse(err.to_string()))?;
        Ok(selection
            .into_names()
            .into_iter()
            .map(ServiceName::new)
            .collect())
    }
}

// ============================================================================
// SECTION: Method Selector
// ============================================================================

/// Second narrowing stage: picks relevant methods within one service.
pub struct MethodSelector<'a, C> {
    /// Completion service used to rank methods.
    completion: &'a C,
}

impl<'a, C> MethodSelector<'a, C>
where
    C: CompletionService,
{
    /// Creates a method selector over the given completion service.
    #[must_use]
    pub fn new(completion: &'a C) -> Self {
        Self { completion }
    }

    /// Selects the methods of `service` relevant to the query.
    ///
    /// The returned list preserves response order and is always a subset of
    /// the offered method names. An empty list is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the completion fails or the response
    /// cannot be parsed.
    pub fn select(
        &self,
        query: &str,
        service: &ServiceName,
        offered: &[MethodName],
    ) -> Result<Vec<MethodName>, SelectionError> {
        let prompt = method_prompt(query, service, offered);
        let response = self
            .completion
            .complete(&prompt)
            .map_err(|err| SelectionError::Completion(err.to_string()))?;
        let offered_strs: Vec<&str> = offered.iter().map(MethodName::as_str).collect();
        let selection = SelectionResult::parse(&response, &offered_strs)
            .map_err(|err| SelectionError::Parse(err.to_string()))?;
        Ok(selection
            .into_names()
            .into_iter()
            .map(MethodName::new)
            .collect())
    }
}

// ============================================================================
// SECTION: Prompt Construction
// ============================================================================

/// Builds the service-selection prompt over the offered service names.
fn service_prompt(query: &str, offered: &[ServiceName]) -> String {
    let joined = offered
        .iter()
        .map(ServiceName::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are an AWS expert. Given a user query, identify which AWS service(s) from the list below are needed to accomplish the task.

User Query: \"{query}\"

Available AWS Services:
{joined}

Respond with ONLY a JSON array of service names that are relevant. Use the exact names from the list above.
Example response format: [\"S3\", \"DynamoDB\"]

If no services match, respond with an empty array: []"
    )
}

/// Builds the method-selection prompt for one service.
fn method_prompt(query: &str, service: &ServiceName, offered: &[MethodName]) -> String {
    let joined = offered
        .iter()
        .map(MethodName::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are an AWS expert. Given a user query and a list of available methods for the {service} service, identify which method(s) are needed.

User Query: \"{query}\"

Available methods for {service}:
{joined}

Respond with ONLY a JSON array of method names that are relevant. Use the exact names from the list above.
Example response format: [\"create_bucket\", \"put_object\"]

If no methods match, respond with an empty array: []"
    )
}
