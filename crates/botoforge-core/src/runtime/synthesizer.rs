// botoforge-core/src/runtime/synthesizer.rs
// ============================================================================
// Module: Boto Forge Code Synthesizer
// Description: Final pipeline stage generating Python code from context.
// Purpose: Prompt the completion service and normalize the returned code.
// Dependencies: crate::{interfaces, runtime::assembler}
// ============================================================================

//! ## Overview
//! The synthesizer hands the user query plus the assembled documentation
//! context to the completion service and normalizes the response: markdown
//! code fences are stripped when present so callers always receive bare
//! code. Normalization is idempotent for fenced and unfenced responses
//! alike.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::interfaces::CompletionError;
use crate::interfaces::CompletionService;
use crate::runtime::assembler::DocumentationContext;

// ============================================================================
// SECTION: Code Synthesizer
// ============================================================================

/// Final narrowing stage: generates code from the documentation context.
pub struct CodeSynthesizer<'a, C> {
    /// Completion service used to generate code.
    completion: &'a C,
}

impl<'a, C> CodeSynthesizer<'a, C>
where
    C: CompletionService,
{
    /// Creates a code synthesizer over the given completion service.
    #[must_use]
    pub fn new(completion: &'a C) -> Self {
        Self { completion }
    }

    /// Generates code for the query using the assembled documentation.
    ///
    /// An empty documentation context is still submitted; the model then
    /// works from the query alone.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the completion cannot be produced.
    pub fn synthesize(
        &self,
        query: &str,
        context: &DocumentationContext,
    ) -> Result<String, CompletionError> {
        let prompt = code_prompt(query, &context.text);
        let raw = self.completion.complete(&prompt)?;
        Ok(strip_code_fences(&raw))
    }
}

// ============================================================================
// SECTION: Prompt Construction
// ============================================================================

/// Builds the code-synthesis prompt over the rendered documentation.
fn code_prompt(query: &str, documentation: &str) -> String {
    format!(
        "You are an expert Python developer specializing in AWS Boto3. Generate clean, production-ready Python code to accomplish the following task.

User Query: \"{query}\"

AWS Documentation for relevant methods:
{documentation}

Requirements:
1. Import necessary boto3 modules
2. Include proper error handling
3. Add helpful comments
4. Use best practices for AWS SDK usage
5. Include any necessary configuration (regions, credentials setup hints)
6. Make the code complete and executable

Generate ONLY the Python code, no explanations or markdown formatting. Start directly with the imports."
    )
}

// ============================================================================
// SECTION: Fence Normalization
// ============================================================================

/// Strips a surrounding markdown code fence from completion output.
///
/// The text is trimmed first. When it opens with a fence, the opening line
/// (including any language tag) and a trailing closing fence are removed.
/// Unfenced text is returned trimmed and otherwise unchanged, which makes
/// the normalization idempotent.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = rest.find('\n').map_or("", |idx| &rest[idx + 1..]);
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}
