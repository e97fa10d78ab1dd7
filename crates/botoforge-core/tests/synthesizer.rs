// botoforge-core/tests/synthesizer.rs
// ============================================================================
// Module: Synthesizer Tests
// Description: Tests for code synthesis and fence normalization.
// Purpose: Ensure generated code is normalized and prompts carry context.
// Dependencies: botoforge-core, proptest
// ============================================================================
//! ## Overview
//! Validates fence stripping across fenced, language-tagged, and unfenced
//! completions, including an idempotence property over fence-free bodies,
//! and checks the synthesis prompt embeds the query and documentation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use botoforge_core::CodeSynthesizer;
use botoforge_core::DocumentationAssembler;
use botoforge_core::MethodName;
use botoforge_core::MethodsByService;
use botoforge_core::ServiceName;
use botoforge_core::strip_code_fences;
use proptest::prelude::*;

use crate::common::ScriptedCompletion;
use crate::common::sample_catalog;

/// Verifies a python-tagged fence is stripped to the bare code.
#[test]
fn strip_removes_python_tagged_fences() {
    let fenced = "```python\nimport boto3\n\nclient = boto3.client('s3')\n```";
    assert_eq!(
        strip_code_fences(fenced),
        "import boto3\n\nclient = boto3.client('s3')"
    );
}

/// Verifies an untagged fence is stripped to the bare code.
#[test]
fn strip_removes_untagged_fences() {
    let fenced = "```\nimport boto3\n```";
    assert_eq!(strip_code_fences(fenced), "import boto3");
}

/// Verifies unfenced output is only trimmed.
#[test]
fn strip_trims_unfenced_output() {
    assert_eq!(strip_code_fences("  import boto3\n"), "import boto3");
    assert_eq!(strip_code_fences(""), "");
    assert_eq!(strip_code_fences("   \n  "), "");
}

/// Verifies a fence with no body collapses to an empty string.
#[test]
fn strip_handles_degenerate_fences() {
    assert_eq!(strip_code_fences("```python\n```"), "");
    assert_eq!(strip_code_fences("```"), "");
}

proptest! {
    /// Stripping is idempotent for bodies that carry no fence markers.
    #[test]
    fn strip_is_idempotent_on_fence_free_bodies(
        body in "[a-zA-Z0-9 _#=().:,\n-]{0,200}",
        lang in "(python)?",
    ) {
        let fenced = format!("```{lang}\n{body}\n```");
        let once = strip_code_fences(&fenced);
        assert_eq!(once, body.trim());
        assert_eq!(strip_code_fences(&once), once);

        let bare = strip_code_fences(&body);
        assert_eq!(strip_code_fences(&bare), bare);
    }
}

/// Verifies the synthesis prompt embeds the query and documentation text.
#[test]
fn synthesizer_prompt_embeds_query_and_documentation() {
    let catalog = sample_catalog();
    let mut selection = MethodsByService::new();
    selection.insert(
        ServiceName::new("S3"),
        vec![MethodName::new("create_bucket")],
    );
    let context = DocumentationAssembler::new().assemble(&catalog, &selection);

    let completion = ScriptedCompletion::with_texts(&["```python\nimport boto3\n```"]);
    let code = CodeSynthesizer::new(&completion)
        .synthesize("create a bucket", &context)
        .expect("synthesize");
    assert_eq!(code, "import boto3");

    let prompts = completion.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User Query: \"create a bucket\""));
    assert!(prompts[0].contains("Service: S3\nMethod: create_bucket"));
    assert!(prompts[0].contains("Generate ONLY the Python code"));
}

/// Verifies an empty context is still submitted to the model.
#[test]
fn synthesizer_submits_empty_context() {
    let catalog = sample_catalog();
    let context = DocumentationAssembler::new().assemble(&catalog, &MethodsByService::new());

    let completion = ScriptedCompletion::with_texts(&["import boto3"]);
    let code = CodeSynthesizer::new(&completion)
        .synthesize("do something", &context)
        .expect("synthesize");
    assert_eq!(code, "import boto3");
    assert!(completion.prompts()[0].contains("AWS Documentation for relevant methods:\n\n"));
}
