// botoforge-core/src/runtime/assembler.rs
// ============================================================================
// Module: Boto Forge Documentation Assembler
// Description: Resolves selected methods into a rendered documentation block.
// Purpose: Produce the context text handed to the code-synthesis prompt.
// Dependencies: serde_json, crate::core
// ============================================================================

//! ## Overview
//! The assembler walks the per-service method selection in order, resolves
//! each pair against the catalog, and renders the surviving entries into a
//! single text block. Pairs absent from the catalog are skipped without
//! error; the selection stages already guarantee offered-list membership, so
//! a miss here means the selection referenced an offered name whose
//! documentation entry is missing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::catalog::MethodDoc;
use crate::core::catalog::ServiceCatalog;
use crate::core::identifiers::MethodName;
use crate::core::identifiers::ServiceName;
use crate::core::selection::MethodsByService;

// ============================================================================
// SECTION: Documentation Context
// ============================================================================

/// A resolved documentation entry for one selected method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    /// Service the method belongs to.
    pub service: ServiceName,
    /// Selected method name.
    pub method: MethodName,
    /// Documentation for the method.
    pub doc: MethodDoc,
}

/// Assembled documentation handed to the code-synthesis stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationContext {
    /// Resolved entries in selection order.
    pub entries: Vec<DocEntry>,
    /// Rendered context text, empty when no entries resolved.
    pub text: String,
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Third narrowing stage: resolves selections into documentation text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentationAssembler;

impl DocumentationAssembler {
    /// Creates a documentation assembler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Assembles documentation for the selected methods.
    ///
    /// Entries are resolved in selection order. Pairs without a catalog
    /// entry are skipped silently.
    #[must_use]
    pub fn assemble(
        &self,
        catalog: &ServiceCatalog,
        selection: &MethodsByService,
    ) -> DocumentationContext {
        let mut entries = Vec::new();
        for (service, methods) in selection.iter() {
            for method in methods {
                let Some(doc) = catalog.method_doc(service, method) else {
                    continue;
                };
                entries.push(DocEntry {
                    service: service.clone(),
                    method: method.clone(),
                    doc: doc.clone(),
                });
            }
        }
        let text = entries
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n---\n");
        DocumentationContext { entries, text }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one documentation entry into its prompt block.
fn render_entry(entry: &DocEntry) -> String {
    let parameters = serde_json::to_string_pretty(&entry.doc.parameters).unwrap_or_default();
    let mut rendered = format!(
        "Service: {}\nMethod: {}\nDescription: {}\nSyntax: {}\nParameters: {}\nReturns: {}",
        entry.service,
        entry.method,
        entry.doc.description,
        entry.doc.syntax,
        parameters,
        entry.doc.returns,
    );
    if !entry.doc.examples.is_empty() {
        rendered.push_str("\nExamples:\n");
        rendered.push_str(&entry.doc.examples.join("\n\n"));
    }
    rendered
}
