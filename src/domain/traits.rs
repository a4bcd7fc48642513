// ============================================================
// Core Traits (Abstractions)
// ============================================================
// The seams between the pipeline and its collaborators. The
// pipeline stages are written against these traits, so the
// concrete loader and generation service can be swapped (or
// stubbed in tests) without touching stage logic.

use crate::error::Result;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce raw training records.
///
/// Implementations:
///   - JsonLoader → loads from a directory of *.json array files
pub trait RecordSource {
    /// Load all raw records from this source. A malformed file
    /// aborts the whole load: no partial corpus.
    fn load_all(&self) -> Result<Vec<serde_json::Value>>;
}

// ─── TextGenerator ────────────────────────────────────────────────────────────
/// Request sent to the text-generation collaborator.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub input_text: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// Any component that can produce a generated text variant.
///
/// Implementations:
///   - OpenAiClient → chat-completions HTTP API
///   - test stubs in the augmenter's unit tests
///
/// The contract is zero-or-one string per request: a malformed
/// or empty response is Ok(None), never an error. Errors are
/// reserved for transport-level failures.
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>>;
}
