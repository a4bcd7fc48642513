// ============================================================
// Text-Generation Client
// ============================================================
// Blocking HTTP client for an OpenAI-style chat-completions API,
// implementing the TextGenerator collaborator trait.
//
// Responses are parsed defensively as loose JSON: a body that
// lacks the expected choices/message/content shape yields
// Ok(None) — zero variants — rather than an error. Errors are
// reserved for transport failures and non-success statuses.

use crate::domain::traits::{GenerationRequest, TextGenerator};
use crate::error::{PipelineError, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                PipelineError::ExternalService(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_string(), client })
    }
}

impl TextGenerator for OpenAiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": request.system_instruction },
                { "role": "user",   "content": request.input_text },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_output_tokens,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| PipelineError::ExternalService(format!("generation request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::ExternalService(format!(
                "generation API returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().map_err(|e| {
            PipelineError::ExternalService(format!("failed to parse generation response: {e}"))
        })?;

        Ok(extract_content(&body))
    }
}

/// Pull choices[0].message.content out of a response body, if
/// the shape holds. Anything else is zero variants.
fn extract_content(body: &serde_json::Value) -> Option<String> {
    body.get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_content_from_well_formed_response() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "a paraphrase" } }
            ]
        });
        assert_eq!(extract_content(&body), Some("a paraphrase".to_string()));
    }

    #[test]
    fn test_malformed_shapes_yield_zero_variants() {
        for body in [
            json!({}),
            json!({"choices": []}),
            json!({"choices": "not an array"}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{"message": {"content": 42}}]}),
        ] {
            assert_eq!(extract_content(&body), None, "body: {body}");
        }
    }
}
