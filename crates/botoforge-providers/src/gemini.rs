// botoforge-providers/src/gemini.rs
// ============================================================================
// Module: Gemini Completion Service
// Description: Blocking Gemini generateContent client with strict limits.
// Purpose: Turn prompts into completion text with fail-closed transport rules.
// Dependencies: botoforge-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The Gemini service issues bounded `generateContent` POST requests. It
//! enforces scheme restrictions, redirects disabled, a request timeout, and a
//! response size limit. The API key is read from an environment variable at
//! construction and never appears in errors or logs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use botoforge_core::CompletionError;
use botoforge_core::CompletionService;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the Gemini completion service.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` endpoints.
/// - `max_response_bytes` is enforced as a hard upper bound on response bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeminiCompletionConfig {
    /// Base URL of the completion endpoint.
    pub endpoint: String,
    /// Model name appended to the endpoint path.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
}

impl Default for GeminiCompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_ms: 30_000,
            max_response_bytes: 1024 * 1024,
            allow_http: false,
        }
    }
}

// ============================================================================
// SECTION: Service Implementation
// ============================================================================

/// Completion service backed by the Gemini `generateContent` endpoint.
///
/// # Invariants
/// - Redirects are not followed.
/// - Responses exceeding configured limits fail closed.
/// - The API key is held in memory only and is never formatted into messages.
pub struct GeminiCompletionService {
    /// Service configuration, including limits and policy.
    config: GeminiCompletionConfig,
    /// API key sent in the `x-goog-api-key` request header.
    api_key: String,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl std::fmt::Debug for GeminiCompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCompletionService")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .field("client", &self.client)
            .finish()
    }
}

impl GeminiCompletionService {
    /// Creates a service with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the endpoint is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: GeminiCompletionConfig, api_key: String) -> Result<Self, CompletionError> {
        validate_endpoint(&config)?;
        if api_key.trim().is_empty() {
            return Err(CompletionError::Service("completion api key is empty".to_string()));
        }
        let client = build_http_client(&config)?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Creates a service reading the API key from the configured environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the variable is unset or the endpoint
    /// is invalid.
    pub fn from_env(config: GeminiCompletionConfig) -> Result<Self, CompletionError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            CompletionError::Service(format!(
                "completion api key environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(config, api_key)
    }

    /// Returns the full `generateContent` request URL.
    fn request_url(&self) -> String {
        let endpoint = self.config.endpoint.trim_end_matches('/');
        format!("{endpoint}/models/{}:generateContent", self.config.model)
    }
}

impl CompletionService for GeminiCompletionService {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });
        let mut response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|_| CompletionError::Service("completion request failed".to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Upstream(format!(
                "completion endpoint returned status {}",
                status.as_u16()
            )));
        }
        let payload = read_response_limited(&mut response, self.config.max_response_bytes)?;
        extract_completion_text(&payload)
    }
}

// ============================================================================
// SECTION: Response Decoding
// ============================================================================

/// Gemini `generateContent` response envelope.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    /// Candidate completions, best first.
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A single completion candidate.
#[derive(Debug, Deserialize)]
struct Candidate {
    /// Candidate content parts.
    #[serde(default)]
    content: CandidateContent,
}

/// Content container for a candidate.
#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    /// Ordered content parts.
    #[serde(default)]
    parts: Vec<Part>,
}

/// A single content part.
#[derive(Debug, Deserialize)]
struct Part {
    /// Text payload for the part.
    #[serde(default)]
    text: String,
}

/// Extracts the first candidate's concatenated part texts.
fn extract_completion_text(payload: &[u8]) -> Result<String, CompletionError> {
    let decoded: GenerateContentResponse = serde_json::from_slice(payload).map_err(|_| {
        CompletionError::Upstream("completion response could not be decoded".to_string())
    })?;
    let Some(candidate) = decoded.candidates.into_iter().next() else {
        return Err(CompletionError::Upstream(
            "completion response contained no candidates".to_string(),
        ));
    };
    let text = candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<String>>()
        .concat();
    if text.is_empty() {
        return Err(CompletionError::Upstream(
            "completion response contained no text".to_string(),
        ));
    }
    Ok(text)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates endpoint scheme and credential policy.
fn validate_endpoint(config: &GeminiCompletionConfig) -> Result<(), CompletionError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|_| CompletionError::Service("invalid completion endpoint".to_string()))?;
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        _ => {
            return Err(CompletionError::Service(
                "unsupported completion endpoint scheme".to_string(),
            ));
        }
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(CompletionError::Service(
            "endpoint credentials are not allowed".to_string(),
        ));
    }
    if config.model.trim().is_empty() {
        return Err(CompletionError::Service("completion model is empty".to_string()));
    }
    Ok(())
}

/// Builds the blocking HTTP client with transport limits applied.
fn build_http_client(config: &GeminiCompletionConfig) -> Result<Client, CompletionError> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent("botoforge/0.1")
        .redirect(Policy::none())
        .build()
        .map_err(|_| CompletionError::Service("completion client build failed".to_string()))
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, CompletionError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| CompletionError::Service("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(CompletionError::Service(
            "completion response exceeds size limit".to_string(),
        ));
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| CompletionError::Service("failed to read completion response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(CompletionError::Service(
            "completion response exceeds size limit".to_string(),
        ));
    }
    Ok(buf)
}
