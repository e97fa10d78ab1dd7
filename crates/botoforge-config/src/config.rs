// botoforge-config/src/config.rs
// ============================================================================
// Module: Boto Forge Configuration
// Description: Configuration loading and validation for Boto Forge.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed; every section is validated
//! against bounded limits after parse. Config inputs are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "botoforge.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "BOTOFORGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default server bind address.
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default maximum request body size in bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Maximum allowed request body size in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
/// Default corpus filename when no path is specified.
const DEFAULT_CORPUS_NAME: &str = "boto3_docs.json";
/// Default maximum corpus file size in bytes.
pub(crate) const DEFAULT_MAX_CORPUS_BYTES: usize = 64 * 1024 * 1024;
/// Maximum allowed corpus file size in bytes.
pub(crate) const MAX_MAX_CORPUS_BYTES: usize = 512 * 1024 * 1024;
/// Default completion endpoint base URL.
const DEFAULT_COMPLETION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default completion model name.
const DEFAULT_COMPLETION_MODEL: &str = "gemini-pro";
/// Default environment variable holding the completion API key.
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Default completion request timeout in milliseconds.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Minimum completion request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 500;
/// Maximum completion request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 300_000;
/// Default maximum completion response size in bytes.
pub(crate) const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum allowed completion response size in bytes.
pub(crate) const MAX_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Boto Forge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotoForgeConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Documentation store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Completion provider configuration.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl BotoForgeConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, the `BOTOFORGE_CONFIG` environment
    /// variable, then `botoforge.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.store.validate()?;
        self.completion.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Validates the server bind address and body limit.
    fn validate(&self) -> Result<(), ConfigError> {
        let bind = self.bind.trim();
        if bind.is_empty() {
            return Err(ConfigError::Invalid("server.bind must be non-empty".to_string()));
        }
        let _addr: SocketAddr = bind
            .parse()
            .map_err(|_| ConfigError::Invalid("server.bind is not a socket address".to_string()))?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes exceeds the allowed maximum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Documentation store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON documentation corpus.
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    /// Maximum corpus file size in bytes.
    #[serde(default = "default_max_corpus_bytes")]
    pub max_corpus_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            max_corpus_bytes: default_max_corpus_bytes(),
        }
    }
}

impl StoreConfig {
    /// Validates the corpus path and size limit.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("store.path", &self.path.to_string_lossy())?;
        if self.max_corpus_bytes == 0 {
            return Err(ConfigError::Invalid(
                "store.max_corpus_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_corpus_bytes > MAX_MAX_CORPUS_BYTES {
            return Err(ConfigError::Invalid(
                "store.max_corpus_bytes exceeds the allowed maximum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Completion provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// Base URL of the completion endpoint.
    #[serde(default = "default_completion_endpoint")]
    pub endpoint: String,
    /// Model name appended to the endpoint path.
    #[serde(default = "default_completion_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum completion response size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Allows plain-http endpoints (explicit opt-in for tests).
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_completion_endpoint(),
            model: default_completion_model(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            allow_http: false,
        }
    }
}

impl CompletionConfig {
    /// Validates the endpoint scheme and bounded limits.
    fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::Invalid("completion.endpoint must be non-empty".to_string()));
        }
        let https = endpoint.starts_with("https://");
        let http = endpoint.starts_with("http://");
        if !https && !http {
            return Err(ConfigError::Invalid(
                "completion.endpoint must be an http(s) url".to_string(),
            ));
        }
        if http && !self.allow_http {
            return Err(ConfigError::Invalid(
                "completion.endpoint requires https unless allow_http is set".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("completion.model must be non-empty".to_string()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "completion.api_key_env must be non-empty".to_string(),
            ));
        }
        if self.timeout_ms < MIN_TIMEOUT_MS || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(
                "completion.timeout_ms outside the allowed range".to_string(),
            ));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_MAX_RESPONSE_BYTES {
            return Err(ConfigError::Invalid(
                "completion.max_response_bytes outside the allowed range".to_string(),
            ));
        }
        Ok(())
    }
}

/// Audit sink selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON-lines events to stderr.
    #[default]
    Stderr,
    /// JSON-lines events appended to a file.
    File,
    /// Audit logging disabled.
    None,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Where audit events are written.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path, required for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates the sink and path pairing.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.sink {
            AuditSinkKind::File => {
                let Some(path) = &self.path else {
                    return Err(ConfigError::Invalid(
                        "audit.path is required for the file sink".to_string(),
                    ));
                };
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            AuditSinkKind::Stderr | AuditSinkKind::None => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default request body limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default corpus path.
fn default_corpus_path() -> PathBuf {
    PathBuf::from(DEFAULT_CORPUS_NAME)
}

/// Returns the default corpus size limit.
const fn default_max_corpus_bytes() -> usize {
    DEFAULT_MAX_CORPUS_BYTES
}

/// Returns the default completion endpoint.
fn default_completion_endpoint() -> String {
    DEFAULT_COMPLETION_ENDPOINT.to_string()
}

/// Returns the default completion model.
fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

/// Returns the default API key environment variable name.
fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// Returns the default completion timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Returns the default completion response size limit.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
