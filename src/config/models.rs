//! Configuration data structures for vision-extract.
//!
//! This module defines the schema for the application settings, including
//! provider selection and credentials, HTTP bounds, image preprocessing
//! and prompt texts.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Upstream provider selection and credentials.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Outbound HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Image preprocessing settings.
    #[serde(default)]
    pub image: ImageConfig,

    /// Prompt texts sent with every request.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which hosted vision endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GitHub Models inference (fixed URL, bearer token).
    #[default]
    Github,
    /// Azure AI deployment (configurable base URL, API key).
    Azure,
}

/// Settings for the upstream provider.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// Provider variant.
    /// Default: `github`
    #[serde(default)]
    pub kind: ProviderKind,

    /// GitHub token for the GitHub Models endpoint.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Azure AI resource base URL, e.g. `https://my-resource.openai.azure.com`.
    #[serde(default)]
    pub azure_endpoint: Option<String>,

    /// Azure AI API key.
    #[serde(default)]
    pub azure_key: Option<String>,
}

// Custom Debug impl that never logs secrets
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("github_token", &redact(&self.github_token))
            .field("azure_endpoint", &self.azure_endpoint)
            .field("azure_key", &redact(&self.azure_key))
            .finish()
    }
}

/// Settings for the outbound HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

/// How the data URL MIME type is chosen for the outgoing image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MimePolicy {
    /// Always label the image `image/jpeg`, whatever its real format.
    #[default]
    Jpeg,
    /// Sniff the real format from the decoded bytes.
    Detect,
}

/// Settings for local image preprocessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Bounding width for `resize`.
    /// Default: `1024`
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Bounding height for `resize`.
    /// Default: `1024`
    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Validate and shrink images before sending them upstream.
    /// Default: `false`
    #[serde(default)]
    pub resize_before_call: bool,

    /// Data URL MIME labelling.
    /// Default: `jpeg`
    #[serde(default)]
    pub mime_policy: MimePolicy,
}

/// Prompt texts sent with each extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// System message.
    #[serde(default = "default_system_prompt")]
    pub system: String,

    /// User instruction sent alongside the image.
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `warn`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
            resize_before_call: false,
            mime_policy: MimePolicy::default(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
            instruction: default_instruction(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// System message used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that can read and extract text from images using advanced vision understanding.";

/// Instruction used when none is configured.
pub const DEFAULT_INSTRUCTION: &str =
    "Please extract all the text visible in this image. Only return the text content, nothing else.";

// Helper functions for serde defaults
fn default_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_width() -> u32 {
    crate::vision::DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    crate::vision::DEFAULT_MAX_HEIGHT
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
