// Upstream endpoint variants and credentials
// Author: kelexine (https://github.com/kelexine)

use crate::config::{AppConfig, ProviderKind};
use crate::error::{Result, VisionError};
use zeroize::Zeroize;

/// GitHub Models chat-completion URL.
pub const GITHUB_MODELS_URL: &str = "https://models.github.ai/inference/chat/completions";

/// Vision model served by GitHub Models.
pub const GITHUB_MODEL: &str = "meta/Llama-3.2-11B-Vision-Instruct";

/// Azure deployment and model name.
pub const AZURE_DEPLOYMENT: &str = "gpt-4o";

/// Azure OpenAI REST API version.
pub const AZURE_API_VERSION: &str = "2024-02-15-preview";

/// A resolved upstream target: where to POST and which model to name.
///
/// The model is fixed per variant; callers pick the variant, not the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    kind: ProviderKind,
    url: String,
}

impl EndpointConfig {
    /// The GitHub Models endpoint at its public URL.
    pub fn github() -> Self {
        Self::github_at(GITHUB_MODELS_URL)
    }

    /// The GitHub Models endpoint at an explicit URL (mirrors, test doubles).
    pub fn github_at(url: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Github,
            url: url.into(),
        }
    }

    /// An Azure AI deployment under the given resource base URL.
    pub fn azure(base_url: &str) -> Self {
        Self {
            kind: ProviderKind::Azure,
            url: format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base_url.trim_end_matches('/'),
                AZURE_DEPLOYMENT,
                AZURE_API_VERSION
            ),
        }
    }

    /// Build the endpoint for `kind`, taking the URL from `endpoint` or the config.
    ///
    /// For GitHub the URL defaults to the public endpoint; for Azure a base
    /// URL is mandatory.
    pub fn resolve(kind: ProviderKind, endpoint: Option<&str>, config: &AppConfig) -> Result<Self> {
        let endpoint = endpoint.filter(|e| !e.trim().is_empty());
        match kind {
            ProviderKind::Github => {
                Ok(endpoint.map_or_else(Self::github, |url| Self::github_at(url)))
            }
            ProviderKind::Azure => endpoint
                .or(config.provider.azure_endpoint.as_deref())
                .filter(|e| !e.trim().is_empty())
                .map(Self::azure)
                .ok_or_else(|| {
                    VisionError::Config("Azure AI endpoint not configured".to_string())
                }),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &'static str {
        match self.kind {
            ProviderKind::Github => GITHUB_MODEL,
            ProviderKind::Azure => AZURE_DEPLOYMENT,
        }
    }

    /// Human-readable provider label for logs and error prefixes.
    pub fn label(&self) -> &'static str {
        match self.kind {
            ProviderKind::Github => "GitHub",
            ProviderKind::Azure => "Azure",
        }
    }
}

/// Secret presented to the upstream service (GitHub token or Azure API key).
///
/// Wiped from memory on drop; never printed by `Debug`.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credential {
    secret: String,
}

// Custom Debug impl that never logs tokens
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(VisionError::InvalidRequest("Credential is empty".to_string()));
        }
        Ok(Self { secret })
    }

    /// Pick the credential for `kind` from an explicit value or the config.
    pub fn resolve(kind: ProviderKind, explicit: Option<&str>, config: &AppConfig) -> Result<Self> {
        let (configured, name) = match kind {
            ProviderKind::Github => (config.provider.github_token.as_deref(), "GitHub token"),
            ProviderKind::Azure => (config.provider.azure_key.as_deref(), "Azure AI key"),
        };

        explicit
            .filter(|s| !s.trim().is_empty())
            .or(configured)
            .ok_or_else(|| VisionError::Config(format!("{} not configured", name)))
            .and_then(|secret| Self::new(secret))
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}
