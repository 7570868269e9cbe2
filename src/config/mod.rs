// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{Result, VisionError};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "VISION_EXTRACT_CONFIG";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the binaries)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);
        Self::load_from(&path)
    }

    /// Same as `load`, reading the optional config file from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::from(path).required(false))
            // Override with environment variables, e.g. VISION_EXTRACT_PROVIDER__KIND=azure
            .add_source(
                Environment::with_prefix("VISION_EXTRACT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| VisionError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vision-extract")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.http.timeout_seconds, 60);
        assert_eq!(config.image.max_width, 1024);
        assert_eq!(config.image.mime_policy, MimePolicy::Jpeg);
        assert_eq!(config.prompt.system, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[provider]
kind = "azure"
azure_endpoint = "https://example.openai.azure.com"

[image]
max_width = 512
mime_policy = "detect"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Azure);
        assert_eq!(
            config.provider.azure_endpoint.as_deref(),
            Some("https://example.openai.azure.com")
        );
        assert_eq!(config.image.max_width, 512);
        assert_eq!(config.image.max_height, 1024);
        assert_eq!(config.image.mime_policy, MimePolicy::Detect);
    }

    #[test]
    fn test_provider_debug_redacts_secrets() {
        let provider = ProviderConfig {
            kind: ProviderKind::Github,
            github_token: Some("ghp_supersecret".to_string()),
            azure_endpoint: None,
            azure_key: Some("azure-secret".to_string()),
        };

        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("ghp_supersecret"));
        assert!(!debug_str.contains("azure-secret"));
    }
}
