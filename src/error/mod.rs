// Error types for vision-extract
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),

    #[error("Upstream API error: {status} - {body}")]
    UpstreamApi { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl VisionError {
    /// Stable machine-readable tag for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            VisionError::ImageDecode(_) => "image_decode_error",
            VisionError::ImageEncode(_) => "image_encode_error",
            VisionError::UpstreamApi { .. } => "upstream_api_error",
            VisionError::MalformedResponse(_) => "malformed_response_error",
            VisionError::InvalidRequest(_) => "invalid_request_error",
            VisionError::Config(_) | VisionError::ConfigParsing(_) => "configuration_error",
            VisionError::Io(_) => "io_error",
            VisionError::Json(_) => "json_error",
            VisionError::Http(_) => "http_error",
        }
    }

    /// HTTP status reported by the upstream service, if this error carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            VisionError::UpstreamApi { status, .. } => Some(*status),
            VisionError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
