// Vision chat-completion client
// Author: kelexine (https://github.com/kelexine)

use super::endpoint::{Credential, EndpointConfig};
use super::request::VisionRequest;
use crate::config::HttpConfig;
use crate::error::{Result, VisionError};
use crate::models::chat::ChatCompletionResponse;
use crate::utils::logging::sanitize;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info};

/// Text extracted by the upstream model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionResponse {
    pub text: String,
    pub status: u16,
}

/// Client for OpenAI-style vision chat-completion endpoints.
///
/// Every `call` makes exactly one POST. Failures are returned immediately;
/// there is no retry or backoff at this layer.
#[derive(Debug, Clone)]
pub struct VisionClient {
    http_client: Client,
}

impl VisionClient {
    /// Create a client whose requests are bounded by the configured timeouts.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .use_rustls_tls()
            .build()
            .map_err(|e| VisionError::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created HTTP client (timeout {}s, connect timeout {}s)",
            config.timeout_seconds, config.connect_timeout_seconds
        );

        Ok(Self { http_client })
    }

    /// Send `request` to `endpoint` and return the first completion's text.
    pub async fn call(
        &self,
        request: &VisionRequest,
        endpoint: &EndpointConfig,
        credential: &Credential,
    ) -> Result<VisionResponse> {
        let body = request.to_chat_request(endpoint);
        info!(
            "Sending vision request to {} (model: {})",
            endpoint.label(),
            body.model
        );

        let response = self
            .http_client
            .post(endpoint.url())
            .header("Authorization", credential.authorization())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status != StatusCode::OK {
            error!(
                "{} API error: HTTP {} - Response body: {}",
                endpoint.label(),
                status,
                sanitize(&response_text)
            );
            return Err(VisionError::UpstreamApi {
                status: status.as_u16(),
                body: response_text,
            });
        }

        debug!(
            "Raw {} response (first 500 chars): {}",
            endpoint.label(),
            response_text.chars().take(500).collect::<String>()
        );

        let text = extract_text(&response_text)?;
        info!("Extracted {} characters of text", text.chars().count());

        Ok(VisionResponse {
            text,
            status: status.as_u16(),
        })
    }
}

/// Pull `choices[0].message.content` out of a response body.
pub fn extract_text(response_text: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(response_text)
        .map_err(|e| VisionError::MalformedResponse(format!("Response parsing error: {}", e)))?;

    parsed
        .first_content()
        .map(str::to_string)
        .ok_or_else(|| {
            VisionError::MalformedResponse(
                "Response has no choices[0].message.content".to_string(),
            )
        })
}
