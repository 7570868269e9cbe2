// Vision request construction
// Author: kelexine (https://github.com/kelexine)

use super::endpoint::EndpointConfig;
use crate::config::{MimePolicy, DEFAULT_INSTRUCTION, DEFAULT_SYSTEM_PROMPT};
use crate::models::chat::{
    ChatCompletionRequest, ContentPart, ImageUrl, Message, MAX_TOKENS, TEMPERATURE,
};
use crate::vision::data_url::{decode_base64, to_data_url, EncodedImage};
use crate::vision::ImageFormat;
use tracing::debug;

/// MIME type historically stamped on every outgoing image.
const LEGACY_MIME_TYPE: &str = "image/jpeg";

/// The message list for one extraction call: a system message followed by a
/// user message carrying the instruction and the image.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    messages: Vec<Message>,
}

impl VisionRequest {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Wire body for a specific endpoint, which fixes the model name.
    pub fn to_chat_request(&self, endpoint: &EndpointConfig) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: self.messages.clone(),
            model: endpoint.model().to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Build a request from explicit prompt texts, with the legacy JPEG labelling.
pub fn build(image_base64: &str, instruction: &str, system_prompt: &str) -> VisionRequest {
    VisionRequestBuilder::new(system_prompt, instruction).build(image_base64)
}

/// Assembles `VisionRequest`s from prompts and a base64 image.
///
/// No image validation happens here; run `vision::validate` first if needed.
#[derive(Debug, Clone)]
pub struct VisionRequestBuilder {
    system_prompt: String,
    instruction: String,
    mime_policy: MimePolicy,
}

impl Default for VisionRequestBuilder {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            mime_policy: MimePolicy::Jpeg,
        }
    }
}

impl VisionRequestBuilder {
    pub fn new(system_prompt: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            instruction: instruction.into(),
            mime_policy: MimePolicy::Jpeg,
        }
    }

    pub fn mime_policy(mut self, policy: MimePolicy) -> Self {
        self.mime_policy = policy;
        self
    }

    pub fn build(&self, image_base64: &str) -> VisionRequest {
        // A caller-supplied data URL prefix is dropped so it is never doubled.
        let payload = EncodedImage::parse(image_base64)
            .map(|encoded| encoded.payload)
            .unwrap_or(image_base64);

        let mime_type = match self.mime_policy {
            MimePolicy::Jpeg => LEGACY_MIME_TYPE,
            MimePolicy::Detect => detect_mime_type(payload),
        };
        debug!("Building vision request with image MIME type {}", mime_type);

        let messages = vec![
            Message::system(self.system_prompt.clone()),
            Message::user_parts(vec![
                ContentPart::Text {
                    text: self.instruction.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: to_data_url(mime_type, payload),
                    },
                },
            ]),
        ];

        VisionRequest { messages }
    }
}

/// Sniff the MIME type from the payload's magic bytes, falling back to JPEG.
fn detect_mime_type(payload: &str) -> &'static str {
    decode_base64(payload)
        .ok()
        .and_then(|bytes| ImageFormat::sniff(&bytes))
        .map(|format| format.mime_type())
        .unwrap_or(LEGACY_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::{MessageContent, Role};

    // Tiny 1x1 PNG (base64 encoded)
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    fn image_url(request: &VisionRequest) -> String {
        match &request.messages()[1].content {
            MessageContent::Parts(parts) => match &parts[1] {
                ContentPart::ImageUrl { image_url } => image_url.url.clone(),
                other => panic!("expected image part, got {:?}", other),
            },
            other => panic!("expected parts, got {:?}", other),
        }
    }

    #[test]
    fn test_two_messages_in_order() {
        let request = VisionRequestBuilder::default().build(PNG_1X1);
        let messages = request.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_legacy_policy_labels_png_as_jpeg() {
        let request = VisionRequestBuilder::default().build(PNG_1X1);
        assert_eq!(image_url(&request), format!("data:image/jpeg;base64,{}", PNG_1X1));
    }

    #[test]
    fn test_detect_policy_uses_real_format() {
        let request = VisionRequestBuilder::default()
            .mime_policy(MimePolicy::Detect)
            .build(PNG_1X1);
        assert_eq!(image_url(&request), format!("data:image/png;base64,{}", PNG_1X1));
    }

    #[test]
    fn test_detect_policy_falls_back_to_jpeg() {
        let request = VisionRequestBuilder::default()
            .mime_policy(MimePolicy::Detect)
            .build("bm90IGFuIGltYWdl");
        assert_eq!(image_url(&request), "data:image/jpeg;base64,bm90IGFuIGltYWdl");
    }

    #[test]
    fn test_existing_prefix_not_doubled() {
        let input = format!("data:image/png;base64,{}", PNG_1X1);
        let request = VisionRequestBuilder::default().build(&input);
        assert_eq!(image_url(&request), format!("data:image/jpeg;base64,{}", PNG_1X1));
    }

    #[test]
    fn test_build_uses_given_texts() {
        let request = build(PNG_1X1, "Read the label.", "You read labels.");
        let value = serde_json::to_value(request.messages()).unwrap();
        assert_eq!(value[0]["content"], "You read labels.");
        assert_eq!(value[1]["content"][0]["type"], "text");
        assert_eq!(value[1]["content"][0]["text"], "Read the label.");
        assert_eq!(value[1]["content"][1]["type"], "image_url");
    }

    #[test]
    fn test_chat_request_uses_endpoint_model() {
        let body = VisionRequestBuilder::default()
            .build(PNG_1X1)
            .to_chat_request(&EndpointConfig::azure("https://x"));
        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.max_tokens, 1000);
        assert_eq!(body.temperature, 0.1);
    }
}
