//! Data-URL prefix handling and base64 decoding.
//!
//! Callers may hand us either a bare base64 payload or a full
//! `data:image/...;base64,<payload>` string. The prefix is split off
//! verbatim so it can be re-applied after a transformation.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::{Result, VisionError};
use base64::Engine;

const DATA_IMAGE_PREFIX: &str = "data:image";

/// A base64 input split into its optional data-URL prefix and the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedImage<'a> {
    /// Everything up to and including the first `,`, when present.
    pub prefix: Option<&'a str>,
    /// The raw base64 text after the prefix.
    pub payload: &'a str,
}

impl<'a> EncodedImage<'a> {
    /// Split an input string on its data-URL prefix.
    ///
    /// A string that starts with `data:image` but has no `,` is rejected.
    pub fn parse(input: &'a str) -> Result<Self> {
        if !input.starts_with(DATA_IMAGE_PREFIX) {
            return Ok(Self {
                prefix: None,
                payload: input,
            });
        }

        let comma = input.find(',').ok_or_else(|| {
            VisionError::ImageDecode("Data URL is missing the ',' separator".to_string())
        })?;

        Ok(Self {
            prefix: Some(&input[..=comma]),
            payload: &input[comma + 1..],
        })
    }

    /// Decode the payload to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_base64(self.payload)
    }

    /// Re-attach the original prefix (if any) to a new payload.
    pub fn with_payload(&self, payload: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{}{}", prefix, payload),
            None => payload.to_string(),
        }
    }
}

/// Decode standard base64, skipping ASCII whitespace such as line wraps.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| VisionError::ImageDecode(format!("Invalid base64 image data: {}", e)))
}

pub fn encode_base64(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Wrap a base64 payload as `data:<mime>;base64,<payload>`.
pub fn to_data_url(mime_type: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, payload)
}
