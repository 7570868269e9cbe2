// Hosted vision provider module
// Author: kelexine (https://github.com/kelexine)
//
// Request construction (`request`), endpoint variants and credentials
// (`endpoint`), and the single-shot HTTP client (`client`).

pub mod client;
pub mod endpoint;
pub mod request;

pub use client::{extract_text, VisionClient, VisionResponse};
pub use endpoint::{Credential, EndpointConfig};
pub use request::{build, VisionRequest, VisionRequestBuilder};
