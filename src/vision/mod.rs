//! Local image handling for the vision pipeline.
//!
//! This module decodes base64 (optionally data-URL prefixed) image payloads,
//! checks that they are well-formed raster images, reports their header
//! facts and shrinks oversized images before they are shipped upstream.
//!
//! # Submodules
//!
//! - `data_url`: Prefix splitting and base64 codec helpers.
//! - `models`: Supported formats, colour-mode names and size limits.
//! - `utility`: `validate`, `inspect` and `resize`.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod data_url;
pub mod models;
pub mod utility;

pub use data_url::EncodedImage;
pub use models::ImageFormat;
pub use utility::{
    fit_within, inspect, resize, validate, ImageInfo, ImagePayload, DEFAULT_MAX_HEIGHT,
    DEFAULT_MAX_WIDTH,
};
