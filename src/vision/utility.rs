// Image validation, inspection and proportional resizing
// Author: kelexine (https://github.com/kelexine)

use super::data_url::{encode_base64, EncodedImage};
use super::models::{color_mode, validate_image_size, ImageFormat};
use crate::error::{Result, VisionError};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};
use serde::Serialize;
use std::io::Cursor;
use tracing::debug;

/// Default bounding box used by `resize` when the caller gives none.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;
pub const DEFAULT_MAX_HEIGHT: u32 = 1024;

/// Decoded image bytes together with the header facts we sniffed from them.
///
/// Payloads are never modified in place; `resized` produces a new one.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
    color: ColorType,
}

/// Header summary returned by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub size: [u32; 2],
    pub mode: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    /// Decode a base64 string (optionally data-URL prefixed) and read its headers.
    pub fn from_base64(input: &str) -> Result<Self> {
        let encoded = EncodedImage::parse(input)?;
        Self::from_bytes(encoded.decode()?)
    }

    /// Sniff format, dimensions and colour type from raw bytes.
    ///
    /// Only the headers are read here; call `decode` for the pixel data.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        validate_image_size(bytes.len()).map_err(VisionError::ImageDecode)?;

        let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
            VisionError::ImageDecode("Could not detect image format from data".to_string())
        })?;

        // The decoder borrows `bytes`, so it must be gone before `bytes` moves.
        let (width, height, color) = {
            let decoder =
                ImageReader::with_format(Cursor::new(bytes.as_slice()), format.to_codec())
                    .into_decoder()
                    .map_err(|e| VisionError::ImageDecode(e.to_string()))?;
            let (width, height) = decoder.dimensions();
            (width, height, decoder.color_type())
        };

        Ok(Self {
            bytes,
            format,
            width,
            height,
            color,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> &'static str {
        color_mode(self.color)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            format: self.format,
            size: [self.width, self.height],
            mode: self.mode(),
            width: self.width,
            height: self.height,
        }
    }

    /// Fully decode the pixel data. Truncated or corrupt files fail here.
    pub fn decode(&self) -> Result<DynamicImage> {
        ImageReader::with_format(Cursor::new(self.bytes.as_slice()), self.format.to_codec())
            .decode()
            .map_err(|e| VisionError::ImageDecode(e.to_string()))
    }

    /// Produce a copy scaled to fit the bounding box, or `None` if it already fits.
    pub fn resized(&self, max_width: u32, max_height: u32) -> Result<Option<ImagePayload>> {
        if max_width == 0 || max_height == 0 {
            return Err(VisionError::InvalidRequest(format!(
                "Resize bounds must be positive, got {}x{}",
                max_width, max_height
            )));
        }

        let Some((new_width, new_height)) =
            fit_within(self.width, self.height, max_width, max_height)
        else {
            return Ok(None);
        };

        debug!(
            "Resizing {} image from {}x{} to {}x{}",
            self.format.name(),
            self.width,
            self.height,
            new_width,
            new_height
        );

        let resized = self
            .decode()?
            .resize_exact(new_width, new_height, FilterType::Lanczos3);
        let bytes = encode_image(resized, self.format)?;

        Ok(Some(ImagePayload::from_bytes(bytes)?))
    }

    pub fn to_base64(&self) -> String {
        encode_base64(&self.bytes)
    }
}

/// Target dimensions that fit `width`x`height` into the bounds, preserving aspect ratio.
///
/// Returns `None` when no resize is needed. The scale factor is
/// `min(max_width / width, max_height / height)` and each side is floored,
/// computed on integers so exact ratios never lose a pixel to float error.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return None;
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (mw, mh) = (u64::from(max_width), u64::from(max_height));

    let (new_w, new_h) = if mw * h <= mh * w {
        (mw, h * mw / w)
    } else {
        (w * mh / h, mh)
    };

    // Both values are bounded by the u32 inputs.
    Some((new_w.max(1) as u32, new_h.max(1) as u32))
}

fn encode_image(image: DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let image = prepare_for_encoder(image, format);
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format.to_codec())
        .map_err(|e| VisionError::ImageEncode(e.to_string()))?;
    Ok(buf)
}

/// Convert pixel layouts the target encoder cannot write.
fn prepare_for_encoder(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    let color = image.color();
    let grey = matches!(
        color,
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16
    );

    match format {
        ImageFormat::Png => image,
        ImageFormat::Tiff => match color {
            ColorType::La8 => DynamicImage::ImageRgba8(image.to_rgba8()),
            ColorType::La16 => DynamicImage::ImageRgba16(image.to_rgba16()),
            _ => image,
        },
        ImageFormat::Jpeg => match color {
            ColorType::L8 | ColorType::Rgb8 => image,
            _ if grey => DynamicImage::ImageLuma8(image.to_luma8()),
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        },
        _ => {
            if color.bytes_per_pixel() == color.channel_count() {
                image
            } else if color.has_alpha() {
                DynamicImage::ImageRgba8(image.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
        }
    }
}

/// Check that the input decodes to a well-formed raster image.
///
/// Never fails: any decode, format or integrity problem yields `false`.
pub fn validate(input: &str) -> bool {
    match ImagePayload::from_base64(input).and_then(|payload| payload.decode()) {
        Ok(_) => true,
        Err(e) => {
            debug!("Image validation failed: {}", e);
            false
        }
    }
}

/// Report format, dimensions and colour mode of a base64 image.
pub fn inspect(input: &str) -> Result<ImageInfo> {
    Ok(ImagePayload::from_base64(input)?.info())
}

/// Shrink an image to fit within the bounds, preserving aspect ratio.
///
/// Images that already fit are returned unchanged, byte for byte. A data-URL
/// prefix on the input is carried over verbatim to the output.
pub fn resize(input: &str, max_width: u32, max_height: u32) -> Result<String> {
    let encoded = EncodedImage::parse(input)?;
    let payload = ImagePayload::from_bytes(encoded.decode()?)?;

    match payload.resized(max_width, max_height)? {
        Some(resized) => Ok(encoded.with_payload(&resized.to_base64())),
        None => Ok(input.to_string()),
    }
}
