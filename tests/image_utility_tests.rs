// Image utility behaviour tests
// Author: kelexine (https://github.com/kelexine)

use base64::Engine;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use proptest::prelude::*;
use std::io::Cursor;
use vision_extract::error::VisionError;
use vision_extract::vision::{self, fit_within, ImageFormat};

fn to_base64(image: &DynamicImage, format: image::ImageFormat) -> String {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf)
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

#[test]
fn test_inspect_known_png() {
    let input = to_base64(&gradient(100, 50), image::ImageFormat::Png);
    let info = vision::inspect(&input).unwrap();

    assert_eq!(info.format, ImageFormat::Png);
    assert_eq!(info.width, 100);
    assert_eq!(info.height, 50);
    assert_eq!(info.size, [100, 50]);
    assert_eq!(info.mode, "RGB");
}

#[test]
fn test_inspect_json_shape() {
    let input = to_base64(&gradient(100, 50), image::ImageFormat::Png);
    let value = serde_json::to_value(vision::inspect(&input).unwrap()).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "format": "PNG",
            "size": [100, 50],
            "mode": "RGB",
            "width": 100,
            "height": 50
        })
    );
}

#[test]
fn test_inspect_grayscale_jpeg() {
    let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 6, Luma([90])));
    let info = vision::inspect(&to_base64(&gray, image::ImageFormat::Jpeg)).unwrap();
    assert_eq!(info.format, ImageFormat::Jpeg);
    assert_eq!(info.mode, "L");
}

#[test]
fn test_inspect_with_data_url_prefix() {
    let input = format!(
        "data:image/png;base64,{}",
        to_base64(&gradient(10, 20), image::ImageFormat::Png)
    );
    let info = vision::inspect(&input).unwrap();
    assert_eq!((info.width, info.height), (10, 20));
}

#[test]
fn test_inspect_rejects_non_image() {
    let input = base64::engine::general_purpose::STANDARD.encode(b"just some text bytes here");
    assert!(matches!(
        vision::inspect(&input),
        Err(VisionError::ImageDecode(_))
    ));
}

#[test]
fn test_validate_accepts_real_image() {
    let input = to_base64(&gradient(16, 16), image::ImageFormat::Png);
    assert!(vision::validate(&input));
}

#[test]
fn test_validate_rejects_bad_inputs() {
    assert!(!vision::validate(""));
    assert!(!vision::validate("this is not base64 at all!"));
    assert!(!vision::validate(
        &base64::engine::general_purpose::STANDARD.encode(b"GIF? no, plain bytes")
    ));
}

#[test]
fn test_validate_rejects_truncated_image() {
    let mut buf = Vec::new();
    gradient(64, 64)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf.truncate(buf.len() / 2);

    let input = base64::engine::general_purpose::STANDARD.encode(&buf);
    assert!(!vision::validate(&input));
}

#[test]
fn test_resize_within_bounds_is_identity() {
    let input = to_base64(&gradient(300, 200), image::ImageFormat::Png);
    assert_eq!(vision::resize(&input, 1024, 1024).unwrap(), input);

    let prefixed = format!("data:image/png;base64,{}", input);
    assert_eq!(vision::resize(&prefixed, 1024, 1024).unwrap(), prefixed);
}

#[test]
fn test_resize_wide_image_to_1024x512() {
    let input = to_base64(&gradient(2000, 1000), image::ImageFormat::Png);
    let output = vision::resize(&input, 1024, 1024).unwrap();

    let info = vision::inspect(&output).unwrap();
    assert_eq!((info.width, info.height), (1024, 512));
    assert_eq!(info.format, ImageFormat::Png);
}

#[test]
fn test_resize_preserves_data_url_prefix() {
    let prefix = "data:image/png;base64,";
    let input = format!(
        "{}{}",
        prefix,
        to_base64(&gradient(400, 100), image::ImageFormat::Png)
    );
    let output = vision::resize(&input, 200, 200).unwrap();

    assert!(output.starts_with(prefix));
    let info = vision::inspect(&output).unwrap();
    assert_eq!((info.width, info.height), (200, 50));
}

#[test]
fn test_resize_rejects_malformed_input() {
    assert!(matches!(
        vision::resize("@@@@", 10, 10),
        Err(VisionError::ImageDecode(_))
    ));
}

proptest! {
    #[test]
    fn prop_fit_within_respects_bounds_and_ratio(
        width in 1u32..5000,
        height in 1u32..5000,
        max_width in 1u32..2048,
        max_height in 1u32..2048,
    ) {
        match fit_within(width, height, max_width, max_height) {
            None => {
                prop_assert!(width <= max_width && height <= max_height);
            }
            Some((new_w, new_h)) => {
                prop_assert!(width > max_width || height > max_height);
                prop_assert!(new_w <= max_width);
                prop_assert!(new_h <= max_height);
                prop_assert!(new_w >= 1 && new_h >= 1);

                // The limiting side hits its bound exactly; the other is within
                // a pixel of the exact proportional value (or clamped up to 1).
                let width_bound =
                    u64::from(max_width) * u64::from(height) <= u64::from(max_height) * u64::from(width);
                let (w, h) = (width as f64, height as f64);
                if width_bound {
                    prop_assert_eq!(new_w, max_width);
                    let exact_h = new_w as f64 * h / w;
                    prop_assert!((new_h as f64 - exact_h).abs() <= 1.0 || new_h == 1);
                } else {
                    prop_assert_eq!(new_h, max_height);
                    let exact_w = new_h as f64 * w / h;
                    prop_assert!((new_w as f64 - exact_w).abs() <= 1.0 || new_w == 1);
                }
            }
        }
    }
}
