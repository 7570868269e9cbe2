// CLI module for vision-extract
// Author: kelexine (https://github.com/kelexine)

use crate::config::ProviderKind;
use crate::error::{Result, VisionError};
use crate::vision::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use clap::{Parser, Subcommand};
use std::io::Read;

/// vision-call - Extract the text visible in an image with a hosted vision model
#[derive(Parser, Debug)]
#[command(name = "vision-call", version, about, long_about = None)]
pub struct VisionCallArgs {
    /// Base64 image (optionally a data URL), or `-` to read it from stdin
    pub image: String,

    /// Azure AI base URL, or the GitHub Models URL (defaults from config)
    pub endpoint: Option<String>,

    /// Azure API key or GitHub token (defaults from config)
    pub credential: Option<String>,

    /// Upstream provider variant
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Validate and shrink the image to the configured bounds before sending
    #[arg(long)]
    pub resize: bool,

    /// Label the image with its detected MIME type instead of image/jpeg
    #[arg(long)]
    pub detect_mime: bool,
}

/// image-utility - Validate, inspect and resize base64 images
#[derive(Parser, Debug)]
#[command(name = "image-utility", version, about, long_about = None)]
pub struct ImageUtilityArgs {
    #[command(subcommand)]
    pub command: ImageCommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Print {"valid": bool} for the image
    Validate {
        /// Base64 image (optionally a data URL), or `-` for stdin
        image: String,
    },
    /// Print format, size, mode, width and height as JSON
    Info {
        /// Base64 image (optionally a data URL), or `-` for stdin
        image: String,
    },
    /// Shrink the image to fit the bounds and print it as base64
    Resize {
        /// Base64 image (optionally a data URL), or `-` for stdin
        image: String,

        /// Maximum width in pixels
        #[arg(default_value_t = DEFAULT_MAX_WIDTH)]
        max_width: u32,

        /// Maximum height in pixels
        #[arg(default_value_t = DEFAULT_MAX_HEIGHT)]
        max_height: u32,
    },
}

/// Resolve an image argument, reading stdin when it is `-`.
pub fn read_image_arg(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    let trimmed = buf.trim();
    if trimmed.is_empty() {
        return Err(VisionError::InvalidRequest(
            "No image data on stdin".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Parse arguments, exiting with status 1 on usage errors (0 for --help/--version).
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    }
}

/// Render an error and its causes on one line.
///
/// A cause whose text already appears in the message above it is skipped, so
/// errors that embed their source are not printed twice.
pub fn render_error(error: &anyhow::Error) -> String {
    let mut rendered = String::new();
    let mut previous = String::new();

    for cause in error.chain() {
        let message = cause.to_string();
        if !previous.contains(&message) {
            if !rendered.is_empty() {
                rendered.push_str(": ");
            }
            rendered.push_str(&message);
        }
        previous = message;
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_render_error_skips_repeated_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let error = Err::<(), _>(VisionError::from(io))
            .context("GitHub vision processing failed")
            .unwrap_err();
        assert_eq!(
            render_error(&error),
            "GitHub vision processing failed: IO error: connection refused"
        );
    }

    #[test]
    fn test_render_error_keeps_distinct_causes() {
        let error = Err::<(), _>(VisionError::InvalidRequest("empty".to_string()))
            .context("reading image")
            .unwrap_err();
        assert_eq!(render_error(&error), "reading image: Invalid request: empty");
    }

    #[test]
    fn test_resize_defaults() {
        let args = ImageUtilityArgs::try_parse_from(["image-utility", "resize", "abc"]).unwrap();
        match args.command {
            ImageCommand::Resize {
                image,
                max_width,
                max_height,
            } => {
                assert_eq!(image, "abc");
                assert_eq!((max_width, max_height), (1024, 1024));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_resize_explicit_bounds() {
        let args =
            ImageUtilityArgs::try_parse_from(["image-utility", "resize", "abc", "640", "480"])
                .unwrap();
        assert!(matches!(
            args.command,
            ImageCommand::Resize {
                max_width: 640,
                max_height: 480,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(ImageUtilityArgs::try_parse_from(["image-utility", "rotate", "abc"]).is_err());
    }

    #[test]
    fn test_vision_call_positionals() {
        let args = VisionCallArgs::try_parse_from([
            "vision-call",
            "--provider",
            "azure",
            "aGVsbG8=",
            "https://res.openai.azure.com",
            "key",
        ])
        .unwrap();
        assert_eq!(args.provider, Some(ProviderKind::Azure));
        assert_eq!(args.endpoint.as_deref(), Some("https://res.openai.azure.com"));
        assert_eq!(args.credential.as_deref(), Some("key"));
        assert!(!args.resize);
    }
}
