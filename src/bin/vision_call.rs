// vision-call - Extract the text visible in an image with a hosted vision model
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use tracing::info;
use vision_extract::cli::{parse_or_exit, read_image_arg, render_error, VisionCallArgs};
use vision_extract::config::{AppConfig, MimePolicy};
use vision_extract::provider::{Credential, EndpointConfig, VisionClient, VisionRequestBuilder};
use vision_extract::utils::logging;
use vision_extract::vision;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: VisionCallArgs = parse_or_exit();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", render_error(&e));
        std::process::exit(1);
    }
}

async fn run(args: VisionCallArgs) -> Result<()> {
    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting vision-call v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Resolve provider, endpoint and credential
    let kind = args.provider.unwrap_or(config.provider.kind);
    let endpoint = EndpointConfig::resolve(kind, args.endpoint.as_deref(), &config)?;
    let credential = Credential::resolve(kind, args.credential.as_deref(), &config)?;

    // Phase 4: Optional local preprocessing
    let mut image = read_image_arg(&args.image)?;
    if args.resize || config.image.resize_before_call {
        if !vision::validate(&image) {
            anyhow::bail!("Input is not a valid image");
        }
        image = vision::resize(&image, config.image.max_width, config.image.max_height)
            .context("Failed to resize image")?;
    }

    // Phase 5: Build the request and call upstream once
    let mime_policy = if args.detect_mime {
        MimePolicy::Detect
    } else {
        config.image.mime_policy
    };
    let request = VisionRequestBuilder::new(&config.prompt.system, &config.prompt.instruction)
        .mime_policy(mime_policy)
        .build(&image);

    let client = VisionClient::new(&config.http)?;
    let response = client
        .call(&request, &endpoint, &credential)
        .await
        .with_context(|| format!("{} vision processing failed", endpoint.label()))?;

    println!("{}", response.text);
    Ok(())
}
