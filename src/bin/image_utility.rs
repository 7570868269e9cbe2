// image-utility - Validate, inspect and resize base64 images
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use serde_json::json;
use tracing::{debug, warn};
use vision_extract::cli::{
    parse_or_exit, read_image_arg, render_error, ImageCommand, ImageUtilityArgs,
};
use vision_extract::config::AppConfig;
use vision_extract::utils::logging;
use vision_extract::vision;

fn main() {
    let args: ImageUtilityArgs = parse_or_exit();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", render_error(&e));
        std::process::exit(1);
    }
}

fn run(args: ImageUtilityArgs) -> Result<()> {
    // Only logging is configurable here, so a broken config falls back to defaults.
    let loaded = AppConfig::load();
    let logging_config = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging::init(&logging_config)?;
    if let Err(e) = &loaded {
        warn!("Ignoring configuration: {}", e);
    }

    match args.command {
        ImageCommand::Validate { image } => {
            let image = read_image_arg(&image)?;
            let valid = vision::validate(&image);
            debug!("Validation result: {}", valid);
            println!("{}", json!({ "valid": valid }));
        }
        ImageCommand::Info { image } => {
            let image = read_image_arg(&image)?;
            let info = vision::inspect(&image)?;
            println!("{}", serde_json::to_string(&info)?);
        }
        ImageCommand::Resize {
            image,
            max_width,
            max_height,
        } => {
            let image = read_image_arg(&image)?;
            println!("{}", vision::resize(&image, max_width, max_height)?);
        }
    }

    Ok(())
}
