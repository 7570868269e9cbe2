// vision-extract - Image-to-text extraction through hosted vision models
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod utils;
pub mod vision;
