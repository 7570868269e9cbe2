//! Utility functions and helpers for vision-extract.
//!
//! This module provides cross-cutting concerns like structured logging
//! and secret sanitization.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization (stderr only) and log sanitizing.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
