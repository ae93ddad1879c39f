//! Error types for the Grove3D engine
//!
//! This module defines the error types used throughout the engine,
//! including render target setup, asset loading and configuration.

use std::fmt;
use std::path::PathBuf;
use crate::renderer::{AttachmentSlot, IncompleteReason};

/// Result type for Grove3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Grove3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL driver, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, framebuffer, program, etc.)
    InvalidResource(String),

    /// Initialization failed (application, pipeline, subsystems)
    InitializationFailed(String),

    /// A framebuffer failed its completeness check
    IncompleteFramebuffer {
        /// Name of the render target being built ("gbuffer", "shadow")
        target: String,
        /// Attachment the driver blamed
        attachment: AttachmentSlot,
        /// Why the attachment was rejected
        reason: IncompleteReason,
    },

    /// An asset file could not be loaded
    AssetNotFound(PathBuf),

    /// Configuration could not be read or parsed
    ConfigError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::IncompleteFramebuffer { target, attachment, reason } => write!(
                f,
                "Incomplete framebuffer '{}': attachment {} is {}",
                target, attachment, reason
            ),
            Error::AssetNotFound(path) => write!(f, "Asset not found: {}", path.display()),
            Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
