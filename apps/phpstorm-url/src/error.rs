//! Custom error types for the URL handler
//!
//! This module provides a unified error type for every operation the
//! handler performs. Each error is caught at the boundary of the command
//! that produced it and turned into a printed diagnostic.

use thiserror::Error;

/// Main error type for handler operations
#[derive(Error, Debug)]
pub enum HandlerError {
    /// No discovery source yielded an existing executable
    #[error("Could not find {name}. Make sure PhpStorm is installed or added to PATH")]
    ExecutableNotFound { name: String },

    /// Bad scheme, malformed structure, or missing target file
    #[error("URL parse error: {0}")]
    UrlParse(String),

    /// The registration could not be read
    #[error("Registry read error: {0}")]
    RegistrationRead(String),

    /// Writing the registration failed, usually missing privileges
    #[error("Registry write error: {0}. Try running as Administrator")]
    RegistrationWrite(String),

    /// Spawning the editor process failed
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform-specific errors
    #[error("Platform error: {0}")]
    Platform(String),
}

impl HandlerError {
    /// Create an executable not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ExecutableNotFound { name: name.into() }
    }

    /// Create a URL parse error
    pub fn url_parse(msg: impl Into<String>) -> Self {
        Self::UrlParse(msg.into())
    }

    /// Create a registry read error
    pub fn registration_read(msg: impl Into<String>) -> Self {
        Self::RegistrationRead(msg.into())
    }

    /// Create a registry write error
    pub fn registration_write(msg: impl Into<String>) -> Self {
        Self::RegistrationWrite(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }
}

/// Result type alias using HandlerError
pub type Result<T> = std::result::Result<T, HandlerError>;
