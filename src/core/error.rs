//! Error handling for Maya.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every variant maps to one failure
//! kind a user (or a template author) can run into, and each kind carries its
//! own process exit code.
//!
//! # Examples
//!
//! ```
//! use maya::core::error::{Error, Result};
//!
//! fn check_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::config("project_name", "must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_name("").is_err());
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for Maya operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Maya operations
#[derive(Debug, Error)]
pub enum Error {
    /// An option value failed validation; raised before any filesystem access
    #[error("Configuration error: {field}: {message}")]
    Config {
        field: &'static str,
        message: String,
    },

    /// The destination directory already exists
    #[error("Destination conflict: {} already exists", .0.display())]
    DestinationConflict(PathBuf),

    /// Creating a directory or writing a file failed
    #[error("Write failure at {}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template bundle itself is broken (unknown token, missing variant, ...)
    #[error("Template integrity error: {0}")]
    TemplateIntegrity(String),

    /// A custom template directory or one of its files could not be read
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

impl Error {
    /// Create a new configuration error for `field`
    pub fn config<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }

    /// Create a new template integrity error
    pub fn integrity<S: Into<String>>(message: S) -> Self {
        Self::TemplateIntegrity(message.into())
    }

    /// Create a new write failure for `path`
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit code reported by the CLI for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config { .. } | Self::TemplateNotFound(_) => 2,
            Self::DestinationConflict(_) => 3,
            Self::WriteFailure { .. } => 4,
            Self::TemplateIntegrity(_) => 5,
        }
    }
}
