//! Error types for rf-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Only fatal conditions live here: a failed upload for a single region is
//! recorded as a [`RegionStatus::Failed`](crate::publisher::RegionStatus) outcome
//! and never escapes the publisher.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for rf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rf-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment value is absent or empty
    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// The artifact path does not point at a readable file
    #[error("Provided path to file ({}) does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// The base template has no lines to render
    #[error("Could not get base template from {}: file is empty", .0.display())]
    EmptyTemplate(PathBuf),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network or service error
    #[error("Network error: {0}")]
    Network(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::MissingConfiguration(_) => 2, // UsageError
            Error::EmptyTemplate(_) => 2,        // UsageError
            Error::Network(_) => 3,              // NetworkError
            Error::Auth(_) => 4,                 // AuthError
            Error::FileNotFound(_) => 5,         // NotFound
            _ => 1,                              // GeneralError
        }
    }
}
