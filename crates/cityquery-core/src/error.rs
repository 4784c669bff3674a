//! Error types for CityQuery
//!
//! Attribute- and argument-level gaps in a query are not errors: they are
//! recovered locally by skipping. Only collaborator and input failures end up
//! here.

use thiserror::Error;

/// The main error type for CityQuery operations
#[derive(Error, Debug)]
pub enum Error {
    // ========== Collaborator Errors ==========
    #[error("Tagging unavailable: {0}")]
    TaggingUnavailable(String),

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    // ========== Scene Errors ==========
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    // ========== Geometry Errors ==========
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    // ========== Serialization Errors ==========
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ========== IO Errors ==========
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========== Configuration Errors ==========
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for CityQuery operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if this error comes from an external collaborator
    /// (language tagging, host camera) and has no local recovery
    pub fn is_host_failure(&self) -> bool {
        matches!(
            self,
            Error::TaggingUnavailable(_) | Error::CameraUnavailable(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Deserialization(err.to_string())
        }
    }
}
