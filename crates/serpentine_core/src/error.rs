//! Error types for serpentine_core.
//!
//! Ticks themselves never fail; these cover building a world, switching
//! levels and exporting state.

use thiserror::Error;

/// Main error type for world construction and export.
#[derive(Error, Debug)]
pub enum SimError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Levels are 1-based
    #[error("Invalid level: {0}")]
    InvalidLevel(u32),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for serpentine_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::invalid_config("arena too small");
        assert_eq!(err.to_string(), "Invalid configuration: arena too small");
        assert_eq!(SimError::InvalidLevel(0).to_string(), "Invalid level: 0");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SimError = io_err.into();
        assert!(matches!(err, SimError::FileSystem(_)));
    }
}
