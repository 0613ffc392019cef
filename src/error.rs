//! Error types for the notascope library.

use std::io;
use thiserror::Error;

/// Result type alias for notascope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fetching, storing, or parsing report data.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Network error or non-2xx status while fetching the report page.
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The persisted snapshot could not be serialized or deserialized.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Error during rendering (text report, JSON).
    #[error("rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Render("bad table".to_string());
        assert_eq!(err.to_string(), "rendering error: bad table");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Snapshot(_)));
    }
}
