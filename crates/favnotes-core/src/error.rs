//! Error types for favnotes.

use thiserror::Error;

/// Result type alias using favnotes' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for favnotes operations.
///
/// Missing datasets and malformed records are recovered inside the engine and
/// never show up on the request path; the only hard failure there is
/// [`Error::NoteNotFound`]. A primary entry rejected as [`Error::InvalidInput`]
/// is logged and skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// Note not found in the primary dataset
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// Whether this error means the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NoteNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_note_not_found() {
        let err = Error::NoteNotFound("64a1f0c2000000001e03a7b1".to_string());
        assert_eq!(err.to_string(), "Note not found: 64a1f0c2000000001e03a7b1");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("note entry has no string id".to_string());
        assert_eq!(err.to_string(), "Invalid input: note entry has no string id");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("PORT is not a number".to_string());
        assert_eq!(err.to_string(), "Configuration error: PORT is not a number");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>(r#"{"data": ["#).unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::NoteNotFound("x".to_string()).is_not_found());
        assert!(!Error::InvalidInput("x".to_string()).is_not_found());
        assert!(!Error::Config("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
