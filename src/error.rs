use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom result type alias for the application
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// Errors that can occur while scanning a project directory
#[derive(Debug, Error)]
pub enum ScanError {
    /// The requested scan root does not exist or is not a directory
    #[error("project path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// I/O errors raised while listing the scan root
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur while generating README text upstream
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The upstream completion API rejected the request or returned non-2xx
    #[error("text generation failed: {0}")]
    Upstream(String),

    /// The upstream response body did not have the expected shape
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    /// HTTP transport errors talking to the upstream API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Top-level service error, one variant per collaborating subsystem
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Project scanning errors
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// README generation errors
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Configuration errors raised at startup
    #[error("config error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Creates a configuration error with the specified message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Checks whether this error maps to HTTP 404 at the API boundary
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Scan(ScanError::PathNotFound(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let missing = ServiceError::from(ScanError::PathNotFound(PathBuf::from("/no/such")));
        let upstream = ServiceError::from(GeneratorError::Upstream("boom".into()));

        assert!(missing.is_not_found());
        assert!(!upstream.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = ScanError::PathNotFound(PathBuf::from("/tmp/x"));
        assert_eq!(err.to_string(), "project path not found: /tmp/x");

        let err = GeneratorError::MalformedResponse("no choices".into());
        assert!(err.to_string().contains("no choices"));
    }
}
