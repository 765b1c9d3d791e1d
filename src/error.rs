use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, XvdlError>;

#[derive(Error, Debug)]
pub enum XvdlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Binary not found: {name}")]
    BinaryNotFound { name: String },

    #[error("Failed to install '{package}': {message}")]
    InstallFailed { package: String, message: String },
}

impl XvdlError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        XvdlError::ConfigError {
            message: message.into(),
        }
    }

    pub fn install_failed<P: Into<String>, S: Into<String>>(package: P, message: S) -> Self {
        XvdlError::InstallFailed {
            package: package.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by the extraction tool.
///
/// `Download` is the tool's own "could not retrieve media" condition (private
/// or deleted post, post without video). Everything else is `Unexpected`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{0}")]
    Download(String),

    #[error("{0}")]
    Unexpected(String),
}

/// Result of a user-facing operation. Failures are values, not errors: the
/// caller prints them and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    KnownFailure(String),
    UnknownFailure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl<T> From<ExtractError> for Outcome<T> {
    fn from(error: ExtractError) -> Self {
        match error {
            ExtractError::Download(reason) => Outcome::KnownFailure(reason),
            ExtractError::Unexpected(message) => Outcome::UnknownFailure(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_maps_to_outcome_tier() {
        let known: Outcome<()> = ExtractError::Download("private".into()).into();
        assert_eq!(known, Outcome::KnownFailure("private".to_string()));

        let unknown: Outcome<()> = ExtractError::Unexpected("boom".into()).into();
        assert_eq!(unknown, Outcome::UnknownFailure("boom".to_string()));
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(Outcome::Success(3).is_success());
        assert!(!Outcome::<i32>::KnownFailure("x".into()).is_success());
        assert!(!Outcome::<i32>::UnknownFailure("x".into()).is_success());
    }
}
