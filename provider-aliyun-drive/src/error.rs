//! Error types for the Aliyun Drive provider

use thiserror::Error;

/// Aliyun Drive provider errors
#[derive(Error, Debug)]
pub enum AliyunDriveError {
    /// API request returned a non-200 status
    #[error("Aliyun Drive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A 200 response did not have the expected shape
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The root path could not be resolved to a folder
    #[error("Folder not found: {path}")]
    FolderNotFound { path: String },

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] bridge_traits::error::BridgeError),
}

impl AliyunDriveError {
    /// Whether the remote call failed outright (bad status or transport),
    /// as opposed to answering with something malformed.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            AliyunDriveError::ApiError { .. } | AliyunDriveError::NetworkError(_)
        )
    }
}

/// Result type for Aliyun Drive operations
pub type Result<T> = std::result::Result<T, AliyunDriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AliyunDriveError::ApiError {
            status_code: 404,
            message: r#"{"code":"NotFound.File"}"#.to_string(),
        };

        assert_eq!(
            error.to_string(),
            r#"Aliyun Drive API error (status 404): {"code":"NotFound.File"}"#
        );
    }

    #[test]
    fn test_remote_failure_classification() {
        assert!(AliyunDriveError::ApiError {
            status_code: 500,
            message: String::new()
        }
        .is_remote_failure());
        assert!(AliyunDriveError::NetworkError("reset".to_string()).is_remote_failure());
        assert!(!AliyunDriveError::ParseError("missing field".to_string()).is_remote_failure());
        assert!(!AliyunDriveError::FolderNotFound {
            path: "/x".to_string()
        }
        .is_remote_failure());
    }

    #[test]
    fn test_bridge_error_conversion() {
        let bridge = bridge_traits::error::BridgeError::OperationFailed("boom".to_string());
        let error: AliyunDriveError = bridge.into();
        assert!(matches!(error, AliyunDriveError::BridgeError(_)));
        assert!(!error.is_remote_failure());
    }
}
