//! # Snapshot Configuration Module
//!
//! Provides the validated configuration for one snapshot run.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`SnapshotConfig`]. Everything that scopes remote calls (root path, drive
//! id, page size, pacing, endpoint base) is carried here explicitly and handed
//! to the provider at construction time.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::SnapshotConfig;
//! use std::time::Duration;
//!
//! let config = SnapshotConfig::builder()
//!     .root_path("/apps/obsidian/Brain Vault/")
//!     .drive_id("902823001")
//!     .folder_delay(Duration::from_millis(80))
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.page_size, 100);
//! ```
//!
//! ## Error Handling
//!
//! The builder fails fast with actionable messages:
//!
//! ```should_panic
//! use core_runtime::config::SnapshotConfig;
//!
//! let config = SnapshotConfig::builder()
//!     .build()
//!     .expect("Should fail - missing root path");
//! ```

use crate::error::{Error, Result};
use std::time::Duration;

/// Default remote API base
pub const DEFAULT_API_BASE: &str = "https://open.aliyundrive.com";

/// Default root folder walked when none is given
pub const DEFAULT_ROOT_PATH: &str = "/apps/obsidian/Brain Vault/";

/// Default number of entries requested per listing page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size the listing endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default courtesy delay after each folder listing pass
pub const DEFAULT_FOLDER_DELAY: Duration = Duration::from_millis(80);

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a single snapshot run.
///
/// Use [`SnapshotConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    /// Absolute path of the folder to snapshot
    pub root_path: String,

    /// Drive to walk; looked up from the account when `None`
    pub drive_id: Option<String>,

    /// Entries requested per listing call
    pub page_size: u32,

    /// Delay inserted once after each folder's listing pass
    pub folder_delay: Duration,

    /// Scheme and host of the remote API
    pub api_base: String,

    /// Timeout applied to each HTTP request
    pub request_timeout: Duration,
}

impl SnapshotConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SnapshotConfigBuilder {
        SnapshotConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The page size is outside `1..=MAX_PAGE_SIZE`
    /// - The drive id is present but blank
    /// - The API base is not an http(s) URL
    /// - The request timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "Page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if let Some(drive_id) = &self.drive_id {
            if drive_id.trim().is_empty() {
                return Err(Error::Config(
                    "Drive id cannot be blank. Omit it to use the account's default drive."
                        .to_string(),
                ));
            }
        }

        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(Error::Config(format!(
                "API base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`SnapshotConfig`] instances.
#[derive(Debug, Default)]
pub struct SnapshotConfigBuilder {
    root_path: Option<String>,
    drive_id: Option<String>,
    page_size: Option<u32>,
    folder_delay: Option<Duration>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
}

impl SnapshotConfigBuilder {
    /// Sets the absolute path of the folder to snapshot.
    pub fn root_path(mut self, path: impl Into<String>) -> Self {
        self.root_path = Some(path.into());
        self
    }

    /// Sets the drive id. Without it the caller resolves the default drive.
    pub fn drive_id(mut self, drive_id: impl Into<String>) -> Self {
        self.drive_id = Some(drive_id.into());
        self
    }

    /// Sets the drive id from an optional value.
    pub fn maybe_drive_id(mut self, drive_id: Option<String>) -> Self {
        self.drive_id = drive_id;
        self
    }

    /// Sets the listing page size.
    ///
    /// Default: 100
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the per-folder courtesy delay.
    ///
    /// Default: 80 ms
    pub fn folder_delay(mut self, delay: Duration) -> Self {
        self.folder_delay = Some(delay);
        self
    }

    /// Sets the API base URL. A trailing slash is dropped.
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Sets the per-request timeout.
    ///
    /// Default: 30 s
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the root path is missing or any value
    /// fails [`SnapshotConfig::validate`].
    pub fn build(self) -> Result<SnapshotConfig> {
        let root_path = self.root_path.ok_or_else(|| {
            Error::Config("Root path is required. Use .root_path() to set it.".to_string())
        })?;

        let api_base = self
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = SnapshotConfig {
            root_path,
            drive_id: self.drive_id,
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            folder_delay: self.folder_delay.unwrap_or(DEFAULT_FOLDER_DELAY),
            api_base,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SnapshotConfig::builder()
            .root_path("/apps/notes")
            .build()
            .unwrap();

        assert_eq!(config.root_path, "/apps/notes");
        assert_eq!(config.drive_id, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.folder_delay, Duration::from_millis(80));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_missing_root_path() {
        let result = SnapshotConfig::builder().build();
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("root_path")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_root_path_left_to_remote() {
        // Path syntax is judged by get_by_path, not here
        let relative = SnapshotConfig::builder().root_path("apps/notes").build().unwrap();
        assert_eq!(relative.root_path, "apps/notes");

        assert!(SnapshotConfig::builder().root_path("").build().is_ok());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(SnapshotConfig::builder()
            .root_path("/")
            .page_size(0)
            .build()
            .is_err());
        assert!(SnapshotConfig::builder()
            .root_path("/")
            .page_size(MAX_PAGE_SIZE + 1)
            .build()
            .is_err());
        assert!(SnapshotConfig::builder()
            .root_path("/")
            .page_size(1)
            .build()
            .is_ok());
    }

    #[test]
    fn test_blank_drive_id_rejected() {
        let result = SnapshotConfig::builder()
            .root_path("/")
            .maybe_drive_id(Some("  ".to_string()))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let config = SnapshotConfig::builder()
            .root_path("/")
            .api_base("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_api_base_scheme_required() {
        let result = SnapshotConfig::builder()
            .root_path("/")
            .api_base("open.aliyundrive.com")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = SnapshotConfig::builder()
            .root_path("/")
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
