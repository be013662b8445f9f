//! Path resolution
//!
//! Turns an absolute path into the folder id the walker starts from.

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::connector::DriveApi;
use crate::error::{AliyunDriveError, Result};
use crate::types::{DriveContext, ResolvedFolder};

/// Maps absolute paths to folder ids with a single lookup
pub struct PathResolver {
    api: Arc<dyn DriveApi>,
    context: DriveContext,
}

impl PathResolver {
    pub fn new(api: Arc<dyn DriveApi>, context: DriveContext) -> Self {
        Self { api, context }
    }

    /// Resolve `path` to its id, name and kind
    ///
    /// Path syntax is left to the remote API to judge.
    ///
    /// # Errors
    ///
    /// - [`AliyunDriveError::FolderNotFound`] when the lookup answers with a
    ///   non-200 status or does not complete
    /// - [`AliyunDriveError::ParseError`] when a 200 body is malformed
    #[instrument(skip(self), fields(drive_id = %self.context.drive_id))]
    pub async fn resolve(&self, path: &str) -> Result<ResolvedFolder> {
        match self.api.get_file_by_path(&self.context, path).await {
            Ok(folder) => {
                info!(file_id = %folder.file_id, name = %folder.name, kind = ?folder.kind, "Resolved path");
                Ok(folder)
            }
            Err(e) if e.is_remote_failure() => {
                error!(error = %e, "Folder not found");
                Err(AliyunDriveError::FolderNotFound {
                    path: path.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}
