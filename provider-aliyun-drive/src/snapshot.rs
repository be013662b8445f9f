//! Snapshot pipeline: resolve a path, then walk it

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::connector::DriveApi;
use crate::error::Result;
use crate::resolver::PathResolver;
use crate::types::{DriveContext, FileKind};
use crate::walker::{Snapshot, TreeWalker, WalkOptions};

/// Build the context for a run, asking the account for its default drive
/// when no drive id is configured
pub async fn resolve_drive_context(
    api: &dyn DriveApi,
    access_token: &str,
    drive_id: Option<String>,
) -> Result<DriveContext> {
    let drive_id = match drive_id {
        Some(id) => id,
        None => {
            let info = api.get_drive_info(access_token).await?;
            info!(drive_id = %info.default_drive_id, "Using default drive");
            info.default_drive_id
        }
    };

    Ok(DriveContext::new(drive_id, access_token))
}

/// Produces flat file listings for paths or folder ids
pub struct SnapshotService {
    resolver: PathResolver,
    walker: TreeWalker,
}

impl SnapshotService {
    pub fn new(api: Arc<dyn DriveApi>, context: DriveContext, options: WalkOptions) -> Self {
        Self {
            resolver: PathResolver::new(Arc::clone(&api), context.clone()),
            walker: TreeWalker::new(api, context, options),
        }
    }

    /// Snapshot everything below `path`
    ///
    /// `elapsed` on the result covers the path lookup as well as the walk.
    ///
    /// # Errors
    ///
    /// [`AliyunDriveError::FolderNotFound`](crate::AliyunDriveError::FolderNotFound)
    /// when `path` cannot be resolved; nothing is listed in that case.
    #[instrument(skip(self))]
    pub async fn snapshot_of_path(&self, path: &str) -> Result<Snapshot> {
        let started = Instant::now();
        let root = self.resolver.resolve(path).await?;

        if root.kind == FileKind::File {
            warn!(file_id = %root.file_id, "Path names a file, listing it as a folder");
        }

        let mut snapshot = self.walker.walk(&root.file_id).await?;
        snapshot.elapsed = started.elapsed();
        Ok(snapshot)
    }

    /// Snapshot everything below an already known folder id
    pub async fn snapshot_of_folder(&self, folder_id: &str) -> Result<Snapshot> {
        self.walker.walk(folder_id).await
    }
}
