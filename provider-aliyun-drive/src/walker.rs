//! Depth-first folder walk
//!
//! The walker lists a folder page by page until the API hands back an empty
//! `next_marker`, then descends into each child folder in listing order. A
//! child folder's files land in the output exactly where the folder itself was
//! listed, so the result matches a plain recursive walk:
//!
//! ```text
//! root/{a.txt, sub/{b.txt}, c.txt}  =>  [a.txt, b.txt, c.txt]
//! ```
//!
//! Recursion is replaced by a stack of child iterators, one per open folder,
//! which keeps deep trees off the call stack.
//!
//! One listing call is in flight at a time, and after each folder's listing
//! pass the walker sleeps for [`WalkOptions::folder_delay`] to stay under the
//! API's request rate.

use core_runtime::config::{SnapshotConfig, DEFAULT_FOLDER_DELAY, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::connector::DriveApi;
use crate::error::Result;
use crate::types::{DriveContext, FileEntry, FileKind, Page, PageCursor};

/// Tuning for a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// `limit` sent with every listing call
    pub page_size: u32,

    /// Pause after each folder's listing pass
    pub folder_delay: Duration,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            folder_delay: DEFAULT_FOLDER_DELAY,
        }
    }
}

impl From<&SnapshotConfig> for WalkOptions {
    fn from(config: &SnapshotConfig) -> Self {
        Self {
            page_size: config.page_size,
            folder_delay: config.folder_delay,
        }
    }
}

/// Counters collected during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Folders whose listing pass ran, the root included
    pub folders_visited: usize,

    /// Listing calls issued, failed ones included
    pub pages_fetched: usize,

    /// Listing calls that failed and were replaced by an empty page
    pub failed_pages: usize,
}

/// Files found below a folder, in depth-first listing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub files: Vec<FileEntry>,
    pub stats: WalkStats,
    pub elapsed: Duration,
}

impl Snapshot {
    /// False when some listing call failed and a subtree may be missing
    pub fn is_complete(&self) -> bool {
        self.stats.failed_pages == 0
    }
}

/// Substitute an empty final page for a listing call that failed remotely.
///
/// Bad statuses and transport failures truncate the folder being listed and
/// are counted in `stats`. Anything else, such as a malformed body, is
/// returned unchanged and aborts the walk.
fn page_or_empty(
    result: Result<Page>,
    folder_id: &str,
    marker: &PageCursor,
    stats: &mut WalkStats,
) -> Result<Page> {
    match result {
        Ok(page) => Ok(page),
        Err(e) if e.is_remote_failure() => {
            warn!(folder_id, marker = %marker, error = %e, "Listing failed, treating as last page");
            stats.failed_pages += 1;
            Ok(Page::empty())
        }
        Err(e) => Err(e),
    }
}

/// Walks a folder tree and collects every file entry
pub struct TreeWalker {
    api: Arc<dyn DriveApi>,
    context: DriveContext,
    options: WalkOptions,
}

impl TreeWalker {
    pub fn new(api: Arc<dyn DriveApi>, context: DriveContext, options: WalkOptions) -> Self {
        Self {
            api,
            context,
            options,
        }
    }

    pub fn options(&self) -> WalkOptions {
        self.options
    }

    /// All immediate children of `folder_id`, in page order
    ///
    /// Keeps requesting pages until a response carries an empty
    /// `next_marker`; there is no other stopping condition.
    pub async fn list_folder(&self, folder_id: &str, stats: &mut WalkStats) -> Result<Vec<FileEntry>> {
        let mut items = Vec::new();
        let mut marker = PageCursor::first();

        loop {
            let result = self
                .api
                .list_files(&self.context, folder_id, self.options.page_size, &marker)
                .await;
            stats.pages_fetched += 1;

            let page = page_or_empty(result, folder_id, &marker, stats)?;
            debug!(
                folder_id,
                current_items = page.items.len(),
                next_marker = %page.next_marker,
                "Fetched page"
            );

            items.extend(page.items);
            if page.next_marker.is_end() {
                break;
            }
            marker = page.next_marker;
        }

        Ok(items)
    }

    /// List `folder_id`, then pause for the courtesy delay
    async fn open_folder(
        &self,
        folder_id: &str,
        stats: &mut WalkStats,
    ) -> Result<std::vec::IntoIter<FileEntry>> {
        let items = self.list_folder(folder_id, stats).await?;
        stats.folders_visited += 1;
        tokio::time::sleep(self.options.folder_delay).await;
        Ok(items.into_iter())
    }

    /// Collect every file below `folder_id`
    ///
    /// # Errors
    ///
    /// Only errors that are not remote failures (see
    /// [`AliyunDriveError::is_remote_failure`](crate::AliyunDriveError::is_remote_failure))
    /// abort the walk; remote failures are absorbed per page.
    #[instrument(skip(self), fields(drive_id = %self.context.drive_id))]
    pub async fn walk(&self, folder_id: &str) -> Result<Snapshot> {
        let started = Instant::now();
        let mut stats = WalkStats::default();
        let mut files = Vec::new();

        info!("Creating snapshot of folder");
        let mut open = vec![self.open_folder(folder_id, &mut stats).await?];

        while let Some(children) = open.last_mut() {
            let Some(entry) = children.next() else {
                open.pop();
                continue;
            };

            match entry.kind {
                FileKind::Folder => {
                    debug!(name = %entry.name, file_id = %entry.id, "Snapshot folder");
                    let grandchildren = self.open_folder(&entry.id, &mut stats).await?;
                    open.push(grandchildren);
                }
                FileKind::File => files.push(entry),
            }
        }

        let snapshot = Snapshot {
            files,
            stats,
            elapsed: started.elapsed(),
        };

        info!(
            files = snapshot.files.len(),
            folders = stats.folders_visited,
            pages = stats.pages_fetched,
            failed_pages = stats.failed_pages,
            "Snapshot complete"
        );

        Ok(snapshot)
    }
}
