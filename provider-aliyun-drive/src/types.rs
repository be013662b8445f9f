//! Aliyun Drive API types
//!
//! Domain values shared by the resolver and walker, plus the request and
//! response bodies of the Open API.

use core_runtime::logging::redact_if_sensitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node kind as reported by the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,

    #[serde(rename = "file_id")]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            kind: FileKind::File,
        }
    }

    pub fn folder(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            kind: FileKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }
}

/// Opaque pagination marker
///
/// The empty marker requests the first page, and an empty `next_marker`
/// means the listing is complete. A marker is only valid for the folder
/// whose listing produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn first() -> Self {
        Self(String::new())
    }

    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    /// True for the empty marker
    pub fn is_end(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of `openFile/list`
///
/// Unused fields of the response body are ignored; `next_marker` must be
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub items: Vec<FileEntry>,
    pub next_marker: PageCursor,
}

impl Page {
    /// No items and no further pages
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_marker: PageCursor::first(),
        }
    }
}

/// Identifiers scoping every call of one run
#[derive(Clone, PartialEq, Eq)]
pub struct DriveContext {
    pub drive_id: String,
    pub access_token: String,
}

impl DriveContext {
    pub fn new(drive_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            drive_id: drive_id.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for DriveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveContext")
            .field("drive_id", &self.drive_id)
            .field(
                "access_token",
                &redact_if_sensitive("access_token", &self.access_token),
            )
            .finish()
    }
}

/// Result of `openFile/get_by_path`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolvedFolder {
    pub file_id: String,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FileKind,
}

/// Result of `user/getDriveInfo`
///
/// Accounts without a resource or backup drive omit those fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriveInfo {
    pub default_drive_id: String,

    #[serde(default)]
    pub resource_drive_id: Option<String>,

    #[serde(default)]
    pub backup_drive_id: Option<String>,
}

/// Personal space usage in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SpaceInfo {
    pub total_size: u64,
    pub used_size: u64,
}

/// Result of `user/getSpaceInfo`
#[derive(Debug, Deserialize)]
pub(crate) struct SpaceInfoResponse {
    pub personal_space_info: SpaceInfo,
}

/// Body of `openFile/list`
#[derive(Debug, Serialize)]
pub(crate) struct ListFilesRequest<'a> {
    pub drive_id: &'a str,
    pub parent_file_id: &'a str,
    pub limit: u32,
    pub marker: &'a str,
}

/// Body of `openFile/get_by_path`
#[derive(Debug, Serialize)]
pub(crate) struct GetFileByPathRequest<'a> {
    pub drive_id: &'a str,
    pub file_path: &'a str,
}

/// Body of the account-level calls, which take no parameters
#[derive(Debug, Serialize)]
pub(crate) struct EmptyRequest {}
