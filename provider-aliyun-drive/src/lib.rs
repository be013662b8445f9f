//! # Aliyun Drive Provider
//!
//! Read-only client for the Aliyun Drive Open API that produces a flat
//! snapshot of every file below a folder.
//!
//! ## Overview
//!
//! This crate provides:
//! - The endpoint table for the operations the snapshot needs ([`api`])
//! - The [`DriveApi`] trait and its HTTP implementation, [`AliyunDriveConnector`]
//! - [`PathResolver`], mapping an absolute path to a folder id
//! - [`TreeWalker`], a depth-first, paginated folder walk
//! - [`SnapshotService`], which composes the two
//!
//! ## Failure policy
//!
//! Resolving the root path is all-or-nothing. Listing failures inside the walk
//! are logged, counted in [`WalkStats::failed_pages`] and treated as an empty
//! final page, so a run can finish with a partial snapshot.

pub mod api;
pub mod connector;
pub mod error;
pub mod resolver;
pub mod snapshot;
pub mod types;
pub mod walker;

pub use api::{ApiTable, Endpoint, Operation};
pub use connector::{AliyunDriveConnector, DriveApi};
pub use error::{AliyunDriveError, Result};
pub use resolver::PathResolver;
pub use snapshot::{resolve_drive_context, SnapshotService};
pub use types::{DriveContext, DriveInfo, FileEntry, FileKind, Page, PageCursor, ResolvedFolder, SpaceInfo};
pub use walker::{Snapshot, TreeWalker, WalkOptions, WalkStats};
