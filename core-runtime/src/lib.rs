//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the snapshot tool:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the provider and the CLI
//! depend on. It establishes the logging conventions and the validated
//! configuration that scopes a snapshot run.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{SnapshotConfig, SnapshotConfigBuilder};
pub use error::{Error, Result};
