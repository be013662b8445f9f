//! Command-line arguments

use bridge_traits::time::LogLevel;
use clap::Parser;
use core_runtime::config::{
    SnapshotConfig, DEFAULT_API_BASE, DEFAULT_PAGE_SIZE, DEFAULT_ROOT_PATH, MAX_PAGE_SIZE,
};
use core_runtime::logging::{LogFormat, LoggingConfig};
use std::time::Duration;

/// Flat listing of every file below an Aliyun Drive folder
#[derive(Parser, Debug, Clone)]
#[command(name = "aliyun-snapshot", version, about)]
pub struct CliArgs {
    /// Path of the folder to snapshot
    #[arg(long, default_value = DEFAULT_ROOT_PATH)]
    pub path: String,

    /// Drive to walk (defaults to the account's default drive)
    #[arg(long)]
    pub drive_id: Option<String>,

    /// Access token; prompted for on stdin when absent
    #[arg(long, env = "ALIYUN_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Entries requested per listing call
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64))]
    pub page_size: u32,

    /// Pause after each folder, in milliseconds
    #[arg(long, default_value_t = 80)]
    pub delay_ms: u64,

    /// Scheme and host of the Open API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log output format: pretty, json or compact
    #[arg(long, default_value = "compact")]
    pub log_format: LogFormat,

    /// EnvFilter directives replacing the default filter,
    /// e.g. `provider_aliyun_drive=trace,reqwest=debug`
    #[arg(long, env = "ALIYUN_SNAPSHOT_LOG")]
    pub log_filter: Option<String>,

    /// Log span open and close events
    #[arg(long)]
    pub log_spans: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print every file as `name<TAB>id`
    #[arg(long, conflicts_with = "json")]
    pub list: bool,

    /// Print the files as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Print space usage before walking
    #[arg(long)]
    pub space: bool,
}

impl CliArgs {
    pub fn snapshot_config(&self) -> core_runtime::Result<SnapshotConfig> {
        SnapshotConfig::builder()
            .root_path(self.path.clone())
            .maybe_drive_id(self.drive_id.clone())
            .page_size(self.page_size)
            .folder_delay(Duration::from_millis(self.delay_ms))
            .api_base(self.api_base.clone())
            .request_timeout(Duration::from_secs(self.timeout_secs))
            .build()
    }

    pub fn logging_config(&self) -> LoggingConfig {
        let level = match self.verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        let config = LoggingConfig::default()
            .with_format(self.log_format)
            .with_level(level)
            .with_spans(self.log_spans);
        match &self.log_filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}
