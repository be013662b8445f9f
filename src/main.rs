//! aliyun-snapshot - flat file listing of an Aliyun Drive folder
//!
//! Entry point for the CLI application.

mod cli;

use anyhow::{bail, Context, Result};
use bridge_desktop::ReqwestHttpClient;
use clap::Parser;
use cli::CliArgs;
use core_runtime::logging::init_logging;
use provider_aliyun_drive::{
    resolve_drive_context, AliyunDriveConnector, AliyunDriveError, ApiTable, DriveApi,
    FileEntry, Snapshot, SnapshotService, WalkOptions,
};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    }
}

/// 1 when the root path could not be resolved, 2 for anything else
fn exit_code_for(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<AliyunDriveError>() {
        Some(AliyunDriveError::FolderNotFound { .. }) => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}

async fn run() -> Result<()> {
    let args = CliArgs::parse();

    init_logging(args.logging_config()).context("Failed to initialize logging")?;

    let config = args.snapshot_config().context("Invalid configuration")?;
    let token = match args.token.clone() {
        Some(token) => token,
        None => prompt_token().await?,
    };

    let http = ReqwestHttpClient::with_timeout(config.request_timeout)
        .context("Failed to create HTTP client")?;
    let connector: Arc<dyn DriveApi> = Arc::new(
        AliyunDriveConnector::new(Arc::new(http), ApiTable::new(config.api_base.clone()))
            .with_timeout(config.request_timeout),
    );

    let context = resolve_drive_context(connector.as_ref(), &token, config.drive_id.clone())
        .await
        .context("Failed to determine drive id")?;

    if args.space {
        let space = connector
            .get_space_info(&token)
            .await
            .context("Failed to fetch space info")?;
        report(
            &format!("used: {} / {} bytes", space.used_size, space.total_size),
            args.json,
        );
    }

    info!(path = %config.root_path, drive_id = %context.drive_id, "Starting snapshot");
    let service = SnapshotService::new(connector, context, WalkOptions::from(&config));
    let snapshot = service.snapshot_of_path(&config.root_path).await?;

    if !snapshot.is_complete() {
        warn!(
            failed_pages = snapshot.stats.failed_pages,
            "Some listings failed, snapshot may be incomplete"
        );
    }

    if args.json {
        print_json(&snapshot.files)?;
    } else if args.list {
        print_list(&snapshot.files)?;
    }
    print_summary(&snapshot, args.json);

    Ok(())
}

/// Read the access token from stdin
async fn prompt_token() -> Result<String> {
    eprint!("Access token: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read access token")?;

    let token = line.trim().to_string();
    if token.is_empty() {
        bail!("No access token given. Use --token or set ALIYUN_ACCESS_TOKEN.");
    }
    Ok(token)
}

fn print_list(files: &[FileEntry]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for file in files {
        writeln!(out, "{}\t{}", file.name, file.id)?;
    }
    Ok(())
}

fn print_json(files: &[FileEntry]) -> Result<()> {
    let rendered = serde_json::to_string_pretty(files).context("Failed to render snapshot")?;
    println!("{}", rendered);
    Ok(())
}

fn print_summary(snapshot: &Snapshot, json: bool) {
    let summary = format!(
        "items: {}, time elapsed: {:.3}s",
        snapshot.files.len(),
        snapshot.elapsed.as_secs_f64()
    );
    report(&summary, json);
}

/// Where human-readable status lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusStream {
    Stdout,
    Stderr,
}

impl StatusStream {
    /// Stderr when stdout carries a JSON document
    fn for_output(json: bool) -> Self {
        if json {
            StatusStream::Stderr
        } else {
            StatusStream::Stdout
        }
    }
}

fn report(line: &str, json: bool) {
    match StatusStream::for_output(json) {
        StatusStream::Stdout => println!("{}", line),
        StatusStream::Stderr => eprintln!("{}", line),
    }
}
