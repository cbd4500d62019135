//! folderstat - per-extension file statistics for directory trees.
//!
//! Usage:
//!   folderstat serve                 Serve the folder-upload page and API
//!   folderstat serve --mode path     Serve the host-path scanning API
//!   folderstat scan [PATH]           Scan a directory and print a report
//!   folderstat --help                Show help

use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use folderstat_core::{ExtensionFilter, IgnoreSet, ScanConfig, format_size};
use folderstat_render::{PathReport, to_json_pretty, write_csv};
use folderstat_scan::ExtensionScanner;
use folderstat_server::{ServerConfig, ServiceMode};

#[derive(Parser)]
#[command(
    name = "folderstat",
    version,
    about = "Per-extension file statistics for directory trees",
    long_about = "folderstat counts files and bytes per extension.\n\n\
                  Run `folderstat serve` to expose the HTTP API, or \
                  `folderstat scan PATH` for a one-off report."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Service to expose: `upload` or `path`
        #[arg(short, long, default_value = "upload")]
        mode: ServiceMode,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,

        /// Path scanned when a request names none (path service)
        #[arg(long, default_value = "/home")]
        default_path: PathBuf,

        /// Largest accepted request body, in megabytes
        #[arg(long, default_value = "1024")]
        max_upload_mb: usize,

        /// Directory to stage uploads in (defaults to the system temp dir)
        #[arg(long)]
        staging_dir: Option<PathBuf>,

        #[command(flatten)]
        ignore: IgnoreArgs,
    },

    /// Scan a directory and print the per-extension report
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: Format,

        /// Only count these extensions (comma-separated, e.g. "jpg,png")
        #[arg(short, long)]
        ext: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print progress to stderr while scanning
        #[arg(long)]
        progress: bool,

        #[command(flatten)]
        ignore: IgnoreArgs,
    },
}

#[derive(Args)]
struct IgnoreArgs {
    /// Additional directory name to skip (repeatable)
    #[arg(short, long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Do not skip .git, node_modules, __pycache__ and friends
    #[arg(long)]
    no_default_ignores: bool,
}

impl IgnoreArgs {
    fn into_set(self) -> IgnoreSet {
        let mut set = if self.no_default_ignores {
            IgnoreSet::empty()
        } else {
            IgnoreSet::default()
        };
        set.extend(self.ignore);
        set
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    #[default]
    Json,
    Csv,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            mode,
            bind,
            default_path,
            max_upload_mb,
            staging_dir,
            ignore,
        } => {
            let config = ServerConfig {
                bind,
                mode,
                default_path,
                ignore: ignore.into_set(),
                max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
                staging_dir,
            };
            run_server(config)?;
        }
        Command::Scan {
            path,
            format,
            ext,
            output,
            progress,
            ignore,
        } => {
            let config = ScanConfig::builder()
                .root(path.clone())
                .ignore(ignore.into_set())
                .allowed_extensions(ext.as_deref().and_then(ExtensionFilter::parse))
                .build()
                .context("Invalid scan configuration")?;
            run_scan(&path, &config, format, output.as_deref(), progress)?;
        }
    }

    Ok(())
}

/// Start the HTTP server on a multi-threaded runtime.
fn run_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(folderstat_server::serve(config))
        .context("Server error")
}

/// Scan a directory and write the report.
fn run_scan(
    path: &Path,
    config: &ScanConfig,
    format: Format,
    output: Option<&Path>,
    show_progress: bool,
) -> Result<()> {
    tracing::debug!(root = %path.display(), ?format, "starting scan");
    let scanner = ExtensionScanner::new();

    let reporter = show_progress.then(|| {
        let mut rx = scanner.subscribe();
        std::thread::spawn(move || {
            loop {
                let progress = match rx.blocking_recv() {
                    Ok(progress) => progress,
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                };
                eprint!(
                    "\r{} files, {} ",
                    progress.files_counted,
                    format_size(progress.bytes_counted)
                );
                if progress.finished {
                    eprintln!();
                    break;
                }
            }
        })
    });

    let result = scanner.scan(config).context("Scan failed")?;

    if let Some(handle) = reporter {
        let _ = handle.join();
    }

    let mut out: Box<dyn Write> = match output {
        Some(file) => Box::new(
            std::fs::File::create(file)
                .with_context(|| format!("Cannot create {}", file.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    match format {
        Format::Json => {
            writeln!(out, "{}", to_json_pretty(&PathReport::new(path, &result))?)?;
        }
        Format::Csv => write_csv(&result, &mut out)?,
    }
    out.flush()?;

    if let Some(file) = output {
        eprintln!("Wrote {}", file.display());
    }
    if result.has_warnings() {
        eprintln!("{} entries could not be read", result.warnings.len());
    }

    Ok(())
}
