//! Diagnostic output for the file access layer.
//!
//! The service reports swallowed and per-item failures (skipped listing entries, failed batch
//! copies, failed deletes) only through `tracing` events under the `fs::*` targets. [`init`]
//! routes those events to stderr and to a rolling log file so they are not lost when a caller
//! only looks at the returned count or boolean.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use crate::fs::FileAccessService;

/// Environment variables consulted, in order, for a filter directive.
const FILTER_VARS: [&str; 2] = ["COLLECTION_COMPOSER_LOG", "RUST_LOG"];

/// Directive used when neither the config nor the environment provide one.
const DEFAULT_DIRECTIVE: &str = "collection_core=debug,info";

static INSTALLED: OnceLock<LogHandle> = OnceLock::new();

/// How often the file sink starts a new file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogRolling {
    /// A new file every hour.
    Hourly,
    /// A new file every calendar day.
    Daily,
    /// One append-only file.
    Never,
}

impl From<LogRolling> for Rotation {
    fn from(rolling: LogRolling) -> Self {
        match rolling {
            LogRolling::Hourly => Rotation::HOURLY,
            LogRolling::Daily => Rotation::DAILY,
            LogRolling::Never => Rotation::NEVER,
        }
    }
}

/// Where diagnostic events go and how much of them is kept.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory holding the log files. Created on [`init`] if missing.
    pub directory: PathBuf,
    /// Log file name prefix; files are named `<prefix>.<date>.log`.
    pub file_prefix: String,
    /// Most verbose level written to the log file.
    pub file_level: LevelFilter,
    /// Most verbose level written to stderr. `OFF` silences the console.
    pub console_level: LevelFilter,
    /// Explicit filter directive. Takes precedence over the environment.
    pub directive: Option<String>,
    /// Rotation schedule of the file sink.
    pub rolling: LogRolling,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: "composer".to_string(),
            file_level: LevelFilter::DEBUG,
            console_level: LevelFilter::WARN,
            directive: None,
            rolling: LogRolling::Daily,
        }
    }
}

impl LogConfig {
    pub fn with_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.directory = path.into();
        self
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_directive<S: Into<String>>(mut self, directive: S) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Config directive, then the environment, then [`DEFAULT_DIRECTIVE`].
    fn resolve_directive(&self) -> String {
        self.directive
            .clone()
            .or_else(|| FILTER_VARS.iter().find_map(|var| std::env::var(var).ok()))
            .filter(|directive| !directive.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
    }
}

/// Owns the background file writer; dropping it would stop file output.
#[derive(Debug)]
pub struct LogHandle {
    _guard: WorkerGuard,
    directory: PathBuf,
}

impl LogHandle {
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Install the process-wide subscriber. Later calls return the first handle unchanged.
pub fn init(config: LogConfig) -> Result<&'static LogHandle> {
    if let Some(handle) = INSTALLED.get() {
        return Ok(handle);
    }

    let handle = install(config)?;
    Ok(INSTALLED.get_or_init(|| handle))
}

fn install(config: LogConfig) -> Result<LogHandle> {
    FileAccessService::default()
        .ensure_directory_exists(&config.directory, true)
        .context("preparing log directory")?;

    let filter = EnvFilter::try_new(config.resolve_directive())
        .context("parsing log filter directive")?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(config.rolling.into())
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .build(&config.directory)
        .context("opening rolling log file")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_target(true)
                .with_filter(config.file_level),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(config.console_level),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(LogHandle { _guard: guard, directory: config.directory })
}

fn default_directory() -> PathBuf {
    directories::ProjectDirs::from("com", "CollectionComposer", "collection-composer")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("collection-composer-logs"))
}
