//! Per-service diagnostic log.
//!
//! A `DiagnosticLog` is opened once at service start, installed as the global
//! tracing subscriber (stdout + append-only file), and closed at shutdown.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Crates whose events reach the log: this library, both service binaries and
/// the HTTP trace layer.
const LOG_TARGETS: [&str; 4] = ["resume_api", "resume_parser", "cover_letter", "tower_http"];

/// Expands a bare level (`info`, `debug`) into per-target directives. A value
/// that already names targets (`resume_api=debug,hyper=info`) is used as is.
pub fn filter_directives(rust_log: &str) -> String {
    let rust_log = rust_log.trim();
    if rust_log.contains('=') {
        return rust_log.to_string();
    }
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={rust_log}"))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn log_filter(rust_log: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter_directives(rust_log))
        .with_context(|| format!("Invalid RUST_LOG value '{rust_log}'"))
}

pub struct DiagnosticLog {
    path: PathBuf,
    file: Arc<File>,
}

impl DiagnosticLog {
    /// Opens (or creates) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

        Ok(Self {
            path,
            file: Arc::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Installs the process-wide subscriber: stdout plus this file, filtered by
    /// `config.rust_log`.
    pub fn install(&self, config: &Config) -> Result<()> {
        tracing_subscriber::registry()
            .with(log_filter(&config.rust_log)?)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(self.file.clone()),
            )
            .try_init()
            .context("Failed to install tracing subscriber")?;

        info!("Diagnostic log: {}", self.path.display());
        Ok(())
    }

    /// Flushes buffered lines to disk. Called once at shutdown.
    pub fn close(self) -> Result<()> {
        info!("Closing diagnostic log");
        (&*self.file).flush()?;
        self.file
            .sync_all()
            .with_context(|| format!("Failed to sync log file '{}'", self.path.display()))
    }
}
