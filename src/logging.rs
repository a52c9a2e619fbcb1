// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File-backed `tracing` setup.
//!
//! The terminal belongs to the TUI, so events are only written when a log file is configured.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "PARTSCOPE_LOG";
pub const LOG_FILE_ENV: &str = "PARTSCOPE_LOG_FILE";
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid PARTSCOPE_LOG filter `{filter}`: {message}")]
    Filter { filter: String, message: String },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Log file from the CLI flag, else from `PARTSCOPE_LOG_FILE`.
pub fn resolve_log_file(
    flag: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<PathBuf> {
    flag.map(str::to_owned)
        .or_else(|| lookup(LOG_FILE_ENV))
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

/// Filter directives from `PARTSCOPE_LOG`, defaulting to `info`.
pub fn env_filter(lookup: impl Fn(&str) -> Option<String>) -> Result<EnvFilter, LoggingError> {
    let raw = lookup(LOG_FILTER_ENV)
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned());
    EnvFilter::try_new(&raw).map_err(|err| LoggingError::Filter {
        filter: raw,
        message: err.to_string(),
    })
}

fn open_append(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Installs the global subscriber when a log file is configured; returns the file in use.
pub fn init(log_file_flag: Option<&str>) -> Result<Option<PathBuf>, LoggingError> {
    let lookup = |key: &str| std::env::var(key).ok();
    let Some(path) = resolve_log_file(log_file_flag, lookup) else {
        return Ok(None);
    };

    let filter = env_filter(lookup)?;
    let file = open_append(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(Some(path))
}
