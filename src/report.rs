// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Verdict and outcome reporting to console and the append-only log

use chrono::{SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Reports every verdict and executor outcome to the interactive console
/// and appends `<timestamp>: <message>` lines to a durable log file.
///
/// Log writes are best-effort: a failure is noted on the console and
/// otherwise ignored, so an unwritable log target can never change the
/// run's verdict or exit code.
#[derive(Debug, Clone)]
pub struct Reporter {
    log_path: PathBuf,
}

impl Reporter {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn report(&self, message: &str) {
        println!("{message}");

        if let Err(e) = self.append(message) {
            warn!("failed to append to {}: {e}", self.log_path.display());
        }
    }

    fn append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        writeln!(file, "{timestamp}: {message}")
    }
}
