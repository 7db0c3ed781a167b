// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Error types for the gatekeeper

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatekeeperError {
    #[error("version parse error: {0}")]
    VersionParse(String),

    #[error("timestamp parse error: {0}")]
    TimeParse(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{operation} failed with exit code {code:?}: {stderr}")]
    Process {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, GatekeeperError>;
