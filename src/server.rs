// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Current-version fetcher for the locally running server

use crate::config::GatekeeperConfig;
use crate::error::{GatekeeperError, Result};
use crate::version::SemVersion;
use serde::Deserialize;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ServerVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

/// Fetch the version of the locally running server from its API.
pub async fn fetch_current_version(config: &GatekeeperConfig) -> Result<SemVersion> {
    let url = format!("{}/api/server/version", config.server_url);

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| GatekeeperError::Network(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| GatekeeperError::Network(format!("server version request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(GatekeeperError::Network(format!(
            "server version endpoint returned {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| GatekeeperError::Network(format!("failed to read server response: {e}")))?;

    // Malformed version data is a parse failure, not a network one.
    let version: ServerVersion = serde_json::from_str(&body).map_err(|e| {
        GatekeeperError::VersionParse(format!("invalid server version payload: {e}"))
    })?;

    Ok(SemVersion::new(version.major, version.minor, version.patch))
}
