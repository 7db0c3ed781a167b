// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Latest-release fetcher for the upstream GitHub release feed

use crate::config::GatekeeperConfig;
use crate::error::{GatekeeperError, Result};
use crate::version::SemVersion;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "immich-gatekeeper/0.1.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Snapshot of the latest upstream release at fetch time.
/// Built fresh each run and discarded after one decision cycle.
#[derive(Debug, Clone)]
pub struct ReleaseInfo {
    /// Original tag as published (e.g., "v1.119.0"), kept for messages.
    pub tag: String,
    pub version: SemVersion,
    /// Release notes body, when the feed carries one.
    pub notes: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: String,
    body: Option<String>,
    published_at: String,
}

/// Fetch the latest release descriptor from the release feed.
pub async fn fetch_latest_release(config: &GatekeeperConfig) -> Result<ReleaseInfo> {
    let url = format!(
        "{}/repos/{}/releases/latest",
        config.api_base_url, config.release_repo
    );

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| GatekeeperError::Network(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| GatekeeperError::Network(format!("release feed request failed: {e}")))?;

    if response.status().is_client_error() || response.status().is_server_error() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read error body".to_owned());
        return Err(GatekeeperError::Network(format!(
            "release feed error {status}: {body}"
        )));
    }

    let release: GithubRelease = response
        .json()
        .await
        .map_err(|e| GatekeeperError::Network(format!("failed to parse release feed: {e}")))?;

    let version = SemVersion::from_tag(&release.tag_name)?;
    let published_at = DateTime::parse_from_rfc3339(&release.published_at)
        .map_err(|e| {
            GatekeeperError::TimeParse(format!(
                "invalid published_at {:?}: {e}",
                release.published_at
            ))
        })?
        .with_timezone(&Utc);

    Ok(ReleaseInfo {
        tag: release.tag_name,
        version,
        notes: release.body,
        published_at,
    })
}
