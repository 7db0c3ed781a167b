// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Configuration surface for the gatekeeper

use crate::decision::UpdatePolicy;
use clap::Parser;
use std::path::PathBuf;

const DEFAULT_COMPOSE_DIR: &str = "/opt/immich";
const DEFAULT_SERVER_URL: &str = "http://localhost:2283";
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_RELEASE_REPO: &str = "immich-app/immich";

/// Unattended update gatekeeper for a self-hosted Immich server.
///
/// Compares the running server version against the latest published release
/// and, when the update is eligible, pulls new images and restarts the
/// compose deployment. Run it from a periodic scheduler such as cron.
#[derive(Debug, Clone, Parser)]
#[command(name = "immich-gatekeeper", version)]
pub struct GatekeeperConfig {
    /// Directory holding the deployment's docker-compose.yml and .env
    #[arg(long, default_value = DEFAULT_COMPOSE_DIR)]
    pub compose_dir: PathBuf,

    /// Days to wait after a release is published before applying it
    #[arg(long, default_value_t = 3)]
    pub delay_days: u32,

    /// Base URL of the running server's API
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Base URL of the release feed API
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// owner/repo whose latest release is tracked
    #[arg(long, default_value = DEFAULT_RELEASE_REPO)]
    pub release_repo: String,
}

impl GatekeeperConfig {
    pub fn policy(&self) -> UpdatePolicy {
        UpdatePolicy {
            delay_days: self.delay_days,
        }
    }

    /// The append-only update log inside the deployment directory.
    pub fn log_path(&self) -> PathBuf {
        self.compose_dir.join("update.log")
    }
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            compose_dir: PathBuf::from(DEFAULT_COMPOSE_DIR),
            delay_days: 3,
            server_url: DEFAULT_SERVER_URL.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            release_repo: DEFAULT_RELEASE_REPO.to_owned(),
        }
    }
}
