// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Immich Gatekeeper - an unattended update gatekeeper for a self-hosted
//! Immich server deployed via docker compose.
//!
//! One pass per invocation: fetch the running version, fetch the latest
//! published release, run the eligibility decision engine, and on a proceed
//! verdict pull new images and restart the service. External scheduling
//! (cron or a systemd timer) provides periodicity and retries.

pub mod compose;
pub mod config;
pub mod decision;
pub mod error;
pub mod notes;
pub mod release;
pub mod report;
pub mod server;
pub mod version;

pub use compose::{ContainerController, DockerCompose, apply_decision, run_update};
pub use config::GatekeeperConfig;
pub use decision::{Decision, UpdatePolicy, Verdict, decide};
pub use error::GatekeeperError;
pub use release::{ReleaseInfo, fetch_latest_release};
pub use report::Reporter;
pub use server::fetch_current_version;
pub use version::SemVersion;
