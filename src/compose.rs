// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Container control and the update executor
//!
//! The orchestration logic only sees the narrow [`ContainerController`]
//! capability, so everything above it can be tested without a container
//! runtime.

use crate::decision::Decision;
use crate::error::{GatekeeperError, Result};
use crate::report::Reporter;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// The two container operations an update needs.
pub trait ContainerController {
    /// Pull the latest images for the deployment.
    fn pull_images(&self) -> Result<()>;

    /// Bring the service up detached, recreating containers as needed.
    fn up_detached(&self) -> Result<()>;
}

/// Production controller shelling out to `docker compose` with the
/// deployment directory as working directory.
#[derive(Debug, Clone)]
pub struct DockerCompose {
    compose_dir: PathBuf,
}

impl DockerCompose {
    pub fn new(compose_dir: PathBuf) -> Self {
        Self { compose_dir }
    }

    fn run(&self, operation: &str, args: &[&str]) -> Result<()> {
        let output = Command::new("docker")
            .args(args)
            .current_dir(&self.compose_dir)
            .output()
            .map_err(|e| GatekeeperError::Process {
                operation: operation.to_owned(),
                code: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GatekeeperError::Process {
                operation: operation.to_owned(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!(
            "{operation} output: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }
}

impl ContainerController for DockerCompose {
    fn pull_images(&self) -> Result<()> {
        self.run("docker compose pull", &["compose", "pull"])
    }

    fn up_detached(&self) -> Result<()> {
        self.run("docker compose up", &["compose", "up", "-d"])
    }
}

/// Execute a proceed verdict: pull images, then restart the service.
///
/// Strictly sequential; the restart is attempted only if the pull succeeds.
/// No rollback, no retry. The next scheduled run is the retry mechanism.
pub fn run_update(controller: &dyn ContainerController, reporter: &Reporter) -> Result<()> {
    reporter.report("Pulling new container images...");
    controller.pull_images()?;

    reporter.report("Restarting service with the new images...");
    controller.up_detached()?;

    Ok(())
}

/// Apply a decision: run the update on a proceed verdict, touch nothing on
/// any skip.
pub fn apply_decision(
    decision: &Decision,
    controller: &dyn ContainerController,
    reporter: &Reporter,
) -> Result<()> {
    if !decision.should_proceed() {
        return Ok(());
    }

    run_update(controller, reporter)?;
    reporter.report(&format!(
        "Update to v{} completed successfully.",
        decision.latest
    ));
    Ok(())
}
