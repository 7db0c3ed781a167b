// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Immich Gatekeeper - entry point
//!
//! Thin orchestration around the library: fetch, decide, maybe execute,
//! report. Every skip verdict exits 0; any fetch or container-control
//! failure exits 1.

use clap::Parser;
use immich_gatekeeper::compose::{DockerCompose, apply_decision};
use immich_gatekeeper::config::GatekeeperConfig;
use immich_gatekeeper::decision::decide;
use immich_gatekeeper::error::Result;
use immich_gatekeeper::release::fetch_latest_release;
use immich_gatekeeper::report::Reporter;
use immich_gatekeeper::server::fetch_current_version;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("immich_gatekeeper=info".parse().unwrap()),
        )
        .init();

    let config = GatekeeperConfig::parse();
    let reporter = Reporter::new(config.log_path());

    match run(&config, &reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            reporter.report(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &GatekeeperConfig, reporter: &Reporter) -> Result<()> {
    reporter.report("Retrieving currently installed server version...");
    let current = fetch_current_version(config).await?;
    reporter.report(&format!("Current version: v{current}"));

    reporter.report("Retrieving latest release info...");
    let release = fetch_latest_release(config).await?;
    reporter.report(&format!("Latest published release: {}", release.tag));

    let decision = decide(current, &release, chrono::Utc::now(), &config.policy());
    reporter.report(&decision.explanation());

    let controller = DockerCompose::new(config.compose_dir.clone());
    apply_decision(&decision, &controller, reporter)?;

    Ok(())
}
