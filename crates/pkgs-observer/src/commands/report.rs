//! Report command - collect upgradable packages and send them to the ingest endpoint
//!
//! Nothing is sent unless every step succeeds.

use anyhow::{Context, Result};
use camino::Utf8Path;
use pkgs_observer_report::{AgentConfig, IngestClient};

use crate::cli::ReportArgs;
use crate::output;

/// Run the report command
pub async fn run(args: ReportArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    apply_overrides(&mut config, &args);

    // A dry run needs no endpoint
    let client = if args.dry_run {
        None
    } else {
        Some(IngestClient::new(config.endpoint()?, config.http_timeout())?)
    };

    let pipeline = super::pipeline(&config, &args.inventory)?;

    match client {
        None => {
            let payload = pkgs_observer_report::collect(&pipeline, &config)
                .await
                .context("Failed to assemble report")?;
            println!("{}", payload.to_json_pretty()?);
        }
        Some(client) => {
            pkgs_observer_report::report(&pipeline, &config, &client)
                .await
                .context("Failed to report packages")?;
            output::success(&format!(
                "Packages sent successfully to {}",
                client.endpoint()
            ));
        }
    }

    Ok(())
}

/// Apply CLI flags on top of the loaded configuration
fn apply_overrides(config: &mut AgentConfig, args: &ReportArgs) {
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if args.no_machine_id {
        config.send_machine_id = false;
    }
}
