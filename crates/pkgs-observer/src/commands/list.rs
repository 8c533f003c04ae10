//! List command - print upgradable packages without reporting them

use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::cli::ListArgs;
use crate::output;

/// Run the list command
pub async fn run(args: ListArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let inventory = super::pipeline(&config, &args.inventory)?
        .run()
        .await
        .context("Failed to collect package inventory")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    output::header(&format!(
        "Upgradable packages ({} on {})",
        inventory.package_manager, inventory.distribution
    ));

    if inventory.packages.is_empty() {
        output::success("Everything is up to date.");
    } else {
        for package in &inventory.packages {
            println!("  {}", package.raw);
        }
        println!();
        output::info(&format!(
            "{} upgradable package(s)",
            inventory.packages.len()
        ));
    }

    Ok(())
}
