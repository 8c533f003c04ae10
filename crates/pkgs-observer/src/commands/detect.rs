//! Detect command - show what the agent would run on this host

use anyhow::{Context, Result};
use pkgs_observer_core::InventoryPipeline;
use serde_json::json;

use crate::cli::DetectArgs;
use crate::output;

/// Run the detect command
pub fn run(args: DetectArgs) -> Result<()> {
    let mut pipeline = InventoryPipeline::new();
    if let Some(id) = super::parse_manager(args.manager.as_deref())? {
        pipeline = pipeline.with_package_manager(id);
    }

    let plan = pipeline.plan().context("Failed to detect package manager")?;

    if args.json {
        let value = json!({
            "distribution": plan.distribution,
            "package_manager": plan.package_manager,
            "command": {
                "program": plan.command.program,
                "args": plan.command.args,
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        output::header("Host");
        output::kv("Distribution", plan.distribution.as_str());
        output::kv("Package manager", plan.package_manager.as_str());
        output::kv("Command", &plan.command.to_string());
    }

    Ok(())
}
