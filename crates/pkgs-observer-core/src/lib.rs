//! # pkgs-observer-core
//!
//! Host package inventory for the pkgs.observer agent:
//! - Platform identification from the OS family and distribution marker files
//! - Package-manager selection per distribution
//! - Dispatch to the package manager's upgradable-list command
//! - Execution of that command and normalization of its output
//!
//! # Example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> pkgs_observer_core::Result<()> {
//!     let inventory = pkgs_observer_core::produce_inventory().await?;
//!     for package in &inventory.packages {
//!         println!("{}", package.raw);
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod inventory;
pub mod manager;
pub mod normalizer;
pub mod platform;

pub use command::{dispatch, CommandSpec};
pub use error::{Error, Result};
pub use inventory::{produce_inventory, Inventory, InventoryPipeline, InventoryPlan};
pub use manager::{select_package_manager, PackageManagerId};
pub use normalizer::{parse_upgradable, OutputNormalizer, PackageRecord};
pub use platform::{DistributionTag, OsFamily, PlatformIdentifier, MARKER_FILES};
