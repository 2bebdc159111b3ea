//! macOS provisioning for mobile app development
//!
//! This crate contains the provisioning pipeline:
//! - Environment detection (shell flavor, startup file, CPU architecture)
//! - The path ledger (live and persisted search-path bookkeeping)
//! - The generic check-install-register tool runner and its concrete units
//! - License acceptance and final SDK configuration

pub mod environment;
pub mod finalize;
pub mod path_ledger;
pub mod tool;
pub mod tools;

pub use environment::{Arch, Environment, Shell};
pub use path_ledger::PathLedger;
pub use tool::{Tool, ToolContext, provision_all};
