//! Configuration loading and schema definitions
//!
//! Overridable settings for the provisioning run.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
