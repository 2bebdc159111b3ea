//! Core utilities for Mobilekit provisioning tools
//!
//! This crate provides shared functionality used across the provisioning
//! workspace:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Process execution**: blocking command execution against an explicit search path
//! - **Version ordering**: numeric version comparison for runtime version floors
//! - **Configuration**: TOML-based configuration with defaults
//!
//! # Example
//!
//! ```rust
//! use mobilekit_core::version::Version;
//!
//! let installed = Version::parse("ruby 2.6.10p210 (2022-04-12)").unwrap();
//! let floor = Version::parse("2.7.0").unwrap();
//!
//! assert!(!installed.at_least(&floor));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;
pub mod version;

pub use error::{Error, ErrorCode, Result, ResultExt};
