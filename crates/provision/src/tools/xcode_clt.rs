//! Xcode Command Line Tools unit
//!
//! `xcode-select --install` opens the system's interactive installer and
//! returns immediately; the run does not wait for the user to finish it.

use crate::tool::{Tool, ToolContext};
use mobilekit_cli::output::Status;
use mobilekit_core::error::Result;
use mobilekit_core::process::run_command_with_path;
use std::path::PathBuf;

/// Triggers the Xcode Command Line Tools installer when missing
pub struct XcodeCommandLineTools;

impl Tool for XcodeCommandLineTools {
    fn name(&self) -> &str {
        "Xcode Command Line Tools"
    }

    fn probe(&self, ctx: &ToolContext) -> bool {
        run_command_with_path("xcode-select", &["-p"], &ctx.search_path())
            .map(|r| r.success)
            .unwrap_or(false)
    }

    fn install(&self, ctx: &mut ToolContext) -> Result<()> {
        let result = run_command_with_path("xcode-select", &["--install"], &ctx.search_path())?;
        if result.success {
            Status::info("Confirm the Command Line Tools dialog to finish installation");
        }
        Ok(())
    }

    fn paths(&self, _ctx: &ToolContext) -> Vec<PathBuf> {
        Vec::new()
    }
}
