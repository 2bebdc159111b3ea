//! git version-control client unit

use crate::tool::{Tool, ToolContext};
use mobilekit_core::error::{Error, Result};
use mobilekit_core::process::{command_on_path, run_command_streaming};
use std::path::PathBuf;

/// Installs git via Homebrew when missing
pub struct GitClient;

impl Tool for GitClient {
    fn name(&self) -> &str {
        "git"
    }

    fn probe(&self, ctx: &ToolContext) -> bool {
        command_on_path("git", &ctx.search_path())
    }

    fn install(&self, ctx: &mut ToolContext) -> Result<()> {
        let code = run_command_streaming("brew", &["install", "git"], &ctx.search_path())?;
        if code != 0 {
            return Err(Error::process(format!(
                "brew install git exited with status {}",
                code
            )));
        }
        Ok(())
    }

    fn paths(&self, _ctx: &ToolContext) -> Vec<PathBuf> {
        Vec::new()
    }
}
