//! Homebrew package manager unit

use crate::tool::{Tool, ToolContext};
use mobilekit_core::error::{Error, Result};
use mobilekit_core::process::{command_on_path, run_command_streaming};
use std::path::PathBuf;

const INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Installs Homebrew via the upstream install script
pub struct Homebrew;

impl Tool for Homebrew {
    fn name(&self) -> &str {
        "Homebrew"
    }

    fn probe(&self, ctx: &ToolContext) -> bool {
        command_on_path("brew", &ctx.search_path())
    }

    fn install(&self, ctx: &mut ToolContext) -> Result<()> {
        let script = format!("curl -fsSL {} | NONINTERACTIVE=1 /bin/bash", INSTALL_SCRIPT_URL);
        let code = run_command_streaming("/bin/bash", &["-c", &script], &ctx.search_path())?;
        if code != 0 {
            return Err(Error::process(format!(
                "Homebrew installer exited with status {}",
                code
            )));
        }
        Ok(())
    }

    fn paths(&self, ctx: &ToolContext) -> Vec<PathBuf> {
        vec![ctx.env.brew_prefix().join("bin")]
    }
}
