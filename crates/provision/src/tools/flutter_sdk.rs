//! Flutter SDK unit
//!
//! Installed by cloning a fixed branch of the upstream repository into a
//! home-relative directory. Presence is a directory-existence check on the
//! `bin` subdirectory only; a stale or partially cloned checkout counts as
//! installed.

use super::expand_home;
use crate::tool::{Tool, ToolContext};
use mobilekit_core::error::{Error, Result};
use mobilekit_core::process::run_command_streaming;
use std::path::PathBuf;

/// Clones the Flutter SDK when its install directory is missing
pub struct FlutterSdk;

impl FlutterSdk {
    /// Configured install directory, expanded against the detected home
    pub fn install_dir(ctx: &ToolContext) -> PathBuf {
        expand_home(&ctx.config.flutter.install_dir, &ctx.env.home)
    }
}

impl Tool for FlutterSdk {
    fn name(&self) -> &str {
        "Flutter"
    }

    fn probe(&self, ctx: &ToolContext) -> bool {
        Self::install_dir(ctx).join("bin").is_dir()
    }

    fn install(&self, ctx: &mut ToolContext) -> Result<()> {
        let dir = Self::install_dir(ctx);
        if let Some(parent) = dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let dir_arg = dir.to_string_lossy();
        let code = run_command_streaming(
            "git",
            &[
                "clone",
                "-b",
                &ctx.config.flutter.branch,
                &ctx.config.flutter.git_url,
                &dir_arg,
            ],
            &ctx.search_path(),
        )?;
        if code != 0 {
            return Err(Error::process(format!(
                "git clone of Flutter exited with status {}",
                code
            )));
        }
        Ok(())
    }

    fn paths(&self, ctx: &ToolContext) -> Vec<PathBuf> {
        vec![Self::install_dir(ctx).join("bin")]
    }
}
