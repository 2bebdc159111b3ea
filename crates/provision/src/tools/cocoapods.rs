//! CocoaPods unit
//!
//! Installs CocoaPods through RubyGems. On Apple Silicon the bundled system
//! Ruby predates what CocoaPods needs, so this unit first enforces the
//! configured Ruby version floor, installing a newer runtime via Homebrew
//! and putting it ahead of the system one on the search path.

use super::expand_home;
use crate::environment::Arch;
use crate::tool::{Tool, ToolContext};
use mobilekit_cli::output::Status;
use mobilekit_cli::progress;
use mobilekit_core::error::{Error, Result};
use mobilekit_core::process::{command_on_path, run_command_streaming, run_command_with_path};
use mobilekit_core::version::Version;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Installs CocoaPods via RubyGems, behind a Ruby version floor
pub struct CocoaPods;

/// Whether the installed Ruby (if any) falls below the floor
fn ruby_needs_install(installed: Option<&Version>, floor: &Version) -> bool {
    match installed {
        Some(version) => !version.at_least(floor),
        None => true,
    }
}

fn installed_ruby_version(search_path: &OsStr) -> Option<Version> {
    let result = run_command_with_path("ruby", &["--version"], search_path).ok()?;
    if !result.success {
        return None;
    }
    Version::parse(&result.stdout).ok()
}

/// User-level gem executable directory for a Ruby version, e.g.
/// `~/.gem/ruby/3.3.0/bin`
fn user_gem_bin_dir(ctx: &ToolContext, ruby: &Version) -> PathBuf {
    let components = ruby.components();
    let major = components.first().copied().unwrap_or(0);
    let minor = components.get(1).copied().unwrap_or(0);
    expand_home(&format!("~/.gem/ruby/{}.{}.0/bin", major, minor), &ctx.env.home)
}

impl CocoaPods {
    fn ensure_ruby_floor(&self, ctx: &mut ToolContext) -> Result<()> {
        let floor = Version::parse(&ctx.config.ruby.min_version)?;
        let installed = installed_ruby_version(&ctx.search_path());

        if !ruby_needs_install(installed.as_ref(), &floor) {
            return Ok(());
        }

        match installed {
            Some(version) => Status::info(&format!(
                "Ruby {} is older than {}, installing a newer one via Homebrew",
                version, floor
            )),
            None => Status::info("Ruby not found, installing via Homebrew"),
        }

        let code = run_command_streaming("brew", &["install", "ruby"], &ctx.search_path())?;
        if code != 0 {
            return Err(Error::process(format!(
                "brew install ruby exited with status {}",
                code
            )));
        }

        // The brewed Ruby must shadow the system one for gem to use it.
        let ruby_bin = ctx.env.brew_prefix().join("opt/ruby/bin");
        ctx.ledger.register(&ruby_bin)?;
        Ok(())
    }
}

impl Tool for CocoaPods {
    fn name(&self) -> &str {
        "CocoaPods"
    }

    fn required(&self) -> bool {
        true
    }

    fn probe(&self, ctx: &ToolContext) -> bool {
        command_on_path("pod", &ctx.search_path())
    }

    fn install(&self, ctx: &mut ToolContext) -> Result<()> {
        if ctx.env.arch == Arch::Arm64 {
            self.ensure_ruby_floor(ctx)?;
        }

        // Register the gem executable directory before installing so the
        // post-install probe can resolve `pod`.
        for dir in self.paths(ctx) {
            ctx.ledger.register(&dir)?;
        }

        let pb = progress::spinner("Installing CocoaPods via gem...");
        let result = run_command_with_path(
            "gem",
            &["install", "cocoapods", "--user-install"],
            &ctx.search_path(),
        )?;

        if result.success {
            progress::finish_success(&pb, "CocoaPods installed");
            Ok(())
        } else {
            progress::finish_error(&pb, "gem install cocoapods failed");
            Err(Error::process("gem install cocoapods failed")
                .with_context(result.combined_output()))
        }
    }

    fn paths(&self, ctx: &ToolContext) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(ruby) = installed_ruby_version(&ctx.search_path()) {
            dirs.push(user_gem_bin_dir(ctx, &ruby));
        }
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_floor_triggers_only_below() {
        let floor = v("3.1");
        assert!(ruby_needs_install(Some(&v("3.0")), &floor));
        assert!(!ruby_needs_install(Some(&v("3.1")), &floor));
        assert!(!ruby_needs_install(Some(&v("3.2")), &floor));
    }

    #[test]
    fn test_missing_ruby_triggers_install() {
        assert!(ruby_needs_install(None, &v("2.7.0")));
    }

    #[test]
    fn test_system_ruby_below_default_floor() {
        // The Ruby shipped on current macOS.
        let installed = v("ruby 2.6.10p210 (2022-04-12 revision 67958)");
        assert!(ruby_needs_install(Some(&installed), &v("2.7.0")));
    }
}
