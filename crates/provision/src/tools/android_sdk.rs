//! Android SDK unit
//!
//! Bootstraps the SDK from the command-line tools archive: download, extract
//! into a staging directory, and rename the extracted top-level directory to
//! `cmdline-tools/latest`. Afterwards it resolves the version-greatest
//! platform and build-tools package identifiers from `sdkmanager --list`,
//! installs them together with `platform-tools`, and accepts every pending
//! license. Package installation and license acceptance are best-effort;
//! only the command-line tools themselves gate the run.

use super::expand_home;
use crate::tool::{Tool, ToolContext};
use mobilekit_cli::output::Status;
use mobilekit_cli::progress;
use mobilekit_core::error::{Error, Result, ResultExt};
use mobilekit_core::process::{run_command_answering_yes, run_command_with_path};
use mobilekit_core::version::Version;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static PLATFORM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"platforms;android-(\d+)").unwrap());
static BUILD_TOOLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"build-tools;([0-9][0-9.]*)").unwrap());

/// Provisions the Android SDK command-line tools and core packages
pub struct AndroidSdk;

/// The version-greatest `platforms;android-N` identifier in a listing
pub(crate) fn latest_platform(listing: &str) -> Option<String> {
    PLATFORM_RE
        .captures_iter(listing)
        .filter_map(|c| c[1].parse::<u64>().ok())
        .max()
        .map(|api| format!("platforms;android-{}", api))
}

/// The version-greatest `build-tools;X.Y.Z` identifier in a listing
pub(crate) fn latest_build_tools(listing: &str) -> Option<String> {
    BUILD_TOOLS_RE
        .captures_iter(listing)
        .filter_map(|c| {
            let raw = c[1].trim_end_matches('.').to_string();
            Version::parse(&raw).ok().map(|v| (v, raw))
        })
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, raw)| format!("build-tools;{}", raw))
}

impl AndroidSdk {
    /// Configured SDK root, expanded against the detected home
    pub fn sdk_root(ctx: &ToolContext) -> PathBuf {
        expand_home(&ctx.config.android.sdk_root, &ctx.env.home)
    }

    fn cmdline_tools_dir(root: &Path) -> PathBuf {
        root.join("cmdline-tools/latest")
    }

    fn download_and_extract(ctx: &ToolContext, root: &Path) -> Result<()> {
        std::fs::create_dir_all(root)?;

        let url = &ctx.config.android.cmdline_tools_url;
        let archive = root.join("cmdline-tools.zip");
        let archive_arg = archive.to_string_lossy();
        let search_path = ctx.search_path();

        let pb = progress::spinner("Downloading Android command-line tools...");
        let result =
            run_command_with_path("curl", &["-fsSL", "-o", &archive_arg, url], &search_path)?;
        if !result.success {
            progress::finish_error(&pb, "Download failed");
            return Err(Error::download_failed(url).with_context(result.combined_output()));
        }
        progress::finish_success(&pb, "Command-line tools downloaded");

        let staging = tempfile::tempdir_in(root)?;
        let staging_arg = staging.path().to_string_lossy();
        let result = run_command_with_path(
            "unzip",
            &["-q", &archive_arg, "-d", &staging_arg],
            &search_path,
        )?;
        if !result.success {
            return Err(Error::extract_failed(&archive).with_context(result.combined_output()));
        }

        // The archive unpacks a single `cmdline-tools` directory; sdkmanager
        // expects it at `cmdline-tools/latest`.
        let extracted = staging.path().join("cmdline-tools");
        if !extracted.is_dir() {
            return Err(Error::extract_failed(&archive)
                .with_context("Archive did not contain a cmdline-tools directory"));
        }
        std::fs::create_dir_all(root.join("cmdline-tools"))?;
        std::fs::rename(&extracted, Self::cmdline_tools_dir(root))
            .map_err(Error::from)
            .context("Moving extracted command-line tools into place")?;

        let _ = std::fs::remove_file(&archive);
        Ok(())
    }

    /// Resolve and install the latest platform and build-tools packages,
    /// then accept pending licenses. Failures here are tolerated.
    fn install_packages(ctx: &ToolContext, root: &Path) {
        let sdkmanager = Self::cmdline_tools_dir(root).join("bin/sdkmanager");
        let sdkmanager_arg = sdkmanager.to_string_lossy();
        let root_arg = format!("--sdk_root={}", root.display());
        let search_path = ctx.search_path();

        let pb = progress::spinner("Resolving latest Android packages...");
        let listing =
            match run_command_with_path(&sdkmanager_arg, &["--list", &root_arg], &search_path) {
                Ok(r) if r.success => {
                    progress::finish_success(&pb, "Package listing retrieved");
                    r.stdout
                }
                Ok(r) => {
                    progress::finish_error(&pb, "Package listing failed");
                    Status::warning(&format!(
                        "sdkmanager --list failed: {}",
                        r.stderr.trim()
                    ));
                    return;
                }
                Err(e) => {
                    progress::finish_error(&pb, "Package listing failed");
                    Status::warning(&format!("sdkmanager --list failed: {}", e));
                    return;
                }
            };

        let mut packages = vec!["platform-tools".to_string()];
        packages.extend(latest_platform(&listing));
        packages.extend(latest_build_tools(&listing));
        Status::info(&format!("Installing {}", packages.join(", ")));

        let mut args: Vec<&str> = vec![&root_arg];
        args.extend(packages.iter().map(String::as_str));
        match run_command_answering_yes(&sdkmanager_arg, &args, &search_path) {
            Ok(r) if r.success => Status::success("Android packages installed"),
            Ok(r) => Status::warning(&format!(
                "Android package install failed: {}",
                r.stderr.trim()
            )),
            Err(e) => Status::warning(&format!("Android package install failed: {}", e)),
        }

        match run_command_answering_yes(&sdkmanager_arg, &["--licenses", &root_arg], &search_path)
        {
            Ok(r) if r.success => Status::success("Android SDK licenses accepted"),
            Ok(_) | Err(_) => Status::warning("Android license acceptance did not complete"),
        }
    }
}

impl Tool for AndroidSdk {
    fn name(&self) -> &str {
        "Android SDK"
    }

    fn required(&self) -> bool {
        true
    }

    fn probe(&self, ctx: &ToolContext) -> bool {
        Self::cmdline_tools_dir(&Self::sdk_root(ctx)).is_dir()
    }

    fn install(&self, ctx: &mut ToolContext) -> Result<()> {
        let root = Self::sdk_root(ctx);
        Self::download_and_extract(ctx, &root)?;

        // Register immediately so the rest of this run resolves sdkmanager.
        let bin = Self::cmdline_tools_dir(&root).join("bin");
        ctx.ledger.register(&bin)?;

        Self::install_packages(ctx, &root);
        Ok(())
    }

    fn paths(&self, ctx: &ToolContext) -> Vec<PathBuf> {
        let root = Self::sdk_root(ctx);
        vec![
            Self::cmdline_tools_dir(&root).join("bin"),
            root.join("platform-tools"),
        ]
    }
}
