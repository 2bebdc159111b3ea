//! License acceptance and final configuration
//!
//! Runs after every tool unit: accepts any Android SDK licenses still
//! pending and points Flutter at the installed SDK root. Both steps are
//! fire-and-forget; nothing here fails the run.

use crate::tool::ToolContext;
use crate::tools::{AndroidSdk, FlutterSdk};
use mobilekit_cli::output::Status;
use mobilekit_core::process::{run_command_answering_yes, run_command_with_env};

/// Accept all pending Android SDK license prompts non-interactively
pub fn accept_android_licenses(ctx: &ToolContext) {
    let root = AndroidSdk::sdk_root(ctx);
    let root_arg = format!("--sdk_root={}", root.display());

    match run_command_answering_yes("sdkmanager", &["--licenses", &root_arg], &ctx.search_path())
    {
        Ok(r) if r.success => Status::success("Android SDK licenses accepted"),
        Ok(r) => Status::warning(&format!(
            "sdkmanager --licenses exited with status {}",
            r.exit_code
        )),
        Err(e) => Status::warning(&format!("sdkmanager --licenses failed: {}", e)),
    }
}

/// Point Flutter at the installed Android SDK root
pub fn configure_flutter(ctx: &ToolContext) {
    let root = AndroidSdk::sdk_root(ctx);
    let root_arg = root.to_string_lossy();
    let search_path = ctx.search_path();
    let flutter_bin = FlutterSdk::install_dir(ctx).join("bin/flutter");
    let flutter_arg = flutter_bin.to_string_lossy();

    let result = run_command_with_env(
        &flutter_arg,
        &["config", "--android-sdk", &root_arg],
        &[
            ("PATH", search_path.as_os_str()),
            ("ANDROID_HOME", root.as_os_str()),
        ],
    );

    match result {
        Ok(r) if r.success => Status::success("Flutter configured for the Android SDK"),
        Ok(r) => Status::warning(&format!(
            "flutter config exited with status {}",
            r.exit_code
        )),
        Err(e) => Status::warning(&format!("flutter config failed: {}", e)),
    }
}

/// Run the full finalization pass
pub fn run(ctx: &ToolContext) {
    accept_android_licenses(ctx);
    configure_flutter(ctx);
}
