//! Concrete tool units
//!
//! Each unit wires one external tool into the generic check-install-register
//! sequence. Units run in dependency order: Homebrew before anything brewed,
//! git before the Flutter clone, the Android command-line tools before
//! package resolution.

mod android_sdk;
mod cocoapods;
mod flutter_sdk;
mod git_client;
mod homebrew;
mod xcode_clt;

pub use android_sdk::AndroidSdk;
pub use cocoapods::CocoaPods;
pub use flutter_sdk::FlutterSdk;
pub use git_client::GitClient;
pub use homebrew::Homebrew;
pub use xcode_clt::XcodeCommandLineTools;

use crate::tool::Tool;
use std::path::{Path, PathBuf};

/// The standard provisioning sequence, in dependency order
pub fn standard_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(Homebrew),
        Box::new(XcodeCommandLineTools),
        Box::new(GitClient),
        Box::new(FlutterSdk),
        Box::new(CocoaPods),
        Box::new(AndroidSdk),
    ]
}

/// Expand a leading `~` against the detected home directory
pub(crate) fn expand_home(raw: &str, home: &Path) -> PathBuf {
    let home_str = home.to_string_lossy();
    let expanded = shellexpand::tilde_with_context(raw, || Some(&*home_str));
    PathBuf::from(expanded.into_owned())
}
