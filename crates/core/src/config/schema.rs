//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Flutter SDK settings
    #[serde(default)]
    pub flutter: FlutterConfig,

    /// Android SDK settings
    #[serde(default)]
    pub android: AndroidConfig,

    /// Ruby runtime settings
    #[serde(default)]
    pub ruby: RubyConfig,
}

/// Flutter SDK configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlutterConfig {
    /// Git repository to clone the SDK from
    #[serde(default = "default_flutter_git_url")]
    pub git_url: String,

    /// Branch to clone
    #[serde(default = "default_flutter_branch")]
    pub branch: String,

    /// Install directory (supports `~` expansion)
    #[serde(default = "default_flutter_install_dir")]
    pub install_dir: String,
}

impl Default for FlutterConfig {
    fn default() -> Self {
        Self {
            git_url: default_flutter_git_url(),
            branch: default_flutter_branch(),
            install_dir: default_flutter_install_dir(),
        }
    }
}

fn default_flutter_git_url() -> String {
    "https://github.com/flutter/flutter.git".to_string()
}

fn default_flutter_branch() -> String {
    "stable".to_string()
}

fn default_flutter_install_dir() -> String {
    "~/development/flutter".to_string()
}

/// Android SDK configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// SDK root directory (supports `~` expansion)
    #[serde(default = "default_android_sdk_root")]
    pub sdk_root: String,

    /// Archive URL for the command-line tools
    #[serde(default = "default_cmdline_tools_url")]
    pub cmdline_tools_url: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            sdk_root: default_android_sdk_root(),
            cmdline_tools_url: default_cmdline_tools_url(),
        }
    }
}

fn default_android_sdk_root() -> String {
    "~/Library/Android/sdk".to_string()
}

fn default_cmdline_tools_url() -> String {
    "https://dl.google.com/android/repository/commandlinetools-mac-11076708_latest.zip".to_string()
}

/// Ruby runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubyConfig {
    /// Minimum acceptable Ruby version for installing CocoaPods
    #[serde(default = "default_ruby_min_version")]
    pub min_version: String,
}

impl Default for RubyConfig {
    fn default() -> Self {
        Self {
            min_version: default_ruby_min_version(),
        }
    }
}

fn default_ruby_min_version() -> String {
    "2.7.0".to_string()
}
