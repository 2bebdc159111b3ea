//! Environment detection
//!
//! Determines the invoking user's shell flavor, the startup file to persist
//! PATH entries into, and the CPU architecture that selects the Homebrew
//! install prefix. Nothing here is fatal: an unrecognized shell simply means
//! PATH persistence is skipped for the run.

use mobilekit_core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// The invoking user's login shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    /// zsh, the macOS default since Catalina
    Zsh,
    /// bash
    Bash,
    /// Anything else; PATH persistence is skipped
    Other(String),
}

impl Shell {
    /// Classify a `$SHELL` value like `/bin/zsh`
    pub fn from_shell_path(shell_path: &str) -> Self {
        let name = Path::new(shell_path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| shell_path.to_string());

        match name.as_str() {
            "zsh" => Self::Zsh,
            "bash" => Self::Bash,
            _ => Self::Other(name),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
            Self::Other(name) => name,
        }
    }
}

/// CPU architecture of the machine being provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// Apple Silicon
    Arm64,
    /// Intel
    X86_64,
}

impl Arch {
    /// Classify an architecture string such as `std::env::consts::ARCH`
    pub fn from_arch_str(arch: &str) -> Self {
        match arch {
            "aarch64" | "arm64" => Self::Arm64,
            _ => Self::X86_64,
        }
    }
}

/// Detected machine environment
#[derive(Debug, Clone)]
pub struct Environment {
    /// User home directory
    pub home: PathBuf,
    /// Login shell
    pub shell: Shell,
    /// CPU architecture
    pub arch: Arch,
}

impl Environment {
    /// Detect the environment from the running process
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::io("Unable to determine the home directory"))?;
        let shell = std::env::var("SHELL")
            .map(|s| Shell::from_shell_path(&s))
            .unwrap_or_else(|_| Shell::Other("unknown".to_string()));
        let arch = Arch::from_arch_str(std::env::consts::ARCH);

        Ok(Self { home, shell, arch })
    }

    /// Build an environment from raw parts (test injection point)
    pub fn from_parts(home: impl Into<PathBuf>, shell_path: &str, arch: &str) -> Self {
        Self {
            home: home.into(),
            shell: Shell::from_shell_path(shell_path),
            arch: Arch::from_arch_str(arch),
        }
    }

    /// Startup file for the detected shell, or None when persistence is skipped
    pub fn startup_file(&self) -> Option<PathBuf> {
        match self.shell {
            Shell::Zsh => Some(self.home.join(".zprofile")),
            Shell::Bash => Some(self.home.join(".bash_profile")),
            Shell::Other(_) => None,
        }
    }

    /// Homebrew install prefix for the detected architecture
    pub fn brew_prefix(&self) -> PathBuf {
        match self.arch {
            Arch::Arm64 => PathBuf::from("/opt/homebrew"),
            Arch::X86_64 => PathBuf::from("/usr/local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_classification() {
        assert_eq!(Shell::from_shell_path("/bin/zsh"), Shell::Zsh);
        assert_eq!(Shell::from_shell_path("/opt/homebrew/bin/bash"), Shell::Bash);
        assert_eq!(
            Shell::from_shell_path("/usr/local/bin/fish"),
            Shell::Other("fish".to_string())
        );
    }

    #[test]
    fn test_startup_file_per_shell() {
        let env = Environment::from_parts("/Users/dev", "/bin/zsh", "aarch64");
        assert_eq!(
            env.startup_file(),
            Some(PathBuf::from("/Users/dev/.zprofile"))
        );

        let env = Environment::from_parts("/Users/dev", "/bin/bash", "x86_64");
        assert_eq!(
            env.startup_file(),
            Some(PathBuf::from("/Users/dev/.bash_profile"))
        );

        let env = Environment::from_parts("/Users/dev", "/bin/fish", "x86_64");
        assert_eq!(env.startup_file(), None);
    }

    #[test]
    fn test_brew_prefix_per_arch() {
        let env = Environment::from_parts("/Users/dev", "/bin/zsh", "aarch64");
        assert_eq!(env.brew_prefix(), PathBuf::from("/opt/homebrew"));

        let env = Environment::from_parts("/Users/dev", "/bin/zsh", "x86_64");
        assert_eq!(env.brew_prefix(), PathBuf::from("/usr/local"));

        let env = Environment::from_parts("/Users/dev", "/bin/zsh", "powerpc");
        assert_eq!(env.brew_prefix(), PathBuf::from("/usr/local"));
    }
}
