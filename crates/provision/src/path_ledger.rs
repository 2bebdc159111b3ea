//! Path ledger
//!
//! Bookkeeping for search-path directories. Each registered directory is
//! prepended to the live in-memory path list (so later steps in the same run
//! resolve freshly installed binaries) and recorded exactly once in the
//! persisted shell startup file as an `export PATH="<dir>:$PATH"` line.
//!
//! The startup file is mutated via read-modify-atomic-replace: the new
//! contents are written to a temporary file in the same directory and renamed
//! over the original, so a concurrent reader never observes a partial write.
//! Entries are never removed by this program.

use mobilekit_core::error::{Error, ErrorCode, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Live and persisted search-path state for one provisioning run
#[derive(Debug)]
pub struct PathLedger {
    entries: Vec<PathBuf>,
    startup_file: Option<PathBuf>,
}

impl PathLedger {
    /// Create a ledger seeded from an inherited `PATH` value
    pub fn new(startup_file: Option<PathBuf>, inherited_path: &OsStr) -> Self {
        Self {
            entries: env::split_paths(inherited_path).collect(),
            startup_file,
        }
    }

    /// Create a ledger seeded from the process's own `PATH`
    pub fn from_process_env(startup_file: Option<PathBuf>) -> Self {
        Self::new(startup_file, &env::var_os("PATH").unwrap_or_default())
    }

    /// The live search path, joined for a child process environment
    pub fn search_path(&self) -> OsString {
        env::join_paths(&self.entries).unwrap_or_default()
    }

    /// The live entries, most recently registered first
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Whether a directory is on the live path
    pub fn contains(&self, dir: &Path) -> bool {
        self.entries.iter().any(|e| e == dir)
    }

    /// The configured startup file, if persistence is enabled
    pub fn startup_file(&self) -> Option<&Path> {
        self.startup_file.as_deref()
    }

    /// Register a directory, idempotently.
    ///
    /// Prepends to the live path immediately. If a startup file is configured
    /// and does not already mention the directory, prepends a new export line
    /// above the file's prior contents and atomically replaces the file.
    pub fn register(&mut self, dir: &Path) -> Result<()> {
        let dir_str = dir.to_string_lossy();
        if dir_str.contains(':') {
            return Err(Error::new(
                ErrorCode::InvalidPath,
                format!("Directory contains a path separator: {}", dir.display()),
            ));
        }

        if !self.contains(dir) {
            self.entries.insert(0, dir.to_path_buf());
        }

        let Some(file) = self.startup_file.clone() else {
            tracing::debug!(dir = %dir.display(), "no startup file configured; live-only registration");
            return Ok(());
        };

        let existing = match std::fs::read_to_string(&file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(Error::from(e)
                    .with_context(format!("Reading startup file {}", file.display())));
            }
        };

        if existing.contains(dir_str.as_ref()) {
            tracing::debug!(dir = %dir.display(), "already recorded in startup file");
            return Ok(());
        }

        let updated = format!("export PATH=\"{}:$PATH\"\n{}", dir_str, existing);
        self.replace_startup_file(&file, &updated)?;
        tracing::debug!(dir = %dir.display(), file = %file.display(), "recorded PATH entry");
        Ok(())
    }

    fn replace_startup_file(&self, file: &Path, contents: &str) -> Result<()> {
        let parent = file.parent().ok_or_else(|| {
            Error::io(format!("Startup file has no parent directory: {}", file.display()))
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(file).map_err(|e| {
            Error::io(format!("Failed to replace {}: {}", file.display(), e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;

    fn ledger_with_file(dir: &tempfile::TempDir) -> (PathLedger, PathBuf) {
        let file = dir.path().join(".zprofile");
        let ledger = PathLedger::new(Some(file.clone()), &OsString::from("/usr/bin:/bin"));
        (ledger, file)
    }

    #[test]
    fn test_live_prepend() {
        let mut ledger = PathLedger::new(None, &OsString::from("/usr/bin:/bin"));
        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();

        assert_eq!(ledger.entries()[0], PathBuf::from("/opt/homebrew/bin"));
        assert!(ledger.contains(Path::new("/usr/bin")));
        assert_eq!(ledger.entries().len(), 3);
    }

    #[test]
    fn test_live_registration_is_deduplicated() {
        let mut ledger = PathLedger::new(None, &OsString::from("/usr/bin"));
        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();
        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();

        assert_eq!(ledger.entries().len(), 2);
    }

    #[test]
    fn test_creates_startup_file_with_export_line() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ledger, file) = ledger_with_file(&dir);

        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();

        let contents = fs::read_to_string(&file).unwrap();
        assert_eq!(contents, "export PATH=\"/opt/homebrew/bin:$PATH\"\n");
    }

    #[test]
    fn test_persisted_registration_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ledger, file) = ledger_with_file(&dir);

        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();
        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();

        let contents = fs::read_to_string(&file).unwrap();
        assert_eq!(contents.matches("/opt/homebrew/bin").count(), 1);
    }

    #[test]
    fn test_new_entry_prepends_above_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ledger, file) = ledger_with_file(&dir);
        fs::write(&file, "# existing profile\nexport EDITOR=vim\n").unwrap();

        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();

        let contents = fs::read_to_string(&file).unwrap();
        assert!(contents.starts_with("export PATH=\"/opt/homebrew/bin:$PATH\"\n"));
        assert!(contents.ends_with("# existing profile\nexport EDITOR=vim\n"));
    }

    #[test]
    fn test_second_run_preserves_first_run_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".zprofile");

        let mut first = PathLedger::new(Some(file.clone()), &OsString::from("/usr/bin"));
        first.register(Path::new("/opt/homebrew/bin")).unwrap();
        first.register(Path::new("/Users/dev/development/flutter/bin")).unwrap();

        let mut second = PathLedger::new(Some(file.clone()), &OsString::from("/usr/bin"));
        second.register(Path::new("/opt/homebrew/bin")).unwrap();
        second.register(Path::new("/Users/dev/Library/Android/sdk/platform-tools")).unwrap();

        let contents = fs::read_to_string(&file).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "export PATH=\"/Users/dev/Library/Android/sdk/platform-tools:$PATH\"",
                "export PATH=\"/Users/dev/development/flutter/bin:$PATH\"",
                "export PATH=\"/opt/homebrew/bin:$PATH\"",
            ]
        );
    }

    #[test]
    fn test_no_startup_file_is_a_noop_on_disk() {
        let mut ledger = PathLedger::new(None, &OsString::from("/usr/bin"));
        assert!(ledger.register(Path::new("/opt/homebrew/bin")).is_ok());
        assert!(ledger.startup_file().is_none());
    }

    #[test]
    fn test_rejects_directory_with_separator() {
        let mut ledger = PathLedger::new(None, &OsString::from("/usr/bin"));
        assert!(ledger.register(Path::new("/bad:dir")).is_err());
    }

    #[test]
    fn test_search_path_round_trips() {
        let mut ledger = PathLedger::new(None, &OsString::from("/usr/bin:/bin"));
        ledger.register(Path::new("/opt/homebrew/bin")).unwrap();

        let joined = ledger.search_path();
        let parts: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(parts[0], PathBuf::from("/opt/homebrew/bin"));
        assert_eq!(parts.len(), 3);
    }
}
