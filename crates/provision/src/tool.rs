//! Generic tool provisioning
//!
//! Every tool is a capability behind the [`Tool`] trait: a presence probe, an
//! install action, and the directories the tool contributes to the search
//! path. The runner applies the same sequence to each unit: probe, install if
//! absent, abort if a required tool is still missing afterwards, register
//! paths. Tools run strictly in order; later units rely on the ledger state
//! established by earlier ones.

use crate::environment::Environment;
use crate::path_ledger::PathLedger;
use mobilekit_cli::output::{Status, format_duration};
use mobilekit_core::config::ConfigSchema;
use mobilekit_core::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;

/// Shared state threaded through every tool call
pub struct ToolContext<'a> {
    /// Detected machine environment
    pub env: &'a Environment,
    /// Loaded configuration
    pub config: &'a ConfigSchema,
    /// Live and persisted search-path state
    pub ledger: &'a mut PathLedger,
}

impl ToolContext<'_> {
    /// The current live search path, for child process environments
    pub fn search_path(&self) -> OsString {
        self.ledger.search_path()
    }
}

/// A provisionable tool
pub trait Tool {
    /// Human-readable tool name
    fn name(&self) -> &str;

    /// Whether absence after the install attempt aborts the run
    fn required(&self) -> bool {
        false
    }

    /// Presence probe against the current context
    fn probe(&self, ctx: &ToolContext) -> bool;

    /// Install action. Not retried; failures are tolerated unless the tool
    /// is required and the post-install probe still fails.
    fn install(&self, ctx: &mut ToolContext) -> Result<()>;

    /// Directories this tool contributes to the search path
    fn paths(&self, ctx: &ToolContext) -> Vec<PathBuf>;
}

/// Run one tool through the check-install-register sequence
pub fn provision_one(tool: &dyn Tool, ctx: &mut ToolContext) -> Result<()> {
    if tool.probe(ctx) {
        tracing::debug!(tool = tool.name(), "presence probe succeeded");
        Status::info(&format!("{} already installed, skipping", tool.name()));
    } else {
        Status::info(&format!("Installing {}...", tool.name()));
        let started = Instant::now();
        match tool.install(ctx) {
            Ok(()) => Status::success(&format!(
                "{} installed in {}",
                tool.name(),
                format_duration(started.elapsed())
            )),
            Err(e) => Status::warning(&format!("{} install failed: {}", tool.name(), e)),
        }

        if tool.required() && !tool.probe(ctx) {
            return Err(Error::required_tool_missing(tool.name()));
        }
    }

    for dir in tool.paths(ctx) {
        ctx.ledger.register(&dir)?;
    }

    Ok(())
}

/// Run every tool in order, stopping only on a required-tool failure
pub fn provision_all(tools: &[Box<dyn Tool>], ctx: &mut ToolContext) -> Result<()> {
    let total = tools.len();
    for (i, tool) in tools.iter().enumerate() {
        Status::step(i + 1, total, tool.name());
        provision_one(tool.as_ref(), ctx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobilekit_core::error::ErrorCode;
    use std::cell::{Cell, RefCell};
    use std::ffi::OsString;
    use std::path::Path;
    use std::rc::Rc;

    struct FakeTool {
        name: &'static str,
        required: bool,
        present: Cell<bool>,
        present_after_install: bool,
        install_fails: bool,
        installs: Cell<u32>,
        probes: Cell<u32>,
        dirs: RefCell<Vec<PathBuf>>,
    }

    impl FakeTool {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                required: false,
                present: Cell::new(false),
                present_after_install: true,
                install_fails: false,
                installs: Cell::new(0),
                probes: Cell::new(0),
                dirs: RefCell::new(Vec::new()),
            }
        }
    }

    impl Tool for Rc<FakeTool> {
        fn name(&self) -> &str {
            self.name
        }

        fn required(&self) -> bool {
            self.required
        }

        fn probe(&self, _ctx: &ToolContext) -> bool {
            self.probes.set(self.probes.get() + 1);
            self.present.get()
        }

        fn install(&self, _ctx: &mut ToolContext) -> Result<()> {
            self.installs.set(self.installs.get() + 1);
            if self.install_fails {
                return Err(Error::process("simulated install failure"));
            }
            self.present.set(self.present_after_install);
            Ok(())
        }

        fn paths(&self, _ctx: &ToolContext) -> Vec<PathBuf> {
            self.dirs.borrow().clone()
        }
    }

    fn test_env() -> Environment {
        Environment::from_parts("/Users/dev", "/bin/zsh", "aarch64")
    }

    fn run_tools(tools: &[Box<dyn Tool>]) -> (Result<()>, PathLedger) {
        let env = test_env();
        let config = ConfigSchema::default();
        let mut ledger = PathLedger::new(None, &OsString::from("/usr/bin"));
        let result = {
            let mut ctx = ToolContext {
                env: &env,
                config: &config,
                ledger: &mut ledger,
            };
            provision_all(tools, &mut ctx)
        };
        (result, ledger)
    }

    #[test]
    fn test_present_tool_is_not_installed() {
        let tool = Rc::new(FakeTool::new("brew"));
        tool.present.set(true);
        tool.dirs.borrow_mut().push(PathBuf::from("/opt/homebrew/bin"));

        let tools: Vec<Box<dyn Tool>> = vec![Box::new(Rc::clone(&tool))];
        let (result, ledger) = run_tools(&tools);

        assert!(result.is_ok());
        assert_eq!(tool.installs.get(), 0);
        assert!(ledger.contains(Path::new("/opt/homebrew/bin")));
    }

    #[test]
    fn test_absent_tool_is_installed_and_registered() {
        let tool = Rc::new(FakeTool::new("flutter"));
        tool.dirs
            .borrow_mut()
            .push(PathBuf::from("/Users/dev/development/flutter/bin"));

        let tools: Vec<Box<dyn Tool>> = vec![Box::new(Rc::clone(&tool))];
        let (result, ledger) = run_tools(&tools);

        assert!(result.is_ok());
        assert_eq!(tool.installs.get(), 1);
        assert_eq!(
            ledger.entries()[0],
            PathBuf::from("/Users/dev/development/flutter/bin")
        );
    }

    #[test]
    fn test_optional_install_failure_is_tolerated() {
        let mut failing = FakeTool::new("git");
        failing.install_fails = true;
        failing.present_after_install = false;
        let after = Rc::new(FakeTool::new("flutter"));

        let tools: Vec<Box<dyn Tool>> =
            vec![Box::new(Rc::new(failing)), Box::new(Rc::clone(&after))];
        let (result, _) = run_tools(&tools);

        assert!(result.is_ok());
        // The unit after the failing one still ran.
        assert_eq!(after.installs.get(), 1);
    }

    #[test]
    fn test_required_tool_missing_aborts_run() {
        let mut required = FakeTool::new("sdkmanager");
        required.required = true;
        required.present_after_install = false;
        let later = Rc::new(FakeTool::new("later"));

        let tools: Vec<Box<dyn Tool>> =
            vec![Box::new(Rc::new(required)), Box::new(Rc::clone(&later))];
        let (result, _) = run_tools(&tools);

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredToolMissing);
        assert!(err.message.contains("sdkmanager"));

        // Later units never ran.
        assert_eq!(later.probes.get(), 0);
        assert_eq!(later.installs.get(), 0);
    }

    #[test]
    fn test_required_tool_present_after_install_continues() {
        let mut required = FakeTool::new("pod");
        required.required = true;

        let tools: Vec<Box<dyn Tool>> = vec![Box::new(Rc::new(required))];
        let (result, _) = run_tools(&tools);

        assert!(result.is_ok());
    }
}
