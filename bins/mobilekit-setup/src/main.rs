//! Mobilekit setup CLI
//!
//! Provisions a macOS machine for mobile app development: Homebrew, the
//! Xcode Command Line Tools, git, the Flutter SDK, CocoaPods, and the
//! Android SDK toolchain, with PATH bookkeeping and license acceptance.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mobilekit_cli::output::Status;
use mobilekit_core::config::Config;
use mobilekit_core::error::{ErrorCode, exit_codes};
use mobilekit_provision::{Environment, PathLedger, ToolContext, finalize, provision_all, tools};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mobilekit-setup")]
#[command(about = "Provision a macOS machine for mobile app development")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install every missing tool and register PATH entries
    Run,

    /// Report which tools are present without installing anything
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref().and_then(|p| p.to_str()))?;

    let exit_code = match cli.command {
        Commands::Run => run_provision(&config),
        Commands::Doctor => run_doctor(&config),
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_provision(config: &Config) -> i32 {
    Status::banner("Mobilekit setup");

    let env = match Environment::detect() {
        Ok(env) => env,
        Err(e) => {
            Status::error(&format!("Environment detection failed: {}", e));
            return exit_codes::FAILURE;
        }
    };

    tracing::debug!(arch = ?env.arch, shell = env.shell.name(), "environment detected");

    let startup_file = env.startup_file();
    if startup_file.is_none() {
        Status::warning(&format!(
            "Unrecognized shell {}; PATH changes will not be persisted",
            env.shell.name()
        ));
    }

    let mut ledger = PathLedger::from_process_env(startup_file);
    let units = tools::standard_tools();
    let mut ctx = ToolContext {
        env: &env,
        config: &config.schema,
        ledger: &mut ledger,
    };

    if let Err(e) = provision_all(&units, &mut ctx) {
        Status::error(&format!("{}", e));
        return if e.code == ErrorCode::RequiredToolMissing {
            exit_codes::COMMAND_NOT_FOUND
        } else {
            exit_codes::FAILURE
        };
    }

    finalize::run(&ctx);

    Status::banner("Mobilekit setup complete");
    exit_codes::SUCCESS
}

fn run_doctor(config: &Config) -> i32 {
    Status::banner("Environment check");

    let env = match Environment::detect() {
        Ok(env) => env,
        Err(e) => {
            Status::error(&format!("Environment detection failed: {}", e));
            return exit_codes::FAILURE;
        }
    };

    Status::info(&format!(
        "Shell: {} (startup file: {})",
        env.shell.name(),
        env.startup_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    ));
    Status::info(&format!("Homebrew prefix: {}", env.brew_prefix().display()));

    let mut ledger = PathLedger::from_process_env(None);
    let ctx = ToolContext {
        env: &env,
        config: &config.schema,
        ledger: &mut ledger,
    };

    let mut required_missing = false;
    for tool in tools::standard_tools() {
        if tool.probe(&ctx) {
            Status::success(&format!("{}: installed", tool.name()));
        } else if tool.required() {
            required_missing = true;
            Status::error(&format!("{}: not found", tool.name()));
        } else {
            Status::warning(&format!("{}: not found", tool.name()));
        }
    }

    if required_missing {
        exit_codes::FAILURE
    } else {
        exit_codes::SUCCESS
    }
}
