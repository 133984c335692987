//! CLI argument parsing and top-level execution

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use bogo_harness::config::{self, HarnessConfig};
use bogo_harness::harness;
use bogo_harness::invoke::InvocationPlan;
use bogo_harness::process::SystemRunner;
use bogo_harness::{concurrency, error};

/// Bootstrap the BoGo TLS conformance suite and run it against a shim binary
///
/// Ensures a pinned revision of the suite repository is checked out, then
/// launches its test runner against the configured shim. The exit code is
/// the suite's own exit code; a nonzero code from the harness itself means
/// the sync or launch stage failed, not that conformance tests failed.
#[derive(Parser, Debug)]
#[command(name = "bogo-harness")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML file overriding the built-in suite/shim settings
    #[arg(short, long, value_name = "PATH", env = "BOGO_HARNESS_CONFIG")]
    config: Option<PathBuf>,

    /// Number of suite worker processes (defaults to host parallelism)
    #[arg(
        short,
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    workers: Option<u64>,

    /// Print the resolved suite invocation without syncing or launching
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Execute the harness, returning the process exit code to use.
    pub fn execute(self) -> Result<i32> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .init();

        let config = match &self.config {
            Some(path) => config::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => HarnessConfig::default(),
        };

        let workers = self.workers.map(|w| w as usize);

        if self.dry_run {
            return print_plan(&config, workers);
        }

        let status = harness::execute(&config, workers, &SystemRunner)?;
        match status.code() {
            Some(code) => Ok(code),
            // Killed by a signal; there is no suite code to pass through
            None => Err(error::InvokeError::Launch {
                dir: config.suite_entry_dir().display().to_string(),
                message: "suite process terminated by a signal".to_string(),
            }
            .into()),
        }
    }
}

/// Show what a real run would do, without touching the checkout or
/// launching anything.
fn print_plan(config: &HarnessConfig, workers: Option<usize>) -> Result<i32> {
    let worker_count = workers.unwrap_or_else(concurrency::probe);
    let plan = InvocationPlan::resolve(config, worker_count)?;
    let spec = plan.command();

    println!(
        "sync:   {} @ {} -> {}",
        config.suite.remote_url,
        config.suite.pinned_ref,
        config.suite.local_path.display()
    );
    println!("cwd:    {}", plan.suite_entry_dir.display());
    println!("launch: {}", spec.display_line());

    Ok(0)
}
