//! # Pipeline Orchestration
//!
//! Runs the three stages in order: sync the suite checkout, pick a worker
//! count, launch the suite. Strictly sequential; the suite is never
//! launched against a checkout that has not converged to the pinned ref.
//!
//! The returned status is the suite's, untouched. The caller decides how to
//! surface it (the CLI exits with it).

use crate::concurrency;
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::invoke::{self, InvocationPlan};
use crate::process::{ProcessRunner, ProcessStatus};
use crate::sync::{self, RepositoryHandle};

/// Sync the suite, then run it against the configured shim.
///
/// `workers` overrides the host-derived worker count when given. Blocks
/// until the suite exits; any timeout has to come from outside.
pub fn execute(
    config: &HarnessConfig,
    workers: Option<usize>,
    runner: &dyn ProcessRunner,
) -> Result<ProcessStatus> {
    let repo = RepositoryHandle {
        remote_url: config.suite.remote_url.clone(),
        pinned_ref: config.suite.pinned_ref.clone(),
        local_path: config.suite.local_path.clone(),
    };
    sync::ensure(&repo, runner)?;

    let worker_count = workers.unwrap_or_else(concurrency::probe);
    log::debug!("Using {} suite workers", worker_count);

    let plan = InvocationPlan::resolve(config, worker_count)?;
    Ok(invoke::invoke(&plan, runner)?)
}
