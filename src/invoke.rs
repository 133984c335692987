//! # Suite Invocation
//!
//! Builds the invocation plan for the conformance suite and launches it.
//!
//! The BoGo runner is a Go package; its entry point is `go test` run inside
//! the runner directory of the suite checkout. Because the child's working
//! directory is the runner directory, not ours, the shim paths are resolved
//! to absolute form while constructing the plan. Handing the suite a
//! relative `./botan_bogo_shim` would make it look inside its own checkout.
//!
//! The flag spellings (`-pipe`, `-num-workers`, `-shim-path`,
//! `-shim-config`) are the runner's own interface and must not be changed
//! here.
//!
//! The suite's exit status is the harness's result, passed through
//! verbatim: which individual tests failed is the suite's business, not
//! ours. Only a failure to start the process at all is an error of this
//! tool.

use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;
use crate::error::InvokeError;
use crate::process::{CommandSpec, ProcessRunner, ProcessStatus};

/// Everything needed to launch one suite run. Built fresh per run; nothing
/// here persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    /// Worker processes the suite is asked to fan out to.
    pub worker_count: usize,
    /// Absolute path to the shim executable.
    pub shim_executable: PathBuf,
    /// Absolute path to the shim's JSON config.
    pub shim_config: PathBuf,
    /// Directory the suite entry point runs in.
    pub suite_entry_dir: PathBuf,
}

impl InvocationPlan {
    /// Resolve a plan from the harness configuration and a worker count.
    ///
    /// Shim paths are absolutized against the harness's own working
    /// directory without requiring them to exist yet; whether the shim was
    /// actually built is discovered by the suite, which reports it per test.
    pub fn resolve(config: &HarnessConfig, worker_count: usize) -> Result<Self, InvokeError> {
        Ok(Self {
            worker_count,
            shim_executable: absolutize(&config.shim.executable)?,
            shim_config: absolutize(&config.shim.config)?,
            suite_entry_dir: config.suite_entry_dir(),
        })
    }

    /// The exact command this plan launches.
    pub fn command(&self) -> CommandSpec {
        CommandSpec::new(
            "go",
            [
                "test".to_string(),
                "-pipe".to_string(),
                "-num-workers".to_string(),
                self.worker_count.to_string(),
                "-shim-path".to_string(),
                self.shim_executable.display().to_string(),
                "-shim-config".to_string(),
                self.shim_config.display().to_string(),
            ],
        )
        .in_dir(&self.suite_entry_dir)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, InvokeError> {
    std::path::absolute(path).map_err(|e| InvokeError::Launch {
        dir: path.display().to_string(),
        message: format!("cannot resolve to an absolute path: {}", e),
    })
}

/// Launch the suite described by `plan` and wait for it to finish.
///
/// The child inherits stdio so test progress streams through. Returns the
/// suite's own exit status; a nonzero status is a result, not an error.
pub fn invoke(plan: &InvocationPlan, runner: &dyn ProcessRunner) -> Result<ProcessStatus, InvokeError> {
    let spec = plan.command();
    log::info!(
        "Launching conformance suite in {}: {}",
        plan.suite_entry_dir.display(),
        spec.display_line()
    );

    runner.run_streamed(&spec).map_err(|e| InvokeError::Launch {
        dir: plan.suite_entry_dir.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::process::testing::{FakeOutcome, FakeRunner};

    fn plan_with_defaults(workers: usize) -> InvocationPlan {
        InvocationPlan::resolve(&HarnessConfig::default(), workers).unwrap()
    }

    #[test]
    fn test_resolve_makes_shim_paths_absolute() {
        let plan = plan_with_defaults(4);
        assert!(plan.shim_executable.is_absolute());
        assert!(plan.shim_config.is_absolute());
        assert!(plan
            .shim_executable
            .to_string_lossy()
            .ends_with("botan_bogo_shim"));
    }

    #[test]
    fn test_resolve_leaves_absolute_inputs_unchanged() {
        let mut config = HarnessConfig::default();
        config.shim.executable = PathBuf::from("/opt/shim/botan_bogo_shim");
        let plan = InvocationPlan::resolve(&config, 1).unwrap();
        assert_eq!(
            plan.shim_executable,
            PathBuf::from("/opt/shim/botan_bogo_shim")
        );
    }

    #[test]
    fn test_command_argv_matches_runner_interface() {
        let plan = plan_with_defaults(8);
        let spec = plan.command();

        assert_eq!(spec.program, "go");
        assert_eq!(spec.args[0], "test");
        assert_eq!(spec.args[1], "-pipe");
        assert_eq!(spec.args[2], "-num-workers");
        assert_eq!(spec.args[3], "8");
        assert_eq!(spec.args[4], "-shim-path");
        assert_eq!(spec.args[5], plan.shim_executable.display().to_string());
        assert_eq!(spec.args[6], "-shim-config");
        assert_eq!(spec.args[7], plan.shim_config.display().to_string());
        assert_eq!(spec.args.len(), 8);
    }

    #[test]
    fn test_command_runs_in_suite_entry_dir() {
        let plan = plan_with_defaults(1);
        let spec = plan.command();
        assert_eq!(
            spec.current_dir,
            Some(PathBuf::from("build_deps/boringssl/ssl/test/runner"))
        );
    }

    #[test]
    fn test_invoke_passes_status_through() {
        let plan = plan_with_defaults(2);

        for code in [0, 1, 42] {
            let runner = FakeRunner::with_script([FakeOutcome::Finished(
                ProcessStatus::from_code(code),
                "",
            )]);
            let status = invoke(&plan, &runner).unwrap();
            assert_eq!(status.code(), Some(code));
        }
    }

    #[test]
    fn test_invoke_spawn_failure_is_launch_error() {
        let plan = plan_with_defaults(2);
        let runner =
            FakeRunner::with_script([FakeOutcome::SpawnError(std::io::ErrorKind::NotFound)]);

        let err = invoke(&plan, &runner).unwrap_err();
        let InvokeError::Launch { dir, .. } = err;
        assert!(dir.contains("ssl/test/runner"));
    }

    #[test]
    fn test_invoke_runs_exactly_one_process() {
        let plan = plan_with_defaults(2);
        let runner = FakeRunner::new();
        invoke(&plan, &runner).unwrap();
        assert_eq!(runner.calls().len(), 1);
    }
}
