//! # Subprocess Execution
//!
//! The harness delegates everything interesting to external tools: `git` for
//! the suite checkout and `go test` for the suite itself. This module puts
//! those launches behind the `ProcessRunner` trait so the sync and invoke
//! stages can be tested against a recording fake, asserting on the exact
//! argument lists without touching the network or spawning processes.
//!
//! `SystemRunner` is the production implementation over
//! `std::process::Command`. Using the system `git` binary (rather than a
//! git library) means SSH keys, credential helpers and anything else in the
//! user's git configuration keep working unchanged.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Captured outcome of a finished subprocess.
///
/// A thin, constructible stand-in for `std::process::ExitStatus`, which
/// cannot be built portably in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    code: Option<i32>,
}

impl ProcessStatus {
    /// Status of a process that exited with `code`.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status of a process terminated without an exit code (killed by a
    /// signal on Unix).
    pub fn terminated() -> Self {
        Self { code: None }
    }

    /// The exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// True for a normal exit with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// A fully specified external command: program, arguments and an optional
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path, resolved through `PATH` as usual.
    pub program: String,
    /// Arguments, one entry per argv element.
    pub args: Vec<String>,
    /// Working directory for the child, or the harness's own if `None`.
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Build a command with no explicit working directory.
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            current_dir: None,
        }
    }

    /// Set the child's working directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Render the command roughly as a shell would show it, for logging and
    /// dry-run output.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Result of a captured run: the status plus whatever the child wrote to
/// stderr, for folding into error messages.
#[derive(Debug, Clone)]
pub struct CapturedRun {
    /// Exit status of the child.
    pub status: ProcessStatus,
    /// The child's stderr, lossily decoded.
    pub stderr: String,
}

/// Trait for launching external processes - allows substituting a fake in
/// tests and asserting on the exact commands the harness would run.
pub trait ProcessRunner {
    /// Run the command with inherited stdio, blocking until it exits.
    ///
    /// Used for the suite itself, whose streamed test output should reach
    /// the terminal as it happens.
    fn run_streamed(&self, spec: &CommandSpec) -> io::Result<ProcessStatus>;

    /// Run the command with stderr captured, blocking until it exits.
    ///
    /// Used for git operations, whose diagnostics belong in our error
    /// messages rather than interleaved with harness output.
    fn run_captured(&self, spec: &CommandSpec) -> io::Result<CapturedRun>;
}

/// Production runner over `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl ProcessRunner for SystemRunner {
    fn run_streamed(&self, spec: &CommandSpec) -> io::Result<ProcessStatus> {
        log::debug!("Running (streamed): {}", spec.display_line());
        let status = Self::command(spec).status()?;
        Ok(status.into())
    }

    fn run_captured(&self, spec: &CommandSpec) -> io::Result<CapturedRun> {
        log::debug!("Running (captured): {}", spec.display_line());
        let output = Self::command(spec).stdin(Stdio::null()).output()?;
        Ok(CapturedRun {
            status: output.status.into(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeOutcome, FakeRunner};
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_process_status_success() {
        assert!(ProcessStatus::from_code(0).success());
        assert!(!ProcessStatus::from_code(1).success());
        assert!(!ProcessStatus::terminated().success());
        assert_eq!(ProcessStatus::terminated().code(), None);
    }

    #[test]
    fn test_command_spec_display_line() {
        let spec = CommandSpec::new("git", args(&["-C", "deps", "checkout", "main"]));
        assert_eq!(spec.display_line(), "git -C deps checkout main");
    }

    #[test]
    fn test_command_spec_in_dir() {
        let spec = CommandSpec::new("go", args(&["test"])).in_dir("suite/runner");
        assert_eq!(spec.current_dir, Some(PathBuf::from("suite/runner")));
    }

    #[test]
    fn test_system_runner_captures_exit_code() {
        let spec = CommandSpec::new("sh", args(&["-c", "exit 7"]));
        let run = SystemRunner.run_captured(&spec).unwrap();
        assert_eq!(run.status.code(), Some(7));
        assert!(!run.status.success());
    }

    #[test]
    fn test_system_runner_captures_stderr() {
        let spec = CommandSpec::new("sh", args(&["-c", "echo oops >&2; exit 1"]));
        let run = SystemRunner.run_captured(&spec).unwrap();
        assert!(run.stderr.contains("oops"));
    }

    #[test]
    fn test_system_runner_missing_program_is_io_error() {
        let spec = CommandSpec::new("definitely-not-a-real-binary", Vec::new());
        assert!(SystemRunner.run_captured(&spec).is_err());
    }

    #[test]
    fn test_system_runner_respects_current_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        // canonicalize so macOS /tmp symlinks compare equal
        let dir = temp.path().canonicalize().unwrap();
        let spec = CommandSpec::new(
            "sh",
            args(&["-c", "test \"$(pwd)\" = \"$1\"", "sh", dir.to_str().unwrap()]),
        )
        .in_dir(&dir);
        let run = SystemRunner.run_captured(&spec).unwrap();
        assert!(run.status.success());
    }

    #[test]
    fn test_fake_runner_records_calls_in_order() {
        let runner = FakeRunner::new();
        let first = CommandSpec::new("git", args(&["clone"]));
        let second = CommandSpec::new("go", args(&["test"]));

        runner.run_captured(&first).unwrap();
        runner.run_streamed(&second).unwrap();

        let calls = runner.calls();
        assert_eq!(calls, vec![first, second]);
    }

    #[test]
    fn test_fake_runner_replays_script() {
        let runner = FakeRunner::with_script([
            FakeOutcome::Finished(ProcessStatus::from_code(128), "fatal: nope"),
            FakeOutcome::SpawnError(io::ErrorKind::NotFound),
        ]);
        let spec = CommandSpec::new("git", Vec::new());

        let run = runner.run_captured(&spec).unwrap();
        assert_eq!(run.status.code(), Some(128));
        assert_eq!(run.stderr, "fatal: nope");

        assert!(runner.run_streamed(&spec).is_err());
    }
}
