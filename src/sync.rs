//! # Suite Repository Synchronization
//!
//! Converges the local working copy of the conformance-suite repository onto
//! the pinned reference, whatever state it was left in.
//!
//! Two git operations, both through the [`ProcessRunner`] seam:
//!
//! 1. If the local path is not a directory yet, a shallow clone
//!    (`--depth 1 --branch <ref>`) fetches just the pinned revision; the
//!    suite's full history is never needed.
//! 2. A checkout of the pinned ref runs unconditionally afterwards, also
//!    right after a fresh clone. That second step is what makes `ensure`
//!    idempotent and self-healing: a working copy left on another branch or
//!    a detached HEAD converges back to the pinned ref on every run instead
//!    of being trusted.
//!
//! Failures are fatal for the run. Git's stderr is folded into the error so
//! the operator sees the underlying diagnostic, not just the stage name.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::process::{CommandSpec, ProcessRunner};

/// The external suite repository and where its working copy lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    /// Remote URL to clone from.
    pub remote_url: String,
    /// Exact branch the working copy must be on after `ensure`.
    pub pinned_ref: String,
    /// On-disk location of the working copy.
    pub local_path: PathBuf,
}

/// Make sure `repo.local_path` holds a working copy of `repo.remote_url`
/// checked out at `repo.pinned_ref`.
///
/// Safe to call repeatedly; each call converges the checkout rather than
/// assuming anything about prior state. The only filesystem mutation is the
/// working copy itself.
pub fn ensure(repo: &RepositoryHandle, runner: &dyn ProcessRunner) -> Result<(), SyncError> {
    if !repo.local_path.is_dir() {
        clone_shallow(repo, runner)?;
    }

    // Make doubly sure we're on the pinned ref, even right after a clone.
    checkout(repo, runner)
}

fn clone_shallow(repo: &RepositoryHandle, runner: &dyn ProcessRunner) -> Result<(), SyncError> {
    log::info!(
        "Cloning {} at {} into {}",
        repo.remote_url,
        repo.pinned_ref,
        repo.local_path.display()
    );

    let spec = CommandSpec::new(
        "git",
        [
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            "--branch".to_string(),
            repo.pinned_ref.clone(),
            repo.remote_url.clone(),
            path_arg(&repo.local_path),
        ],
    );

    let run = runner.run_captured(&spec).map_err(|e| SyncError::Clone {
        url: repo.remote_url.clone(),
        r#ref: repo.pinned_ref.clone(),
        message: e.to_string(),
    })?;

    if !run.status.success() {
        return Err(SyncError::Clone {
            url: repo.remote_url.clone(),
            r#ref: repo.pinned_ref.clone(),
            message: run.stderr,
        });
    }

    Ok(())
}

fn checkout(repo: &RepositoryHandle, runner: &dyn ProcessRunner) -> Result<(), SyncError> {
    log::debug!(
        "Checking out {} in {}",
        repo.pinned_ref,
        repo.local_path.display()
    );

    let spec = CommandSpec::new(
        "git",
        [
            "-C".to_string(),
            path_arg(&repo.local_path),
            "checkout".to_string(),
            repo.pinned_ref.clone(),
        ],
    );

    let run = runner.run_captured(&spec).map_err(|e| SyncError::Checkout {
        r#ref: repo.pinned_ref.clone(),
        path: path_arg(&repo.local_path),
        message: e.to_string(),
    })?;

    if !run.status.success() {
        return Err(SyncError::Checkout {
            r#ref: repo.pinned_ref.clone(),
            path: path_arg(&repo.local_path),
            message: run.stderr,
        });
    }

    Ok(())
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
