//! # Error Handling
//!
//! Centralized error types for the harness, built with `thiserror`.
//!
//! The taxonomy mirrors the two stages that can fail:
//!
//! - **`SyncError`**: the suite repository could not be cloned or could not
//!   be switched to the pinned reference.
//! - **`InvokeError`**: the suite entry point could not be started at all.
//!
//! A nonzero exit status from the suite itself is *not* an error of this
//! tool; it is passed through verbatim as the harness exit code. Keeping
//! that distinction visible in the types is the point of this module: a
//! `SyncError` or `InvokeError` means the harness broke, while a failing
//! exit status means the shim failed conformance tests.
//!
//! All stage errors are fatal. There is no retry layer; a half-synced
//! repository or a failed launch leaves nothing useful to recover.

use thiserror::Error;

/// Errors from the repository synchronization stage.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The shallow clone of the suite repository failed.
    ///
    /// Covers unreachable remotes, authentication failures and unknown
    /// refs. Includes the URL, the pinned ref and git's own diagnostics.
    #[error("Failed to clone {url}@{r#ref}: {message}")]
    Clone {
        url: String,
        r#ref: String,
        message: String,
    },

    /// The working copy could not be switched to the pinned reference.
    ///
    /// Typically local modifications blocking the checkout, or a ref that
    /// does not exist in the (shallow) clone.
    #[error("Failed to check out {r#ref} in {path}: {message}")]
    Checkout {
        r#ref: String,
        path: String,
        message: String,
    },
}

/// Errors from launching the conformance suite.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The suite entry point could not be started.
    ///
    /// Missing `go` binary, bad working directory, permission problems.
    /// Distinct from a nonzero suite exit status, which is a normal (if
    /// unwelcome) outcome and is never reported through this type.
    #[error("Failed to launch the conformance suite in {dir}: {message}")]
    Launch { dir: String, message: String },
}

/// Main error type for harness operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Repository synchronization failed.
    #[error("Suite sync failed: {0}")]
    Sync(#[from] SyncError),

    /// The conformance suite could not be launched.
    #[error("Suite invocation failed: {0}")]
    Invoke(#[from] InvokeError),

    /// The harness configuration file could not be used.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
