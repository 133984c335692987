//! # BoGo Harness Library
//!
//! Core functionality for bootstrapping the BoGo TLS conformance suite and
//! running it against a locally built shim binary. Used by the
//! `bogo-harness` command-line tool; the binary is a thin wrapper around
//! this library.
//!
//! ## What it does
//!
//! 1. **Sync** (`sync`): guarantee a working copy of the suite repository
//!    exists locally and is checked out at an exact pinned reference,
//!    regardless of what state a previous run left behind. A shallow clone
//!    when the checkout is missing, a forced checkout every time.
//! 2. **Probe** (`concurrency`): derive a worker count from the host's
//!    available parallelism, never failing (floor of 1).
//! 3. **Invoke** (`invoke`): resolve the shim executable and config to
//!    absolute paths, then launch the suite's `go test` entry point inside
//!    the checkout and wait for it.
//!
//! The suite's exit status is the outcome. The harness grades nothing
//! itself; it only distinguishes "the harness broke" (a [`error::SyncError`]
//! or [`error::InvokeError`]) from "the shim failed conformance tests" (a
//! nonzero suite status, passed through verbatim).
//!
//! ## Quick example
//!
//! ```no_run
//! use bogo_harness::config::HarnessConfig;
//! use bogo_harness::harness;
//! use bogo_harness::process::SystemRunner;
//!
//! let config = HarnessConfig::default();
//! let status = harness::execute(&config, None, &SystemRunner)?;
//! std::process::exit(status.code().unwrap_or(1));
//! # Ok::<(), bogo_harness::error::Error>(())
//! ```
//!
//! ## Design
//!
//! All external work (git, `go test`) goes through the
//! [`process::ProcessRunner`] trait, so every stage is testable against a
//! recording fake without network access or real subprocesses. The pinned
//! URLs and paths live in an immutable [`config::HarnessConfig`] passed
//! into the stages, not in module-level constants.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod harness;
pub mod invoke;
pub mod process;
pub mod sync;
