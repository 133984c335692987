//! # Harness Configuration
//!
//! Defines the immutable configuration consumed by the pipeline stages: which
//! suite repository to pin, where to check it out, and where the shim binary
//! and its JSON config live.
//!
//! The built-in defaults reproduce the pinned setup the surrounding build
//! system expects (a BoringSSL fork carrying the BoGo runner, checked out
//! under `build_deps/`). Every field can be overridden through an optional
//! YAML file so CI and local developers can point the harness at a different
//! fork, branch or shim location without rebuilding:
//!
//! ```yaml
//! suite:
//!   remote_url: https://github.com/example/boringssl.git
//!   pinned_ref: my-runner-branch
//! shim:
//!   executable: ./build/my_shim
//! ```
//!
//! Fields omitted from the file keep their defaults (`#[serde(default)]`),
//! so a file overriding a single path stays a one-liner.
//!
//! Configuration is plain data. The pipeline stages receive it by reference
//! and never mutate it; nothing in here is a module-level constant, which
//! keeps every stage testable with injected fake paths and URLs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default remote of the suite repository (a BoringSSL fork with a runner
/// branch adapted for external shims).
fn default_remote_url() -> String {
    "https://github.com/reneme/boringssl.git".to_string()
}

/// Default pinned branch of the suite repository.
fn default_pinned_ref() -> String {
    "rene/runner-20220322".to_string()
}

/// Default local checkout location, relative to the project root.
fn default_local_path() -> PathBuf {
    PathBuf::from("build_deps/boringssl")
}

/// Relative path from the suite checkout to the BoGo runner package.
fn default_runner_subdir() -> PathBuf {
    PathBuf::from("ssl/test/runner")
}

/// Default location of the built shim executable.
fn default_shim_executable() -> PathBuf {
    PathBuf::from("./botan_bogo_shim")
}

/// Default location of the shim's JSON configuration.
fn default_shim_config() -> PathBuf {
    PathBuf::from("src/bogo_shim/config.json")
}

/// The external test-suite repository and the pinned revision to run.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Remote URL the suite is cloned from.
    #[serde(default = "default_remote_url")]
    pub remote_url: String,

    /// Exact branch the working copy must end up on.
    #[serde(default = "default_pinned_ref")]
    pub pinned_ref: String,

    /// Where the working copy lives on disk.
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,

    /// Subdirectory of the checkout containing the runner package. The
    /// suite is launched with this as its working directory.
    #[serde(default = "default_runner_subdir")]
    pub runner_subdir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            remote_url: default_remote_url(),
            pinned_ref: default_pinned_ref(),
            local_path: default_local_path(),
            runner_subdir: default_runner_subdir(),
        }
    }
}

/// The externally built shim under test. Read-only input; the harness only
/// resolves these paths, it never produces or modifies them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShimArtifact {
    /// Path to the shim executable.
    #[serde(default = "default_shim_executable")]
    pub executable: PathBuf,

    /// Path to the shim's JSON configuration file.
    #[serde(default = "default_shim_config")]
    pub config: PathBuf,
}

impl Default for ShimArtifact {
    fn default() -> Self {
        Self {
            executable: default_shim_executable(),
            config: default_shim_config(),
        }
    }
}

/// Complete harness configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// The suite repository to sync and run.
    #[serde(default)]
    pub suite: SuiteConfig,

    /// The shim artifact to hand to the suite.
    #[serde(default)]
    pub shim: ShimArtifact,
}

impl HarnessConfig {
    /// Directory the suite process is launched in.
    pub fn suite_entry_dir(&self) -> PathBuf {
        self.suite.local_path.join(&self.suite.runner_subdir)
    }
}

/// Parse a harness configuration from a YAML string.
pub fn parse(yaml: &str) -> Result<HarnessConfig> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a harness configuration from a YAML file.
pub fn from_file(path: &Path) -> Result<HarnessConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    parse(&content)
}
