//! # BoGo Harness CLI
//!
//! Binary entry point for the `bogo-harness` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the sync/probe/invoke pipeline from the library crate.
//! - Exiting with the conformance suite's own exit code on a completed run,
//!   or with 1 and a stage-identifying message when the harness itself
//!   fails.
//!
//! The core logic lives in the `bogo_harness` library crate; this binary is
//! a thin wrapper around it.

mod cli;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
