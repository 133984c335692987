//! Host concurrency probe for the suite's worker pool.

use std::num::NonZeroUsize;

/// Number of suite worker processes to request from the host.
///
/// Uses the number of processing units available to this process, with a
/// floor of 1: when the host's parallelism cannot be determined the harness
/// still runs, just without fan-out. Never fails.
pub fn probe() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
