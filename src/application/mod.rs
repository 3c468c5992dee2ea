//! Application layer - use cases that coordinate the registry, filters and
//! deletion executor.

mod prune;

pub use prune::{PruneAction, run_prune};
