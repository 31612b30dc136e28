//! Endprobe Runner
//!
//! Drives a probe run: one probe per endpoint, in catalog order, with a
//! fixed pause between requests. Failures never stop the run; each one is
//! recorded as a result and the runner moves on.
//!
//! After the run, [`RunSummary`] aggregates outcomes and [`partition`]
//! splits results into the views the report presents.

mod partition;
mod runner;
mod summary;

pub use partition::{KnownStatus, Partition, is_known, known_status, normalize_name, partition};
pub use runner::{Run, RunConfig, Runner};
pub use summary::RunSummary;
