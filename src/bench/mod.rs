//! Test bench lifecycle: describe, compile, run, clean.

/// Compile, verify, run and clean round trip.
pub mod cycle;

/// Directory content snapshots used to check artifacts.
pub mod listing;

/// The test bench descriptor and its compile/clean sequence.
pub mod testbench;

pub use cycle::{run_cycle, CycleOptions, CycleReport};
pub use listing::DirListing;
pub use testbench::{Stage, Testbench, TestbenchSource};
