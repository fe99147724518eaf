//! GHDL Test Bench Driver Library.
//!
//! This crate drives an external HDL simulator (GHDL by default) through the
//! lifecycle of a test bench: analyze the component and harness sources,
//! elaborate the harness into a runnable simulation, optionally run it, and
//! clean the generated artifacts back out of the working directory.
//!
//! # Architecture
//!
//! * **Descriptor**: a [`bench::Testbench`] owns one working directory's worth
//!   of build state. Its harness source is either already on disk or generated
//!   from an in-memory string.
//! * **Driver**: a [`sim::Simulator`] spawns the external tool. Every call
//!   receives the working directory explicitly.
//! * **Verification**: [`bench::DirListing`] snapshots let callers check that
//!   compiling produced the expected artifacts and cleaning removed them.
//!
//! # Modules
//!
//! * `bench`: Test bench descriptor, directory snapshots, and the full cycle.
//! * `common`: Errors, stage definitions, constants, and wildcard matching.
//! * `config`: TOML configuration loading.
//! * `sim`: Simulator subprocess driver and simulation output parsing.
//! * `stats`: Timing and file counters.
//!
//! # Example
//!
//! ```no_run
//! use ghdl_bench::bench::Testbench;
//! use ghdl_bench::sim::Simulator;
//!
//! # fn main() -> ghdl_bench::common::BenchResult<()> {
//! let sim = Simulator::new("ghdl");
//! let mut tb = Testbench::new("demos/full-adder", ["adder"], "adder_tb", "vhd");
//! tb.compile(&sim)?;
//! let report = tb.run(&sim, &[])?;
//! assert!(report.passed());
//! tb.clean()?;
//! # Ok(())
//! # }
//! ```

/// Test bench descriptor and lifecycle operations.
///
/// Provides the static and generated test bench variants, directory
/// snapshots for artifact checks, and the compile/run/clean round trip.
pub mod bench;

/// Shared error type, stage definitions, constants, and wildcard matching.
pub mod common;

/// Configuration for the simulator and the list of known benches.
///
/// Loads TOML files and applies the `GHDL` environment override.
pub mod config;

/// External simulator driver.
///
/// Spawns the analyze, elaborate and run steps and parses the messages a
/// running simulation prints.
pub mod sim;

/// Lifecycle statistics collection and reporting.
pub mod stats;
