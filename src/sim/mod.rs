//! Simulator driver and simulation output parsing.

/// Parsing of `assert`/`report` messages printed by a running test bench.
pub mod report;

/// Subprocess driver for the analyze, elaborate and run stages.
pub mod simulator;

pub use report::{Assertion, MessageKind, Severity, SimulationReport};
pub use simulator::{Simulator, ToolOutput};
