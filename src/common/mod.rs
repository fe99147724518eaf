//! Common types used throughout the test bench driver.
//!
//! This module provides the error type, the simulator stage classification,
//! and the file naming constants shared by the simulator driver and the
//! test bench lifecycle.

/// Common constants for file names and defaults.
pub mod constants;

/// Simulator invocation stage definitions.
pub mod data;

/// Error types.
pub mod error;

/// Directory-scoped wildcard matching.
pub mod pattern;

pub use data::ToolStage;
pub use error::{BenchError, BenchResult};
pub use pattern::Pattern;
