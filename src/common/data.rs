//! Simulator Invocation Stages.
//!
//! This module defines the classification of external simulator invocations
//! used throughout the crate. The stage selects the command-line mode passed
//! to the simulator and tags errors and statistics with the step that
//! produced them.

use serde::Serialize;
use std::fmt;

/// Stage of an external simulator invocation.
///
/// A test bench goes through `Analyze` and `Elaborate` during compilation,
/// and optionally through `Run` afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStage {
    /// Parse and type-check source files.
    ///
    /// Produces one object file per design unit and updates the
    /// design-library cache.
    Analyze,

    /// Resolve a top-level unit into a runnable simulation.
    ///
    /// Produces the `e~<unit>.o` marker and an executable named after the unit.
    Elaborate,

    /// Execute an elaborated simulation.
    Run,
}

impl ToolStage {
    /// Returns the simulator command-line flag selecting this stage.
    pub fn flag(self) -> &'static str {
        match self {
            ToolStage::Analyze => "-a",
            ToolStage::Elaborate => "-e",
            ToolStage::Run => "-r",
        }
    }
}

impl fmt::Display for ToolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolStage::Analyze => "analyze",
            ToolStage::Elaborate => "elaborate",
            ToolStage::Run => "run",
        };
        f.write_str(name)
    }
}
