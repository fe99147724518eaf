//! External Simulator Driver.
//!
//! Every subprocess the crate spawns goes through [`Simulator`]. Each call
//! takes the working directory explicitly and runs the child with that
//! directory as its current directory; the parent's working directory is
//! never consulted or changed.

use crate::common::{BenchError, BenchResult, ToolStage};
use crate::config::SimulatorConfig;
use crate::sim::report::SimulationReport;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// Captured result of one simulator invocation.
#[derive(Clone, Debug)]
pub struct ToolOutput {
    pub stage: ToolStage,
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Handle on the external HDL simulator (GHDL by default).
#[derive(Clone, Debug, PartialEq)]
pub struct Simulator {
    program: String,
    std: Option<String>,
    analyze_args: Vec<String>,
    elaborate_args: Vec<String>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::from_config(&SimulatorConfig::default())
    }
}

impl Simulator {
    /// Creates a driver for `program`, resolved through `PATH` unless it is a path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            std: None,
            analyze_args: Vec::new(),
            elaborate_args: Vec::new(),
        }
    }

    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self {
            program: config.program.clone(),
            std: config.std.clone(),
            analyze_args: config.analyze_args.clone(),
            elaborate_args: config.elaborate_args.clone(),
        }
    }

    /// Selects the VHDL standard revision (`--std=<std>`) for every stage.
    pub fn with_std(mut self, std: impl Into<String>) -> Self {
        self.std = Some(std.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolves the simulator program to an executable path.
    pub fn locate(&self) -> BenchResult<PathBuf> {
        which::which(&self.program)
            .map_err(|e| BenchError::ToolNotFound(format!("{} ({})", self.program, e)))
    }

    pub fn is_available(&self) -> bool {
        self.locate().is_ok()
    }

    /// Builds the argument list for `stage` applied to `operands`.
    ///
    /// Options always precede operands: `-a [--std=..] [extra..] <files..>`.
    pub fn arguments(&self, stage: ToolStage, operands: &[String]) -> Vec<String> {
        let mut args = vec![stage.flag().to_string()];
        if let Some(std) = &self.std {
            args.push(format!("--std={}", std));
        }
        match stage {
            ToolStage::Analyze => args.extend(self.analyze_args.iter().cloned()),
            ToolStage::Elaborate => args.extend(self.elaborate_args.iter().cloned()),
            ToolStage::Run => {}
        }
        args.extend(operands.iter().cloned());
        args
    }

    /// Analyzes `files` (names relative to `dir`) in the given order.
    pub fn analyze(&self, dir: &Path, files: &[String]) -> BenchResult<ToolOutput> {
        let output = self.execute(ToolStage::Analyze, dir, &self.arguments(ToolStage::Analyze, files))?;
        Self::require_success(output)
    }

    /// Elaborates the top-level design `unit`.
    pub fn elaborate(&self, dir: &Path, unit: &str) -> BenchResult<ToolOutput> {
        let operands = [unit.to_string()];
        let output = self.execute(
            ToolStage::Elaborate,
            dir,
            &self.arguments(ToolStage::Elaborate, &operands),
        )?;
        Self::require_success(output)
    }

    /// Runs the elaborated `unit` and parses what it printed.
    ///
    /// A non-zero exit is not an error here: failing assertions stop the
    /// simulation with a non-zero status, and the report records it.
    /// `sim_args` are passed through after the unit name.
    pub fn run(&self, dir: &Path, unit: &str, sim_args: &[String]) -> BenchResult<SimulationReport> {
        let mut operands = vec![unit.to_string()];
        operands.extend(sim_args.iter().cloned());
        let output = self.execute(ToolStage::Run, dir, &self.arguments(ToolStage::Run, &operands))?;
        Ok(SimulationReport::from_output(&output))
    }

    fn execute(&self, stage: ToolStage, dir: &Path, args: &[String]) -> BenchResult<ToolOutput> {
        let program = self.locate()?;
        log::debug!(
            "[{}] {} {} (in {})",
            stage,
            program.display(),
            args.join(" "),
            dir.display()
        );

        let start = Instant::now();
        let output = Command::new(&program).args(args).current_dir(dir).output()?;
        let elapsed = start.elapsed();

        let result = ToolOutput {
            stage,
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed,
        };
        log::debug!(
            "[{}] finished in {:.3}s with status {:?}",
            stage,
            elapsed.as_secs_f64(),
            result.code
        );
        Ok(result)
    }

    fn require_success(output: ToolOutput) -> BenchResult<ToolOutput> {
        if output.success() {
            if !output.stderr.trim().is_empty() {
                log::warn!("[{}] {}", output.stage, output.stderr.trim());
            }
            return Ok(output);
        }

        let stderr = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        Err(BenchError::ToolFailed {
            stage: output.stage,
            code: output.code,
            stderr,
        })
    }
}
