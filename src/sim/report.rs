//! Simulation output parsing.
//!
//! GHDL prints one line per triggered `assert` or `report` statement:
//!
//! ```text
//! xor_tb.vhd:48:7:@40ns:(assertion error): bad output value
//! xor_tb.vhd:51:5:@40ns:(assertion note): end of test
//! ```
//!
//! Lines that do not follow this shape are kept in the raw output only.

use crate::common::ToolStage;
use crate::sim::simulator::ToolOutput;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Warning,
    Error,
    Failure,
}

impl Severity {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "note" => Some(Severity::Note),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "failure" => Some(Severity::Failure),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Failure => "failure",
        };
        f.write_str(s)
    }
}

/// Which statement produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Assertion,
    Report,
}

/// One parsed `assert`/`report` message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assertion {
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// Simulation time as printed, e.g. `40ns`.
    pub time: String,
    pub kind: MessageKind,
    pub severity: Severity,
    pub message: String,
}

impl Assertion {
    /// Parses a single output line, returning `None` if it is not a message line.
    pub fn parse(line: &str) -> Option<Self> {
        let (location, rest) = line.trim().split_once(":@")?;

        let mut loc = location.rsplitn(3, ':');
        let column = loc.next()?.parse().ok()?;
        let line_no = loc.next()?.parse().ok()?;
        let file = loc.next()?.to_string();

        let (time, rest) = rest.split_once(":(")?;
        let (tag, message) = rest.split_once(')')?;
        let message = message.strip_prefix(':').unwrap_or(message).trim().to_string();

        let (kind, severity) = tag.split_once(' ')?;
        let kind = match kind {
            "assertion" => MessageKind::Assertion,
            "report" => MessageKind::Report,
            _ => return None,
        };
        let severity = Severity::parse(severity.trim())?;

        Some(Self {
            file,
            line: line_no,
            column,
            time: time.to_string(),
            kind,
            severity,
            message,
        })
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} @{} [{}] {}",
            self.file, self.line, self.column, self.time, self.severity, self.message
        )
    }
}

/// Outcome of running an elaborated test bench.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub code: Option<i32>,
    pub assertions: Vec<Assertion>,
    pub stdout: String,
    pub stderr: String,
    /// Wall-clock time of the run invocation.
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn from_output(output: &ToolOutput) -> Self {
        debug_assert_eq!(output.stage, ToolStage::Run);
        let assertions = output
            .stdout
            .lines()
            .chain(output.stderr.lines())
            .filter_map(Assertion::parse)
            .collect();

        Self {
            code: output.code,
            assertions,
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            elapsed: output.elapsed,
        }
    }

    /// Messages of severity `error` or worse.
    pub fn errors(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions
            .iter()
            .filter(|a| a.severity >= Severity::Error)
    }

    /// The run exited cleanly and raised nothing of severity `error` or worse.
    pub fn passed(&self) -> bool {
        self.code == Some(0) && self.errors().next().is_none()
    }
}
