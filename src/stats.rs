//! Test bench lifecycle statistics.
//!
//! Tracks wall-clock time spent in each simulator stage and the number of
//! files the lifecycle touched.

use crate::common::ToolStage;
use std::time::Duration;

/// Counters collected over one compile/run/clean cycle of a test bench.
#[derive(Clone, Debug, Default)]
pub struct CycleStats {
    pub analyze_time: Duration,
    pub elaborate_time: Duration,
    pub run_time: Duration,

    pub analyze_invocations: u64,
    pub elaborate_invocations: u64,
    pub run_invocations: u64,

    /// Source files passed to the analyze step.
    pub sources_analyzed: u64,
    /// Generated test bench sources written to disk.
    pub sources_written: u64,
    /// Files deleted by clean, including a generated source.
    pub files_removed: u64,
}

impl CycleStats {
    /// Adds one invocation of `stage` that took `elapsed`.
    pub fn record(&mut self, stage: ToolStage, elapsed: Duration) {
        match stage {
            ToolStage::Analyze => {
                self.analyze_time += elapsed;
                self.analyze_invocations += 1;
            }
            ToolStage::Elaborate => {
                self.elaborate_time += elapsed;
                self.elaborate_invocations += 1;
            }
            ToolStage::Run => {
                self.run_time += elapsed;
                self.run_invocations += 1;
            }
        }
    }

    pub fn total_time(&self) -> Duration {
        self.analyze_time + self.elaborate_time + self.run_time
    }

    /// Prints a formatted summary for the command-line tool.
    pub fn print(&self) {
        println!("----------------------------------------------------------");
        println!("TESTBENCH STATISTICS");
        println!("----------------------------------------------------------");
        println!(
            "  analyze                {:.4} s ({} calls, {} sources)",
            self.analyze_time.as_secs_f64(),
            self.analyze_invocations,
            self.sources_analyzed
        );
        println!(
            "  elaborate              {:.4} s ({} calls)",
            self.elaborate_time.as_secs_f64(),
            self.elaborate_invocations
        );
        println!(
            "  run                    {:.4} s ({} calls)",
            self.run_time.as_secs_f64(),
            self.run_invocations
        );
        println!("  sources.written        {}", self.sources_written);
        println!("  files.removed          {}", self.files_removed);
        println!("  total                  {:.4} s", self.total_time().as_secs_f64());
        println!("----------------------------------------------------------");
    }
}
