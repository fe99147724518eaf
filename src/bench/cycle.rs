//! Full compile, verify, run and clean round trip for one test bench.

use crate::bench::listing::DirListing;
use crate::bench::testbench::Testbench;
use crate::common::{BenchError, BenchResult};
use crate::sim::{SimulationReport, Simulator};
use serde::Serialize;

#[derive(Clone, Debug, Default)]
pub struct CycleOptions {
    /// Run the elaborated test bench between compile and clean.
    pub run: bool,
    /// Arguments passed to the simulation when running.
    pub sim_args: Vec<String>,
}

/// Directory snapshots and results collected over one cycle.
#[derive(Clone, Debug, Serialize)]
pub struct CycleReport {
    pub bench: String,
    pub before: DirListing,
    pub compiled: DirListing,
    pub after: DirListing,
    pub simulation: Option<SimulationReport>,
}

impl CycleReport {
    /// Files produced by compiling.
    pub fn produced(&self) -> Vec<String> {
        self.compiled.added_since(&self.before)
    }

    /// Clean left the directory exactly as it was before compiling.
    pub fn restored(&self) -> bool {
        self.after == self.before
    }

    /// Entries that survived clean.
    pub fn leftovers(&self) -> Vec<String> {
        self.after.added_since(&self.before)
    }
}

/// Compiles `bench`, checks the expected artifacts exist, optionally runs it,
/// then cleans and snapshots the directory again.
///
/// The artifact check is a superset test: simulators add files of their own
/// (the library cache name varies with the VHDL standard). When artifacts
/// are missing, or the run cannot be started, clean is still attempted
/// before the error is returned.
pub fn run_cycle(bench: &mut Testbench, sim: &Simulator, options: &CycleOptions) -> BenchResult<CycleReport> {
    let before = DirListing::capture(bench.working_dir())?;

    bench.compile(sim)?;
    let compiled = DirListing::capture(bench.working_dir())?;

    let missing = compiled.missing(&bench.expected_artifacts());
    if !missing.is_empty() {
        if let Err(e) = bench.clean() {
            log::warn!("{}: clean after incomplete compile failed: {}", bench.name(), e);
        }
        return Err(BenchError::MissingArtifacts(missing));
    }

    let simulation = if options.run {
        match bench.run(sim, &options.sim_args) {
            Ok(report) => Some(report),
            Err(e) => {
                if let Err(clean_err) = bench.clean() {
                    log::warn!("{}: clean after failed run failed: {}", bench.name(), clean_err);
                }
                return Err(e);
            }
        }
    } else {
        None
    };

    bench.clean()?;
    let after = DirListing::capture(bench.working_dir())?;

    let report = CycleReport {
        bench: bench.name().to_string(),
        before,
        compiled,
        after,
        simulation,
    };
    if !report.restored() {
        log::warn!(
            "{}: directory not restored after clean, left over: {:?}",
            report.bench,
            report.leftovers()
        );
    }
    Ok(report)
}
