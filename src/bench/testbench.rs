//! Test Bench Descriptor.
//!
//! A [`Testbench`] names a working directory, the components it analyzes, and
//! the top-level harness it elaborates. The harness either already exists on
//! disk or is held in memory and materialized just before compiling; both
//! variants share one compile and one clean sequence, with the generated
//! variant hooking in a write before compiling and a delete before cleaning.

use crate::common::constants::{CLEAN_PATTERNS, ELABORATION_PREFIX, OBJECT_EXT};
use crate::common::{BenchError, BenchResult, Pattern, ToolStage};
use crate::config::BenchConfig;
use crate::sim::{SimulationReport, Simulator};
use crate::stats::CycleStats;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the test bench source comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestbenchSource {
    /// `<name>.<ext>` already exists in the working directory.
    OnDisk,
    /// Written verbatim to `<name>.<ext>` before compiling, removed on clean.
    Generated(String),
}

/// Lifecycle position of a descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    Compiled,
    Cleaned,
}

/// One test bench and the working directory that holds its sources and artifacts.
#[derive(Clone, Debug)]
pub struct Testbench {
    working_dir: PathBuf,
    components: Vec<String>,
    name: String,
    extension: String,
    source: TestbenchSource,
    stage: Stage,
    stats: CycleStats,
}

impl Testbench {
    /// Creates a descriptor for a test bench whose source is already on disk.
    pub fn new<P, I, S>(working_dir: P, components: I, name: &str, extension: &str) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            working_dir: working_dir.into(),
            components: components.into_iter().map(Into::into).collect(),
            name: name.to_string(),
            extension: extension.to_string(),
            source: TestbenchSource::OnDisk,
            stage: Stage::Uninitialized,
            stats: CycleStats::default(),
        }
    }

    /// Creates a descriptor whose test bench source is `source`, written out on compile.
    pub fn generated<P, I, S>(
        working_dir: P,
        components: I,
        name: &str,
        extension: &str,
        source: impl Into<String>,
    ) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: TestbenchSource::Generated(source.into()),
            ..Self::new(working_dir, components, name, extension)
        }
    }

    /// Builds a descriptor from a configuration entry.
    ///
    /// Relative paths are resolved against `base`. When the entry names a
    /// `source` file, its contents become a generated test bench.
    pub fn from_config(config: &BenchConfig, base: &Path) -> BenchResult<Self> {
        let working_dir = base.join(&config.working_dir);
        let components = config.components.iter().cloned();

        match &config.source {
            None => Ok(Self::new(working_dir, components, &config.testbench, &config.extension)),
            Some(source) => {
                let source = base.join(source);
                let bench = Self::generated(
                    working_dir,
                    components,
                    &config.testbench,
                    &config.extension,
                    String::new(),
                );
                bench.with_source_file(&source)
            }
        }
    }

    /// Replaces the source with the contents of `path`.
    ///
    /// Refuses a file that is the very file the descriptor would overwrite
    /// on compile and delete on clean.
    pub fn with_source_file(mut self, path: &Path) -> BenchResult<Self> {
        let target = self.testbench_file();
        if target.exists() && fs::canonicalize(path)? == fs::canonicalize(&target)? {
            return Err(BenchError::SourceCollision(target));
        }
        self.source = TestbenchSource::Generated(fs::read_to_string(path)?);
        Ok(self)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn source(&self) -> &TestbenchSource {
        &self.source
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.source, TestbenchSource::Generated(_))
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Component source file names in declaration order.
    pub fn component_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.components
            .iter()
            .map(move |c| format!("{}.{}", c, self.extension))
    }

    /// Test bench source file name, relative to the working directory.
    pub fn testbench_path(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    fn testbench_file(&self) -> PathBuf {
        self.working_dir.join(self.testbench_path())
    }

    /// Files the simulator is expected to leave behind after a successful
    /// compile. The design-library cache is left out since its name depends
    /// on the VHDL standard in use.
    pub fn expected_artifacts(&self) -> Vec<String> {
        let mut artifacts: Vec<String> = self
            .components
            .iter()
            .map(|c| format!("{}.{}", c, OBJECT_EXT))
            .collect();
        artifacts.push(format!("{}.{}", self.name, OBJECT_EXT));
        artifacts.push(self.name.clone());
        artifacts.push(format!("{}{}.{}", ELABORATION_PREFIX, self.name, OBJECT_EXT));
        artifacts
    }

    /// Analyzes every component followed by the test bench, then elaborates
    /// the test bench. A generated source is written out first.
    ///
    /// The first failing step aborts the sequence and its error is returned.
    pub fn compile(&mut self, sim: &Simulator) -> BenchResult<()> {
        if self.stage == Stage::Compiled {
            log::warn!("{}: compiling again without an intervening clean", self.name);
        }
        log::info!("{}: compiling in {}", self.name, self.working_dir.display());

        self.materialize()?;

        let mut sources: Vec<String> = self.component_paths().collect();
        sources.push(self.testbench_path());

        let analyzed = sim.analyze(&self.working_dir, &sources)?;
        self.stats.record(ToolStage::Analyze, analyzed.elapsed);
        self.stats.sources_analyzed += sources.len() as u64;

        let elaborated = sim.elaborate(&self.working_dir, &self.name)?;
        self.stats.record(ToolStage::Elaborate, elaborated.elapsed);

        self.stage = Stage::Compiled;
        Ok(())
    }

    /// Runs the elaborated test bench through the simulator.
    pub fn run(&mut self, sim: &Simulator, sim_args: &[String]) -> BenchResult<SimulationReport> {
        log::info!("{}: running", self.name);
        let report = sim.run(&self.working_dir, &self.name, sim_args)?;
        self.stats.record(ToolStage::Run, report.elapsed);

        for assertion in report.errors() {
            log::warn!("{}: {}", self.name, assertion);
        }
        Ok(report)
    }

    /// Removes a generated source, every `*.o` and `*.cf` file in the working
    /// directory, and the executable named after the test bench.
    ///
    /// A missing executable is an error, so cleaning a directory that was
    /// never compiled fails after removing whatever the patterns matched.
    pub fn clean(&mut self) -> BenchResult<()> {
        log::info!("{}: cleaning {}", self.name, self.working_dir.display());

        self.dematerialize()?;

        for pattern in CLEAN_PATTERNS {
            for path in Pattern::new(pattern).matching_files(&self.working_dir)? {
                log::debug!("removing {}", path.display());
                fs::remove_file(&path)?;
                self.stats.files_removed += 1;
            }
        }

        let executable = self.working_dir.join(&self.name);
        log::debug!("removing {}", executable.display());
        fs::remove_file(&executable)?;
        self.stats.files_removed += 1;

        self.stage = Stage::Cleaned;
        Ok(())
    }

    fn materialize(&mut self) -> BenchResult<()> {
        if let TestbenchSource::Generated(text) = &self.source {
            let path = self.testbench_file();
            log::debug!("writing {} ({} bytes)", path.display(), text.len());
            fs::write(&path, text)?;
            self.stats.sources_written += 1;
        }
        Ok(())
    }

    fn dematerialize(&mut self) -> BenchResult<()> {
        if self.is_generated() {
            let path = self.testbench_file();
            log::debug!("removing {}", path.display());
            fs::remove_file(&path)?;
            self.stats.files_removed += 1;
        }
        Ok(())
    }
}
