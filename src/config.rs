use crate::common::constants::{DEFAULT_EXTENSION, DEFAULT_SIMULATOR, SIMULATOR_ENV};
use crate::common::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration file.
///
/// ```toml
/// [simulator]
/// program = "ghdl"
/// std = "08"
///
/// [[bench]]
/// working_dir = "demos/full-adder"
/// components = ["adder"]
/// testbench = "adder_tb"
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub simulator: SimulatorConfig,

    #[serde(default, rename = "bench")]
    pub benches: Vec<BenchConfig>,
}

impl Config {
    /// Reads and parses a configuration file, then applies environment overrides.
    pub fn from_file(path: &Path) -> BenchResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parses configuration text without consulting the environment.
    pub fn parse(content: &str) -> BenchResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces the simulator program with `$GHDL` when it is set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(program) = std::env::var(SIMULATOR_ENV) {
            if !program.is_empty() {
                log::debug!("{} overrides simulator program: {}", SIMULATOR_ENV, program);
                self.simulator.program = program;
            }
        }
    }

    /// Looks up a bench by its label.
    pub fn bench(&self, name: &str) -> BenchResult<&BenchConfig> {
        self.benches
            .iter()
            .find(|b| b.label() == name)
            .ok_or_else(|| BenchError::UnknownBench(name.to_string()))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulatorConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// VHDL standard revision passed as `--std=<std>`.
    #[serde(default)]
    pub std: Option<String>,

    #[serde(default)]
    pub analyze_args: Vec<String>,

    #[serde(default)]
    pub elaborate_args: Vec<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            std: None,
            analyze_args: Vec::new(),
            elaborate_args: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BenchConfig {
    #[serde(default)]
    pub name: Option<String>,

    pub working_dir: PathBuf,

    #[serde(default)]
    pub components: Vec<String>,

    pub testbench: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// File whose contents become a generated test bench.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl BenchConfig {
    /// Label used to select the bench; falls back to the test bench name.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.testbench)
    }
}

fn default_program() -> String {
    DEFAULT_SIMULATOR.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}
