//! Error types for test bench lifecycle operations.

use crate::common::data::ToolStage;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while compiling, running or cleaning a test bench.
///
/// Filesystem and subprocess failures are surfaced as they are; nothing is
/// retried or translated beyond attaching the failing stage.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Simulator not found: {0}")]
    ToolNotFound(String),

    #[error("Simulator {stage} step failed ({}): {stderr}", exit_description(.code))]
    ToolFailed {
        stage: ToolStage,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Expected artifacts missing after compile: {}", .0.join(", "))]
    MissingArtifacts(Vec<String>),

    #[error("Generated test bench would overwrite its own source file: {}", .0.display())]
    SourceCollision(PathBuf),

    #[error("No bench named '{0}' in configuration")]
    UnknownBench(String),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type for test bench operations.
pub type BenchResult<T> = Result<T, BenchError>;
