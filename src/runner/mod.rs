//! Subprocess seam for the setup pipeline

pub mod system;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub use system::SystemRunner;

/// Error types for subprocess invocations
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal runner error: {0}")]
    Internal(String),
}

/// Captured result of a finished subprocess
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Exit code (-1 when terminated by signal)
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Build a successful output with the given stdout (handy in tests)
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Build a failed output with the given code and stderr
    pub fn err(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running external commands - allows injecting fakes in tests
///
/// All pipeline subprocess work (runtime probe, venv creation, pip install,
/// application launch) goes through this seam.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion, capturing stdout and stderr
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput, RunnerError>;

    /// Run a command in the foreground with inherited stdio, blocking until
    /// it exits or the operator interrupts; returns the exit code
    async fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<i32, RunnerError>;
}
