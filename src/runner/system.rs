//! Production command runner backed by tokio subprocesses

use crate::runner::{CommandRunner, RunOutput, RunnerError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands on the host system
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput, RunnerError> {
        debug!("Running: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RunnerError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        // Tool output (pip build logs especially) is not guaranteed to be
        // valid UTF-8; decode both streams lossily
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code().unwrap_or(-1);

        if code != 0 {
            warn!("{} exited with code {}: {}", program, code, stderr.trim());
        }

        Ok(RunOutput {
            code,
            stdout,
            stderr,
        })
    }

    async fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<i32, RunnerError> {
        debug!("Spawning foreground process: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunnerError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        // Block until the child exits or the operator hits Ctrl-C. On
        // interrupt the child is killed and its status collected so the
        // exit code can still be propagated.
        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| {
                    RunnerError::Internal(format!("Failed waiting for {}: {}", program, e))
                })?;
                Ok(status.code().unwrap_or(-1))
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupt received, stopping {}", program);
                let _ = child.kill().await;
                let status = child.wait().await.map_err(|e| {
                    RunnerError::Internal(format!("Failed collecting {} after interrupt: {}", program, e))
                })?;
                Ok(status.code().unwrap_or(-1))
            }
        }
    }
}
