//! Runtime detection - confirms a usable Python interpreter

use crate::core::SetupError;
use crate::runner::CommandRunner;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Resolved runtime information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// The interpreter command that answered the probe
    pub executable: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RuntimeInfo {
    /// Display form, e.g. `Python 3.11.4`
    pub fn version_string(&self) -> String {
        format!("Python {}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Probes the configured interpreter with `--version`
///
/// A missing executable, non-zero exit, or unparseable response is
/// `RuntimeNotFound`; there are no retries since a missing runtime is
/// not transient. The probe is read-only - nothing on disk is touched.
pub struct RuntimeDetector<R> {
    runner: Arc<R>,
    interpreter: String,
}

impl<R: CommandRunner> RuntimeDetector<R> {
    pub fn new(runner: Arc<R>, interpreter: impl Into<String>) -> Self {
        Self {
            runner,
            interpreter: interpreter.into(),
        }
    }

    /// Detect the runtime, returning its version info
    pub async fn detect(&self, cwd: &Path) -> Result<RuntimeInfo, SetupError> {
        let output = self
            .runner
            .run(&self.interpreter, &["--version"], cwd)
            .await
            .map_err(|e| SetupError::RuntimeNotFound(e.to_string()))?;

        if !output.success() {
            return Err(SetupError::RuntimeNotFound(format!(
                "'{} --version' exited with code {}",
                self.interpreter, output.code
            )));
        }

        // Some interpreters print the version to stderr
        let text = if output.stdout.trim().is_empty() {
            output.stderr.clone()
        } else {
            output.stdout.clone()
        };

        let info = parse_version(&self.interpreter, &text).ok_or_else(|| {
            SetupError::RuntimeNotFound(format!(
                "could not parse version from '{}'",
                text.trim()
            ))
        })?;

        debug!("Detected {} via {}", info.version_string(), info.executable);
        Ok(info)
    }
}

fn parse_version(executable: &str, text: &str) -> Option<RuntimeInfo> {
    let re = Regex::new(r"Python\s+(\d+)\.(\d+)(?:\.(\d+))?").ok()?;
    let caps = re.captures(text)?;
    Some(RuntimeInfo {
        executable: executable.to_string(),
        major: caps[1].parse().ok()?,
        minor: caps[2].parse().ok()?,
        patch: caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0),
    })
}
