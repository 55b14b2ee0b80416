//! Dependency installation from the requirements manifest

use crate::core::manifest::parse_requirements;
use crate::core::{Environment, SetupError};
use crate::runner::CommandRunner;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Result of a completed install step
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Number of entries declared in the manifest
    pub entry_count: usize,

    /// Captured installer stdout
    pub output: String,
}

/// Bulk-installs manifest entries into the active environment
///
/// One pip invocation covers the whole manifest; partial installs are not
/// modeled, so the step is atomic from the pipeline's perspective.
pub struct DependencyInstaller<R> {
    runner: Arc<R>,
}

impl<R: CommandRunner> DependencyInstaller<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Install everything the manifest declares
    pub async fn install(
        &self,
        env: &Environment,
        root: &Path,
        manifest_path: &Path,
    ) -> Result<InstallReport, SetupError> {
        if !manifest_path.is_file() {
            return Err(SetupError::MissingManifest(manifest_path.to_path_buf()));
        }

        let content = std::fs::read_to_string(manifest_path)
            .map_err(|e| SetupError::Install(format!("cannot read manifest: {}", e)))?;
        let entries = parse_requirements(&content);
        info!(
            "Installing {} dependencies from {}",
            entries.len(),
            manifest_path.display()
        );

        let python = env.python_path().to_string_lossy().into_owned();
        let manifest = manifest_path.to_string_lossy().into_owned();
        let output = self
            .runner
            .run(
                &python,
                &["-m", "pip", "install", "-r", manifest.as_str()],
                root,
            )
            .await
            .map_err(|e| SetupError::Install(e.to_string()))?;

        if !output.success() {
            return Err(SetupError::Install(format!(
                "pip exited with code {}: {}",
                output.code,
                output.stderr.trim()
            )));
        }

        Ok(InstallReport {
            entry_count: entries.len(),
            output: output.stdout,
        })
    }
}
