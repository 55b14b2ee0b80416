//! Application process launching

use crate::core::{Environment, SetupError};
use crate::runner::CommandRunner;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Starts the application server in the foreground
///
/// The entry point must exist before anything is spawned. The child runs
/// until it exits on its own or the operator interrupts, and its exit
/// status becomes the caller's exit status. No timeout is imposed.
pub struct ProcessLauncher<R> {
    runner: Arc<R>,
}

impl<R: CommandRunner> ProcessLauncher<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Launch the entry point with the environment's interpreter
    pub async fn launch(
        &self,
        env: &Environment,
        root: &Path,
        entry_point: &Path,
    ) -> Result<i32, SetupError> {
        if !entry_point.is_file() {
            return Err(SetupError::EntryPointNotFound(entry_point.to_path_buf()));
        }

        let python = env.python_path().to_string_lossy().into_owned();
        let entry = entry_point.to_string_lossy().into_owned();
        info!("Launching {} with {}", entry, python);

        let code = self
            .runner
            .run_interactive(&python, &[entry.as_str()], root)
            .await?;
        Ok(code)
    }
}
