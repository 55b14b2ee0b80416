//! Virtual environment provisioning and activation

use crate::core::{EnvState, Environment, SetupError};
use crate::runner::CommandRunner;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Creates and activates the project-local virtual environment
///
/// Creation is idempotent: an existing directory is detected and reused,
/// never recreated. Activation failure is reported distinctly from
/// creation failure - a created-but-unusable environment (activation
/// script or interpreter missing) is an `Activation` error.
pub struct EnvironmentProvisioner<R> {
    runner: Arc<R>,
    interpreter: String,
    venv_dir: String,
}

impl<R: CommandRunner> EnvironmentProvisioner<R> {
    pub fn new(runner: Arc<R>, interpreter: impl Into<String>, venv_dir: impl Into<String>) -> Self {
        Self {
            runner,
            interpreter: interpreter.into(),
            venv_dir: venv_dir.into(),
        }
    }

    /// Provision the environment under the given project root
    ///
    /// On success the returned environment is `Activated` and its
    /// interpreter path is valid for later steps.
    pub async fn provision(&self, root: &Path) -> Result<Environment, SetupError> {
        let mut env = Environment::at(root, &self.venv_dir);

        match env.state {
            EnvState::Created => {
                debug!("Environment already present at {}", env.root.display());
            }
            EnvState::Absent => {
                info!("Creating virtual environment at {}", env.root.display());
                let output = self
                    .runner
                    .run(&self.interpreter, &["-m", "venv", &self.venv_dir], root)
                    .await
                    .map_err(|e| SetupError::Provisioning(e.to_string()))?;

                if !output.success() {
                    return Err(SetupError::Provisioning(format!(
                        "'{} -m venv' exited with code {}: {}",
                        self.interpreter,
                        output.code,
                        output.stderr.trim()
                    )));
                }
                env.mark_created();
            }
            EnvState::Activated => {}
        }

        self.activate(&mut env)?;
        Ok(env)
    }

    /// Activate an existing environment without creating anything
    ///
    /// This is the launcher's reduced path: the environment must already
    /// be on disk, and a missing one is fatal.
    pub fn activate_existing(&self, root: &Path) -> Result<Environment, SetupError> {
        let mut env = Environment::at(root, &self.venv_dir);
        if env.state == EnvState::Absent {
            return Err(SetupError::Activation(format!(
                "no virtual environment at {}; run the installer first",
                env.root.display()
            )));
        }
        self.activate(&mut env)?;
        Ok(env)
    }

    fn activate(&self, env: &mut Environment) -> Result<(), SetupError> {
        if !env.is_activatable() {
            return Err(SetupError::Activation(format!(
                "activation script missing at {}",
                env.activate_path().display()
            )));
        }
        env.mark_activated();
        debug!("Environment activated, interpreter {}", env.python_path().display());
        Ok(())
    }
}
