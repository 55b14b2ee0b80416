//! Setup error taxonomy

use crate::runner::RunnerError;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for setup operations
///
/// Every variant carries enough context to print a one-line remediation
/// message; fatal errors halt the pipeline immediately.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Python runtime not found: {0}. Install Python 3 and make sure it is on PATH")]
    RuntimeNotFound(String),

    #[error("Failed to create virtual environment: {0}")]
    Provisioning(String),

    #[error("Virtual environment exists but cannot be activated: {0}. Delete the venv directory and re-run setup")]
    Activation(String),

    #[error("Dependency manifest not found at {0}. Create a requirements file or pass --manifest")]
    MissingManifest(PathBuf),

    #[error("Dependency installation failed: {0}")]
    Install(String),

    #[error("Application entry point not found at {0}. Make sure the application files are in place")]
    EntryPointNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

impl SetupError {
    /// Short machine-friendly label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            SetupError::RuntimeNotFound(_) => "runtime-not-found",
            SetupError::Provisioning(_) => "provisioning",
            SetupError::Activation(_) => "activation",
            SetupError::MissingManifest(_) => "missing-manifest",
            SetupError::Install(_) => "install",
            SetupError::EntryPointNotFound(_) => "entry-point-not-found",
            SetupError::Config(_) => "config",
            SetupError::Runner(_) => "runner",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_contain_remediation() {
        let err = SetupError::RuntimeNotFound("python3: command not found".to_string());
        assert!(err.to_string().contains("Install Python 3"));

        let err = SetupError::MissingManifest(PathBuf::from("requirements.txt"));
        assert!(err.to_string().contains("requirements.txt"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SetupError::Activation("missing script".to_string()).kind(),
            "activation"
        );
        assert_eq!(
            SetupError::EntryPointNotFound(PathBuf::from("app.py")).kind(),
            "entry-point-not-found"
        );
    }
}
