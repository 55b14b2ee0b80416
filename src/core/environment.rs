//! Virtual environment domain model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lifecycle state of the virtual environment
///
/// Moves only forward within one invocation: Absent → Created → Activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvState {
    /// No environment directory exists
    Absent,
    /// Directory exists (freshly created or detected from a prior run)
    Created,
    /// Environment resolved and its interpreter usable for later steps
    Activated,
}

/// A project-local virtual environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Absolute path to the environment directory
    pub root: PathBuf,

    /// Current lifecycle state
    pub state: EnvState,
}

impl Environment {
    /// Describe the environment at the canonical path under the project root
    pub fn at(project_root: &Path, venv_dir: &str) -> Self {
        let root = project_root.join(venv_dir);
        let state = if root.is_dir() {
            EnvState::Created
        } else {
            EnvState::Absent
        };
        Self { root, state }
    }

    /// Path to the interpreter inside the environment
    #[cfg(not(windows))]
    pub fn python_path(&self) -> PathBuf {
        self.root.join("bin").join("python")
    }

    /// Path to the interpreter inside the environment
    #[cfg(windows)]
    pub fn python_path(&self) -> PathBuf {
        self.root.join("Scripts").join("python.exe")
    }

    /// Path to the activation script
    #[cfg(not(windows))]
    pub fn activate_path(&self) -> PathBuf {
        self.root.join("bin").join("activate")
    }

    /// Path to the activation script
    #[cfg(windows)]
    pub fn activate_path(&self) -> PathBuf {
        self.root.join("Scripts").join("activate.bat")
    }

    /// Check whether the pieces needed for activation are on disk
    pub fn is_activatable(&self) -> bool {
        self.activate_path().is_file() && self.python_path().is_file()
    }

    /// Mark the environment as created
    pub fn mark_created(&mut self) {
        if self.state == EnvState::Absent {
            self.state = EnvState::Created;
        }
    }

    /// Mark the environment as activated
    pub fn mark_activated(&mut self) {
        self.state = EnvState::Activated;
    }
}
