//! Setup configuration from YAML

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default admin login seeded by the external application
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Top-level setup configuration, loadable from `setup.yaml`
///
/// Every path is interpreted relative to the explicit project root; no
/// component reads the ambient working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Project root directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Interpreter used to probe the runtime and create the environment
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Virtual environment directory name under the project root
    #[serde(default = "default_venv_dir")]
    pub venv_dir: String,

    /// Dependency manifest path, relative to root
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Application entry point, relative to root
    #[serde(default = "default_entry_point")]
    pub entry_point: PathBuf,

    /// Port the launched application is expected to bind (convention only)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional required-files manifest path, relative to root
    #[serde(default)]
    pub files_manifest: Option<PathBuf>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_interpreter() -> String {
    if cfg!(windows) {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

fn default_venv_dir() -> String {
    "venv".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_entry_point() -> PathBuf {
    PathBuf::from("app.py")
}

fn default_port() -> u16 {
    5000
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            interpreter: default_interpreter(),
            venv_dir: default_venv_dir(),
            manifest: default_manifest(),
            entry_point: default_entry_point(),
            port: default_port(),
            files_manifest: None,
        }
    }
}

impl SetupConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SetupConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `setup.yaml` from the given root if present, defaults otherwise
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let candidate = root.join("setup.yaml");
        let mut config = if candidate.is_file() {
            Self::from_file(&candidate)?
        } else {
            Self::default()
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            anyhow::bail!("Interpreter command must not be empty");
        }
        if self.venv_dir.trim().is_empty() || self.venv_dir.contains(&['/', '\\'][..]) {
            anyhow::bail!(
                "venv_dir must be a plain directory name, got '{}'",
                self.venv_dir
            );
        }
        Ok(())
    }

    /// Absolute path of the dependency manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    /// Absolute path of the application entry point
    pub fn entry_point_path(&self) -> PathBuf {
        self.root.join(&self.entry_point)
    }
}
