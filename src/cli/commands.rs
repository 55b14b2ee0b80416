//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Run the full setup pipeline
#[derive(Debug, Args, Clone)]
pub struct InstallCommand {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Dependency manifest, relative to the project root
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Required-files manifest (YAML), relative to the project root
    #[arg(short, long)]
    pub files: Option<PathBuf>,

    /// Launch the application once setup finishes
    #[arg(long, conflicts_with = "no_launch")]
    pub launch: bool,

    /// Skip the launch prompt and exit after setup
    #[arg(long)]
    pub no_launch: bool,
}

impl InstallCommand {
    /// Resolve the launch decision from the flags, when one was given
    ///
    /// None means neither flag was passed and the caller should ask the
    /// operator interactively.
    pub fn launch_decision(&self) -> Option<bool> {
        if self.launch {
            Some(true)
        } else if self.no_launch {
            Some(false)
        } else {
            None
        }
    }
}

/// Launch a previously-provisioned application
#[derive(Debug, Args, Clone)]
pub struct LaunchCommand {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

/// Check the required project file layout
#[derive(Debug, Args, Clone)]
pub struct VerifyCommand {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Required-files manifest (YAML), relative to the project root
    #[arg(short, long)]
    pub files: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
