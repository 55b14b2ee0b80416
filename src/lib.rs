//! estsetup - bootstrap and launch tooling for the Plumbing Estimator app

pub mod cli;
pub mod core;
pub mod runner;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    EnvState, Environment, FileManifest, ManifestEntry, SetupConfig, SetupError, SetupReport,
    SetupState, Severity, StepName,
};
pub use crate::runner::{CommandRunner, RunOutput, RunnerError, SystemRunner};
pub use crate::setup::{PipelineMode, SetupEngine, SetupEvent};
