//! Core domain models

pub mod config;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod step;

pub use config::SetupConfig;
pub use environment::{EnvState, Environment};
pub use error::SetupError;
pub use manifest::{FileManifest, ManifestEntry};
pub use step::{SetupReport, SetupState, Severity, StepName, StepOutcome};
