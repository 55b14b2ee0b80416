//! The ordered setup pipeline components

pub mod detector;
pub mod engine;
pub mod install;
pub mod launch;
pub mod provision;
pub mod verify;

pub use detector::{RuntimeDetector, RuntimeInfo};
pub use engine::{PipelineMode, SetupEngine, SetupEvent};
pub use install::{DependencyInstaller, InstallReport};
pub use launch::ProcessLauncher;
pub use provision::EnvironmentProvisioner;
pub use verify::{StructureVerifier, VerificationReport};
