//! Setup engine - orchestrates the ordered pipeline

use crate::core::{
    EnvState, Environment, FileManifest, SetupConfig, SetupError, SetupReport, SetupState,
    Severity, StepName,
};
use crate::runner::CommandRunner;
use crate::setup::{
    DependencyInstaller, EnvironmentProvisioner, ProcessLauncher, RuntimeDetector,
    StructureVerifier,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use uuid::Uuid;

/// Which pipeline a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Runtime check, provision, install, verify, optional launch
    FullSetup,
    /// Activation check plus launch only
    Launcher,
}

/// Events emitted during a pipeline run
#[derive(Debug, Clone)]
pub enum SetupEvent {
    PipelineStarted {
        run_id: Uuid,
        mode: PipelineMode,
    },
    StepStarted {
        step: StepName,
    },
    StepSucceeded {
        step: StepName,
        message: String,
    },
    StepWarned {
        step: StepName,
        message: String,
        missing: Vec<PathBuf>,
    },
    StepFailed {
        step: StepName,
        error: String,
    },
    PipelineCompleted {
        run_id: Uuid,
        state: SetupState,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(SetupEvent) + Send + Sync>;

/// Orchestrates the setup steps in their fixed order
///
/// Execution is strictly sequential; every subprocess call completes
/// before the next step starts. A fatal outcome halts the run immediately
/// with no rollback of already-mutated state.
pub struct SetupEngine<R> {
    config: SetupConfig,
    runner: Arc<R>,
    event_handlers: Mutex<Vec<EventHandler>>,
}

impl<R: CommandRunner> SetupEngine<R> {
    pub fn new(config: SetupConfig, runner: Arc<R>) -> Self {
        Self {
            config,
            runner,
            event_handlers: Mutex::new(Vec::new()),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(SetupEvent) + Send + Sync + 'static,
    {
        if let Ok(mut handlers) = self.event_handlers.lock() {
            handlers.push(Arc::new(handler));
        }
    }

    fn emit(&self, event: SetupEvent) {
        if let Ok(handlers) = self.event_handlers.lock() {
            for handler in handlers.iter() {
                handler(event.clone());
            }
        }
    }

    /// Resolve the required-files manifest: explicit file, or built-in set
    fn load_file_manifest(&self) -> Result<FileManifest, SetupError> {
        match &self.config.files_manifest {
            Some(rel) => FileManifest::from_file(self.config.root.join(rel))
                .map_err(|e| SetupError::Config(format!("bad required-files manifest: {}", e))),
            None => Ok(FileManifest::default_layout()),
        }
    }

    fn record_fatal(&self, report: &mut SetupReport, step: StepName, err: &SetupError) {
        error!("{} failed: {}", step.title(), err);
        report.record(step, Severity::Fatal, err.to_string());
        report.fail();
        self.emit(SetupEvent::StepFailed {
            step,
            error: err.to_string(),
        });
    }

    fn complete(&self, report: &SetupReport) {
        self.emit(SetupEvent::PipelineCompleted {
            run_id: report.run_id,
            state: report.state,
        });
    }

    /// Run the full setup pipeline
    ///
    /// `launch_after` decides whether the application is started once
    /// setup finishes; the decision is made by the caller, never here.
    pub async fn run_full(&self, launch_after: bool) -> SetupReport {
        let mut report = SetupReport::new();
        info!("Starting full setup (run {})", report.run_id);
        self.emit(SetupEvent::PipelineStarted {
            run_id: report.run_id,
            mode: PipelineMode::FullSetup,
        });

        // Step 1: runtime check. Runs before any filesystem mutation.
        self.emit(SetupEvent::StepStarted {
            step: StepName::RuntimeCheck,
        });
        let detector = RuntimeDetector::new(self.runner.clone(), self.config.interpreter.clone());
        let runtime = match detector.detect(&self.config.root).await {
            Ok(info) => info,
            Err(e) => {
                self.record_fatal(&mut report, StepName::RuntimeCheck, &e);
                self.complete(&report);
                return report;
            }
        };
        report.advance(SetupState::RuntimeChecked);
        self.step_succeeded(
            &mut report,
            StepName::RuntimeCheck,
            format!("{} found", runtime.version_string()),
        );

        // Step 2: provision. Existing environments are reused, not recreated.
        self.emit(SetupEvent::StepStarted {
            step: StepName::Provision,
        });
        let preexisting =
            Environment::at(&self.config.root, &self.config.venv_dir).state == EnvState::Created;
        let provisioner = EnvironmentProvisioner::new(
            self.runner.clone(),
            self.config.interpreter.clone(),
            self.config.venv_dir.clone(),
        );
        let env = match provisioner.provision(&self.config.root).await {
            Ok(env) => env,
            Err(e) => {
                self.record_fatal(&mut report, StepName::Provision, &e);
                self.complete(&report);
                return report;
            }
        };
        report.advance(SetupState::EnvProvisioned);
        let message = if preexisting {
            "Existing virtual environment activated".to_string()
        } else {
            format!("Virtual environment created at {}", env.root.display())
        };
        self.step_succeeded(&mut report, StepName::Provision, message);

        // Step 3: install. One bulk pip run for the whole manifest.
        self.emit(SetupEvent::StepStarted {
            step: StepName::Install,
        });
        let installer = DependencyInstaller::new(self.runner.clone());
        let manifest_path = self.config.manifest_path();
        let install = match installer
            .install(&env, &self.config.root, &manifest_path)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                self.record_fatal(&mut report, StepName::Install, &e);
                self.complete(&report);
                return report;
            }
        };
        report.advance(SetupState::DepsInstalled);
        self.step_succeeded(
            &mut report,
            StepName::Install,
            format!("{} dependencies installed", install.entry_count),
        );

        // Step 4: verify. Missing files are a warning here, not fatal.
        self.emit(SetupEvent::StepStarted {
            step: StepName::Verify,
        });
        let file_manifest = match self.load_file_manifest() {
            Ok(m) => m,
            Err(e) => {
                self.record_fatal(&mut report, StepName::Verify, &e);
                self.complete(&report);
                return report;
            }
        };
        let verification = StructureVerifier::verify(&self.config.root, &file_manifest);
        report.advance(SetupState::StructureVerified);
        if verification.is_complete() {
            self.step_succeeded(
                &mut report,
                StepName::Verify,
                format!("All {} required files present", verification.checked),
            );
        } else {
            let message = format!(
                "{} of {} required files missing",
                verification.missing.len(),
                verification.checked
            );
            report.record(StepName::Verify, Severity::Warning, message.clone());
            self.emit(SetupEvent::StepWarned {
                step: StepName::Verify,
                message,
                missing: verification.missing.clone(),
            });
        }

        // Step 5 (optional): launch.
        if launch_after {
            self.launch_step(&mut report, &env).await;
        }

        report.finish();
        self.complete(&report);
        report
    }

    /// Run the reduced launcher pipeline
    ///
    /// Only two hard prerequisites are checked, and both are fatal when
    /// absent: the activation script and the entry point. The full
    /// required-files contract is not consulted here.
    pub async fn run_launcher(&self) -> SetupReport {
        let mut report = SetupReport::new();
        info!("Starting launcher (run {})", report.run_id);
        self.emit(SetupEvent::PipelineStarted {
            run_id: report.run_id,
            mode: PipelineMode::Launcher,
        });

        self.emit(SetupEvent::StepStarted {
            step: StepName::Provision,
        });
        let provisioner = EnvironmentProvisioner::new(
            self.runner.clone(),
            self.config.interpreter.clone(),
            self.config.venv_dir.clone(),
        );
        let env = match provisioner.activate_existing(&self.config.root) {
            Ok(env) => env,
            Err(e) => {
                self.record_fatal(&mut report, StepName::Provision, &e);
                self.complete(&report);
                return report;
            }
        };
        report.advance(SetupState::EnvProvisioned);
        self.step_succeeded(
            &mut report,
            StepName::Provision,
            "Virtual environment activated".to_string(),
        );

        self.launch_step(&mut report, &env).await;
        report.finish();
        self.complete(&report);
        report
    }

    async fn launch_step(&self, report: &mut SetupReport, env: &Environment) {
        self.emit(SetupEvent::StepStarted {
            step: StepName::Launch,
        });
        let launcher = ProcessLauncher::new(self.runner.clone());
        let entry_point = self.config.entry_point_path();
        match launcher.launch(env, &self.config.root, &entry_point).await {
            Ok(code) => {
                report.launch_exit = Some(code);
                report.advance(SetupState::Launched);
                self.step_succeeded(
                    report,
                    StepName::Launch,
                    format!("Application exited with code {}", code),
                );
            }
            Err(e) => {
                self.record_fatal(report, StepName::Launch, &e);
            }
        }
    }

    fn step_succeeded(&self, report: &mut SetupReport, step: StepName, message: String) {
        report.record(step, Severity::Success, message.clone());
        self.emit(SetupEvent::StepSucceeded { step, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{RunOutput, RunnerError};
    use async_trait::async_trait;
    use std::path::Path;
    use tempfile::TempDir;

    // Mock runner for testing: succeeds at everything and materializes
    // the venv layout when asked to create one
    struct MockRunner;

    #[async_trait]
    impl CommandRunner for MockRunner {
        async fn run(
            &self,
            _program: &str,
            args: &[&str],
            cwd: &Path,
        ) -> Result<RunOutput, RunnerError> {
            if args.first() == Some(&"--version") {
                return Ok(RunOutput::ok("Python 3.12.1\n"));
            }
            if args.len() >= 2 && args[0] == "-m" && args[1] == "venv" {
                let bin = if cfg!(windows) {
                    cwd.join("venv").join("Scripts")
                } else {
                    cwd.join("venv").join("bin")
                };
                std::fs::create_dir_all(&bin).unwrap();
                let (activate, python) = if cfg!(windows) {
                    ("activate.bat", "python.exe")
                } else {
                    ("activate", "python")
                };
                std::fs::write(bin.join(activate), "").unwrap();
                std::fs::write(bin.join(python), "").unwrap();
            }
            Ok(RunOutput::ok(""))
        }

        async fn run_interactive(
            &self,
            _program: &str,
            _args: &[&str],
            _cwd: &Path,
        ) -> Result<i32, RunnerError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_full_pipeline_without_launch() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "flask==2.3.0\n").unwrap();

        let mut config = SetupConfig::default();
        config.root = dir.path().to_path_buf();

        let engine = SetupEngine::new(config, Arc::new(MockRunner));
        let report = engine.run_full(false).await;

        assert!(!report.has_fatal());
        assert_eq!(report.state, SetupState::StructureVerified);
        // Required files were never scaffolded, so verification warns
        assert!(!report.warnings().is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_events_arrive_in_pipeline_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "flask==2.3.0\n").unwrap();

        let mut config = SetupConfig::default();
        config.root = dir.path().to_path_buf();

        let engine = SetupEngine::new(config, Arc::new(MockRunner));
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        engine.add_event_handler(move |e| sink.lock().unwrap().push(e));

        engine.run_full(false).await;

        let events = events.lock().unwrap();
        assert!(matches!(events[0], SetupEvent::PipelineStarted { .. }));
        assert!(matches!(
            events.last(),
            Some(SetupEvent::PipelineCompleted { .. })
        ));

        let started: Vec<StepName> = events
            .iter()
            .filter_map(|e| match e {
                SetupEvent::StepStarted { step } => Some(*step),
                _ => None,
            })
            .collect();
        assert_eq!(
            started,
            vec![
                StepName::RuntimeCheck,
                StepName::Provision,
                StepName::Install,
                StepName::Verify
            ]
        );
    }
}
