//! Pipeline step and report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five ordered steps of the setup pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepName {
    /// Confirm the Python runtime is installed and resolvable
    RuntimeCheck,
    /// Create and activate the virtual environment
    Provision,
    /// Bulk-install dependencies from the manifest
    Install,
    /// Check the required project file layout
    Verify,
    /// Start the application server
    Launch,
}

impl StepName {
    /// Human-readable step title
    pub fn title(&self) -> &'static str {
        match self {
            StepName::RuntimeCheck => "Checking Python runtime",
            StepName::Provision => "Provisioning virtual environment",
            StepName::Install => "Installing dependencies",
            StepName::Verify => "Verifying project structure",
            StepName::Launch => "Launching application",
        }
    }
}

/// Severity of a step outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Step completed normally
    Success,
    /// Step found problems but the pipeline continues
    Warning,
    /// Step failed; the pipeline halts
    Fatal,
}

/// Recorded outcome of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: StepName,
    pub severity: Severity,
    pub message: String,
}

/// Overall pipeline state machine
///
/// Transitions are forward-only; `Failed` and `Launched` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupState {
    NotStarted,
    RuntimeChecked,
    EnvProvisioned,
    DepsInstalled,
    StructureVerified,
    Launched,
    Failed,
}

impl SetupState {
    /// Check if the state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, SetupState::Failed | SetupState::Launched)
    }
}

/// Accumulated result of one pipeline invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupReport {
    /// Unique run ID
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (or failed)
    pub finished_at: Option<DateTime<Utc>>,

    /// Per-step outcomes, in execution order
    pub outcomes: Vec<StepOutcome>,

    /// Final pipeline state
    pub state: SetupState,

    /// Exit code of the launched application, when a launch happened
    pub launch_exit: Option<i32>,
}

impl SetupReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
            state: SetupState::NotStarted,
            launch_exit: None,
        }
    }

    /// Record a step outcome
    pub fn record(&mut self, step: StepName, severity: Severity, message: impl Into<String>) {
        self.outcomes.push(StepOutcome {
            step,
            severity,
            message: message.into(),
        });
    }

    /// Advance to the given state; never moves backward out of a terminal state
    pub fn advance(&mut self, next: SetupState) {
        if !self.state.is_terminal() {
            self.state = next;
        }
    }

    /// Mark the run as failed
    pub fn fail(&mut self) {
        self.state = SetupState::Failed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the run as finished
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    /// Check whether any step ended Fatal
    pub fn has_fatal(&self) -> bool {
        self.outcomes.iter().any(|o| o.severity == Severity::Fatal)
    }

    /// Warning-level outcomes, in order
    pub fn warnings(&self) -> Vec<&StepOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.severity == Severity::Warning)
            .collect()
    }

    /// Process exit code for this run: 1 on any Fatal outcome, 0 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.has_fatal() {
            1
        } else {
            0
        }
    }
}

impl Default for SetupReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_do_not_affect_exit_code() {
        let mut report = SetupReport::new();
        report.record(StepName::RuntimeCheck, Severity::Success, "Python 3.11.4");
        report.record(StepName::Verify, Severity::Warning, "1 file missing");
        assert!(!report.has_fatal());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_fatal_sets_exit_code() {
        let mut report = SetupReport::new();
        report.record(StepName::RuntimeCheck, Severity::Fatal, "not found");
        report.fail();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.state, SetupState::Failed);
    }

    #[test]
    fn test_state_never_leaves_terminal() {
        let mut report = SetupReport::new();
        report.advance(SetupState::RuntimeChecked);
        report.fail();
        report.advance(SetupState::EnvProvisioned);
        assert_eq!(report.state, SetupState::Failed);
    }

    #[test]
    fn test_terminal_states() {
        assert!(SetupState::Failed.is_terminal());
        assert!(SetupState::Launched.is_terminal());
        assert!(!SetupState::DepsInstalled.is_terminal());
    }
}
