//! Test utilities: fake command runner and project scaffolding

#![allow(dead_code)]

use async_trait::async_trait;
use estsetup::core::FileManifest;
use estsetup::runner::{CommandRunner, RunOutput, RunnerError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub interactive: bool,
}

/// Fake runner with scripted responses for each kind of pipeline command
///
/// Invocations are classified by their arguments: `--version` probes,
/// `-m venv` creation, `-m pip` installs, and interactive launches.
/// When `create_venv_layout` is set, the venv command also materializes
/// the activation script and interpreter on disk so activation checks
/// against the real filesystem succeed.
pub struct FakeRunner {
    /// Response to the version probe; None simulates a missing executable
    pub version_output: Option<RunOutput>,
    pub venv_output: RunOutput,
    pub pip_output: RunOutput,
    /// Exit code returned from interactive launches
    pub launch_code: i32,
    pub create_venv_layout: bool,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl FakeRunner {
    /// A runner where every step succeeds
    pub fn happy() -> Self {
        Self {
            version_output: Some(RunOutput::ok("Python 3.11.4\n")),
            venv_output: RunOutput::ok(""),
            pip_output: RunOutput::ok("Successfully installed flask-2.3.0\n"),
            launch_code: 0,
            create_venv_layout: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A runner whose version probe fails to spawn
    pub fn without_runtime() -> Self {
        Self {
            version_output: None,
            ..Self::happy()
        }
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Count calls whose args contain the given token
    pub fn count_calls_with(&self, token: &str) -> usize {
        self.recorded_calls()
            .iter()
            .filter(|c| c.args.iter().any(|a| a == token))
            .count()
    }

    pub fn interactive_calls(&self) -> Vec<RecordedCall> {
        self.recorded_calls()
            .into_iter()
            .filter(|c| c.interactive)
            .collect()
    }

    fn record(&self, program: &str, args: &[&str], cwd: &Path, interactive: bool) {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
            interactive,
        });
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::happy()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput, RunnerError> {
        self.record(program, args, cwd, false);

        if args.len() == 1 && args[0] == "--version" {
            return match &self.version_output {
                Some(output) => Ok(output.clone()),
                None => Err(RunnerError::Spawn {
                    program: program.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                }),
            };
        }

        if args.len() >= 2 && args[0] == "-m" && args[1] == "venv" {
            if self.venv_output.success() && self.create_venv_layout {
                scaffold_venv(cwd);
            }
            return Ok(self.venv_output.clone());
        }

        if args.len() >= 2 && args[0] == "-m" && args[1] == "pip" {
            return Ok(self.pip_output.clone());
        }

        Ok(RunOutput::ok(""))
    }

    async fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<i32, RunnerError> {
        self.record(program, args, cwd, true);
        Ok(self.launch_code)
    }
}

/// Create the venv directory layout (activation script + interpreter)
pub fn scaffold_venv(root: &Path) {
    let bin = if cfg!(windows) {
        root.join("venv").join("Scripts")
    } else {
        root.join("venv").join("bin")
    };
    std::fs::create_dir_all(&bin).unwrap();
    if cfg!(windows) {
        std::fs::write(bin.join("activate.bat"), "").unwrap();
        std::fs::write(bin.join("python.exe"), "").unwrap();
    } else {
        std::fs::write(bin.join("activate"), "").unwrap();
        std::fs::write(bin.join("python"), "").unwrap();
    }
}

/// Write a requirements file with the given entries
pub fn write_requirements(root: &Path, entries: &[&str]) {
    let mut content = String::from("# test requirements\n");
    for entry in entries {
        content.push_str(entry);
        content.push('\n');
    }
    std::fs::write(root.join("requirements.txt"), content).unwrap();
}

/// Create every file and runtime directory the default layout contract
/// declares
pub fn scaffold_full_layout(root: &Path) {
    let layout = FileManifest::default_layout();
    for rel in &layout.files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "").unwrap();
    }
    for rel in &layout.directories {
        std::fs::create_dir_all(root.join(rel)).unwrap();
    }
}
