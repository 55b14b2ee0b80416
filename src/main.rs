use anyhow::{Context, Result};
use console::Term;
use estsetup::cli::commands::{InstallCommand, LaunchCommand, VerifyCommand};
use estsetup::cli::output::*;
use estsetup::cli::{Cli, Command};
use estsetup::core::config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use estsetup::core::{FileManifest, SetupConfig, StepName};
use estsetup::runner::SystemRunner;
use estsetup::setup::{SetupEngine, SetupEvent, StructureVerifier};
use indicatif::ProgressBar;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    let exit_code = match &cli.command {
        Command::Install(cmd) => run_install(cmd).await?,
        Command::Launch(cmd) => run_launch(cmd).await?,
        Command::Verify(cmd) => run_verify(cmd)?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn load_config(root: &std::path::Path) -> Result<SetupConfig> {
    SetupConfig::load_or_default(root).context("Failed to load setup configuration")
}

/// Wire the console formatter (plus install spinner and launch banner)
/// into the engine's event stream
fn attach_console_handler(engine: &SetupEngine<SystemRunner>, config: &SetupConfig) {
    let port = config.port;
    let spinner: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));

    engine.add_event_handler(move |event| {
        // The pip install can run for minutes; show a spinner instead of
        // a silent pause, and clear it before any other line prints.
        if let Ok(mut slot) = spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
            if let SetupEvent::StepStarted {
                step: StepName::Install,
            } = &event
            {
                *slot = Some(create_spinner(StepName::Install.title()));
                return;
            }
        }

        if let SetupEvent::StepStarted {
            step: StepName::Launch,
        } = &event
        {
            print_launch_banner(port, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD);
        }

        println!("{}", format_setup_event(&event));
    });
}

async fn run_install(cmd: &InstallCommand) -> Result<i32> {
    let mut config = load_config(&cmd.root)?;
    if let Some(manifest) = &cmd.manifest {
        config.manifest = manifest.clone();
    }
    if let Some(files) = &cmd.files {
        config.files_manifest = Some(files.clone());
    }

    let runner = Arc::new(SystemRunner::new());
    let engine = SetupEngine::new(config.clone(), runner);
    attach_console_handler(&engine, &config);

    // An explicit --launch/--no-launch flag decides up front; without one
    // the operator is asked after the setup results are on screen.
    let decision = cmd.launch_decision();

    println!();
    let report = engine.run_full(decision == Some(true)).await;
    print_report_summary(&report);

    if report.has_fatal() {
        return Ok(1);
    }
    if let Some(code) = report.launch_exit {
        return Ok(code);
    }

    if decision.is_none() && prompt_yes_no("Launch the application now?")? {
        let launch_report = engine.run_launcher().await;
        if launch_report.has_fatal() {
            return Ok(1);
        }
        return Ok(launch_report.launch_exit.unwrap_or(0));
    }
    Ok(0)
}

async fn run_launch(cmd: &LaunchCommand) -> Result<i32> {
    let config = load_config(&cmd.root)?;

    let runner = Arc::new(SystemRunner::new());
    let engine = SetupEngine::new(config.clone(), runner);
    attach_console_handler(&engine, &config);

    println!();
    let report = engine.run_launcher().await;

    if report.has_fatal() {
        return Ok(1);
    }
    Ok(report.launch_exit.unwrap_or(0))
}

fn run_verify(cmd: &VerifyCommand) -> Result<i32> {
    let mut config = load_config(&cmd.root)?;
    if let Some(files) = &cmd.files {
        config.files_manifest = Some(files.clone());
    }

    let manifest = match &config.files_manifest {
        Some(rel) => FileManifest::from_file(config.root.join(rel))
            .context("Failed to load required-files manifest")?,
        None => FileManifest::default_layout(),
    };

    let report = StructureVerifier::verify(&config.root, &manifest);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_complete() {
        println!(
            "{} All {} required files present",
            CHECK,
            style(report.checked).cyan()
        );
    } else {
        println!(
            "{} {} of {} required files missing:",
            WARN,
            style(report.missing.len()).yellow(),
            report.checked
        );
        for path in &report.missing {
            println!("  {} {}", CROSS, style(path.display()).dim());
        }
    }

    Ok(if report.is_complete() { 0 } else { 1 })
}

/// Interactive y/n prompt, defaulting to no
fn prompt_yes_no(question: &str) -> Result<bool> {
    let term = Term::stdout();
    print!("{} [y/N] ", question);
    use std::io::Write;
    std::io::stdout().flush()?;
    let answer = term.read_line().context("Failed to read prompt answer")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
