//! CLI output formatting

use crate::core::{SetupReport, SetupState, Severity};
use crate::setup::{PipelineMode, SetupEvent};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a spinner for the long-running install step
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format a severity for display
pub fn format_severity(severity: Severity) -> String {
    match severity {
        Severity::Success => style("OK").green().to_string(),
        Severity::Warning => style("WARNING").yellow().to_string(),
        Severity::Fatal => style("FAILED").red().to_string(),
    }
}

/// Format a pipeline event for display
pub fn format_setup_event(event: &SetupEvent) -> String {
    match event {
        SetupEvent::PipelineStarted { run_id, mode } => {
            let what = match mode {
                PipelineMode::FullSetup => "setup",
                PipelineMode::Launcher => "launcher",
            };
            format!(
                "{} Starting {} ({})",
                ROCKET,
                style(what).bold(),
                style(&run_id.to_string()[..8]).dim()
            )
        }
        SetupEvent::StepStarted { step } => {
            format!("{} {}...", SPINNER, style(step.title()).cyan())
        }
        SetupEvent::StepSucceeded { step, message } => {
            format!("{} {}: {}", CHECK, style(step.title()).green(), message)
        }
        SetupEvent::StepWarned {
            step,
            message,
            missing,
        } => {
            let mut out = format!("{} {}: {}", WARN, style(step.title()).yellow(), message);
            for path in missing {
                out.push_str(&format!("\n    {} {}", CROSS, style(path.display()).dim()));
            }
            out
        }
        SetupEvent::StepFailed { step, error } => {
            format!("{} {}: {}", CROSS, style(step.title()).red(), style(error).dim())
        }
        SetupEvent::PipelineCompleted { run_id, state } => {
            let status = match state {
                SetupState::Failed => style("failed").red().to_string(),
                _ => style("complete").green().to_string(),
            };
            format!(
                "{} Run ({}) {}",
                INFO,
                style(&run_id.to_string()[..8]).dim(),
                status
            )
        }
    }
}

/// Print the closing summary for a setup run
pub fn print_report_summary(report: &SetupReport) {
    println!();
    if report.state == SetupState::Failed {
        println!("{} {}", CROSS, style("Setup failed").red().bold());
    } else {
        println!("{} {}", CHECK, style("Setup complete").green().bold());
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        println!(
            "{} {} warning(s) - the application may not run until these are resolved:",
            WARN,
            warnings.len()
        );
        for outcome in warnings {
            println!("    {}", style(&outcome.message).yellow());
        }
    }
}

/// Print the operator banner shown before launching the application
pub fn print_launch_banner(port: u16, email: &str, password: &str) {
    println!();
    println!("{}", style("=".repeat(60)).dim());
    println!(
        "{} Server starting at {}",
        ROCKET,
        style(format!("http://localhost:{}", port)).bold()
    );
    println!();
    println!("  Default admin login:");
    println!("    Email:    {}", style(email).cyan());
    println!("    Password: {}", style(password).cyan());
    println!();
    println!("  Press Ctrl+C to stop the server");
    println!("{}", style("=".repeat(60)).dim());
}
