//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{InstallCommand, LaunchCommand, VerifyCommand};

/// Setup and launch tool for the Plumbing Estimator application
#[derive(Debug, Parser, Clone)]
#[command(name = "estsetup")]
#[command(author = "Estsetup Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Bootstraps the Plumbing Estimator environment and launches the app", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the full setup pipeline
    Install(InstallCommand),

    /// Launch a previously-provisioned application
    Launch(LaunchCommand),

    /// Check the required project file layout
    Verify(VerifyCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
