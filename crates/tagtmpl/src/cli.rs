//! Command-line interface definitions for tagtmpl.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `tagtmpl` binary.
#[derive(Parser, Debug)]
#[command(
    name = "tagtmpl",
    about = "Inspect questionnaire templates for image taggers",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do with the template.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a template and print a summary of what it defines.
    Check(PathArgs),
    /// Print the token stream of a template.
    Tokens(PathArgs),
    /// Compile a template and print the result as JSON.
    Dump(PathArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Template file to read.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}
