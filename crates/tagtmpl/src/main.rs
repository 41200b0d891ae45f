#![warn(missing_docs)]

//! Entry point for the `tagtmpl` binary.

mod cli;
mod commands;
mod error;

use std::process;

use clap::Parser;
use tracing::error;

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!(target: "tagtmpl", "{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log);

    match command {
        Commands::Check(args) => commands::check(&args.path),
        Commands::Tokens(args) => commands::tokens(&args.path),
        Commands::Dump(args) => commands::dump(&args.path),
    }
}
