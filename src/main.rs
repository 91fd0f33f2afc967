//! elskom-check - Elskom workload manager
//!
//! Installs, updates and uninstalls the packs of the Elskom .NET SDK workload
//! and keeps the workload manifest under the SDK in sync with what is installed.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod installer;
mod logging;
mod operations;
mod progress;
mod resolver;
mod source;
mod toolchain;

use cli::{Cli, Commands};
use commands::helpers::GlobalOptions;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let options = GlobalOptions::from(&cli);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(&options, args),
        Commands::Update(args) => commands::update::run(&options, args),
        Commands::Uninstall(args) => commands::uninstall::run(&options, args),
        Commands::Version => commands::version::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
