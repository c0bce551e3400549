use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use modmerge_cli::cli::{Cli, Command};
use modmerge_cli::commands;
use modmerge_cli::logging::{self, Log as _};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if args.command == Some(Command::Version) {
        commands::version::run();
        return Ok(());
    }

    let command = args.command.map_or("prompt", Command::log_name);
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    let result = match args.command {
        None => commands::prompt::run(&args.global, &log),
        Some(Command::Install) => commands::install::run(&args.global, &log),
        Some(Command::Build) => commands::build::run(&args.global, &log),
        Some(Command::Deploy) => commands::deploy::run(&args.global, &log),
        Some(Command::Uninstall) => commands::uninstall::run(&args.global, &log),
        Some(Command::Status) => commands::status::run(&args.global, &log),
        Some(Command::Version) => Ok(()),
    };

    if let Err(e) = &result {
        log.error(&format!("{e:#}"));
    }
    result
}
