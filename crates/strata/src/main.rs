//! strata - resolve settings from flags, arguments, config and environment
//!
//! Each subcommand registers its lookup strategies in priority order and
//! prints the first non-empty answer.

use clap::{CommandFactory, FromArgMatches};

mod commands;

use commands::Cli;

fn main() {
    strata_core::logging::init();

    let mut command = Cli::command();
    let matches = command.get_matches_mut();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    if let Err(e) = cli.execute(&command, &matches) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
