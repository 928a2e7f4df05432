mod automator;
mod cli;
mod clock;
mod commands;
mod config;
mod git;
mod logging;
mod message;
mod tui;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use cli::Cli;
use console::style;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match commands::run::handle_run(&cli) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            commands::run::RunOutcome::failed(&cli)
        }
    };

    if outcome.pause {
        tui::prompt::wait_for_keypress();
    }
    std::process::exit(outcome.exit_code);
}
