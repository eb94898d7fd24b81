// reelmix-cli/src/main.rs
//
// CLI entry point: parses arguments, sets up logging and dispatches to the
// download or remix command. Fatal setup errors exit with code 1; per-item
// batch failures only affect the printed tally.

use std::process;

use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};

fn main() {
    logging::init();

    let cli = Cli::parse();

    log::debug!("Reelmix run started: {}", chrono::Local::now());

    let result = match cli.command {
        Commands::Download(args) => commands::download::run_download(args),
        Commands::Remix(args) => commands::remix::run_remix(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
