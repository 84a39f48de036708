// this_file: crates/gemtype-cli/src/main.rs

//! gemtype CLI - render text/gemini documents and labels to PNG

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match &cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Label(args) => commands::label::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        },
    }
}
