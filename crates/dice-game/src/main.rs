//! Dice Game
//!
//! Interactive non-transitive dice game against the computer. Every random
//! choice the computer makes is committed to with an HMAC before the user
//! answers, and disclosed afterwards so it can be checked.

mod app;
mod config;
mod console;

use app::AppError;
use clap::Parser;
use config::Args;
use console::StdConsole;
use dice_game_core::SessionError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode, SessionError> {
    let args = Args::parse();
    init_tracing(args.debug);

    match app::run(&args, StdConsole::new()) {
        Ok(status) => Ok(status.into()),
        // Diagnostic mode hands session failures back unmodified
        Err(AppError::Session(e)) if args.debug => Err(e),
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(e.exit_code())
        }
    }
}
