//! Command-line and environment configuration.

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "dice-game",
    about = "Non-transitive dice game with provably fair computer moves",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Dice to play with, each as six comma-separated faces (at least 3)
    #[arg(value_name = "DICE")]
    pub dice: Vec<String>,

    /// Diagnostic mode: verbose logs, internal failures reported in full
    #[arg(long, env = "DICE_GAME_DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,

    /// Print every disclosed commitment as JSON when the game ends
    #[arg(long, env = "DICE_GAME_TRANSCRIPT", value_parser = BoolishValueParser::new())]
    pub transcript: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a disclosed key and number against a published HMAC
    Verify {
        /// Secret key as 64 hex digits
        #[arg(long)]
        key: String,

        /// Disclosed number
        #[arg(long)]
        number: u64,

        /// Published HMAC as 64 hex digits
        #[arg(long)]
        hash: String,
    },
}
