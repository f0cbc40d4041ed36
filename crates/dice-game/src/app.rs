//! Top-level flow: build the dice, run a session or a verification, and
//! decide how failures reach the user.

use crate::config::{Args, Command};
use dice_game_core::crypto::{self, CommitmentHash, SecretKey};
use dice_game_core::{Console, CryptoError, DiceError, DiceSet, GameSession, SessionEnd, SessionError};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};

const USAGE_EXAMPLE: &str = "Example: dice-game 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

/// Errors that reach `main`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid dice: {0}")]
    Dice(#[from] DiceError),

    #[error("Invalid verification input: {0}")]
    Verify(#[from] CryptoError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to encode transcript: {0}")]
    Transcript(#[from] serde_json::Error),
}

impl AppError {
    /// Single-line message shown when not in diagnostic mode
    pub fn user_message(&self) -> String {
        match self {
            AppError::Dice(_) => format!("Error: {self}\n{USAGE_EXAMPLE}"),
            AppError::Verify(_) => format!("Error: {self}"),
            AppError::Session(_) | AppError::Transcript(_) => {
                "Error: the game stopped because of an internal failure (run with --debug for details)."
                    .to_string()
            }
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Dice(_) | AppError::Verify(_) => ExitCode::from(2),
            AppError::Session(_) | AppError::Transcript(_) => ExitCode::FAILURE,
        }
    }
}

/// How a successful run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Game finished, user quit, or the commitment verified
    Success,
    /// A `verify` run whose values do not match the hash
    Mismatch,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Mismatch => ExitCode::FAILURE,
        }
    }
}

pub fn run<C: Console>(args: &Args, mut console: C) -> Result<Status, AppError> {
    if let Some(Command::Verify { key, number, hash }) = &args.command {
        return verify(key, *number, hash, &mut console);
    }

    let dice = DiceSet::parse(&args.dice)?;
    info!(dice = dice.len(), "dice loaded");

    let mut session = GameSession::new(&dice, &mut console);
    let end = session.run()?;
    let transcript = session.transcript().clone();
    drop(session);

    match end {
        SessionEnd::Finished(result) => debug!(?result, "game over"),
        SessionEnd::Quit => debug!("game abandoned"),
    }

    if args.transcript {
        let json = transcript.to_json()?;
        console.write_line(&json).map_err(SessionError::from)?;
    }
    Ok(Status::Success)
}

fn verify<C: Console>(
    key: &str,
    number: u64,
    hash: &str,
    console: &mut C,
) -> Result<Status, AppError> {
    let key: SecretKey = key.parse()?;
    let hash: CommitmentHash = hash.parse()?;

    let status = if crypto::verify(&key, number, &hash)? {
        console
            .write_line(&format!("OK: HMAC(KEY, {number}) matches {hash}."))
            .map_err(SessionError::from)?;
        Status::Success
    } else {
        console
            .write_line(&format!("MISMATCH: HMAC(KEY, {number}) does not match {hash}."))
            .map_err(SessionError::from)?;
        Status::Mismatch
    };
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dice_game_core::crypto::{commit, FairRandom};
    use dice_game_core::ScriptedConsole;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("dice-game").chain(argv.iter().copied()))
    }

    #[test]
    fn test_too_few_dice_is_rejected_before_any_prompt() {
        let mut console = ScriptedConsole::new(["0"]);
        let err = run(&args(&["1,2,3,4,5,6", "1,2,3,4,5,6"]), &mut console).unwrap_err();

        assert!(matches!(err, AppError::Dice(DiceError::TooFewDice { found: 2 })));
        assert_eq!(console.reads(), 0);
        assert!(console.output().is_empty());
        assert!(err.user_message().contains(USAGE_EXAMPLE));
    }

    #[test]
    fn test_malformed_dice_is_rejected() {
        let mut console = ScriptedConsole::default();
        let err = run(&args(&["1,2,3", "1,2,3,4,5,6", "1,2,3,4,5,6"]), &mut console)
            .unwrap_err();

        assert!(matches!(err, AppError::Dice(DiceError::WrongFaceCount { .. })));
        assert_eq!(console.reads(), 0);
    }

    #[test]
    fn test_quit_is_success() {
        let mut console = ScriptedConsole::new(["X"]);
        let status = run(
            &args(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]),
            &mut console,
        )
        .unwrap();

        assert_eq!(status, Status::Success);
    }

    #[test]
    fn test_transcript_printed_as_json() {
        let mut console = ScriptedConsole::new(["X"]);
        run(
            &args(&["--transcript", "1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3"]),
            &mut console,
        )
        .unwrap();

        let last = console.output().last().unwrap();
        let json: serde_json::Value = serde_json::from_str(last).unwrap();
        assert!(json["session_id"].is_string());
        assert_eq!(json["disclosures"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_verify_subcommand() {
        let committed = FairRandom::new().bundle(5).unwrap();
        let key = committed.key.to_string();
        let hash = committed.hash.to_string();
        let number = committed.number.to_string();

        let mut console = ScriptedConsole::default();
        let status = run(
            &args(&["verify", "--key", &key, "--number", &number, "--hash", &hash]),
            &mut console,
        )
        .unwrap();
        assert_eq!(status, Status::Success);
        assert!(console.output_text().starts_with("OK:"));

        let wrong = ((committed.number + 1) % 6).to_string();
        let mut console = ScriptedConsole::default();
        let status = run(
            &args(&["verify", "--key", &key, "--number", &wrong, "--hash", &hash]),
            &mut console,
        )
        .unwrap();
        assert_eq!(status, Status::Mismatch);
    }

    #[test]
    fn test_verify_rejects_malformed_key() {
        let hash = commit(&SecretKey::from_bytes([0; 32]), 1).unwrap().to_string();
        let mut console = ScriptedConsole::default();
        let err = run(
            &args(&["verify", "--key", "beef", "--number", "1", "--hash", &hash]),
            &mut console,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Verify(CryptoError::MalformedKey)));
    }

    #[test]
    fn test_session_failure_message_is_generic() {
        let err = AppError::Session(SessionError::Crypto(CryptoError::EntropyUnavailable(
            "no device".to_string(),
        )));

        assert!(!err.user_message().contains("no device"));
    }
}
