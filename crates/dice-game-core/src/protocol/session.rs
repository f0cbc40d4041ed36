//! GameSession: the turn-based state machine.
//!
//! Phases run in a fixed order:
//! 1. The computer commits to a bit, the user guesses, and the sum mod 2
//!    decides who picks a die first.
//! 2. Both sides pick distinct dice from the set.
//! 3. The computer's die is rolled, then the user's. Each roll is the same
//!    commit-reveal exchange: commit to a number in 0..=5, collect the
//!    user's number, disclose, and take the sum mod 6 as the face index.
//! 4. The higher face wins.
//!
//! Every prompt accepts `X` to quit and `?` to show the probability table.
//! Neither consumes randomness or touches an outstanding commitment.

use super::console::Console;
use super::input::{parse_prompt, PromptInput, Rejection};
use super::transcript::{Disclosure, DisclosureStep, Transcript};
use super::types::{GameResult, Phase, Picks, Player, RollOutcome, SessionId};
use crate::crypto::{Committed, EntropySource, FairRandom, OsEntropy};
use crate::error::{CryptoError, SessionError};
use crate::games::{probability_table, DiceId, DiceSet, FACE_COUNT};
use tracing::{debug, info, warn};

/// How a finished `run` ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(GameResult),
    /// The user asked to quit or closed the input
    Quit,
}

/// Result of executing one phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Advanced(Phase),
    Finished(GameResult),
    Quit,
}

#[derive(Clone, Copy, Debug)]
enum State {
    DecidingFirstPlayer,
    SelectingDice {
        first: Player,
    },
    RollingHost {
        picks: Picks,
    },
    RollingGuest {
        picks: Picks,
        computer_roll: u32,
    },
    Finished {
        result: GameResult,
    },
}

impl State {
    fn phase(&self) -> Phase {
        match self {
            State::DecidingFirstPlayer => Phase::DecidingFirstPlayer,
            State::SelectingDice { .. } => Phase::SelectingDice,
            State::RollingHost { .. } => Phase::RollingHost,
            State::RollingGuest { .. } => Phase::RollingGuest,
            State::Finished { .. } => Phase::Finished,
        }
    }
}

enum Answer {
    Choice(usize),
    Quit,
}

struct Prompt {
    header: Vec<String>,
    options: Vec<(usize, String)>,
    max: usize,
}

impl Prompt {
    fn numeric(header: Vec<String>, max: usize) -> Self {
        Self {
            header,
            options: (0..=max).map(|n| (n, n.to_string())).collect(),
            max,
        }
    }
}

/// One game against the computer over a [`Console`]
pub struct GameSession<'a, C, E = OsEntropy> {
    id: SessionId,
    dice: &'a DiceSet,
    console: C,
    random: FairRandom<E>,
    state: State,
    transcript: Transcript,
}

impl<'a, C: Console> GameSession<'a, C, OsEntropy> {
    /// Create a session drawing randomness from the operating system
    pub fn new(dice: &'a DiceSet, console: C) -> Self {
        Self::with_random(dice, console, FairRandom::new())
    }
}

impl<'a, C: Console, E: EntropySource> GameSession<'a, C, E> {
    /// Create a session with a specific random generator
    pub fn with_random(dice: &'a DiceSet, console: C, random: FairRandom<E>) -> Self {
        let id = SessionId::new();
        Self {
            id,
            dice,
            console,
            random,
            state: State::DecidingFirstPlayer,
            transcript: Transcript::new(id),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Dice picked by each side, once selection is over
    pub fn picks(&self) -> Option<Picks> {
        match self.state {
            State::RollingHost { picks } | State::RollingGuest { picks, .. } => Some(picks),
            _ => None,
        }
    }

    /// Run phases until the game finishes or the user quits
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        info!(session = %self.id, dice = self.dice.len(), "session started");
        loop {
            match self.step()? {
                Transition::Advanced(_) => {}
                Transition::Finished(result) => return Ok(SessionEnd::Finished(result)),
                Transition::Quit => {
                    info!(session = %self.id, phase = ?self.phase(), "user quit");
                    return Ok(SessionEnd::Quit);
                }
            }
        }
    }

    /// Execute the current phase. Calling this once finished repeats the result.
    pub fn step(&mut self) -> Result<Transition, SessionError> {
        let current = self.state;
        let next = match current {
            State::DecidingFirstPlayer => self.decide_first_player()?,
            State::SelectingDice { first } => self.select_dice(first)?,
            State::RollingHost { picks } => {
                let Some(roll) = self.roll(Player::Computer, picks.computer)? else {
                    return Ok(Transition::Quit);
                };
                Some(State::RollingGuest {
                    picks,
                    computer_roll: roll,
                })
            }
            State::RollingGuest {
                picks,
                computer_roll,
            } => {
                let Some(user_roll) = self.roll(Player::User, picks.user)? else {
                    return Ok(Transition::Quit);
                };
                Some(State::Finished {
                    result: self.finish(user_roll, computer_roll)?,
                })
            }
            State::Finished { result } => return Ok(Transition::Finished(result)),
        };

        let Some(next) = next else {
            return Ok(Transition::Quit);
        };
        debug!(session = %self.id, from = ?current.phase(), to = ?next.phase(), "phase transition");
        self.state = next;

        Ok(match next {
            State::Finished { result } => Transition::Finished(result),
            other => Transition::Advanced(other.phase()),
        })
    }

    fn decide_first_player(&mut self) -> Result<Option<State>, SessionError> {
        let committed = self.random.bundle(1)?;
        info!(session = %self.id, hash = %committed.hash, "committed to first-move bit");

        let prompt = Prompt::numeric(
            vec![
                "Let's determine who makes the first move.".to_string(),
                format!(
                    "I selected a random value in the range 0..1 (HMAC={}).",
                    committed.hash
                ),
                "Try to guess my selection.".to_string(),
            ],
            1,
        );
        let Answer::Choice(guess) = self.ask(&prompt, |_| Ok(()))? else {
            return Ok(None);
        };

        let outcome = self.reveal(DisclosureStep::FirstPlayer, &committed, guess as u64, 2)?;
        self.say(format!("Outcome: {outcome}."))?;

        let first = if outcome.value == 1 {
            Player::Computer
        } else {
            Player::User
        };
        match first {
            Player::Computer => self.say("I make the first move.")?,
            Player::User => self.say("You make the first move.")?,
        }
        Ok(Some(State::SelectingDice { first }))
    }

    fn select_dice(&mut self, first: Player) -> Result<Option<State>, SessionError> {
        let picks = match first {
            Player::Computer => {
                let computer = self.computer_pick(None)?;
                self.say(format!("I choose the [{}] dice.", self.dice[computer]))?;
                let Some(user) = self.user_pick(Some(computer))? else {
                    return Ok(None);
                };
                Picks { computer, user }
            }
            Player::User => {
                let Some(user) = self.user_pick(None)? else {
                    return Ok(None);
                };
                let computer = self.computer_pick(Some(user))?;
                self.say(format!("I choose the [{}] dice.", self.dice[computer]))?;
                Picks { computer, user }
            }
        };
        debug!(session = %self.id, computer = %picks.computer, user = %picks.user, "dice selected");
        Ok(Some(State::RollingHost { picks }))
    }

    /// Dice choice is a plain uniform draw; it is not committed to
    fn computer_pick(&mut self, taken: Option<DiceId>) -> Result<DiceId, SessionError> {
        let remaining = self.dice.remaining(taken);
        let index = self.random.uniform(remaining.len() as u64 - 1)?;
        Ok(remaining[index as usize])
    }

    fn user_pick(&mut self, taken: Option<DiceId>) -> Result<Option<DiceId>, SessionError> {
        let prompt = Prompt {
            header: vec!["Choose your dice:".to_string()],
            options: self
                .dice
                .iter()
                .filter(|(id, _)| Some(*id) != taken)
                .map(|(id, dice)| (id.index(), dice.to_string()))
                .collect(),
            max: self.dice.len() - 1,
        };
        let answer = self.ask(&prompt, |n| match taken {
            Some(id) if id.index() == n => Err("That dice is already taken, choose another one."),
            _ => Ok(()),
        })?;

        let Answer::Choice(index) = answer else {
            return Ok(None);
        };
        let id = DiceId::from_index(index);
        self.say(format!("You choose the [{}] dice.", self.dice[id]))?;
        Ok(Some(id))
    }

    /// Roll `owner`'s die through one commit-reveal exchange.
    ///
    /// The commitment is shown before the user's number is read, and the
    /// key only after it.
    fn roll(&mut self, owner: Player, dice: DiceId) -> Result<Option<u32>, SessionError> {
        let max = FACE_COUNT - 1;
        let committed = self.random.bundle(max as u64)?;
        info!(session = %self.id, roll = %owner, hash = %committed.hash, "committed to roll number");

        let intro = match owner {
            Player::Computer => "It's time for my roll.",
            Player::User => "It's time for your roll.",
        };
        let prompt = Prompt::numeric(
            vec![
                intro.to_string(),
                format!(
                    "I selected a random value in the range 0..{max} (HMAC={}).",
                    committed.hash
                ),
                format!("Add your number modulo {FACE_COUNT}."),
            ],
            max,
        );
        let Answer::Choice(contribution) = self.ask(&prompt, |_| Ok(()))? else {
            return Ok(None);
        };

        let step = match owner {
            Player::Computer => DisclosureStep::ComputerRoll,
            Player::User => DisclosureStep::UserRoll,
        };
        let outcome = self.reveal(step, &committed, contribution as u64, FACE_COUNT as u64)?;
        self.say(format!("The fair number generation result is {outcome}."))?;

        let face = self.dice[dice].face(outcome.value as usize);
        match owner {
            Player::Computer => self.say(format!("My roll result is {face}."))?,
            Player::User => self.say(format!("Your roll result is {face}."))?,
        }
        Ok(Some(face))
    }

    fn finish(&mut self, user_roll: u32, computer_roll: u32) -> Result<GameResult, SessionError> {
        let result = GameResult::from_rolls(user_roll, computer_roll);
        let line = match result {
            GameResult::UserWins => format!("{result} ({user_roll} > {computer_roll})!"),
            GameResult::ComputerWins => format!("{result} ({computer_roll} > {user_roll})!"),
            GameResult::Tie => format!("{result} ({user_roll} = {computer_roll})!"),
        };
        self.say(line)?;
        info!(session = %self.id, ?result, user_roll, computer_roll, "session finished");
        Ok(result)
    }

    /// Disclose the key and number, combine with the contribution, and
    /// self-check the commitment before anything depends on it
    fn reveal(
        &mut self,
        step: DisclosureStep,
        committed: &Committed,
        contribution: u64,
        modulus: u64,
    ) -> Result<RollOutcome, SessionError> {
        self.say(format!(
            "My number is {} (KEY={}).",
            committed.number, committed.key
        ))?;

        if !committed.verify()? {
            warn!(session = %self.id, ?step, "disclosed number does not match commitment");
            return Err(CryptoError::CommitmentMismatch {
                number: committed.number,
            }
            .into());
        }

        let outcome = RollOutcome::combine(committed.number, contribution, modulus);
        self.transcript.push(Disclosure {
            step,
            hash: committed.hash,
            key: committed.key.clone(),
            outcome,
        });
        Ok(outcome)
    }

    /// Show `prompt` and read until a valid choice, quit, or end of input.
    ///
    /// `accept` can veto an in-range choice with a guidance message.
    fn ask<F>(&mut self, prompt: &Prompt, accept: F) -> Result<Answer, SessionError>
    where
        F: Fn(usize) -> Result<(), &'static str>,
    {
        for line in &prompt.header {
            self.say(line)?;
        }
        self.show_options(prompt)?;

        loop {
            let Some(line) = self.console.read_line()? else {
                return Ok(Answer::Quit);
            };
            match parse_prompt(&line, prompt.max) {
                PromptInput::Quit => return Ok(Answer::Quit),
                PromptInput::Help => {
                    debug!(session = %self.id, "help requested");
                    self.say(probability_table(self.dice))?;
                    for line in &prompt.header {
                        self.say(line)?;
                    }
                    self.show_options(prompt)?;
                }
                PromptInput::Choice(n) => match accept(n) {
                    Ok(()) => return Ok(Answer::Choice(n)),
                    Err(message) => {
                        self.say(message)?;
                        self.show_options(prompt)?;
                    }
                },
                PromptInput::Rejected(reason) => {
                    let message = match reason {
                        Rejection::NotANumber => format!(
                            "Please enter a number from 0 to {}, X to exit, or ? for help.",
                            prompt.max
                        ),
                        Rejection::OutOfRange => {
                            format!("The number must be between 0 and {}.", prompt.max)
                        }
                    };
                    self.say(message)?;
                    self.show_options(prompt)?;
                }
            }
        }
    }

    fn show_options(&mut self, prompt: &Prompt) -> Result<(), SessionError> {
        for (n, label) in &prompt.options {
            self.say(format!("{n} - {label}"))?;
        }
        self.say("X - exit")?;
        self.say("? - help")?;
        self.say("Your selection:")
    }

    fn say(&mut self, line: impl AsRef<str>) -> Result<(), SessionError> {
        self.console.write_line(line.as_ref())?;
        Ok(())
    }
}
