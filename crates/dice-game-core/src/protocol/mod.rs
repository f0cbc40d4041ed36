//! Session protocol: roles, prompts, the console seam, and the state machine.

mod console;
mod input;
mod session;
mod transcript;
mod types;

pub use console::{Console, ScriptedConsole};
pub use input::{parse_prompt, PromptInput, Rejection};
pub use session::{GameSession, SessionEnd, Transition};
pub use transcript::{Disclosure, DisclosureStep, Transcript};
pub use types::{GameResult, Phase, Picks, Player, RollOutcome, SessionId};
