//! Typed parsing of one line of interactive input.

/// Why an input line was not accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NotANumber,
    OutOfRange,
}

/// A classified prompt answer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptInput {
    /// A number in `0..=max`
    Choice(usize),
    Help,
    Quit,
    Rejected(Rejection),
}

/// Classify a line typed at a prompt that accepts `0..=max`, `X` or `?`
pub fn parse_prompt(line: &str, max: usize) -> PromptInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("x") {
        return PromptInput::Quit;
    }
    if line == "?" {
        return PromptInput::Help;
    }
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return PromptInput::Rejected(Rejection::NotANumber);
    }
    match line.parse::<usize>() {
        Ok(n) if n <= max => PromptInput::Choice(n),
        // All digits, so a parse failure can only be overflow
        _ => PromptInput::Rejected(Rejection::OutOfRange),
    }
}
