//! Line-based console abstraction.

use std::collections::VecDeque;
use std::io;

/// Trait for the line-based text channel to the user
pub trait Console {
    /// Read one line; `None` means the input is closed
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write one line (or a block of lines) of output
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// In-memory console for testing: replays queued input, captures output
#[derive(Clone, Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    reads: usize,
}

impl ScriptedConsole {
    /// Create a console that will answer prompts with `lines` in order
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            reads: 0,
        }
    }

    /// Everything written so far, one entry per `write_line` call
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// All output joined with newlines
    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }

    /// Number of `read_line` calls made, including ones that hit end of input
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Input lines not yet consumed
    pub fn pending(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
