use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::utils::is_abort_input;

/// Answer to a prompt inside a multi-step flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Value(String),
    /// User asked to go back to the menu, or input ended
    Abort,
}

/// Line-oriented terminal the menu talks through
pub struct Console<'a> {
    input: Box<dyn BufRead + 'a>,
    output: Box<dyn Write + 'a>,
}

impl<'a> Console<'a> {
    pub fn new(input: impl BufRead + 'a, output: impl Write + 'a) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Read one line without its terminator; `None` once input is exhausted
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print `prompt` and read the answer
    pub fn ask(&mut self, prompt: &str) -> io::Result<Input> {
        self.say(prompt)?;
        Ok(match self.read_line()? {
            Some(value) if !is_abort_input(&value) => Input::Value(value),
            _ => Input::Abort,
        })
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()
    }

    /// Write without a trailing newline, for inline prompts
    pub fn prompt(&mut self, text: impl Display) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.say("")
    }
}

impl Console<'static> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}
