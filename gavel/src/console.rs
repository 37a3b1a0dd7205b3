//! The line-oriented console the interactive shell talks through.
//!
//! Everything the screens need from a terminal is expressed by the
//! [`Console`] trait: two required primitives (read one answer, write one
//! line) and a set of prompts built on top of them. [`Terminal`] implements
//! the primitives over any reader and writer, which is also how the shell is
//! scripted in tests.

use crate::table::Table;
use std::io::{self, BufRead, Write};

/// Typing this (or a lone escape character) at any prompt aborts the action.
pub const CANCEL: &str = ":q";

/// Failure to obtain an answer from the user.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    /// The user asked to abandon the current action
    #[error("operation cancelled")]
    Cancelled,
    /// No more input will arrive
    #[error("console input ended")]
    Closed,
    /// Reading or writing the console failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How a message should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Ordinary output
    Plain,
    /// Something completed
    Success,
    /// Something needs attention
    Warning,
    /// Something failed but the session continues
    Error,
    /// Something failed badly
    Critical,
}

impl Tone {
    fn ansi(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Success => Some("32"),
            Self::Warning => Some("33"),
            Self::Error => Some("31"),
            Self::Critical => Some("37;41"),
        }
    }
}

/// A console capable of prompting for input and printing messages.
pub trait Console {
    /// Show `label` and read one answer, without validation.
    fn prompt(&mut self, label: &str) -> Result<String, InputError>;

    /// Print one line.
    fn write_line(&mut self, tone: Tone, line: &str) -> Result<(), InputError>;

    /// Print a message.
    fn say(&mut self, tone: Tone, message: &str) -> Result<(), InputError> {
        self.write_line(tone, message)
    }

    /// Print an empty line.
    fn blank(&mut self) -> Result<(), InputError> {
        self.write_line(Tone::Plain, "")
    }

    /// Print a table.
    fn table(&mut self, table: &Table) -> Result<(), InputError> {
        for line in table.to_string().lines() {
            self.write_line(Tone::Plain, line)?;
        }
        Ok(())
    }

    /// Read a line of text, re-asking until it is non-blank unless `allow_empty`.
    fn text(&mut self, label: &str, allow_empty: bool) -> Result<String, InputError> {
        loop {
            let answer = self.prompt(label)?;
            let answer = answer.trim();
            if allow_empty || !answer.is_empty() {
                return Ok(answer.to_owned());
            }
            self.write_line(
                Tone::Error,
                &format!("    | You must enter valid input for {label}, try again."),
            )?;
        }
    }

    /// Read a password, re-asking until it is non-blank.
    fn password(&mut self, label: &str) -> Result<String, InputError> {
        loop {
            let answer = self.prompt(label)?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
            self.write_line(Tone::Error, "    | Invalid password entered, try again.")?;
        }
    }

    /// Read a yes or no answer.
    fn boolean(&mut self, label: &str) -> Result<bool, InputError> {
        let label = format!("{label} (Y/N)");
        loop {
            match self.prompt(&label)?.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.write_line(Tone::Error, "    | Please answer Y or N, try again.")?,
            }
        }
    }

    /// Read an integer between `min` and `max` inclusive.
    fn integer(&mut self, label: &str, min: i64, max: i64) -> Result<i64, InputError> {
        loop {
            match self.prompt(label)?.trim().parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(value) if value < min => self.write_line(
                    Tone::Error,
                    &format!("    | Supplied value must be at least {min}, try again."),
                )?,
                Ok(_) => self.write_line(
                    Tone::Error,
                    &format!("    | Supplied value must be at most {max}, try again."),
                )?,
                Err(_) => self.write_line(
                    Tone::Error,
                    "    | Supplied value is not an integer, try again.",
                )?,
            }
        }
    }

    /// Ask for a selection between 1 and `max` inclusive.
    ///
    /// An invalid selection is reported and yields `None`; the caller abandons
    /// the action rather than re-asking.
    fn choice(&mut self, max: usize, label: &str) -> Result<Option<usize>, InputError> {
        let answer = self.prompt(label)?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => Ok(Some(n)),
            _ => {
                self.write_line(Tone::Error, "Invalid selection made, try again.")?;
                Ok(None)
            }
        }
    }
}

/// A [`Console`] over a reader and a writer.
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    /// The process's own stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wrap a reader and writer. Output is uncoloured.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: false,
        }
    }

    /// Colour messages by tone with ANSI escapes
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Give back the writer, e.g. to inspect a transcript
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn prompt(&mut self, label: &str) -> Result<String, InputError> {
        write!(self.writer, "{label}: ")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if matches!(line.trim(), "\u{1b}" | CANCEL) {
            return Err(InputError::Cancelled);
        }
        Ok(line.to_owned())
    }

    fn write_line(&mut self, tone: Tone, line: &str) -> Result<(), InputError> {
        match tone.ansi().filter(|_| self.color) {
            Some(code) => writeln!(self.writer, "\x1b[{code}m{line}\x1b[0m")?,
            None => writeln!(self.writer, "{line}")?,
        }
        Ok(())
    }
}
