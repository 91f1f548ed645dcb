//! Interactive questions and answer validation.
//!
//! Each answer is validated the same way whether it was typed at the prompt,
//! passed as a flag, or read from the configuration file. An invalid answer
//! ends the run; there is no re-prompting.

use crate::batch::{BatchCapacity, MAX_CAPACITY, MIN_CAPACITY};
use crate::manifest::Column;
use std::io::{BufRead, Write};

/// An answer outside its allowed set or range.
#[derive(Debug)]
pub enum ValidationError {
    /// The batch size is a number outside `1..=500`.
    BatchSizeOutOfRange(usize),
    /// The batch size is not a number.
    NotANumber(String),
    /// The column is not a single letter `A`..=`Z`.
    InvalidColumn(String),
    /// A yes/no question got something other than `y` or `n`.
    InvalidAnswer(String),
    /// Input ended before the question was answered.
    NoInput,
    /// Reading the answer or writing the question failed.
    Io(std::io::Error),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BatchSizeOutOfRange(size) => write!(
                f,
                "{} is not a valid batch size (expected {}-{})",
                size, MIN_CAPACITY, MAX_CAPACITY
            ),
            ValidationError::NotANumber(answer) => {
                write!(f, "'{}' is not a valid number", answer)
            }
            ValidationError::InvalidColumn(answer) => {
                write!(f, "'{}' is not a valid column (expected A-Z)", answer)
            }
            ValidationError::InvalidAnswer(answer) => {
                write!(f, "'{}' is not a valid answer (expected Y/N)", answer)
            }
            ValidationError::NoInput => write!(f, "No answer provided"),
            ValidationError::Io(e) => write!(f, "Failed to read answer: {}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<std::io::Error> for ValidationError {
    fn from(e: std::io::Error) -> Self {
        ValidationError::Io(e)
    }
}

/// Validates a batch size.
pub fn batch_size(size: usize) -> Result<BatchCapacity, ValidationError> {
    BatchCapacity::new(size).ok_or(ValidationError::BatchSizeOutOfRange(size))
}

/// Parses and validates a typed batch size.
pub fn parse_batch_size(answer: &str) -> Result<BatchCapacity, ValidationError> {
    let size = answer
        .trim()
        .parse::<usize>()
        .map_err(|_| ValidationError::NotANumber(answer.trim().to_string()))?;
    batch_size(size)
}

/// Parses a column letter, ignoring case.
pub fn parse_column(answer: &str) -> Result<Column, ValidationError> {
    Column::from_letter(answer.trim())
        .ok_or_else(|| ValidationError::InvalidColumn(answer.trim().to_string()))
}

/// Parses a `y`/`n` answer, ignoring case. `yes` and `no` are accepted too.
pub fn parse_yes_no(answer: &str) -> Result<bool, ValidationError> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(ValidationError::InvalidAnswer(other.to_string())),
    }
}

/// Asks questions on `output` and reads one-line answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `question` and returns the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoInput` if the input is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<String, ValidationError> {
        write!(self.output, "> {}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ValidationError::NoInput);
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_batch_size(&mut self) -> Result<BatchCapacity, ValidationError> {
        let answer = self.ask(&format!(
            "How many files should be placed into a folder (please enter between {}-{})",
            MIN_CAPACITY, MAX_CAPACITY
        ))?;
        parse_batch_size(&answer)
    }

    pub fn ask_column(&mut self) -> Result<Column, ValidationError> {
        let answer = self.ask("What column is the data in (please enter between A-Z)")?;
        parse_column(&answer)
    }

    pub fn ask_has_header(&mut self, column: Column) -> Result<bool, ValidationError> {
        let answer = self.ask(&format!(
            "Does column {} have a header? (please enter Y/N)",
            column
        ))?;
        parse_yes_no(&answer)
    }

    pub fn ask_extension(&mut self) -> Result<String, ValidationError> {
        self.ask("What is the extension type of the files? (jpg, jpeg, png, mp3, etc)")
    }
}
