//! Command line tokenizing and parsing
//!
//! Parsing is lazy: [`Command::parse`] only looks at the command word, and
//! the arguments of `run`/`move` are decoded on demand through
//! [`MoveArgs`]. This lets the dispatcher check queue capacity before it
//! spends any effort on (or reports errors from) the arguments.

use crate::axis::{Axis, Direction};
use crate::number::parse_uint;

/// Characters that separate tokens
pub const DELIMITERS: [char; 3] = [':', ',', ';'];

/// Restartable token iterator over a command line
///
/// Consecutive delimiters produce no empty tokens. Cloning the iterator
/// captures its position.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    /// Tokenize a full command line
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start_matches(DELIMITERS);
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }

        match trimmed.find(DELIMITERS) {
            Some(end) => {
                self.rest = &trimmed[end..];
                Some(&trimmed[..end])
            }
            None => {
                self.rest = "";
                Some(trimmed)
            }
        }
    }
}

/// Argument validation failures for `run` and `move`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgError {
    /// Missing axis token or unknown axis letter
    InvalidDeviceId,
    /// Step count malformed, zero, or too large
    InvalidSteps,
    /// Speed missing, malformed, zero, or too large
    InvalidSpeed,
}

/// One decoded `<axis><[-]steps>,<speed>` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMove {
    pub axis: Axis,
    pub direction: Direction,
    pub steps: u32,
    pub speed: u16,
}

/// Lazily decoded move groups
///
/// Yields one `Result` per group. The first error ends the sequence.
#[derive(Debug, Clone)]
pub struct MoveArgs<'a> {
    tokens: Tokens<'a>,
    failed: bool,
}

impl<'a> MoveArgs<'a> {
    fn new(tokens: Tokens<'a>) -> Self {
        Self {
            tokens,
            failed: false,
        }
    }

    fn parse_group(&mut self, head: &str) -> Result<AxisMove, ArgError> {
        let mut chars = head.chars();
        let axis = chars
            .next()
            .and_then(Axis::from_letter)
            .ok_or(ArgError::InvalidDeviceId)?;

        let digits = chars.as_str();
        let (direction, digits) = match digits.strip_prefix('-') {
            Some(rest) => (Direction::Reverse, rest),
            None => (Direction::Forward, digits),
        };

        let steps: u32 = parse_uint(digits).map_err(|_| ArgError::InvalidSteps)?;
        if steps == 0 {
            return Err(ArgError::InvalidSteps);
        }

        let speed: u16 = self
            .tokens
            .next()
            .ok_or(ArgError::InvalidSpeed)
            .and_then(|t| parse_uint(t).map_err(|_| ArgError::InvalidSpeed))?;
        if speed == 0 {
            return Err(ArgError::InvalidSpeed);
        }

        Ok(AxisMove {
            axis,
            direction,
            steps,
            speed,
        })
    }
}

impl<'a> Iterator for MoveArgs<'a> {
    type Item = Result<AxisMove, ArgError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let head = self.tokens.next()?;
        let result = self.parse_group(head);
        self.failed = result.is_err();
        Some(result)
    }
}

/// A command line, classified by its first token
#[derive(Debug, Clone)]
pub enum Command<'a> {
    /// `version`
    Version,
    /// `setaddr:<n>`; `None` when the argument is missing or not a number
    SetAddress(Option<u16>),
    /// `status`
    Status,
    /// `run:<groups>`
    Run(MoveArgs<'a>),
    /// `move:<group>`
    Move(MoveArgs<'a>),
    /// `pause`
    Pause,
    /// `resume`
    Resume,
    /// `reset`
    Reset,
    /// Anything else, including an empty line
    Unknown,
}

impl<'a> Command<'a> {
    /// Classify a command line
    pub fn parse(line: &'a str) -> Self {
        let mut tokens = Tokens::new(line);
        let Some(word) = tokens.next() else {
            return Command::Unknown;
        };

        match word {
            "version" => Command::Version,
            "setaddr" => Command::SetAddress(tokens.next().and_then(|t| parse_uint(t).ok())),
            "status" => Command::Status,
            "run" => Command::Run(MoveArgs::new(tokens)),
            "move" => Command::Move(MoveArgs::new(tokens)),
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "reset" => Command::Reset,
            _ => Command::Unknown,
        }
    }

    /// Classify raw message bytes; non-UTF-8 input is `Unknown`
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        match core::str::from_utf8(bytes) {
            Ok(line) => Self::parse(line),
            Err(_) => Command::Unknown,
        }
    }

    /// Command word for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Version => "version",
            Command::SetAddress(_) => "setaddr",
            Command::Status => "status",
            Command::Run(_) => "run",
            Command::Move(_) => "move",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Reset => "reset",
            Command::Unknown => "unknown",
        }
    }
}
