use crate::runtime::data_structures::value::Cell;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

pub type Result<T> = std::result::Result<T, ForthError>;

/// Any error raised while interpreting user input.
///
/// These are diagnostics rather than failures.  The interpreter reports them on the error
/// channel and carries on with the next token, with one exception: an unknown word halts the
/// current interpret call so the rest of the line does not cascade into further errors.
#[derive(Clone, PartialEq, Eq)]
pub enum ForthError {
    /// An operation needed more values than the data stack holds.  The stack is left exactly
    /// as it was found.
    StackUnderflow {
        word: String,
        needed: usize,
        available: usize,
    },

    /// A token at value position is not a literal, variable, constant, or user word.
    BadWord(String),

    /// A structured word never found its terminator, or a stray terminator appeared at value
    /// position.
    Syntax(String),

    /// A definition used an empty, numeric, or already-taken name.
    BadDef(String),

    /// A heap access below the base or beyond the frontier.
    BadAddress(Cell),

    /// A DO loop was given a negative bound or a start beyond the limit.
    BadLoop { limit: Cell, start: Cell },

    /// A file given to load does not exist.
    BadLoad(String),

    /// Interpretation of a nested body already reported an unknown word.  This variant only
    /// carries the halt outward, it is never printed.
    Halted,
}

impl Error for ForthError {}

impl ForthError {
    /// The fixed bracketed tag this diagnostic is labelled with.
    pub fn tag(&self) -> &'static str {
        match self {
            ForthError::StackUnderflow { .. } => "[STACK UNDERFLOW]",
            ForthError::BadWord(_) => "[BAD WORD]",
            ForthError::Syntax(_) => "[SYNTAX]",
            ForthError::BadDef(_) => "[BAD DEF]",
            ForthError::BadAddress(_) => "[BAD ADDRESS]",
            ForthError::BadLoop { .. } => "[BAD LOOP]",
            ForthError::BadLoad(_) => "[BAD LOAD]",
            ForthError::Halted => "",
        }
    }

    /// The freeform part of the diagnostic, interpolating the offending word or value.
    pub fn message(&self) -> String {
        match self {
            ForthError::StackUnderflow {
                word,
                needed,
                available,
            } => format!(
                "'{}' requires {} value(s), but the stack only has {}",
                word, needed, available
            ),

            ForthError::BadWord(word) => format!("Unknown word '{}'", word),
            ForthError::Syntax(message) => message.clone(),
            ForthError::BadDef(message) => message.clone(),
            ForthError::BadAddress(address) => format!("Invalid heap address {}", address),

            ForthError::BadLoop { limit, start } => {
                format!("Invalid loop bounds {} to {}", start, limit)
            }

            ForthError::BadLoad(path) => format!("File '{}' not found", path),
            ForthError::Halted => "Interpretation halted".to_string(),
        }
    }

    /// Does this error stop the current interpret call?  Only the unknown-word family does,
    /// every other diagnostic is local to the operation that raised it.
    pub fn halts(&self) -> bool {
        matches!(self, ForthError::BadWord(_) | ForthError::Halted)
    }

    /// The silent halt carrier has already been reported where it was raised.
    pub fn is_silent(&self) -> bool {
        matches!(self, ForthError::Halted)
    }
}

/// Render the diagnostic as the user sees it, minus the color applied by the console.
impl Display for ForthError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}", self.tag(), self.message())
    }
}

impl Debug for ForthError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
