//! Typed errors for parsing and evaluation.
//!
//! Every failure in the interpreter is one of these variants; all of them
//! are fatal to the current `play` invocation. The driver reports them, the
//! core's only obligation on the error path is to release intermediates.

use std::error::Error as StdError;
use std::fmt;

use crate::value::Integer;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while parsing or running a Knight program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Evaluation errors
    UndefinedVariable {
        name: String,
    },
    InvalidConversion {
        from: &'static str,
        to: &'static str,
    },
    InvalidType {
        func: char,
        got: &'static str,
    },
    NotAnAsciiInteger {
        value: Integer,
    },
    EmptyString,
    DomainError {
        message: &'static str,
    },

    // Arithmetic errors
    DivisionByZero,
    NegativeDenominator,
    Overflow,

    // Substring errors
    OutOfBounds {
        index: usize,
        length: usize,
    },

    // Parse errors
    EndOfStream,
    StringDoesntEnd,
    UnknownTokenStart {
        byte: u8,
    },
    IntegerLiteralOverflow,

    // Host-propagated failures
    Io {
        message: String,
    },
}

impl Error {
    /// Create an undefined variable error.
    pub fn undefined_variable(name: &[u8]) -> Self {
        Error::UndefinedVariable {
            name: String::from_utf8_lossy(name).into_owned(),
        }
    }

    /// Create an invalid conversion error.
    pub fn invalid_conversion(from: &'static str, to: &'static str) -> Self {
        Error::InvalidConversion { from, to }
    }

    /// Create an invalid type error for the named operator.
    pub fn invalid_type(func: char, got: &'static str) -> Self {
        Error::InvalidType { func, got }
    }

    /// Create a domain error.
    pub fn domain(message: &'static str) -> Self {
        Error::DomainError { message }
    }

    /// Create an out of bounds error.
    pub fn out_of_bounds(index: usize, length: usize) -> Self {
        Error::OutOfBounds { index, length }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> String {
        match self {
            Error::UndefinedVariable { name } => {
                format!("undefined variable '{}'", name)
            }
            Error::InvalidConversion { from, to } => {
                format!("cannot convert {} to {}", from, to)
            }
            Error::InvalidType { func, got } => {
                format!("invalid type for '{}': {}", func, got)
            }
            Error::NotAnAsciiInteger { value } => {
                format!("{} is not an ascii codepoint", value)
            }
            Error::EmptyString => "empty string has no first character".to_string(),
            Error::DomainError { message } => format!("domain error: {}", message),
            Error::DivisionByZero => "division by zero".to_string(),
            Error::NegativeDenominator => "modulo by a negative denominator".to_string(),
            Error::Overflow => "integer overflow".to_string(),
            Error::OutOfBounds { index, length } => {
                format!("index {} out of bounds for length {}", index, length)
            }
            Error::EndOfStream => "unexpected end of input".to_string(),
            Error::StringDoesntEnd => "unterminated string literal".to_string(),
            Error::UnknownTokenStart { byte } => {
                format!("unknown token start {:?}", *byte as char)
            }
            Error::IntegerLiteralOverflow => "integer literal overflows".to_string(),
            Error::Io { message } => format!("io error: {}", message),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl StdError for Error {}

/// I/O failures are carried as their message so `Error` stays comparable.
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}
