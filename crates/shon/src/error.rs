use thiserror::Error;

use crate::decode::Kind;

/// The token stream does not follow the SHON grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a value")]
    ExpectedValue,

    #[error("expected a value, got \"]\"")]
    UnexpectedClose,

    #[error("expected a string after \"--\"")]
    ExpectedString,

    #[error("unexpected flag {0:?}")]
    UnknownFlag(String),

    #[error("expected an array item or \"]\"")]
    UnterminatedArray,

    #[error("expected an object key or \"]\"")]
    UnterminatedObject,

    #[error("expected object key, got {0:?}")]
    ExpectedKey(String),
}

/// Why a numeric literal was rejected for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberCause {
    Invalid,
    OutOfRange,
}

impl core::fmt::Display for NumberCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NumberCause::Invalid => f.write_str("invalid syntax"),
            NumberCause::OutOfRange => f.write_str("value out of range"),
        }
    }
}

/// A well-formed token stream that cannot fill the requested destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected {expected}, got {found}")]
    Mismatch { expected: String, found: Kind },

    #[error("cannot assign null to {0}")]
    Null(String),

    #[error("bad {target}: parsing {text:?}: {cause}")]
    Number {
        target: String,
        text: String,
        cause: NumberCause,
    },

    #[error("bad number {0:?}")]
    BadNumber(String),

    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("too many values: at most {capacity} expected")]
    TooMany { capacity: usize },

    #[error("unsupported map key type {0}")]
    UnsupportedKey(String),

    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("unexpected trailing arguments: {args:?}")]
    TrailingArgs { args: Vec<String> },
}

impl Error {
    pub(crate) fn mismatch(expected: impl core::fmt::Display, found: Kind) -> Self {
        Error::Decode(DecodeError::Mismatch {
            expected: expected.to_string(),
            found,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: core::fmt::Display>(msg: T) -> Self {
        Error::Decode(DecodeError::Custom(msg.to_string()))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
