//! Error: Crate-wide error type.
//!
//! Decoding, canvas writes and layout never fail. Errors only come from
//! building the sequence table, parsing key specs and terminal I/O.

use thiserror::Error;

/// Failure to parse a `"[modifier ...] name"` key description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
    /// The key spec was empty or only whitespace.
    #[error("empty key spec")]
    Empty,

    /// A modifier word was not one of ctrl/control, alt/meta, shift.
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    /// The key name is neither a single character nor a known symbolic name.
    #[error("unknown key name `{0}`")]
    UnknownKey(String),
}

/// Errors produced by gridloom.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal device I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A key spec could not be parsed.
    #[error("invalid key spec: {0}")]
    KeySpec(#[from] KeySpecError),

    /// The sequence table maps the same bytes twice.
    #[error("duplicate input sequence {sequence:?}")]
    DuplicateSequence {
        /// The offending raw byte sequence.
        sequence: Vec<u8>,
    },

    /// The terminal reader thread went away.
    #[error("terminal input closed")]
    InputClosed,
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
