// Errors raised while a command travels through a chain
//
// Business-level failures (a payload that does not parse, an unknown name)
// are data: they travel as the left arm of an `Either` and end in an
// ordinary sink. The variants below are contract violations and sink
// failures, which abort the current invocation.

use std::fmt;
use thiserror::Error;

/// Which arm of an [`Either`](crate::Either) is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Errors that can occur while processing a command
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Either is a {found}, not a {expected}")]
    WrongArm { expected: Side, found: Side },

    #[error("No handler registered for tag {0}")]
    UnmappedTag(String),

    #[error("Command could not be classified: {0}")]
    Classification(String),

    #[error("Command reached the end of a sealed chain without being consumed")]
    Unconsumed,

    #[error("Sink failed: {0}")]
    Sink(#[from] anyhow::Error),
}

/// Result type for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;
