//! Payload parsers
//!
//! Each parser owns the set of sources it is responsible for and turns a
//! raw [`Command`] into either a [`NamedCommand`] or an
//! [`ErroneousCommand`] explaining why it could not.

pub mod json;
pub mod text;

pub use json::JsonParser;
pub use text::TextParser;

use handoff::Either;
use std::collections::BTreeSet;

use crate::command::{Command, ErroneousCommand, NamedCommand};

/// Outcome of parsing a payload.
pub type Parsed = Either<ErroneousCommand, NamedCommand>;

pub trait Parser {
    /// Whether `command` comes from one of this parser's sources.
    fn accepts(&self, command: &Command) -> bool;

    fn parse(&self, command: Command) -> Parsed;
}

/// Sources a parser is responsible for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources(BTreeSet<String>);

impl Sources {
    pub fn contains(&self, source: &str) -> bool {
        self.0.contains(source)
    }
}

impl<S: Into<String>> FromIterator<S> for Sources {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Sources(iter.into_iter().map(Into::into).collect())
    }
}
