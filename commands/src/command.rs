//! Command model for the dispatch pipelines

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A raw command as received: where it came from and its unparsed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub source: String,
    pub payload: String,
}

impl Command {
    pub fn new(source: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            payload: payload.into(),
        }
    }
}

/// A command whose payload parsed into a name and a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCommand {
    pub command: Command,
    pub name: String,
    pub text: String,
}

impl NamedCommand {
    pub fn new(command: Command, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            command,
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A command that failed somewhere along the way, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErroneousCommand {
    pub command: Command,
    pub error: String,
}

impl ErroneousCommand {
    pub fn new(command: Command, error: &ParseError) -> Self {
        Self {
            command,
            error: error.to_string(),
        }
    }
}

/// The command names the pipelines know how to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    A,
    B,
    C,
}

impl CommandType {
    pub const ALL: [CommandType; 3] = [CommandType::A, CommandType::B, CommandType::C];

    /// Look up a command type by name, `None` if no type has that name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "A" => Some(CommandType::A),
            "B" => Some(CommandType::B),
            "C" => Some(CommandType::C),
            _ => None,
        }
    }

    pub fn of(command: &NamedCommand) -> Option<Self> {
        Self::from_name(&command.name)
    }
}

impl FromStr for CommandType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseError::CommandType(s.to_string()))
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::A => "A",
            CommandType::B => "B",
            CommandType::C => "C",
        };
        f.write_str(name)
    }
}

/// A named command whose name resolved to a known [`CommandType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedCommand {
    pub named: NamedCommand,
    pub kind: CommandType,
}

impl TypedCommand {
    pub fn new(named: NamedCommand, kind: CommandType) -> Self {
        Self { named, kind }
    }

    pub fn kind(&self) -> CommandType {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.named.text
    }
}

impl TryFrom<NamedCommand> for TypedCommand {
    type Error = (NamedCommand, ParseError);

    fn try_from(named: NamedCommand) -> Result<Self, Self::Error> {
        match named.name.parse::<CommandType>() {
            Ok(kind) => Ok(TypedCommand::new(named, kind)),
            Err(e) => Err((named, e)),
        }
    }
}
