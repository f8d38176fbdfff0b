// Bracket-tagged text payloads: `[NAME]text`

use handoff::Either;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use super::{Parsed, Parser, Sources};
use crate::command::{Command, ErroneousCommand, NamedCommand};
use crate::error::ParseError;

// The text may not contain a line terminator of any kind, not only `\n`.
const TEXT_PATTERN: &str = r"^\[([A-Z]*)\]([^\n\r\u{85}\u{2028}\u{2029}]*)$";

// A constant pattern, covered by the tests below.
#[allow(clippy::expect_used)]
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TEXT_PATTERN).expect("text command pattern is valid"))
}

#[derive(Debug, Clone)]
pub struct TextParser {
    sources: Sources,
}

impl TextParser {
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }
}

impl Parser for TextParser {
    fn accepts(&self, command: &Command) -> bool {
        self.sources.contains(&command.source)
    }

    fn parse(&self, command: Command) -> Parsed {
        let fields = pattern()
            .captures(&command.payload)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()));

        match fields {
            Some((name, text)) => {
                trace!(%name, "text parser: parsed");
                Either::Right(NamedCommand::new(command, name, text))
            }
            None => {
                let error = ParseError::Text {
                    origin: command.source.clone(),
                };
                Either::Left(ErroneousCommand::new(command, &error))
            }
        }
    }
}
