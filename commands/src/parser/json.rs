// JSON object payloads: `{"name": "...", "text": "..."}`

use handoff::Either;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Parsed, Parser, Sources};
use crate::command::{Command, ErroneousCommand, NamedCommand};
use crate::error::ParseError;

#[derive(Debug, Deserialize)]
struct JsonPayload {
    name: String,
    text: String,
}

fn decode(payload: &str) -> Result<JsonPayload, ParseError> {
    // Go through a map first so only objects are accepted, not the
    // sequence form serde also allows for structs.
    let object: Map<String, Value> = serde_json::from_str(payload)?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

#[derive(Debug, Clone)]
pub struct JsonParser {
    sources: Sources,
}

impl JsonParser {
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }
}

impl Parser for JsonParser {
    fn accepts(&self, command: &Command) -> bool {
        self.sources.contains(&command.source)
    }

    fn parse(&self, command: Command) -> Parsed {
        match decode(&command.payload) {
            Ok(JsonPayload { name, text }) => Either::Right(NamedCommand::new(command, name, text)),
            Err(e) => Either::Left(ErroneousCommand::new(command, &e)),
        }
    }
}
