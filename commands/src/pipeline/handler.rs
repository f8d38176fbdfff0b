// Handler-style pipeline: a tree of total handlers branching on source,
// parse result and command type.

use handoff::handler::{self, entry};
use handoff::{EndLink, Either, Link};
use std::sync::Arc;

use crate::command::{Command, CommandType, ErroneousCommand, NamedCommand, TypedCommand};
use crate::config::PipelineConfig;
use crate::output::Output;
use crate::parser::{JsonParser, Parser, TextParser};

type Processor = Box<dyn EndLink<Command> + Send + Sync>;

pub struct CommandHandler {
    handler: Processor,
}

impl CommandHandler {
    pub fn new<O>(config: &PipelineConfig, output: O) -> Self
    where
        O: Output + Clone + 'static,
    {
        let erroneous = Arc::new(handler::terminal({
            let output = output.clone();
            move |c: ErroneousCommand| output.emit(&format!("Command rejected, {}", c.error))
        }));

        let typed = handler::fan(
            TypedCommand::kind,
            CommandType::ALL.map(|kind| {
                let output = output.clone();
                entry(kind, handler::terminal(move |c: TypedCommand| {
                    output.emit(&format!("Command {} {}", kind, c.text()))
                }))
            }),
        );
        let named = Arc::new(handler::map(type_command, handler::either(Arc::clone(&erroneous), typed)));

        let unknown_source = handler::terminal(move |c: Command| {
            output.emit(&format!("Command rejected, unknown source {}", c.source))
        });

        let text = TextParser::new(config.text());
        let json = JsonParser::new(config.json());
        let json_handler = handler::condition(
            {
                let json = json.clone();
                move |c: &Command| json.accepts(c)
            },
            handler::map(
                move |c: Command| json.parse(c),
                handler::either(Arc::clone(&erroneous), Arc::clone(&named)),
            ),
            unknown_source,
        );
        let root = handler::condition(
            {
                let text = text.clone();
                move |c: &Command| text.accepts(c)
            },
            handler::map(move |c: Command| text.parse(c), handler::either(erroneous, named)),
            json_handler,
        );

        Self {
            handler: Box::new(root.traced("command handler")),
        }
    }

    pub fn handle(&self, source: &str, payload: &str) -> handoff::Result<()> {
        self.handler.handle(Command::new(source, payload))
    }
}

fn type_command(named: NamedCommand) -> Either<ErroneousCommand, TypedCommand> {
    TypedCommand::try_from(named)
        .map_err(|(named, error)| ErroneousCommand::new(named.command, &error))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Recording;

    fn handler() -> (CommandHandler, Recording) {
        let recording = Recording::new();
        let config = PipelineConfig::new(["text1", "text2"], ["json1", "json2"]);
        (CommandHandler::new(&config, recording.clone()), recording)
    }

    #[test]
    fn test_typed_commands() {
        let (handler, recording) = handler();
        handler.handle("text2", "[B]hello").unwrap();
        handler.handle("json1", r#"{"name":"C","text":"world"}"#).unwrap();
        assert_eq!(recording.take(), vec!["Command B hello", "Command C world"]);
    }

    #[test]
    fn test_rejections() {
        let (handler, recording) = handler();
        handler.handle("text1", "[Z]hello").unwrap();
        handler.handle("text1", "hello").unwrap();
        handler.handle("smoke", "[A]x").unwrap();
        assert_eq!(
            recording.take(),
            vec![
                "Command rejected, Illegal command type Z",
                "Command rejected, Invalid text text1",
                "Command rejected, unknown source smoke",
            ]
        );
    }
}
