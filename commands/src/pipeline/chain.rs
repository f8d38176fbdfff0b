// Link-style pipeline: try the text link, then the JSON link, then fall
// back to reporting the unknown source.

use handoff::link::{self, EndLink, EnumLink, Link};
use std::sync::Arc;

use crate::command::{Command, CommandType, ErroneousCommand, NamedCommand, TypedCommand};
use crate::config::PipelineConfig;
use crate::output::{Logger, Output};
use crate::parser::{JsonParser, Parser, TextParser};

type Processor = Box<dyn EndLink<Command> + Send + Sync>;

pub struct CommandChain {
    processor: Processor,
}

impl CommandChain {
    pub fn new<O>(config: &PipelineConfig, output: O) -> Self
    where
        O: Output + Clone + 'static,
    {
        let erroneous = Arc::new(link::convert(
            |c: ErroneousCommand| c.error,
            Logger::new("erroneous command : ", output.clone()),
        ));

        let mut named = EnumLink::partial(CommandType::of);
        for kind in CommandType::ALL {
            named = named.with(kind, typed_logger(kind, output.clone()));
        }
        let named = Arc::new(named.otherwise(link::convert(
            |c: NamedCommand| c.name,
            Logger::new("unknown command name : ", output.clone()),
        )));

        let unknown_source = link::convert(|c: Command| c.source, Logger::new("unknown command source : ", output));

        let processor = source_link(TextParser::new(config.text()), Arc::clone(&erroneous), Arc::clone(&named))
            .chain(source_link(JsonParser::new(config.json()), erroneous, named))
            .chain(unknown_source)
            .traced("command chain");

        Self {
            processor: Box::new(processor),
        }
    }

    pub fn process(&self, source: &str, payload: &str) -> handoff::Result<()> {
        self.processor.handle(Command::new(source, payload))
    }
}

impl Default for CommandChain {
    fn default() -> Self {
        Self::new(&PipelineConfig::default(), crate::output::Console)
    }
}

/// Consumes the commands `parser` accepts, routing the parse result to
/// `erroneous` or `named`.
fn source_link<P, L, R>(parser: P, erroneous: L, named: R) -> impl Link<Command> + Send + Sync + 'static
where
    P: Parser + Clone + Send + Sync + 'static,
    L: EndLink<ErroneousCommand> + Send + Sync + 'static,
    R: EndLink<NamedCommand> + Send + Sync + 'static,
{
    let classify = parser.clone();
    link::of(
        move |c: &Command| parser.accepts(c),
        link::split(move |c: Command| classify.parse(c), erroneous, named),
    )
}

fn typed_logger<O>(kind: CommandType, output: O) -> impl EndLink<NamedCommand> + Send + Sync + 'static
where
    O: Output + 'static,
{
    link::convert(
        move |named: NamedCommand| TypedCommand::new(named, kind),
        link::convert(|typed: TypedCommand| typed.named.text, Logger::new(format!("{} : ", kind), output)),
    )
}
