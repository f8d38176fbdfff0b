//! Command dispatch pipelines built on `handoff`
//!
//! Raw commands arrive as a source label plus a payload. Text sources
//! carry `[NAME]text`, JSON sources carry `{"name": ..., "text": ...}`.
//! The pipelines parse the payload, resolve the name to a
//! [`CommandType`] and write exactly one line per command to an
//! [`Output`], rejections included.

pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use command::{Command, CommandType, ErroneousCommand, NamedCommand, TypedCommand};
pub use config::PipelineConfig;
pub use error::ParseError;
pub use output::{Console, Logger, Output, Recording, TracingOutput};
pub use parser::{JsonParser, Parsed, Parser, Sources, TextParser};
pub use pipeline::{CommandChain, CommandHandler};
