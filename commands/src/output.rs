// Output channels for the pipelines
//
// Every pipeline invocation ends in exactly one line on an `Output`, for
// successes and rejections alike.

use handoff::{EndLink, Flow, Link, Result};
use std::sync::{Arc, Mutex, PoisonError};

/// A line-oriented side-effect channel.
pub trait Output: Send + Sync {
    fn emit(&self, line: &str);
}

impl<O: Output + ?Sized> Output for Arc<O> {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}

/// Prints lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Output for Console {
    fn emit(&self, line: &str) {
        println!("{}", line);
    }
}

/// Emits lines as `info` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOutput;

impl Output for TracingOutput {
    fn emit(&self, line: &str) {
        tracing::info!(target: "handoff_commands::output", "{}", line);
    }
}

/// Captures lines in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Take the captured lines, leaving the buffer empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Output for Recording {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

/// End link writing `<prefix>'<text>'` to an output.
#[derive(Debug, Clone)]
pub struct Logger<O> {
    prefix: String,
    output: O,
}

impl<O: Output> Logger<O> {
    pub fn new(prefix: impl Into<String>, output: O) -> Self {
        Self {
            prefix: prefix.into(),
            output,
        }
    }
}

impl<O: Output> Link<String> for Logger<O> {
    fn process(&self, text: String) -> Result<Flow<String>> {
        self.handle(text)?;
        Ok(Flow::Consumed)
    }
}

impl<O: Output> EndLink<String> for Logger<O> {
    fn handle(&self, text: String) -> Result<()> {
        self.output.emit(&format!("{}'{}'", self.prefix, text));
        Ok(())
    }
}
