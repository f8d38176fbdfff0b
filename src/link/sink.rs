// Terminal sinks: the leaves that turn a command into a side effect.

use tracing::trace;

use crate::error::{ChainError, Result};
use crate::link::{EndLink, Flow, Link};

/// A plain side-effecting function used as an end link.
#[derive(Clone)]
pub struct Sink<F> {
    sink: F,
}

impl<F> Sink<F> {
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<C, F: Fn(C)> Link<C> for Sink<F> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        self.handle(command)?;
        Ok(Flow::Consumed)
    }
}

impl<C, F: Fn(C)> EndLink<C> for Sink<F> {
    fn handle(&self, command: C) -> Result<()> {
        (self.sink)(command);
        Ok(())
    }
}

/// A fallible side-effecting function used as an end link.
///
/// The sink still counts as consuming the command; its error aborts the
/// invocation as [`ChainError::Sink`].
#[derive(Clone)]
pub struct TrySink<F> {
    sink: F,
}

impl<F> TrySink<F> {
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<C, E, F> Link<C> for TrySink<F>
where
    F: Fn(C) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        self.handle(command)?;
        Ok(Flow::Consumed)
    }
}

impl<C, E, F> EndLink<C> for TrySink<F>
where
    F: Fn(C) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    fn handle(&self, command: C) -> Result<()> {
        (self.sink)(command).map_err(|e| ChainError::Sink(e.into()))
    }
}

/// Drops every command it receives.
///
/// Ending a chain with `Discard` is how "unmatched input is ignored" is
/// spelled out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl<C> Link<C> for Discard {
    fn process(&self, command: C) -> Result<Flow<C>> {
        self.handle(command)?;
        Ok(Flow::Consumed)
    }
}

impl<C> EndLink<C> for Discard {
    fn handle(&self, _command: C) -> Result<()> {
        trace!("discard: dropping command");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::end_link;

    #[test]
    fn test_try_sink_surfaces_failure() {
        let sink = end_link::try_of(|n: i32| {
            if n < 0 {
                anyhow::bail!("negative input {}", n);
            }
            Ok(())
        });

        assert!(sink.handle(1).is_ok());
        match sink.handle(-2) {
            Err(ChainError::Sink(e)) => assert_eq!(e.to_string(), "negative input -2"),
            other => panic!("expected sink failure, got {:?}", other),
        }
    }

    #[test]
    fn test_discard_consumes_silently() {
        assert!(Link::<&str>::process(&Discard, "anything").unwrap().is_consumed());
    }
}
