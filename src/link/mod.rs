//! Chain of responsibility links
//!
//! A [`Link`] is offered a command and either consumes it or hands it back
//! untouched so the next candidate can try. An [`EndLink`] is the refinement
//! that always consumes: it closes a chain into a total function.
//!
//! Composite links are plain owned structs ([`Chain`], [`Map`], [`Branch`],
//! ...), built once and then fed commands one by one.

pub mod combinators;
pub mod enum_link;
pub mod sink;

pub use combinators::*;
pub use enum_link::*;
pub use sink::*;

use std::sync::Arc;

use crate::either::Either;
use crate::error::Result;
use crate::middleware::{Metrics, Traced};

/// What a link did with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<C> {
    /// The command was fully handled; later candidates are not tried.
    Consumed,
    /// The command was declined and is handed back unchanged.
    Passed(C),
}

impl<C> Flow<C> {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Flow::Consumed)
    }

    pub fn into_passed(self) -> Option<C> {
        match self {
            Flow::Consumed => None,
            Flow::Passed(command) => Some(command),
        }
    }

    pub fn map<D, F: FnOnce(C) -> D>(self, f: F) -> Flow<D> {
        match self {
            Flow::Consumed => Flow::Consumed,
            Flow::Passed(command) => Flow::Passed(f(command)),
        }
    }
}

/// A processing step that may or may not consume a command.
pub trait Link<C> {
    /// Offer `command` to this link.
    ///
    /// A link that returns [`Flow::Passed`] must not have produced any effect
    /// attributable to the command.
    fn process(&self, command: C) -> Result<Flow<C>>;

    /// Try `self`, then `next` on the same command if `self` declined.
    ///
    /// The result is an [`EndLink`] whenever `next` is one.
    fn chain<N>(self, next: N) -> Chain<Self, N>
    where
        Self: Sized,
        N: Link<C>,
    {
        Chain::new(self, next)
    }

    /// Try `self`, then map the declined command and offer it to `next`.
    ///
    /// The mapper only borrows the command, so if `next` declines too the
    /// original value is handed back.
    fn map<D, F, N>(self, mapper: F, next: N) -> Map<Self, F, N>
    where
        Self: Sized,
        F: Fn(&C) -> D,
        N: Link<D>,
    {
        Map::new(self, mapper, next)
    }

    /// Close the chain with a plain sink that takes every declined command.
    fn end_chain<F>(self, sink: F) -> Chain<Self, Sink<F>>
    where
        Self: Sized,
        F: Fn(C),
    {
        Chain::new(self, Sink::new(sink))
    }

    /// Close the chain without a fallback: a command nobody consumes is a
    /// [`ChainError::Unconsumed`](crate::ChainError::Unconsumed) failure.
    fn seal(self) -> Sealed<Self>
    where
        Self: Sized,
    {
        Sealed::new(self)
    }

    fn traced(self, label: impl Into<String>) -> Traced<Self>
    where
        Self: Sized,
    {
        Traced::with_label(self, label)
    }

    fn metered(self) -> Metrics<Self>
    where
        Self: Sized,
    {
        Metrics::new(self)
    }
}

/// A link that consumes every command it receives.
///
/// Its [`Link::process`] always answers [`Flow::Consumed`] after running
/// [`EndLink::handle`].
pub trait EndLink<C>: Link<C> {
    fn handle(&self, command: C) -> Result<()>;
}

impl<C, L: Link<C> + ?Sized> Link<C> for &L {
    fn process(&self, command: C) -> Result<Flow<C>> {
        (**self).process(command)
    }
}

impl<C, L: EndLink<C> + ?Sized> EndLink<C> for &L {
    fn handle(&self, command: C) -> Result<()> {
        (**self).handle(command)
    }
}

impl<C, L: Link<C> + ?Sized> Link<C> for Box<L> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        (**self).process(command)
    }
}

impl<C, L: EndLink<C> + ?Sized> EndLink<C> for Box<L> {
    fn handle(&self, command: C) -> Result<()> {
        (**self).handle(command)
    }
}

impl<C, L: Link<C> + ?Sized> Link<C> for Arc<L> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        (**self).process(command)
    }
}

impl<C, L: EndLink<C> + ?Sized> EndLink<C> for Arc<L> {
    fn handle(&self, command: C) -> Result<()> {
        (**self).handle(command)
    }
}

/// A link built from a plain function.
pub struct FnLink<F> {
    f: F,
}

impl<C, F> Link<C> for FnLink<F>
where
    F: Fn(C) -> Result<Flow<C>>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        (self.f)(command)
    }
}

pub fn from_fn<C, F>(f: F) -> FnLink<F>
where
    F: Fn(C) -> Result<Flow<C>>,
{
    FnLink { f }
}

/// Consume and hand the command to `end` iff `predicate` holds.
pub fn of<C, P, E>(predicate: P, end: E) -> Guard<P, E>
where
    P: Fn(&C) -> bool,
    E: EndLink<C>,
{
    Guard::new(predicate, end)
}

/// Pure type-changing passthrough to a link; consumption mirrors `next`.
pub fn adapt<C, D, F, N>(mapper: F, next: N) -> Adapt<F, N>
where
    F: Fn(&C) -> D,
    N: Link<D>,
{
    Adapt::new(mapper, next)
}

/// Type-changing passthrough to an end link; always consumes.
pub fn convert<C, D, F, N>(mapper: F, next: N) -> Convert<F, N>
where
    F: Fn(C) -> D,
    N: EndLink<D>,
{
    Convert::new(mapper, next)
}

/// Route an `Either` command to the link matching its active arm.
pub fn either<L, R, LL, RL>(left: LL, right: RL) -> Branch<LL, RL>
where
    LL: Link<L>,
    RL: Link<R>,
{
    Branch::new(left, right)
}

/// Classify a command into an `Either` and route it to `left` or `right`.
pub fn split<C, L, R, F, LE, RE>(mapper: F, left: LE, right: RE) -> Convert<F, Branch<LE, RE>>
where
    F: Fn(C) -> Either<L, R>,
    LE: EndLink<L>,
    RE: EndLink<R>,
{
    Convert::new(mapper, Branch::new(left, right))
}

/// Terminal sinks built from plain functions.
pub mod end_link {
    use super::{Sink, TrySink};

    /// An end link that always consumes with `sink`.
    pub fn of<C, F: Fn(C)>(sink: F) -> Sink<F> {
        Sink::new(sink)
    }

    /// An end link that consumes with a fallible `sink`.
    pub fn try_of<C, E, F>(sink: F) -> TrySink<F>
    where
        F: Fn(C) -> std::result::Result<(), E>,
        E: Into<anyhow::Error>,
    {
        TrySink::new(sink)
    }
}
