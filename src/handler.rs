//! Total handlers
//!
//! Handlers are the always-consuming half of the algebra: every function
//! here returns an [`EndLink`], built from the same combinators the
//! partial [`Link`] API uses. A handler tree branches with [`condition`],
//! [`either`] and [`fan`] instead of trying candidates in turn.

use std::fmt;

use tracing::warn;

use crate::error::{ChainError, Result};
use crate::link::{Branch, BoxedEndLink, Chain, Convert, DispatchTable, EndLink, Flow, Guard, Link, Sink, Tag, TrySink};

/// Runs `on_true` or `on_false`, never both.
pub type Condition<P, T, F> = Chain<Guard<P, T>, F>;

/// Leaf handler that always runs `sink`.
pub fn terminal<C, F: Fn(C)>(sink: F) -> Sink<F> {
    Sink::new(sink)
}

/// Leaf handler running a fallible `sink`.
pub fn try_terminal<C, E, F>(sink: F) -> TrySink<F>
where
    F: Fn(C) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    TrySink::new(sink)
}

/// Runs exactly one of the two handlers depending on `predicate`.
pub fn condition<C, P, T, F>(predicate: P, on_true: T, on_false: F) -> Condition<P, T, F>
where
    P: Fn(&C) -> bool,
    T: EndLink<C>,
    F: EndLink<C>,
{
    Chain::new(Guard::new(predicate, on_true), on_false)
}

/// Runs the handler matching the active arm of an `Either` command.
pub fn either<L, R, LH, RH>(left: LH, right: RH) -> Branch<LH, RH>
where
    LH: EndLink<L>,
    RH: EndLink<R>,
{
    Branch::new(left, right)
}

/// Transforms the command and hands it to `next`.
pub fn map<C, D, F, N>(mapper: F, next: N) -> Convert<F, N>
where
    F: Fn(C) -> D,
    N: EndLink<D>,
{
    Convert::new(mapper, next)
}

/// Dispatches on a tag extracted from the command.
///
/// The table must cover every tag the extractor can produce: a missing
/// entry fails the invocation with [`ChainError::UnmappedTag`].
pub fn fan<C, E, F, I>(extractor: F, table: I) -> Fan<C, E, F>
where
    E: Tag,
    F: Fn(&C) -> E,
    I: IntoIterator<Item = (E, BoxedEndLink<C>)>,
{
    Fan {
        extractor,
        table: table.into_iter().collect(),
    }
}

/// Total enum-keyed dispatch, see [`fan`].
pub struct Fan<C, E, F> {
    extractor: F,
    table: DispatchTable<C, E>,
}

impl<C, E: Tag, F> Fan<C, E, F> {
    pub fn covers(&self, tag: &E) -> bool {
        self.table.contains(tag)
    }
}

impl<C, E: Tag, F> fmt::Debug for Fan<C, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fan").field("table", &self.table).finish_non_exhaustive()
    }
}

impl<C, E: Tag, F: Fn(&C) -> E> Link<C> for Fan<C, E, F> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        self.handle(command)?;
        Ok(Flow::Consumed)
    }
}

impl<C, E: Tag, F: Fn(&C) -> E> EndLink<C> for Fan<C, E, F> {
    fn handle(&self, command: C) -> Result<()> {
        let tag = (self.extractor)(&command);
        match self.table.route(&tag, command)? {
            Flow::Consumed => Ok(()),
            Flow::Passed(_) => {
                warn!(?tag, "fan: table does not cover tag");
                Err(ChainError::UnmappedTag(format!("{:?}", tag)))
            }
        }
    }
}

/// Convenience for building a fan table entry.
pub fn entry<C, E, H>(tag: E, handler: H) -> (E, BoxedEndLink<C>)
where
    H: EndLink<C> + Send + Sync + 'static,
{
    (tag, Box::new(handler))
}
