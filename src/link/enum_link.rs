// Discrete-tag dispatch
//
// A command is classified into a tag and routed to the end link registered
// for that tag. A lookup miss always hands the command back; whether that
// means "declined" or "hard failure" depends on the enclosing stage
// (`EnumLink` declines, `handler::Fan` fails).

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{ChainError, Result};
use crate::link::{Chain, EndLink, Flow, Link};

/// Tags are usually a small fieldless enum owned by the application.
pub trait Tag: Copy + Eq + Hash + Debug {}
impl<T: Copy + Eq + Hash + Debug> Tag for T {}

/// Boxed terminal stage stored in a dispatch table.
pub type BoxedEndLink<C> = Box<dyn EndLink<C> + Send + Sync>;

/// Owned mapping from tag to terminal stage.
///
/// Entries are boxed as `Send + Sync + 'static`, so a stage that borrows
/// local state or captures a `RefCell` cannot be registered. Share such
/// state through `Arc<Mutex<_>>` instead.
pub struct DispatchTable<C, E> {
    entries: HashMap<E, BoxedEndLink<C>>,
}

impl<C, E: Tag> DispatchTable<C, E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `link` for `tag`, returning the stage it replaces.
    ///
    /// Registration is last-write-wins.
    pub fn insert(&mut self, tag: E, link: BoxedEndLink<C>) -> Option<BoxedEndLink<C>> {
        let previous = self.entries.insert(tag, link);
        if previous.is_some() {
            debug!(?tag, "dispatch table: replacing handler");
        }
        previous
    }

    pub fn get(&self, tag: &E) -> Option<&(dyn EndLink<C> + Send + Sync)> {
        self.entries.get(tag).map(|link| link.as_ref())
    }

    pub fn contains(&self, tag: &E) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand `command` to the stage registered for `tag`, or back to the
    /// caller if there is none.
    pub fn route(&self, tag: &E, command: C) -> Result<Flow<C>> {
        match self.get(tag) {
            Some(link) => {
                link.handle(command)?;
                Ok(Flow::Consumed)
            }
            None => {
                trace!(?tag, "dispatch table: no handler");
                Ok(Flow::Passed(command))
            }
        }
    }
}

impl<C, E: Tag> Default for DispatchTable<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E: Tag> Debug for DispatchTable<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl<C, E: Tag> FromIterator<(E, BoxedEndLink<C>)> for DispatchTable<C, E> {
    fn from_iter<I: IntoIterator<Item = (E, BoxedEndLink<C>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (tag, link) in iter {
            table.insert(tag, link);
        }
        table
    }
}

/// Classifies a command into a tag.
///
/// `Ok(None)` means "unmapped" and never matches a table entry; `Err`
/// aborts the invocation.
pub trait Extractor<C, E> {
    fn extract(&self, command: &C) -> Result<Option<E>>;
}

/// Every command maps to some tag.
pub struct Total<F>(pub F);

/// Unclassifiable commands map to `None`.
pub struct Partial<F>(pub F);

/// Unclassifiable commands are a hard failure.
pub struct Fallible<F>(pub F);

impl<C, E, F: Fn(&C) -> E> Extractor<C, E> for Total<F> {
    fn extract(&self, command: &C) -> Result<Option<E>> {
        Ok(Some((self.0)(command)))
    }
}

impl<C, E, F: Fn(&C) -> Option<E>> Extractor<C, E> for Partial<F> {
    fn extract(&self, command: &C) -> Result<Option<E>> {
        Ok((self.0)(command))
    }
}

impl<C, E, X, F> Extractor<C, E> for Fallible<F>
where
    F: Fn(&C) -> std::result::Result<E, X>,
    X: Display,
{
    fn extract(&self, command: &C) -> Result<Option<E>> {
        (self.0)(command)
            .map(Some)
            .map_err(|e| ChainError::Classification(e.to_string()))
    }
}

/// A link that fans a command out to one of several end links keyed by a
/// tag extracted from it.
///
/// Commands whose tag has no registered link are declined, so an
/// `EnumLink` is closed into an [`EndLink`] with [`EnumLink::otherwise`].
///
/// # Example
///
/// ```
/// use handoff::link::{end_link, EndLink, EnumLink};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Parity { Even, Odd }
///
/// let link = EnumLink::new(|n: &u32| if n % 2 == 0 { Parity::Even } else { Parity::Odd })
///     .with(Parity::Even, end_link::of(|n: u32| println!("even {}", n)))
///     .otherwise(end_link::of(|n: u32| println!("something else {}", n)));
/// link.handle(4).unwrap();
/// ```
pub struct EnumLink<C, E, X> {
    extractor: X,
    table: DispatchTable<C, E>,
}

impl<C, E: Tag, F: Fn(&C) -> E> EnumLink<C, E, Total<F>> {
    pub fn new(extractor: F) -> Self {
        Self::with_extractor(Total(extractor))
    }
}

impl<C, E: Tag, F: Fn(&C) -> Option<E>> EnumLink<C, E, Partial<F>> {
    pub fn partial(extractor: F) -> Self {
        Self::with_extractor(Partial(extractor))
    }
}

impl<C, E: Tag, X: Display, F: Fn(&C) -> std::result::Result<E, X>> EnumLink<C, E, Fallible<F>> {
    pub fn fallible(extractor: F) -> Self {
        Self::with_extractor(Fallible(extractor))
    }
}

impl<C, E: Tag, X: Extractor<C, E>> EnumLink<C, E, X> {
    pub fn with_extractor(extractor: X) -> Self {
        Self {
            extractor,
            table: DispatchTable::new(),
        }
    }

    /// Register `link` for `tag`. A second registration for the same tag
    /// replaces the first.
    ///
    /// `link` is stored in a [`DispatchTable`] and must be
    /// `Send + Sync + 'static`, unlike the stages other combinators accept.
    pub fn with<L>(mut self, tag: E, link: L) -> Self
    where
        L: EndLink<C> + Send + Sync + 'static,
    {
        self.table.insert(tag, Box::new(link));
        self
    }

    /// Close the link with a fallback for unregistered tags.
    pub fn otherwise<L: EndLink<C>>(self, fallback: L) -> Chain<Self, L> {
        self.chain(fallback)
    }

    pub fn contains(&self, tag: &E) -> bool {
        self.table.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<C, E: Tag, X: Extractor<C, E>> Link<C> for EnumLink<C, E, X> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        match self.extractor.extract(&command)? {
            Some(tag) => self.table.route(&tag, command),
            None => {
                trace!("enum link: command unmapped");
                Ok(Flow::Passed(command))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::end_link;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Small,
        Large,
        Huge,
    }

    fn kind(n: &u32) -> Kind {
        match *n {
            0..=9 => Kind::Small,
            10..=99 => Kind::Large,
            _ => Kind::Huge,
        }
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, prefix: &'static str) -> impl EndLink<u32> + Send + Sync {
        let log = Arc::clone(log);
        end_link::of(move |n: u32| log.lock().unwrap().push(format!("{} {}", prefix, n)))
    }

    #[test]
    fn test_registered_tag_is_consumed() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let link = EnumLink::new(kind).with(Kind::Small, recorder(&log, "small"));

        assert!(link.process(3).unwrap().is_consumed());
        assert_eq!(*log.lock().unwrap(), vec!["small 3"]);
    }

    #[test]
    fn test_absent_tag_is_declined() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let link = EnumLink::new(kind).with(Kind::Small, recorder(&log, "small"));

        assert_eq!(link.process(500).unwrap(), Flow::Passed(500));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let link = EnumLink::new(kind)
            .with(Kind::Large, recorder(&log, "first"))
            .with(Kind::Large, recorder(&log, "second"));

        assert_eq!(link.len(), 1);
        link.process(42).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["second 42"]);
    }

    #[test]
    fn test_otherwise_takes_unregistered_tags() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let link = EnumLink::new(kind)
            .with(Kind::Small, recorder(&log, "small"))
            .with(Kind::Huge, recorder(&log, "huge"))
            .otherwise(recorder(&log, "fallback"));

        link.handle(1).unwrap();
        link.handle(50).unwrap();
        link.handle(1000).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["small 1", "fallback 50", "huge 1000"]);
    }

    #[test]
    fn test_partial_extractor_declines_unmapped() {
        let link = EnumLink::partial(|s: &String| match s.as_str() {
            "small" => Some(Kind::Small),
            _ => None,
        })
        .with(Kind::Small, end_link::of(|_: String| {}));

        assert!(link.process("small".to_string()).unwrap().is_consumed());
        assert_eq!(link.process("other".to_string()).unwrap(), Flow::Passed("other".to_string()));
    }

    #[test]
    fn test_fallible_extractor_aborts() {
        let link = EnumLink::fallible(|s: &String| match s.as_str() {
            "small" => Ok(Kind::Small),
            other => Err(format!("no kind named {}", other)),
        })
        .with(Kind::Small, end_link::of(|_: String| {}));

        match link.process("tiny".to_string()) {
            Err(ChainError::Classification(msg)) => assert_eq!(msg, "no kind named tiny"),
            other => panic!("expected classification failure, got {:?}", other),
        }
    }

    #[test]
    fn test_table_insert_returns_replaced() {
        let mut table: DispatchTable<u32, Kind> = DispatchTable::new();
        assert!(table.insert(Kind::Small, Box::new(end_link::of(|_: u32| {}))).is_none());
        assert!(table.insert(Kind::Small, Box::new(end_link::of(|_: u32| {}))).is_some());
        assert!(table.contains(&Kind::Small));
        assert!(!table.contains(&Kind::Huge));
        assert_eq!(table.route(&Kind::Huge, 7).unwrap(), Flow::Passed(7));
    }
}
