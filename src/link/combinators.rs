// Link combinators
//
// Each combinator owns its children. A combinator is an `EndLink` exactly
// when its shape guarantees consumption, so closing a chain is checked by
// the type system rather than at run time.

use tracing::trace;

use crate::either::Either;
use crate::error::{ChainError, Result};
use crate::link::{EndLink, Flow, Link};

/// `first`, then `next` on the same command if `first` declined.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    next: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, next: B) -> Self {
        Self { first, next }
    }
}

impl<C, A, B> Link<C> for Chain<A, B>
where
    A: Link<C>,
    B: Link<C>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        match self.first.process(command)? {
            Flow::Consumed => Ok(Flow::Consumed),
            Flow::Passed(command) => {
                trace!("chain: declined, trying next");
                self.next.process(command)
            }
        }
    }
}

impl<C, A, B> EndLink<C> for Chain<A, B>
where
    A: Link<C>,
    B: EndLink<C>,
{
    fn handle(&self, command: C) -> Result<()> {
        match self.first.process(command)? {
            Flow::Consumed => Ok(()),
            Flow::Passed(command) => self.next.handle(command),
        }
    }
}

/// `first`, then `next` on a mapped view of the command if `first` declined.
#[derive(Debug, Clone)]
pub struct Map<A, F, N> {
    first: A,
    mapper: F,
    next: N,
}

impl<A, F, N> Map<A, F, N> {
    pub fn new(first: A, mapper: F, next: N) -> Self {
        Self { first, mapper, next }
    }
}

impl<C, D, A, F, N> Link<C> for Map<A, F, N>
where
    A: Link<C>,
    F: Fn(&C) -> D,
    N: Link<D>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        let command = match self.first.process(command)? {
            Flow::Consumed => return Ok(Flow::Consumed),
            Flow::Passed(command) => command,
        };
        match self.next.process((self.mapper)(&command))? {
            Flow::Consumed => Ok(Flow::Consumed),
            Flow::Passed(_) => Ok(Flow::Passed(command)),
        }
    }
}

/// Consumes, through `end`, exactly the commands matching `predicate`.
#[derive(Debug, Clone)]
pub struct Guard<P, E> {
    predicate: P,
    end: E,
}

impl<P, E> Guard<P, E> {
    pub fn new(predicate: P, end: E) -> Self {
        Self { predicate, end }
    }
}

impl<C, P, E> Link<C> for Guard<P, E>
where
    P: Fn(&C) -> bool,
    E: EndLink<C>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        if (self.predicate)(&command) {
            self.end.handle(command)?;
            Ok(Flow::Consumed)
        } else {
            Ok(Flow::Passed(command))
        }
    }
}

/// Offers a borrowed, mapped view of the command to `next`.
///
/// If `next` declines, the original command is handed back.
#[derive(Debug, Clone)]
pub struct Adapt<F, N> {
    mapper: F,
    next: N,
}

impl<F, N> Adapt<F, N> {
    pub fn new(mapper: F, next: N) -> Self {
        Self { mapper, next }
    }
}

impl<C, D, F, N> Link<C> for Adapt<F, N>
where
    F: Fn(&C) -> D,
    N: Link<D>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        match self.next.process((self.mapper)(&command))? {
            Flow::Consumed => Ok(Flow::Consumed),
            Flow::Passed(_) => Ok(Flow::Passed(command)),
        }
    }
}

/// Converts the command by value and hands it to a terminal `next`.
#[derive(Debug, Clone)]
pub struct Convert<F, N> {
    mapper: F,
    next: N,
}

impl<F, N> Convert<F, N> {
    pub fn new(mapper: F, next: N) -> Self {
        Self { mapper, next }
    }
}

impl<C, D, F, N> Link<C> for Convert<F, N>
where
    F: Fn(C) -> D,
    N: EndLink<D>,
{
    fn process(&self, command: C) -> Result<Flow<C>> {
        self.handle(command)?;
        Ok(Flow::Consumed)
    }
}

impl<C, D, F, N> EndLink<C> for Convert<F, N>
where
    F: Fn(C) -> D,
    N: EndLink<D>,
{
    fn handle(&self, command: C) -> Result<()> {
        self.next.handle((self.mapper)(command))
    }
}

/// Routes an [`Either`] to the link paired with its active arm.
#[derive(Debug, Clone)]
pub struct Branch<LL, RL> {
    left: LL,
    right: RL,
}

impl<LL, RL> Branch<LL, RL> {
    pub fn new(left: LL, right: RL) -> Self {
        Self { left, right }
    }
}

impl<L, R, LL, RL> Link<Either<L, R>> for Branch<LL, RL>
where
    LL: Link<L>,
    RL: Link<R>,
{
    fn process(&self, command: Either<L, R>) -> Result<Flow<Either<L, R>>> {
        match command {
            Either::Left(l) => Ok(self.left.process(l)?.map(Either::Left)),
            Either::Right(r) => Ok(self.right.process(r)?.map(Either::Right)),
        }
    }
}

impl<L, R, LL, RL> EndLink<Either<L, R>> for Branch<LL, RL>
where
    LL: EndLink<L>,
    RL: EndLink<R>,
{
    fn handle(&self, command: Either<L, R>) -> Result<()> {
        match command {
            Either::Left(l) => self.left.handle(l),
            Either::Right(r) => self.right.handle(r),
        }
    }
}

/// A chain closed without a fallback.
#[derive(Debug, Clone)]
pub struct Sealed<L> {
    inner: L,
}

impl<L> Sealed<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<C, L: Link<C>> Link<C> for Sealed<L> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        self.handle(command)?;
        Ok(Flow::Consumed)
    }
}

impl<C, L: Link<C>> EndLink<C> for Sealed<L> {
    fn handle(&self, command: C) -> Result<()> {
        match self.inner.process(command)? {
            Flow::Consumed => Ok(()),
            Flow::Passed(_) => Err(ChainError::Unconsumed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{self, end_link, Sink};
    use std::cell::RefCell;

    fn is_even(n: &i32) -> bool {
        n % 2 == 0
    }

    #[test]
    fn test_chain_short_circuits_on_first_consumer() {
        let seen = RefCell::new(Vec::new());
        let chain = link::of(is_even, end_link::of(|n: i32| seen.borrow_mut().push(("even", n))))
            .chain(link::of(|_: &i32| true, end_link::of(|n: i32| seen.borrow_mut().push(("any", n)))));

        assert!(chain.process(2).unwrap().is_consumed());
        assert!(chain.process(3).unwrap().is_consumed());
        assert_eq!(*seen.borrow(), vec![("even", 2), ("any", 3)]);
    }

    #[test]
    fn test_chain_hands_back_when_nobody_consumes() {
        let chain = link::of(is_even, end_link::of(|_: i32| {}))
            .chain(link::of(|n: &i32| *n > 100, end_link::of(|_: i32| {})));

        assert_eq!(chain.process(7).unwrap(), Flow::Passed(7));
    }

    #[test]
    fn test_end_chain_takes_the_rest() {
        let rest = RefCell::new(Vec::new());
        let chain = link::of(is_even, end_link::of(|_: i32| {})).end_chain(|n| rest.borrow_mut().push(n));

        chain.handle(1).unwrap();
        chain.handle(2).unwrap();
        chain.handle(5).unwrap();
        assert_eq!(*rest.borrow(), vec![1, 5]);
    }

    #[test]
    fn test_map_offers_mapped_value_and_keeps_original() {
        let lengths = RefCell::new(Vec::new());
        let chain = link::of(|s: &String| s.is_empty(), end_link::of(|_: String| {})).map(
            |s: &String| s.len(),
            link::of(|n: &usize| *n > 3, end_link::of(|n: usize| lengths.borrow_mut().push(n))),
        );

        assert!(chain.process("hello".to_string()).unwrap().is_consumed());
        assert_eq!(chain.process("abc".to_string()).unwrap(), Flow::Passed("abc".to_string()));
        assert_eq!(*lengths.borrow(), vec![5]);
    }

    #[test]
    fn test_adapt_mirrors_delegate() {
        let adapt = link::adapt(|s: &String| s.len(), link::of(|n: &usize| *n == 2, end_link::of(|_: usize| {})));

        assert!(adapt.process("ab".to_string()).unwrap().is_consumed());
        assert_eq!(adapt.process("abc".to_string()).unwrap(), Flow::Passed("abc".to_string()));
    }

    #[test]
    fn test_convert_always_consumes() {
        let out = RefCell::new(Vec::new());
        let convert = link::convert(|n: i32| n * 10, end_link::of(|n: i32| out.borrow_mut().push(n)));

        assert!(convert.process(4).unwrap().is_consumed());
        assert_eq!(*out.borrow(), vec![40]);
    }

    #[test]
    fn test_branch_routes_active_arm_and_hands_back_same_arm() {
        let lefts = RefCell::new(Vec::new());
        let branch = link::either(
            end_link::of(|l: &'static str| lefts.borrow_mut().push(l)),
            link::of(is_even, end_link::of(|_: i32| {})),
        );

        assert!(branch.process(Either::Left("err")).unwrap().is_consumed());
        assert!(branch.process(Either::Right(2)).unwrap().is_consumed());
        assert_eq!(branch.process(Either::Right(3)).unwrap(), Flow::Passed(Either::Right(3)));
        assert_eq!(*lefts.borrow(), vec!["err"]);
    }

    #[test]
    fn test_sealed_fails_on_unconsumed() {
        let sealed = link::of(is_even, end_link::of(|_: i32| {})).seal();

        assert!(sealed.handle(2).is_ok());
        assert!(matches!(sealed.handle(3), Err(ChainError::Unconsumed)));
    }

    #[test]
    fn test_split_classifies_then_routes() {
        let out = RefCell::new(Vec::new());
        let split = link::split(
            |n: i32| if n < 0 { Either::Left(format!("negative {}", n)) } else { Either::Right(n) },
            Sink::new(|e: String| out.borrow_mut().push(e)),
            Sink::new(|n: i32| out.borrow_mut().push(format!("ok {}", n))),
        );

        split.handle(-1).unwrap();
        split.handle(8).unwrap();
        assert_eq!(*out.borrow(), vec!["negative -1".to_string(), "ok 8".to_string()]);
    }
}
