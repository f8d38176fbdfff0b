//! Two-way sum type used to route a command to one of two paths.

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result, Side};

/// Either a left or a right value, fixed at construction.
///
/// By convention mapping steps put the failure shape on the left and the
/// value that continues down the happy path on the right, like `Result`
/// with the arms swapped.
///
/// # Examples
///
/// ```
/// use handoff::Either;
///
/// let parsed: Either<String, u32> = Either::Right(7);
/// assert!(parsed.is_right());
/// assert_eq!(parsed.reduce(|e| e.len() as u32, |n| n * 2), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "side", content = "value", rename_all = "lowercase")]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Construct a left valued `Either`.
    pub fn of_left(value: L) -> Self {
        Either::Left(value)
    }

    /// Construct a right valued `Either`.
    pub fn of_right(value: R) -> Self {
        Either::Right(value)
    }

    pub fn side(&self) -> Side {
        match self {
            Either::Left(_) => Side::Left,
            Either::Right(_) => Side::Right,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        !self.is_left()
    }

    /// Take the left value, failing with [`ChainError::WrongArm`] on a right.
    pub fn left(self) -> Result<L> {
        match self {
            Either::Left(l) => Ok(l),
            Either::Right(_) => Err(ChainError::WrongArm {
                expected: Side::Left,
                found: Side::Right,
            }),
        }
    }

    /// Take the right value, failing with [`ChainError::WrongArm`] on a left.
    pub fn right(self) -> Result<R> {
        match self {
            Either::Right(r) => Ok(r),
            Either::Left(_) => Err(ChainError::WrongArm {
                expected: Side::Right,
                found: Side::Left,
            }),
        }
    }

    pub fn as_left(&self) -> Option<&L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    pub fn as_right(&self) -> Option<&R> {
        match self {
            Either::Right(r) => Some(r),
            Either::Left(_) => None,
        }
    }

    pub fn left_or(self, default: L) -> L {
        self.left_or_else(|| default)
    }

    pub fn left_or_else<F: FnOnce() -> L>(self, supplier: F) -> L {
        match self {
            Either::Left(l) => l,
            Either::Right(_) => supplier(),
        }
    }

    pub fn right_or(self, default: R) -> R {
        self.right_or_else(|| default)
    }

    pub fn right_or_else<F: FnOnce() -> R>(self, supplier: F) -> R {
        match self {
            Either::Right(r) => r,
            Either::Left(_) => supplier(),
        }
    }

    /// Map both arms independently, keeping the active side.
    pub fn map<TL, TR, FL, FR>(self, left: FL, right: FR) -> Either<TL, TR>
    where
        FL: FnOnce(L) -> TL,
        FR: FnOnce(R) -> TR,
    {
        match self {
            Either::Left(l) => Either::Left(left(l)),
            Either::Right(r) => Either::Right(right(r)),
        }
    }

    pub fn map_left<TL, F: FnOnce(L) -> TL>(self, f: F) -> Either<TL, R> {
        self.map(f, |r| r)
    }

    pub fn map_right<TR, F: FnOnce(R) -> TR>(self, f: F) -> Either<L, TR> {
        self.map(|l| l, f)
    }

    /// Fold both arms into a common type.
    pub fn reduce<T, FL, FR>(self, left: FL, right: FR) -> T
    where
        FL: FnOnce(L) -> T,
        FR: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left(l),
            Either::Right(r) => right(r),
        }
    }

    /// Run the side effect paired with the active arm.
    pub fn consume<FL, FR>(self, left: FL, right: FR)
    where
        FL: FnOnce(L),
        FR: FnOnce(R),
    {
        self.reduce(left, right)
    }

    pub fn flip(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// `Right` becomes `Ok`, `Left` becomes `Err`.
    pub fn into_result(self) -> std::result::Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }
}

impl<L, R> From<std::result::Result<R, L>> for Either<L, R> {
    fn from(result: std::result::Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_exactly_one_side() {
        let left: Either<i32, &str> = Either::of_left(1);
        let right: Either<i32, &str> = Either::of_right("r");

        assert!(left.is_left() && !left.is_right());
        assert!(right.is_right() && !right.is_left());
        assert_eq!(left.side(), Side::Left);
        assert_eq!(right.side(), Side::Right);
    }

    #[test]
    fn test_wrong_arm_fails() {
        let left: Either<i32, &str> = Either::Left(1);
        match left.right() {
            Err(ChainError::WrongArm { expected, found }) => {
                assert_eq!(expected, Side::Right);
                assert_eq!(found, Side::Left);
            }
            other => panic!("expected WrongArm, got {:?}", other),
        }
        assert!(Either::<i32, &str>::Right("r").left().is_err());
        assert_eq!(Either::<i32, &str>::Left(4).left().unwrap(), 4);
    }

    #[test]
    fn test_only_active_function_runs() {
        let left_calls = Cell::new(0);
        let right_calls = Cell::new(0);

        Either::<i32, i32>::Right(3).consume(
            |_| left_calls.set(left_calls.get() + 1),
            |_| right_calls.set(right_calls.get() + 1),
        );
        assert_eq!((left_calls.get(), right_calls.get()), (0, 1));

        let mapped = Either::<i32, i32>::Left(3).map(
            |l| {
                left_calls.set(left_calls.get() + 1);
                l + 1
            },
            |r| {
                right_calls.set(right_calls.get() + 1);
                r
            },
        );
        assert_eq!(mapped, Either::Left(4));
        assert_eq!((left_calls.get(), right_calls.get()), (1, 1));
    }

    #[test]
    fn test_defaults_and_conversions() {
        assert_eq!(Either::<i32, &str>::Right("r").left_or(9), 9);
        assert_eq!(Either::<i32, &str>::Left(2).left_or_else(|| 9), 2);
        assert_eq!(Either::<i32, &str>::Left(2).right_or("d"), "d");
        assert_eq!(Either::<i32, &str>::Left(2).flip(), Either::Right(2));

        let from_err: Either<&str, i32> = Err("bad").into();
        assert_eq!(from_err, Either::Left("bad"));
        assert_eq!(Either::<&str, i32>::Right(5).into_result(), Ok(5));
    }

    #[test]
    fn test_serialized_shape() {
        let value: Either<String, u32> = Either::Right(3);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"side":"right","value":3}"#);
        assert_eq!(serde_json::from_str::<Either<String, u32>>(&json).unwrap(), value);
    }
}
