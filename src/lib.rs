//! Composable chains of responsibility
//!
//! This crate provides a small algebra for routing a typed command through
//! a sequence of candidate processors until one of them consumes it.
//!
//! A [`Link`] either consumes a command or hands it back untouched, and
//! links compose with [`Link::chain`] (try this, else that) and
//! [`Link::map`] (change the command type mid-chain). An [`EndLink`] is a
//! link guaranteed to consume, which is what a chain becomes once its last
//! member is total. The [`handler`] module spells the same algebra as a
//! tree of total handlers (`condition`, `either`, `map`, `fan`,
//! `terminal`), and [`Either`] carries the two-way branching between
//! them.
//!
//! Pipelines are built once and then fed commands one at a time. A chain
//! is `Send + Sync` whenever its leaves are, so one instance may be shared
//! between threads.

pub mod either;
pub mod error;
pub mod handler;
pub mod link;
pub mod middleware;

// Re-export main APIs
pub use either::Either;
pub use error::{ChainError, Result, Side};
pub use link::{end_link, Discard, EndLink, EnumLink, Flow, Link, Tag};
pub use middleware::{Metrics, Traced};
