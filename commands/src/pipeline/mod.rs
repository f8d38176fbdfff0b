//! Assembled dispatch pipelines
//!
//! Both pipelines route a [`Command`](crate::Command) by source to the
//! text or JSON parser, then by command name to a per-type sink. They
//! differ in the half of the algebra they are written with:
//! [`CommandChain`] tries links in turn, [`CommandHandler`] branches a
//! tree of total handlers.

pub mod chain;
pub mod handler;

pub use chain::CommandChain;
pub use handler::CommandHandler;
