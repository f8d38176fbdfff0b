// Middleware layers for links
//
// These wrappers add cross-cutting concerns like tracing and metrics around
// any stage without changing what it consumes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::link::{EndLink, Flow, Link};

/// Tracing middleware that logs every command offered to the inner link
pub struct Traced<L> {
    inner: L,
    label: String,
}

impl<L> Traced<L> {
    pub fn with_label(inner: L, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn observe<T>(&self, result: &Result<T>, consumed: impl Fn(&T) -> bool, start: Instant) {
        let elapsed = start.elapsed();
        match result {
            Ok(outcome) => debug!(label = %self.label, consumed = consumed(outcome), ?elapsed, "process: done"),
            Err(e) => warn!(label = %self.label, ?elapsed, error = %e, "process: failed"),
        }
    }
}

impl<C, L: Link<C>> Link<C> for Traced<L> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        let start = Instant::now();
        trace!(label = %self.label, "process: start");
        let result = self.inner.process(command);
        self.observe(&result, Flow::is_consumed, start);
        result
    }
}

impl<C, L: EndLink<C>> EndLink<C> for Traced<L> {
    fn handle(&self, command: C) -> Result<()> {
        let start = Instant::now();
        trace!(label = %self.label, "handle: start");
        let result = self.inner.handle(command);
        self.observe(&result, |_| true, start);
        result
    }
}

/// Metrics collection middleware
pub struct Metrics<L> {
    inner: L,
    consumed: AtomicU64,
    passed: AtomicU64,
    failed: AtomicU64,
}

impl<L> Metrics<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            consumed: AtomicU64::new(0),
            passed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn consumed_count(&self) -> u64 {
        self.consumed.load(Ordering::Relaxed)
    }

    pub fn passed_count(&self) -> u64 {
        self.passed.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Every command offered, whatever happened to it.
    pub fn invocations(&self) -> u64 {
        self.consumed_count() + self.passed_count() + self.error_count()
    }

    fn record<T>(&self, result: &Result<T>, consumed: bool) {
        let counter = match result {
            Ok(_) if consumed => &self.consumed,
            Ok(_) => &self.passed,
            Err(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl<C, L: Link<C>> Link<C> for Metrics<L> {
    fn process(&self, command: C) -> Result<Flow<C>> {
        let result = self.inner.process(command);
        let consumed = matches!(result, Ok(Flow::Consumed));
        self.record(&result, consumed);
        result
    }
}

impl<C, L: EndLink<C>> EndLink<C> for Metrics<L> {
    fn handle(&self, command: C) -> Result<()> {
        let result = self.inner.handle(command);
        self.record(&result, true);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{self, end_link};
    use crate::ChainError;

    #[test]
    fn test_metrics_count_outcomes() {
        let metered = link::of(|n: &i32| *n > 0, end_link::try_of(|n: i32| {
            if n > 100 {
                anyhow::bail!("too large");
            }
            Ok(())
        }))
        .metered();

        metered.process(1).unwrap();
        metered.process(-1).unwrap();
        assert!(matches!(metered.process(500), Err(ChainError::Sink(_))));

        assert_eq!(metered.consumed_count(), 1);
        assert_eq!(metered.passed_count(), 1);
        assert_eq!(metered.error_count(), 1);
        assert_eq!(metered.invocations(), 3);
    }

    #[test]
    fn test_traced_is_transparent() {
        let traced = link::of(|n: &i32| *n == 0, end_link::of(|_: i32| {})).traced("zero");

        assert_eq!(traced.label(), "zero");
        assert!(traced.process(0).unwrap().is_consumed());
        assert_eq!(traced.process(3).unwrap(), Flow::Passed(3));
    }

    #[test]
    fn test_traced_end_link_is_transparent() {
        let seen = std::sync::Mutex::new(Vec::new());
        let traced = end_link::try_of(|n: i32| {
            if n < 0 {
                anyhow::bail!("negative");
            }
            seen.lock().unwrap().push(n);
            Ok(())
        })
        .traced("sink");

        traced.handle(5).unwrap();
        assert!(matches!(traced.handle(-5), Err(ChainError::Sink(_))));
        assert_eq!(*seen.lock().unwrap(), vec![5]);
    }
}
